// Hardware inventory collection modules
pub mod types;
pub mod source;
pub mod source_sysinfo;
#[cfg(target_os = "linux")]
pub mod source_linux;
#[cfg(windows)]
pub mod source_windows;
pub mod collect_cpu;
pub mod collect_motherboard;
pub mod collect_memory;
pub mod collect_gpus;
pub mod collect_storage;
pub mod collector;

// Re-export main collection functions
pub use collect_cpu::collect_cpu;
pub use collect_motherboard::collect_motherboard;
pub use collect_memory::collect_ram;
pub use collect_gpus::collect_gpu;
pub use collect_storage::collect_storage;
pub use collector::gather_system_info;
