use tracing::debug;

use crate::hardware;
use crate::hardware::source::Sources;
use crate::hardware::source_sysinfo::{SysinfoCpu, SysinfoMemory};
use crate::hardware::types::HardwareSnapshot;

#[cfg(target_os = "linux")]
use crate::hardware::source_linux::{SysfsManagement, SysfsStorage};
#[cfg(windows)]
use crate::hardware::source_windows::{WmiManagement, WmiStorage};
#[cfg(not(any(target_os = "linux", windows)))]
use crate::hardware::source::Unsupported;

/// Takes one snapshot of this machine using the platform's own backends.
pub fn gather_system_info() -> HardwareSnapshot {
    #[cfg(target_os = "linux")]
    let (management, storage) = (SysfsManagement::default(), SysfsStorage::default());

    #[cfg(windows)]
    let (management, storage) = (WmiManagement, WmiStorage);

    #[cfg(not(any(target_os = "linux", windows)))]
    let (management, storage) = (Unsupported, Unsupported);

    let sources = Sources {
        cpu: &SysinfoCpu,
        memory: &SysinfoMemory,
        management: &management,
        storage: &storage,
    };
    gather_with(&sources)
}

/// Runs the five category collectors in order. Each one folds its own
/// failures into sentinels, so this never fails.
pub fn gather_with(sources: &Sources<'_>) -> HardwareSnapshot {
    debug!("Collecting hardware snapshot");

    let cpu = hardware::collect_cpu(sources.cpu);
    let motherboard = hardware::collect_motherboard(sources.management);
    let ram = hardware::collect_ram(sources.memory, sources.management);
    let gpu = hardware::collect_gpu(sources.management);
    let storage = hardware::collect_storage(sources.storage);

    HardwareSnapshot {
        cpu,
        motherboard,
        gpu,
        ram,
        storage,
    }
}
