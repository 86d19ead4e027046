//! CPU and memory accounting through the sysinfo crate (every platform).

use sysinfo::System;

use crate::error::QueryError;
use crate::hardware::source::{Capability, CpuIntrospection, CpuRecord, MemoryAccounting, QueryResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoCpu;

impl Capability for SysinfoCpu {
    fn name(&self) -> &str {
        "CPU introspection (sysinfo)"
    }

    fn is_available(&self) -> bool {
        sysinfo::IS_SUPPORTED_SYSTEM
    }
}

impl CpuIntrospection for SysinfoCpu {
    fn read_cpu(&self) -> QueryResult<CpuRecord> {
        let mut sys = System::new();
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(QueryError::query("no processors reported"));
        }

        let brand = Some(cpus[0].brand().trim().to_string()).filter(|b| !b.is_empty());

        Ok(CpuRecord {
            brand,
            physical_cores: sys.physical_core_count(),
            logical_cores: cpus.len(),
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoMemory;

impl MemoryAccounting for SysinfoMemory {
    fn total_bytes(&self) -> u64 {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.total_memory()
    }
}
