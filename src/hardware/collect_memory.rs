use tracing::{debug, warn};

use crate::error::QueryError;
use crate::hardware::source::{HardwareManagement, MemoryAccounting};
use crate::hardware::types::{bytes_to_gb, Collected, RamInfo, RamModule, Sentinel};

/// Total memory always comes from memory accounting; per-module detail is
/// best effort and degrades to a single sentinel entry.
pub fn collect_ram(memory: &dyn MemoryAccounting, management: &dyn HardwareManagement) -> RamInfo {
    let total_gigabytes = bytes_to_gb(memory.total_bytes());
    debug!("Total memory: {:.2} GB", total_gigabytes);

    RamInfo {
        total_gigabytes,
        modules: collect_modules(management),
    }
}

fn collect_modules(management: &dyn HardwareManagement) -> Vec<Collected<RamModule>> {
    if !management.is_available() {
        warn!("{} not available, skipping memory modules", management.name());
        let err = QueryError::unavailable(management.name());
        return vec![Collected::Sentinel(Sentinel::from_query_error(&err))];
    }

    match management.memory_modules() {
        Ok(records) => {
            debug!("Found {} memory module(s)", records.len());
            records
                .into_iter()
                .map(|record| {
                    Collected::Value(RamModule {
                        capacity_gigabytes: record.capacity_bytes.map(bytes_to_gb).unwrap_or(0.0),
                        speed_mhz: record.speed_mhz.filter(|speed| *speed > 0),
                    })
                })
                .collect()
        }
        Err(e) => {
            warn!("Memory module query failed: {}", e);
            vec![Collected::Sentinel(Sentinel::from_query_error(&e))]
        }
    }
}
