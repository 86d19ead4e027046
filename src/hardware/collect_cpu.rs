use tracing::{debug, warn};

use crate::error::QueryError;
use crate::hardware::source::CpuIntrospection;
use crate::hardware::types::{Collected, CpuInfo, Sentinel};

const UNKNOWN_BRAND: &str = "Unknown CPU";

pub fn collect_cpu(cpu: &dyn CpuIntrospection) -> Collected<CpuInfo> {
    if !cpu.is_available() {
        warn!("{} not available, skipping CPU", cpu.name());
        return Collected::Sentinel(Sentinel::from_query_error(&QueryError::unavailable(cpu.name())));
    }

    let record = match cpu.read_cpu() {
        Ok(record) => record,
        Err(e) => {
            warn!("CPU query failed: {}", e);
            return Collected::Sentinel(Sentinel::from_query_error(&e));
        }
    };

    let brand = record
        .brand
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| UNKNOWN_BRAND.to_string());

    // Some hypervisors hide topology; report threads as cores then
    let physical_cores = record.physical_cores.unwrap_or(record.logical_cores);

    debug!("CPU: {} ({} cores / {} threads)", brand, physical_cores, record.logical_cores);

    Collected::Value(CpuInfo {
        brand,
        physical_cores,
        logical_cores: record.logical_cores,
    })
}
