use tracing::{debug, warn};

use crate::error::QueryError;
use crate::hardware::source::HardwareManagement;
use crate::hardware::types::{Collected, GpuInfo, Sentinel};

pub const NO_GPU_FOUND: &str = "No GPU found";

pub fn collect_gpu(management: &dyn HardwareManagement) -> Collected<GpuInfo> {
    if !management.is_available() {
        warn!("{} not available, skipping GPU", management.name());
        return Collected::Sentinel(Sentinel::from_query_error(&QueryError::unavailable(
            management.name(),
        )));
    }

    let controllers = match management.video_controllers() {
        Ok(controllers) => controllers,
        Err(e) => {
            warn!("Display adapter query failed: {}", e);
            return Collected::Sentinel(Sentinel::from_query_error(&e));
        }
    };

    // Adapters reporting no name are skipped rather than shown blank
    let adapters: Vec<String> = controllers
        .into_iter()
        .filter_map(|c| c.name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    debug!("Found {} display adapter(s)", adapters.len());

    if adapters.is_empty() {
        return Collected::Sentinel(Sentinel::not_found(NO_GPU_FOUND));
    }
    Collected::Value(GpuInfo { adapters })
}
