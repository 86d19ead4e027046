use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::QueryError;
use crate::hardware::source::{PhysicalDiskRecord, QueryResult, StorageManagement};
use crate::hardware::types::{MediaType, Sentinel, StorageDevice, StorageReport, BYTES_PER_GB};

/// Entry point: enumerate physical disks through the storage namespace.
///
/// Unlike the other categories this one is all-or-nothing: any failure in
/// the enumeration replaces the whole result with a single error entry.
pub fn collect_storage(storage: &dyn StorageManagement) -> StorageReport {
    match enumerate_disks(storage) {
        Ok(devices) => {
            debug!("Found {} physical disk(s)", devices.len());
            StorageReport::Devices(devices)
        }
        Err(e) => {
            warn!("Storage enumeration failed: {}", e);
            StorageReport::Failed(Sentinel::category_failure(e.to_string()))
        }
    }
}

fn enumerate_disks(storage: &dyn StorageManagement) -> QueryResult<BTreeMap<String, StorageDevice>> {
    if !storage.is_available() {
        return Err(QueryError::unavailable(storage.name()));
    }

    let mut devices = BTreeMap::new();
    for disk in storage.physical_disks()? {
        let name = disk_name(&disk);
        let device = StorageDevice {
            size_gigabytes: parse_size_gb(disk.size.as_deref()),
            media_type: disk.media_type.map(MediaType::from_code).unwrap_or(MediaType::Unknown),
        };
        // Duplicate names: the later disk wins
        devices.insert(name, device);
    }
    Ok(devices)
}

/// Friendly name with surrounding whitespace removed, or the device id when
/// nothing is left of it.
fn disk_name(disk: &PhysicalDiskRecord) -> String {
    let friendly = disk.friendly_name.as_deref().map(str::trim).unwrap_or("");
    if !friendly.is_empty() {
        return friendly.to_string();
    }
    disk.device_id.clone().unwrap_or_else(|| "Unknown Disk".to_string())
}

/// Raw byte count -> GB; anything unparseable counts as zero.
fn parse_size_gb(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|bytes| bytes.is_finite() && *bytes >= 0.0)
        .map(|bytes| bytes / BYTES_PER_GB)
        .unwrap_or(0.0)
}
