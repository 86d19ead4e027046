//! Windows backends over WMI.
//!
//! The general namespace is `root\cimv2`; physical disks come from the
//! storage management namespace. Each query initializes COM and opens its
//! own connection, both released when they drop at the end of the call.

use serde::Deserialize;
use wmi::{COMLibrary, Variant, WMIConnection};

use crate::hardware::source::{
    BaseBoardRecord, Capability, HardwareManagement, MemoryModuleRecord, PhysicalDiskRecord,
    QueryResult, StorageManagement, VideoControllerRecord,
};

const STORAGE_NAMESPACE: &str = "root\\Microsoft\\Windows\\Storage";

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_BaseBoard")]
#[serde(rename_all = "PascalCase")]
struct Win32BaseBoard {
    manufacturer: Option<String>,
    product: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_PhysicalMemory")]
#[serde(rename_all = "PascalCase")]
struct Win32PhysicalMemory {
    capacity: Option<u64>,
    speed: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_VideoController")]
#[serde(rename_all = "PascalCase")]
struct Win32VideoController {
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "MSFT_PhysicalDisk")]
#[serde(rename_all = "PascalCase")]
struct MsftPhysicalDisk {
    friendly_name: Option<String>,
    #[serde(rename = "DeviceId")]
    device_id: Option<String>,
    media_type: Option<u16>,
    size: Option<Variant>,
}

fn connect(namespace: Option<&str>) -> QueryResult<WMIConnection> {
    let com = COMLibrary::new()?;
    let connection = match namespace {
        Some(path) => WMIConnection::with_namespace_path(path, com)?,
        None => WMIConnection::new(com)?,
    };
    Ok(connection)
}

/// Renders a WMI size property as text; uint64 values may arrive either
/// as numbers or as strings depending on the provider.
fn variant_to_text(value: Variant) -> Option<String> {
    match value {
        Variant::String(s) => Some(s),
        Variant::UI8(n) => Some(n.to_string()),
        Variant::I8(n) => Some(n.to_string()),
        Variant::UI4(n) => Some(n.to_string()),
        Variant::I4(n) => Some(n.to_string()),
        Variant::Null | Variant::Empty => None,
        other => Some(format!("{:?}", other)),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WmiManagement;

impl Capability for WmiManagement {
    fn name(&self) -> &str {
        "WMI (root\\cimv2)"
    }

    fn is_available(&self) -> bool {
        connect(None).is_ok()
    }
}

impl HardwareManagement for WmiManagement {
    fn base_boards(&self) -> QueryResult<Vec<BaseBoardRecord>> {
        let wmi = connect(None)?;
        let boards: Vec<Win32BaseBoard> =
            wmi.raw_query("SELECT Manufacturer, Product FROM Win32_BaseBoard")?;

        Ok(boards
            .into_iter()
            .map(|b| BaseBoardRecord {
                manufacturer: b.manufacturer,
                product: b.product,
            })
            .collect())
    }

    fn memory_modules(&self) -> QueryResult<Vec<MemoryModuleRecord>> {
        let wmi = connect(None)?;
        let sticks: Vec<Win32PhysicalMemory> =
            wmi.raw_query("SELECT Capacity, Speed FROM Win32_PhysicalMemory")?;

        Ok(sticks
            .into_iter()
            .map(|s| MemoryModuleRecord {
                capacity_bytes: s.capacity,
                speed_mhz: s.speed,
            })
            .collect())
    }

    fn video_controllers(&self) -> QueryResult<Vec<VideoControllerRecord>> {
        let wmi = connect(None)?;
        let adapters: Vec<Win32VideoController> =
            wmi.raw_query("SELECT Name FROM Win32_VideoController")?;

        Ok(adapters
            .into_iter()
            .map(|a| VideoControllerRecord { name: a.name })
            .collect())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WmiStorage;

impl Capability for WmiStorage {
    fn name(&self) -> &str {
        "WMI storage namespace (root\\Microsoft\\Windows\\Storage)"
    }

    fn is_available(&self) -> bool {
        connect(Some(STORAGE_NAMESPACE)).is_ok()
    }
}

impl StorageManagement for WmiStorage {
    fn physical_disks(&self) -> QueryResult<Vec<PhysicalDiskRecord>> {
        let wmi = connect(Some(STORAGE_NAMESPACE))?;
        let disks: Vec<MsftPhysicalDisk> = wmi.raw_query(
            "SELECT FriendlyName, DeviceId, MediaType, Size FROM MSFT_PhysicalDisk",
        )?;

        Ok(disks
            .into_iter()
            .map(|d| PhysicalDiskRecord {
                friendly_name: d.friendly_name,
                device_id: d.device_id,
                media_type: d.media_type,
                size: d.size.and_then(variant_to_text),
            })
            .collect())
    }
}
