//! Linux backends: SMBIOS tables and sysfs.
//!
//! The general namespace reads boards and memory devices from the SMBIOS
//! tables and display adapters from the PCI bus; the storage namespace reads
//! `/sys/block`. Every query re-reads its sources; nothing is cached.

use std::fs;
use std::path::{Path, PathBuf};

use pciid_parser::Database;
use smbioslib::*;
use tracing::debug;

use crate::error::QueryError;
use crate::hardware::source::{
    BaseBoardRecord, Capability, HardwareManagement, MemoryModuleRecord, PhysicalDiskRecord,
    QueryResult, StorageManagement, VideoControllerRecord,
};

const SECTOR_SIZE: u64 = 512;

/// Media codes shared with the storage namespace on other platforms.
const MEDIA_CODE_HDD: u16 = 3;
const MEDIA_CODE_SSD: u16 = 4;

pub struct SysfsManagement {
    dmi_table: PathBuf,
    dmi_id_dir: PathBuf,
    pci_devices_dir: PathBuf,
}

impl Default for SysfsManagement {
    fn default() -> Self {
        Self::with_root("/")
    }
}

impl SysfsManagement {
    /// Reads everything relative to `root` instead of `/`.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            dmi_table: root.join("sys/firmware/dmi/tables/DMI"),
            dmi_id_dir: root.join("sys/class/dmi/id"),
            pci_devices_dir: root.join("sys/bus/pci/devices"),
        }
    }

    fn load_smbios(&self) -> QueryResult<SMBiosData> {
        match SMBiosData::try_load_from_file(&self.dmi_table.to_string_lossy(), None) {
            Ok(data) => Ok(data),
            Err(_) => {
                // Some kernels expose the table without the entry point
                let table_data = fs::read(&self.dmi_table).map_err(|e| {
                    QueryError::unavailable(format!(
                        "SMBIOS tables at {} ({})",
                        self.dmi_table.display(),
                        e
                    ))
                })?;
                Ok(SMBiosData::from_vec_and_version(table_data, None))
            }
        }
    }

    fn boards_from_dmi_id(&self) -> Vec<BaseBoardRecord> {
        let product = read_to_string_trim(self.dmi_id_dir.join("board_name"));
        let manufacturer = read_to_string_trim(self.dmi_id_dir.join("board_vendor"));

        if product.is_none() && manufacturer.is_none() {
            return Vec::new();
        }
        vec![BaseBoardRecord { manufacturer, product }]
    }
}

impl Capability for SysfsManagement {
    fn name(&self) -> &str {
        "SMBIOS/sysfs hardware interface"
    }

    fn is_available(&self) -> bool {
        self.dmi_table.exists() || self.dmi_id_dir.exists() || self.pci_devices_dir.exists()
    }
}

impl HardwareManagement for SysfsManagement {
    fn base_boards(&self) -> QueryResult<Vec<BaseBoardRecord>> {
        match self.load_smbios() {
            Ok(smbios) => {
                let mut boards = Vec::new();
                for structure in smbios.iter() {
                    if let DefinedStruct::BaseBoardInformation(board) = structure.defined_struct() {
                        boards.push(BaseBoardRecord {
                            manufacturer: specified(board.manufacturer().to_utf8_lossy()),
                            product: specified(board.product().to_utf8_lossy()),
                        });
                    }
                }
                if !boards.is_empty() {
                    return Ok(boards);
                }
            }
            Err(e) => debug!("SMBIOS unreadable, falling back to dmi id: {}", e),
        }

        Ok(self.boards_from_dmi_id())
    }

    fn memory_modules(&self) -> QueryResult<Vec<MemoryModuleRecord>> {
        let smbios = self.load_smbios()?;
        let mut modules = Vec::new();

        for structure in smbios.iter() {
            if let DefinedStruct::MemoryDevice(device) = structure.defined_struct() {
                // Empty slots are listed too; only report populated ones
                if let Some(capacity_bytes) = module_size_bytes(&device) {
                    modules.push(MemoryModuleRecord {
                        capacity_bytes: Some(capacity_bytes),
                        speed_mhz: module_speed(&device),
                    });
                }
            }
        }

        Ok(modules)
    }

    fn video_controllers(&self) -> QueryResult<Vec<VideoControllerRecord>> {
        let mut device_paths = fs::read_dir(&self.pci_devices_dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        // read_dir order is arbitrary; report adapters in bus order
        device_paths.sort();

        // pci.ids is optional; without it adapters are named by their ids
        let db = Database::read().ok();
        let mut controllers = Vec::new();

        for device_path in device_paths {

            let is_display = read_to_string_trim(device_path.join("class"))
                .map(|class_id| is_gpu_class(&class_id))
                .unwrap_or(false);
            if !is_display {
                continue;
            }

            let vendor_id = read_hex_file(&device_path.join("vendor"));
            let device_id = read_hex_file(&device_path.join("device"));
            let name = match (vendor_id, device_id) {
                (Some(vendor_id), Some(device_id)) => {
                    Some(pci_display_name(db.as_ref(), vendor_id, device_id))
                }
                _ => None,
            };

            controllers.push(VideoControllerRecord { name });
        }

        Ok(controllers)
    }
}

pub struct SysfsStorage {
    block_dir: PathBuf,
}

impl Default for SysfsStorage {
    fn default() -> Self {
        Self::with_root("/")
    }
}

impl SysfsStorage {
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            block_dir: root.as_ref().join("sys/block"),
        }
    }
}

impl Capability for SysfsStorage {
    fn name(&self) -> &str {
        "sysfs block device interface"
    }

    fn is_available(&self) -> bool {
        self.block_dir.is_dir()
    }
}

impl StorageManagement for SysfsStorage {
    fn physical_disks(&self) -> QueryResult<Vec<PhysicalDiskRecord>> {
        let mut disks = Vec::new();

        for entry in fs::read_dir(&self.block_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();

            // Skip virtual / non-physical devices
            if name.starts_with("loop")
                || name.starts_with("ram")
                || name.starts_with("dm-")
                || name.starts_with("zram")
            {
                continue;
            }

            let sys_path = entry.path();

            // Model is left untrimmed; SATA models come space-padded
            let friendly_name = fs::read_to_string(sys_path.join("device/model"))
                .ok()
                .map(|m| m.trim_end_matches('\n').to_string());

            let media_type = match read_to_string_trim(sys_path.join("queue/rotational")).as_deref() {
                Some("0") => Some(MEDIA_CODE_SSD),
                Some("1") => Some(MEDIA_CODE_HDD),
                _ => None,
            };

            // An out-of-range sector count is reported as no size at all
            let size = read_to_string_trim(sys_path.join("size")).and_then(|sectors| {
                match sectors.parse::<u64>() {
                    Ok(count) => count.checked_mul(SECTOR_SIZE).map(|bytes| bytes.to_string()),
                    Err(_) => Some(sectors),
                }
            });

            disks.push(PhysicalDiskRecord {
                friendly_name,
                device_id: Some(format!("/dev/{}", name)),
                media_type,
                size,
            });
        }

        disks.sort_by(|a, b| a.device_id.cmp(&b.device_id));
        Ok(disks)
    }
}

//
// Helper functions
//

fn read_to_string_trim<P: AsRef<Path>>(path: P) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn read_hex_file(path: &Path) -> Option<u16> {
    let content = read_to_string_trim(path)?;
    let hex_str = content.strip_prefix("0x").unwrap_or(content.as_str());
    u16::from_str_radix(hex_str, 16).ok()
}

fn specified(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "Not Specified" && s != "To Be Filled By O.E.M." && s != "Default string")
}

fn is_gpu_class(class_id: &str) -> bool {
    // 0x0300xx VGA/3D controllers, 0x0380xx other display controllers
    class_id.starts_with("0x0300") || class_id.starts_with("0x0302") || class_id.starts_with("0x0380")
}

fn pci_display_name(db: Option<&Database>, vendor_id: u16, device_id: u16) -> String {
    let vendor = db.and_then(|db| db.vendors.get(&vendor_id));
    match vendor {
        Some(vendor) => match vendor.devices.get(&device_id) {
            Some(device) => format!("{} {}", vendor.name, device.name),
            None => format!("{} Device [{:04x}]", vendor.name, device_id),
        },
        None => format!("PCI Display Adapter [{:04x}:{:04x}]", vendor_id, device_id),
    }
}

fn module_size_bytes(device: &SMBiosMemoryDevice) -> Option<u64> {
    let bytes = match device.size()? {
        MemorySize::Kilobytes(kb) => kb as u64 * 1024,
        MemorySize::Megabytes(mb) => mb as u64 * 1024 * 1024,
        MemorySize::SeeExtendedSize => match device.extended_size()? {
            MemorySizeExtended::Megabytes(mb) => mb as u64 * 1024 * 1024,
            _ => 0,
        },
        _ => 0,
    };
    Some(bytes).filter(|b| *b > 0)
}

fn module_speed(device: &SMBiosMemoryDevice) -> Option<u32> {
    let speed = device.configured_memory_speed().or_else(|| device.speed())?;
    match speed {
        MemorySpeed::MTs(mts) if mts > 0 => Some(mts as u32),
        _ => None,
    }
}
