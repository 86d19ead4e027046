use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::QueryError;

/// Divisor used for every byte -> gigabyte conversion (RAM and storage).
pub const BYTES_PER_GB: f64 = 1_073_741_824.0;

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

#[derive(Debug, Clone, Serialize)]
pub struct HardwareSnapshot {
    pub cpu: Collected<CpuInfo>,
    pub motherboard: Collected<String>,
    pub gpu: Collected<GpuInfo>,
    pub ram: RamInfo,
    pub storage: StorageReport,
}

/// Why a category (or one entry of it) holds a placeholder instead of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentinelKind {
    CapabilityUnavailable,
    NotFound,
    CategoryFailure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentinel {
    pub kind: SentinelKind,
    pub message: String,
}

impl Sentinel {
    pub fn capability_unavailable(message: impl Into<String>) -> Self {
        Self { kind: SentinelKind::CapabilityUnavailable, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { kind: SentinelKind::NotFound, message: message.into() }
    }

    pub fn category_failure(message: impl Into<String>) -> Self {
        Self { kind: SentinelKind::CategoryFailure, message: message.into() }
    }

    /// Sentinel for a category whose backend is missing or refused the query.
    pub fn from_query_error(err: &QueryError) -> Self {
        Self::capability_unavailable(format!("Error: {}", err))
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A queried value, or the sentinel that stands in for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collected<T> {
    Value(T),
    Sentinel(Sentinel),
}

impl<T> Collected<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Collected::Value(v) => Some(v),
            Collected::Sentinel(_) => None,
        }
    }

    pub fn sentinel(&self) -> Option<&Sentinel> {
        match self {
            Collected::Value(_) => None,
            Collected::Sentinel(s) => Some(s),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Collected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collected::Value(v) => fmt::Display::fmt(v, f),
            Collected::Sentinel(s) => fmt::Display::fmt(s, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuInfo {
    pub brand: String,
    pub physical_cores: usize,
    pub logical_cores: usize,
}

impl fmt::Display for CpuInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\nCores: {}, Threads: {}",
            self.brand, self.physical_cores, self.logical_cores
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RamInfo {
    pub total_gigabytes: f64,
    pub modules: Vec<Collected<RamModule>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RamModule {
    pub capacity_gigabytes: f64,
    pub speed_mhz: Option<u32>, // None renders as "Unknown"
}

impl fmt::Display for RamModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speed_mhz {
            Some(speed) => write!(
                f,
                "Capacity: {:.2} GB, Speed: {} MHz",
                self.capacity_gigabytes, speed
            ),
            None => write!(f, "Capacity: {:.2} GB, Speed: Unknown MHz", self.capacity_gigabytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuInfo {
    pub adapters: Vec<String>,
}

impl fmt::Display for GpuInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.adapters.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaType {
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "HDD")]
    Hdd,
    Unknown,
}

impl MediaType {
    /// Maps a storage-namespace media code. The table is fixed: 4 is solid
    /// state, 3 is rotational, everything else is unknown.
    pub fn from_code(code: u16) -> Self {
        match code {
            4 => MediaType::Ssd,
            3 => MediaType::Hdd,
            _ => MediaType::Unknown,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Ssd => write!(f, "SSD"),
            MediaType::Hdd => write!(f, "HDD"),
            MediaType::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageDevice {
    pub size_gigabytes: f64,
    pub media_type: MediaType,
}

impl fmt::Display for StorageDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} GB ({})", self.size_gigabytes, self.media_type)
    }
}

/// Storage is all-or-nothing: either every enumerated disk, or one failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageReport {
    Devices(BTreeMap<String, StorageDevice>),
    Failed(Sentinel),
}

impl StorageReport {
    /// Key used for the single entry shown when enumeration failed.
    pub const ERROR_KEY: &'static str = "Error";

    /// Flattens the report into the name -> text mapping the renderer shows.
    pub fn display_entries(&self) -> Vec<(String, String)> {
        match self {
            StorageReport::Devices(devices) => devices
                .iter()
                .map(|(name, device)| (name.clone(), device.to_string()))
                .collect(),
            StorageReport::Failed(sentinel) => {
                vec![(Self::ERROR_KEY.to_string(), sentinel.message.clone())]
            }
        }
    }
}
