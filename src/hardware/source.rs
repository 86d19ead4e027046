//! Capability contracts for the OS introspection layers the collectors read.
//!
//! Every backend reports whether it can run at all (`is_available`) before
//! any query is attempted, so collectors can tell "the facility is missing"
//! apart from "the facility answered with nothing". Implementations open a
//! fresh handle inside each query and drop it before returning.

use crate::error::QueryError;

pub type QueryResult<T> = std::result::Result<T, QueryError>;

pub trait Capability {
    /// Human-readable name of the facility, used in sentinel messages.
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;
}

/// Raw CPU fields as the OS reports them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuRecord {
    pub brand: Option<String>,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseBoardRecord {
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryModuleRecord {
    pub capacity_bytes: Option<u64>,
    pub speed_mhz: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoControllerRecord {
    pub name: Option<String>,
}

/// One physical disk from the storage namespace.
///
/// `size` stays textual because the storage namespace hands 64-bit sizes
/// back as strings; parsing (and defaulting) happens in the collector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhysicalDiskRecord {
    pub friendly_name: Option<String>,
    pub device_id: Option<String>,
    pub media_type: Option<u16>,
    pub size: Option<String>,
}

pub trait CpuIntrospection: Capability {
    fn read_cpu(&self) -> QueryResult<CpuRecord>;
}

/// General memory accounting. Always present, so it has no capability check.
pub trait MemoryAccounting {
    fn total_bytes(&self) -> u64;
}

/// The general hardware namespace: boards, memory modules, display adapters.
pub trait HardwareManagement: Capability {
    fn base_boards(&self) -> QueryResult<Vec<BaseBoardRecord>>;

    fn memory_modules(&self) -> QueryResult<Vec<MemoryModuleRecord>>;

    fn video_controllers(&self) -> QueryResult<Vec<VideoControllerRecord>>;
}

/// The narrower physical-storage namespace.
pub trait StorageManagement: Capability {
    fn physical_disks(&self) -> QueryResult<Vec<PhysicalDiskRecord>>;
}

/// The set of backends one collection cycle reads from.
pub struct Sources<'a> {
    pub cpu: &'a dyn CpuIntrospection,
    pub memory: &'a dyn MemoryAccounting,
    pub management: &'a dyn HardwareManagement,
    pub storage: &'a dyn StorageManagement,
}

/// Backend for platforms without a management interface this crate speaks.
#[cfg_attr(any(target_os = "linux", windows), allow(dead_code))]
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

impl Capability for Unsupported {
    fn name(&self) -> &str {
        "hardware management interface"
    }

    fn is_available(&self) -> bool {
        false
    }
}

impl HardwareManagement for Unsupported {
    fn base_boards(&self) -> QueryResult<Vec<BaseBoardRecord>> {
        Err(QueryError::unavailable(self.name()))
    }

    fn memory_modules(&self) -> QueryResult<Vec<MemoryModuleRecord>> {
        Err(QueryError::unavailable(self.name()))
    }

    fn video_controllers(&self) -> QueryResult<Vec<VideoControllerRecord>> {
        Err(QueryError::unavailable(self.name()))
    }
}

impl StorageManagement for Unsupported {
    fn physical_disks(&self) -> QueryResult<Vec<PhysicalDiskRecord>> {
        Err(QueryError::unavailable(self.name()))
    }
}
