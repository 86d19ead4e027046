//! In-memory backends standing in for the OS introspection layers.

use crate::error::QueryError;
use crate::hardware::source::{
    BaseBoardRecord, Capability, CpuIntrospection, CpuRecord, HardwareManagement,
    MemoryAccounting, MemoryModuleRecord, PhysicalDiskRecord, QueryResult, StorageManagement,
    VideoControllerRecord,
};

pub const GIB: u64 = 1_073_741_824;

pub struct FakeCpu {
    pub available: bool,
    pub record: CpuRecord,
}

impl FakeCpu {
    pub fn with(brand: &str, physical: usize, logical: usize) -> Self {
        Self {
            available: true,
            record: CpuRecord {
                brand: Some(brand.to_string()),
                physical_cores: Some(physical),
                logical_cores: logical,
            },
        }
    }

    pub fn missing() -> Self {
        Self { available: false, record: CpuRecord::default() }
    }
}

impl Capability for FakeCpu {
    fn name(&self) -> &str {
        "fake cpu introspection"
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

impl CpuIntrospection for FakeCpu {
    fn read_cpu(&self) -> QueryResult<CpuRecord> {
        if !self.available {
            return Err(QueryError::unavailable(self.name()));
        }
        Ok(self.record.clone())
    }
}

pub struct FakeMemory(pub u64);

impl MemoryAccounting for FakeMemory {
    fn total_bytes(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
pub struct FakeManagement {
    pub available: bool,
    pub failure: Option<String>,
    pub boards: Vec<BaseBoardRecord>,
    pub modules: Vec<MemoryModuleRecord>,
    pub controllers: Vec<VideoControllerRecord>,
}

impl FakeManagement {
    /// Reachable, but every enumeration comes back empty.
    pub fn empty() -> Self {
        Self { available: true, ..Default::default() }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self { available: true, failure: Some(message.to_string()), ..Default::default() }
    }

    pub fn board(mut self, product: &str) -> Self {
        self.boards.push(BaseBoardRecord {
            manufacturer: None,
            product: Some(product.to_string()),
        });
        self
    }

    pub fn module(mut self, capacity_bytes: Option<u64>, speed_mhz: Option<u32>) -> Self {
        self.modules.push(MemoryModuleRecord { capacity_bytes, speed_mhz });
        self
    }

    pub fn adapter(mut self, name: Option<&str>) -> Self {
        self.controllers.push(VideoControllerRecord { name: name.map(str::to_string) });
        self
    }

    fn answer<T: Clone>(&self, records: &[T]) -> QueryResult<Vec<T>> {
        if !self.available {
            return Err(QueryError::unavailable(self.name()));
        }
        if let Some(message) = &self.failure {
            return Err(QueryError::query(message.clone()));
        }
        Ok(records.to_vec())
    }
}

impl Capability for FakeManagement {
    fn name(&self) -> &str {
        "fake management interface"
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

impl HardwareManagement for FakeManagement {
    fn base_boards(&self) -> QueryResult<Vec<BaseBoardRecord>> {
        self.answer(&self.boards)
    }

    fn memory_modules(&self) -> QueryResult<Vec<MemoryModuleRecord>> {
        self.answer(&self.modules)
    }

    fn video_controllers(&self) -> QueryResult<Vec<VideoControllerRecord>> {
        self.answer(&self.controllers)
    }
}

#[derive(Default)]
pub struct FakeStorage {
    pub available: bool,
    pub failure: Option<String>,
    pub disks: Vec<PhysicalDiskRecord>,
}

impl FakeStorage {
    pub fn empty() -> Self {
        Self { available: true, ..Default::default() }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self { available: true, failure: Some(message.to_string()), ..Default::default() }
    }

    pub fn disk(mut self, friendly_name: Option<&str>, device_id: &str, media_type: u16, size: &str) -> Self {
        self.disks.push(PhysicalDiskRecord {
            friendly_name: friendly_name.map(str::to_string),
            device_id: Some(device_id.to_string()),
            media_type: Some(media_type),
            size: Some(size.to_string()),
        });
        self
    }
}

impl Capability for FakeStorage {
    fn name(&self) -> &str {
        "fake storage namespace"
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

impl StorageManagement for FakeStorage {
    fn physical_disks(&self) -> QueryResult<Vec<PhysicalDiskRecord>> {
        if !self.available {
            return Err(QueryError::unavailable(self.name()));
        }
        if let Some(message) = &self.failure {
            return Err(QueryError::query(message.clone()));
        }
        Ok(self.disks.clone())
    }
}
