//! Data models for GearGuard

pub mod dates;
pub mod equipment;
pub mod request;
pub mod team;

// Re-export commonly used types
pub use equipment::{Equipment, EquipmentDetails};
pub use request::{MaintenanceRequest, RequestStatus, RequestType, RequestView};
pub use team::Team;
