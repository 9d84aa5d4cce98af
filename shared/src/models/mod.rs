//! Domain Models
//!
//! Request/response DTOs and the enums shared by server entities and
//! client views. Server-side entities (with record ids) live in the
//! station-server `db::models` module.

pub mod customer;
pub mod device;
pub mod pos;
pub mod shop;
pub mod slot;

pub use customer::RiskFlagRequest;
pub use device::{BillingType, CheckInRequest, CollectRequest, DeviceListQuery, DeviceStatus};
pub use pos::{PaymentMethod, PosCreate, PosListQuery};
pub use shop::{AuthResponse, LoginRequest, RegisterRequest, ShopInfo};
pub use slot::{SlotBatchRequest, SlotBatchResponse, SlotStatus};
