//! Database entity models
//!
//! Server-side entities carrying record ids. The enums and DTOs they share
//! with clients live in the `shared` crate.

pub mod customer;
pub mod device;
pub mod pos_transaction;
pub mod serde_helpers;
pub mod shop_account;
pub mod slot;

pub use customer::Customer;
pub use device::Device;
pub use pos_transaction::PosTransaction;
pub use shop_account::ShopAccount;
pub use slot::Slot;
