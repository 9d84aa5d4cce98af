//! Device Lifecycle Module
//!
//! Core check-in / collect flow for devices left at the counter:
//!
//! - **DeviceLifecycle**: validates requests, drives the status machine and
//!   coordinates the slot ledger and customer directory
//! - **billing**: pure fee arithmetic (half-hour floor, ceil to whole unit)
//! - **ticker**: periodic task publishing live fee updates for hourly devices
//!
//! # Status machine
//!
//! ```text
//! charging ──→ ready ──→ collected
//!     └────────────────────↗
//! ```
//!
//! `collected` is terminal. Every transition is a conditional database
//! write, so concurrent terminals racing on one device get one winner and
//! one error.

pub mod billing;
pub mod ticker;

pub use ticker::FeeTicker;

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use validator::Validate;

use crate::auth::CurrentShop;
use crate::db::models::Device;
use crate::db::repository::{
    CustomerRepository, DeviceRepository, SlotRepository, shop_record_id,
};
use crate::sync::SyncService;
use crate::utils::error::AppError;
use crate::utils::result::AppResult;
use crate::utils::time::now_millis;
use shared::models::{BillingType, CheckInRequest, CollectRequest, DeviceStatus};

/// Device lifecycle service
///
/// One instance per server; clone-cheap (repositories share the database
/// handle, the sync service is a handle).
#[derive(Clone)]
pub struct DeviceLifecycle {
    devices: DeviceRepository,
    slots: SlotRepository,
    customers: CustomerRepository,
    sync: SyncService,
}

impl DeviceLifecycle {
    pub fn new(db: Surreal<Db>, sync: SyncService) -> Self {
        Self {
            devices: DeviceRepository::new(db.clone()),
            slots: SlotRepository::new(db.clone()),
            customers: CustomerRepository::new(db),
            sync,
        }
    }

    /// Check in a device
    ///
    /// Allocates the next order number, binds the slot (when given) and
    /// creates the record in `charging`. The slot is claimed before the
    /// device row exists; if the device write then fails the slot is
    /// released again so no orphan binding survives.
    pub async fn check_in(&self, shop: &CurrentShop, req: CheckInRequest) -> AppResult<Device> {
        req.validate()?;
        let (fixed_fee, hourly_rate) = validate_billing(&req)?;

        let shop_id = shop_record_id(&shop.id);
        let order_no = self.devices.next_order_no(&shop.id).await?;
        let device_id = DeviceRepository::record_id(&shop.id, &order_no);
        let now = now_millis();

        if let Some(slot_id) = &req.slot_id {
            self.slots
                .occupy(slot_id, &shop_id, device_id.clone())
                .await?;
        }

        let device = Device {
            id: None,
            order_no: order_no.clone(),
            shop: shop_id.clone(),
            device_type: req.device_type,
            description: req.description,
            slot_id: req.slot_id.clone(),
            tag_number: req.tag_number,
            billing_type: req.billing_type,
            fixed_fee,
            hourly_rate,
            start_time: now,
            end_time: None,
            status: DeviceStatus::Charging,
            final_fee: None,
            customer_phone: req.customer_phone.clone(),
            customer_name: req.customer_name.clone(),
            created_at: now,
            updated_at: now,
        };

        let created = match self.devices.create(device_id, device).await {
            Ok(created) => created,
            Err(e) => {
                if let Some(slot_id) = &req.slot_id {
                    if let Err(release_err) = self.slots.release(slot_id, &shop_id).await {
                        tracing::error!(
                            slot_id = %slot_id,
                            error = %release_err,
                            "Failed to release slot after aborted check-in"
                        );
                    }
                }
                return Err(e.into());
            }
        };

        // Visit recording is best-effort: a directory hiccup must not fail
        // an otherwise committed check-in
        if let Some(phone) = &req.customer_phone {
            let name = req.customer_name.as_deref().unwrap_or_default();
            match self
                .customers
                .record_visit(&shop_id, &shop.id, phone, name, now)
                .await
            {
                Ok(customer) => {
                    self.sync
                        .publish("customer", "visited", phone, &shop.id, Some(&customer));
                }
                Err(e) => {
                    tracing::warn!(phone = %phone, error = %e, "Failed to record customer visit");
                }
            }
        }

        self.sync
            .publish("device", "created", &created.order_no, &shop.id, Some(&created));
        if let Some(slot_id) = &req.slot_id {
            self.sync
                .publish("slot", "occupied", slot_id, &shop.id, None::<&()>);
        }

        tracing::info!(
            order_no = %created.order_no,
            slot = ?created.slot_id,
            billing = ?created.billing_type,
            "Device checked in"
        );

        Ok(created)
    }

    /// Fetch one device by order number
    pub async fn get(&self, shop: &CurrentShop, order_no: &str) -> AppResult<Device> {
        self.devices
            .find_by_order_no(&shop.id, order_no)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Device {}", order_no)))
    }

    /// List the shop's devices, optionally filtered by status
    pub async fn list(
        &self,
        shop: &CurrentShop,
        status: Option<DeviceStatus>,
    ) -> AppResult<Vec<Device>> {
        let shop_id = shop_record_id(&shop.id);
        Ok(self.devices.find_by_shop(&shop_id, status).await?)
    }

    /// `charging → ready`
    ///
    /// The transition is a conditional write; when it does not apply, the
    /// device is re-read to report missing vs wrong-state precisely.
    pub async fn mark_ready(&self, shop: &CurrentShop, order_no: &str) -> AppResult<Device> {
        let device_id = DeviceRepository::record_id(&shop.id, order_no);
        let now = now_millis();

        match self.devices.mark_ready(device_id, now).await? {
            Some(device) => {
                self.sync
                    .publish("device", "ready", order_no, &shop.id, Some(&device));
                Ok(device)
            }
            None => {
                let current = self.get(shop, order_no).await?;
                Err(AppError::invalid_state(format!(
                    "Device {} is {}, expected charging",
                    order_no, current.status
                )))
            }
        }
    }

    /// Collect (checkout) a device
    ///
    /// Slot-bound devices demand a proof token carrying the re-scanned slot
    /// id; a wrong or missing token is rejected before any state changes.
    /// The fee is computed once and frozen by the terminal transition.
    pub async fn collect(
        &self,
        shop: &CurrentShop,
        order_no: &str,
        req: CollectRequest,
    ) -> AppResult<Device> {
        let device = self.get(shop, order_no).await?;

        if device.status == DeviceStatus::Collected {
            return Err(AppError::invalid_state(format!(
                "Device {} is already collected",
                order_no
            )));
        }

        if let Some(slot_id) = &device.slot_id {
            match &req.proof_token {
                Some(token) if token == slot_id => {}
                Some(_) => {
                    return Err(AppError::slot_mismatch(format!(
                        "Scanned slot does not match the slot bound to device {}",
                        order_no
                    )));
                }
                None => {
                    return Err(AppError::slot_mismatch(format!(
                        "Device {} is slot-bound, re-scan the slot to collect",
                        order_no
                    )));
                }
            }
        }

        let now = now_millis();
        let fee = billing::device_fee(&device, now);

        let device_id = DeviceRepository::record_id(&shop.id, order_no);
        let collected = self
            .devices
            .finalize_collection(device_id, now, fee)
            .await?
            .ok_or_else(|| {
                // Lost a concurrent collect between the read and the write
                AppError::invalid_state(format!("Device {} is already collected", order_no))
            })?;

        // The terminal write cleared the record's slot_id; the binding to
        // release comes from the pre-read copy
        if let Some(slot_id) = &device.slot_id {
            let shop_id = shop_record_id(&shop.id);
            match self.slots.release(slot_id, &shop_id).await {
                Ok(_) => {
                    self.sync
                        .publish("slot", "released", slot_id, &shop.id, None::<&()>);
                }
                Err(e) => {
                    tracing::error!(
                        slot_id = %slot_id,
                        order_no = %order_no,
                        error = %e,
                        "Failed to release slot after collection"
                    );
                }
            }
        }

        self.sync
            .publish("device", "collected", order_no, &shop.id, Some(&collected));

        tracing::info!(order_no = %order_no, fee = %fee, "Device collected");

        Ok(collected)
    }

    /// Current fee of a device at this instant (frozen value once collected)
    pub fn current_fee(&self, device: &Device) -> Decimal {
        billing::device_fee(device, now_millis())
    }

    /// Active device occupying a slot, if any
    ///
    /// Drives the scan-to-check-in branch: an active occupant means the
    /// terminal opens the checkout flow, otherwise a new check-in pre-filled
    /// with the scanned slot id. Slots registered to another shop read as
    /// empty.
    pub async fn lookup_active_device(
        &self,
        shop: &CurrentShop,
        slot_id: &str,
    ) -> AppResult<Option<Device>> {
        let shop_id = shop_record_id(&shop.id);

        let Some(slot) = self.slots.find_by_id(slot_id).await? else {
            return Ok(None);
        };
        if slot.owner_shop != shop_id {
            return Ok(None);
        }
        let Some(device_id) = slot.device else {
            return Ok(None);
        };

        let device = self.devices.find_by_record(device_id).await?;
        Ok(device.filter(Device::is_active))
    }
}

/// Cross-field billing validation: the fee field matching the billing type
/// must be present and positive, the other is ignored
fn validate_billing(req: &CheckInRequest) -> AppResult<(Option<Decimal>, Option<Decimal>)> {
    match req.billing_type {
        BillingType::Fixed => match req.fixed_fee {
            Some(fee) if fee > Decimal::ZERO => Ok((Some(fee), None)),
            _ => Err(AppError::validation(
                "fixed_fee must be a positive amount for fixed billing",
            )),
        },
        BillingType::Hourly => match req.hourly_rate {
            Some(rate) if rate > Decimal::ZERO => Ok((None, Some(rate))),
            _ => Err(AppError::validation(
                "hourly_rate must be a positive amount for hourly billing",
            )),
        },
    }
}

#[cfg(test)]
mod tests;
