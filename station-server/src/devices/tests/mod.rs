use rust_decimal::Decimal;

use super::*;
use crate::db;
use crate::sync::SyncService;
use shared::models::{BillingType, CheckInRequest, CollectRequest};

/// Fresh lifecycle service over a throwaway on-disk database
///
/// The TempDir must stay alive for the duration of the test.
async fn create_test_lifecycle() -> (DeviceLifecycle, tempfile::TempDir) {
    let (lifecycle, _, tmp) = create_test_env().await;
    (lifecycle, tmp)
}

/// Like [`create_test_lifecycle`], but keeps the database handle for tests
/// that inspect rows directly or backdate timestamps
async fn create_test_env() -> (
    DeviceLifecycle,
    Surreal<Db>,
    tempfile::TempDir,
) {
    let tmp = tempfile::tempdir().unwrap();
    let db = db::connect(&tmp.path().join("test.db")).await.unwrap();
    (
        DeviceLifecycle::new(db.clone(), SyncService::new()),
        db,
        tmp,
    )
}

/// Shift a device's check-in time into the past
async fn backdate_start_time(
    db: &Surreal<Db>,
    shop_key: &str,
    order_no: &str,
    millis: i64,
) {
    db.query("UPDATE $device SET start_time = start_time - $delta")
        .bind(("device", DeviceRepository::record_id(shop_key, order_no)))
        .bind(("delta", millis))
        .await
        .unwrap();
}

fn test_shop() -> CurrentShop {
    CurrentShop {
        id: "shop1".to_string(),
        name: "Test Shop".to_string(),
    }
}

fn other_shop() -> CurrentShop {
    CurrentShop {
        id: "shop2".to_string(),
        name: "Other Shop".to_string(),
    }
}

fn fixed_check_in(fee: i64) -> CheckInRequest {
    CheckInRequest {
        device_type: Some("phone".to_string()),
        description: "Tecno Spark, black case".to_string(),
        billing_type: BillingType::Fixed,
        fixed_fee: Some(Decimal::from(fee)),
        hourly_rate: None,
        slot_id: None,
        tag_number: None,
        customer_phone: None,
        customer_name: None,
    }
}

fn hourly_check_in(rate: i64) -> CheckInRequest {
    CheckInRequest {
        device_type: Some("phone".to_string()),
        description: "Infinix Hot, cracked screen".to_string(),
        billing_type: BillingType::Hourly,
        fixed_fee: None,
        hourly_rate: Some(Decimal::from(rate)),
        slot_id: None,
        tag_number: None,
        customer_phone: None,
        customer_name: None,
    }
}

fn slotted(mut req: CheckInRequest, slot_id: &str) -> CheckInRequest {
    req.slot_id = Some(slot_id.to_string());
    req
}

fn with_customer(mut req: CheckInRequest, phone: &str, name: &str) -> CheckInRequest {
    req.customer_phone = Some(phone.to_string());
    req.customer_name = Some(name.to_string());
    req
}

mod test_check_in;
mod test_transitions;
mod test_slots;
mod test_customers;
