use super::*;
use crate::db::repository::shop_record_id;
use crate::utils::error::AppError;
use shared::models::{DeviceStatus, SlotStatus};

fn collect_with_proof(slot_id: &str) -> CollectRequest {
    CollectRequest {
        proof_token: Some(slot_id.to_string()),
    }
}

#[tokio::test]
async fn check_in_occupies_the_slot() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();
    assert_eq!(device.slot_id.as_deref(), Some("A1"));

    let slot = lifecycle.slots.find_by_id("A1").await.unwrap().unwrap();
    assert_eq!(slot.status, SlotStatus::Occupied);
    assert!(slot.device.is_some());
}

#[tokio::test]
async fn double_booking_a_slot_is_a_conflict() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();

    let err = lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn collect_without_proof_is_rejected() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();

    let err = lifecycle
        .collect(&shop, &device.order_no, CollectRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SlotMismatch(_)));

    // Nothing changed: still charging, slot still occupied
    let current = lifecycle.get(&shop, &device.order_no).await.unwrap();
    assert_eq!(current.status, DeviceStatus::Charging);
    let slot = lifecycle.slots.find_by_id("A1").await.unwrap().unwrap();
    assert_eq!(slot.status, SlotStatus::Occupied);
}

#[tokio::test]
async fn wrong_scan_is_rejected() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();

    let err = lifecycle
        .collect(&shop, &device.order_no, collect_with_proof("B2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SlotMismatch(_)));

    let current = lifecycle.get(&shop, &device.order_no).await.unwrap();
    assert_eq!(current.status, DeviceStatus::Charging);
}

#[tokio::test]
async fn collection_releases_the_slot() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();

    let collected = lifecycle
        .collect(&shop, &device.order_no, collect_with_proof("A1"))
        .await
        .unwrap();
    assert_eq!(collected.status, DeviceStatus::Collected);
    // The binding is cleared on both sides
    assert!(collected.slot_id.is_none());

    let slot = lifecycle.slots.find_by_id("A1").await.unwrap().unwrap();
    assert_eq!(slot.status, SlotStatus::Available);
    assert!(slot.device.is_none());

    let reread = lifecycle.get(&shop, &device.order_no).await.unwrap();
    assert!(reread.slot_id.is_none());
}

#[tokio::test]
async fn released_slot_is_reusable() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let first = lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();
    lifecycle
        .collect(&shop, &first.order_no, collect_with_proof("A1"))
        .await
        .unwrap();

    // Same bay, next customer
    let second = lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();
    assert_eq!(second.slot_id.as_deref(), Some("A1"));
}

#[tokio::test]
async fn scan_finds_the_active_occupant() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    assert!(
        lifecycle
            .lookup_active_device(&shop, "A1")
            .await
            .unwrap()
            .is_none()
    );

    let device = lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();

    let found = lifecycle
        .lookup_active_device(&shop, "A1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.order_no, device.order_no);

    // After collection the slot scans as empty again
    lifecycle
        .collect(&shop, &device.order_no, collect_with_proof("A1"))
        .await
        .unwrap();
    assert!(
        lifecycle
            .lookup_active_device(&shop, "A1")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn foreign_slots_scan_as_empty() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    lifecycle
        .check_in(&test_shop(), slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();

    let found = lifecycle
        .lookup_active_device(&other_shop(), "A1")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn foreign_slot_cannot_be_claimed() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    // shop1 registers A1 by checking into it
    lifecycle
        .check_in(&test_shop(), slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();

    let err = lifecycle
        .check_in(&other_shop(), slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_) | AppError::Conflict(_)));
}

#[tokio::test]
async fn hourly_slotted_end_to_end() {
    let (lifecycle, db, _tmp) = create_test_env().await;
    let shop = test_shop();

    let req = with_customer(
        slotted(hourly_check_in(200), "A1"),
        "08012345678",
        "Ngozi",
    );
    let device = lifecycle.check_in(&shop, req).await.unwrap();

    // 2h10m on the charger: 2.1667h x 200 rounds up to 434
    backdate_start_time(&db, &shop.id, &device.order_no, 130 * 60_000).await;

    let collected = lifecycle
        .collect(&shop, &device.order_no, collect_with_proof("A1"))
        .await
        .unwrap();
    assert_eq!(collected.final_fee, Some(Decimal::from(434)));
    assert!(collected.end_time.is_some());

    let slot = lifecycle.slots.find_by_id("A1").await.unwrap().unwrap();
    assert_eq!(slot.status, SlotStatus::Available);

    let customer = lifecycle
        .customers
        .find_by_phone(&shop.id, "08012345678")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.visit_count, 1);
    assert_eq!(customer.shop, shop_record_id(&shop.id));
}
