use super::*;
use crate::utils::error::AppError;
use shared::models::DeviceStatus;

#[tokio::test]
async fn check_in_creates_charging_device() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();

    assert_eq!(device.status, DeviceStatus::Charging);
    assert_eq!(device.order_no, "CS-0001");
    assert_eq!(device.fixed_fee, Some(Decimal::from(50)));
    assert!(device.end_time.is_none());
    assert!(device.final_fee.is_none());
}

#[tokio::test]
async fn order_numbers_are_sequential_per_shop() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let first = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();
    let second = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();
    let third = lifecycle.check_in(&shop, hourly_check_in(100)).await.unwrap();

    assert_eq!(first.order_no, "CS-0001");
    assert_eq!(second.order_no, "CS-0002");
    assert_eq!(third.order_no, "CS-0003");
}

#[tokio::test]
async fn shops_count_independently() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    lifecycle
        .check_in(&test_shop(), fixed_check_in(50))
        .await
        .unwrap();
    let other = lifecycle
        .check_in(&other_shop(), fixed_check_in(50))
        .await
        .unwrap();

    assert_eq!(other.order_no, "CS-0001");
}

#[tokio::test]
async fn empty_description_is_rejected() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    let mut req = fixed_check_in(50);
    req.description = String::new();

    let err = lifecycle.check_in(&test_shop(), req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn fixed_billing_requires_positive_fee() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    let mut req = fixed_check_in(50);
    req.fixed_fee = None;
    let err = lifecycle.check_in(&test_shop(), req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut req = fixed_check_in(50);
    req.fixed_fee = Some(Decimal::ZERO);
    let err = lifecycle.check_in(&test_shop(), req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn hourly_billing_requires_positive_rate() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    let mut req = hourly_check_in(100);
    req.hourly_rate = None;

    let err = lifecycle.check_in(&test_shop(), req).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn mismatched_fee_field_is_dropped() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    // Hourly device carrying a stray fixed_fee: the stray field is ignored
    let mut req = hourly_check_in(100);
    req.fixed_fee = Some(Decimal::from(999));

    let device = lifecycle.check_in(&test_shop(), req).await.unwrap();
    assert_eq!(device.fixed_fee, None);
    assert_eq!(device.hourly_rate, Some(Decimal::from(100)));
}

#[tokio::test]
async fn failed_check_in_does_not_reuse_order_numbers() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap();
    // Slot already occupied, the check-in fails after burning a number
    lifecycle
        .check_in(&shop, slotted(fixed_check_in(50), "A1"))
        .await
        .unwrap_err();

    let next = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();
    assert_eq!(next.order_no, "CS-0003");
}

#[tokio::test]
async fn list_filters_by_status() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let a = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();
    lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();
    lifecycle
        .collect(&shop, &a.order_no, CollectRequest::default())
        .await
        .unwrap();

    let all = lifecycle.list(&shop, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let charging = lifecycle
        .list(&shop, Some(DeviceStatus::Charging))
        .await
        .unwrap();
    assert_eq!(charging.len(), 1);

    let collected = lifecycle
        .list(&shop, Some(DeviceStatus::Collected))
        .await
        .unwrap();
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].order_no, a.order_no);
}

#[tokio::test]
async fn shops_do_not_see_each_other() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    let device = lifecycle
        .check_in(&test_shop(), fixed_check_in(50))
        .await
        .unwrap();

    let err = lifecycle
        .get(&other_shop(), &device.order_no)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let listed = lifecycle.list(&other_shop(), None).await.unwrap();
    assert!(listed.is_empty());
}
