use super::*;
use crate::utils::error::AppError;
use shared::models::DeviceStatus;

#[tokio::test]
async fn charging_to_ready_to_collected() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();

    let ready = lifecycle.mark_ready(&shop, &device.order_no).await.unwrap();
    assert_eq!(ready.status, DeviceStatus::Ready);

    let collected = lifecycle
        .collect(&shop, &device.order_no, CollectRequest::default())
        .await
        .unwrap();
    assert_eq!(collected.status, DeviceStatus::Collected);
    assert!(collected.end_time.is_some());
    assert_eq!(collected.final_fee, Some(Decimal::from(50)));
}

#[tokio::test]
async fn direct_collect_from_charging() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();

    let collected = lifecycle
        .collect(&shop, &device.order_no, CollectRequest::default())
        .await
        .unwrap();
    assert_eq!(collected.status, DeviceStatus::Collected);
}

#[tokio::test]
async fn ready_is_not_repeatable() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();
    lifecycle.mark_ready(&shop, &device.order_no).await.unwrap();

    let err = lifecycle
        .mark_ready(&shop, &device.order_no)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn collected_is_terminal() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();
    lifecycle
        .collect(&shop, &device.order_no, CollectRequest::default())
        .await
        .unwrap();

    let err = lifecycle
        .collect(&shop, &device.order_no, CollectRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let err = lifecycle
        .mark_ready(&shop, &device.order_no)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn ready_on_unknown_device_is_not_found() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    let err = lifecycle
        .mark_ready(&test_shop(), "CS-9999")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_collect_has_one_winner() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle.check_in(&shop, fixed_check_in(50)).await.unwrap();

    let a = {
        let lifecycle = lifecycle.clone();
        let shop = shop.clone();
        let order_no = device.order_no.clone();
        tokio::spawn(async move {
            lifecycle
                .collect(&shop, &order_no, CollectRequest::default())
                .await
        })
    };
    let b = {
        let lifecycle = lifecycle.clone();
        let shop = shop.clone();
        let order_no = device.order_no.clone();
        tokio::spawn(async move {
            lifecycle
                .collect(&shop, &order_no, CollectRequest::default())
                .await
        })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one collect must win the race");

    let final_state = lifecycle.get(&shop, &device.order_no).await.unwrap();
    assert_eq!(final_state.status, DeviceStatus::Collected);
    assert_eq!(final_state.final_fee, Some(Decimal::from(50)));
}

#[tokio::test]
async fn frozen_fee_survives_reads() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    let device = lifecycle
        .check_in(&shop, hourly_check_in(100))
        .await
        .unwrap();
    let collected = lifecycle
        .collect(&shop, &device.order_no, CollectRequest::default())
        .await
        .unwrap();

    // Immediate collect bills the half-hour floor
    assert_eq!(collected.final_fee, Some(Decimal::from(50)));

    // Re-reading later reports the frozen value, not a re-accrued one
    let later = lifecycle.get(&shop, &device.order_no).await.unwrap();
    assert_eq!(lifecycle.current_fee(&later), Decimal::from(50));
}
