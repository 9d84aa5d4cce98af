use super::*;
use crate::db::repository::shop_record_id;
use crate::utils::error::AppError;
use crate::utils::time::now_millis;

const PHONE: &str = "08011112222";

#[tokio::test]
async fn visit_count_matches_the_number_of_check_ins() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    for _ in 0..3 {
        lifecycle
            .check_in(&shop, with_customer(fixed_check_in(50), PHONE, "Ngozi"))
            .await
            .unwrap();
    }

    let customer = lifecycle
        .customers
        .find_by_phone(&shop.id, PHONE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.visit_count, 3);
}

#[tokio::test]
async fn name_is_overwritten_on_every_visit() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    lifecycle
        .check_in(&shop, with_customer(fixed_check_in(50), PHONE, "Ngozi"))
        .await
        .unwrap();
    lifecycle
        .check_in(&shop, with_customer(fixed_check_in(50), PHONE, "Ngozi O."))
        .await
        .unwrap();

    let customer = lifecycle
        .customers
        .find_by_phone(&shop.id, PHONE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.name, "Ngozi O.");
    assert_eq!(customer.visit_count, 2);
}

#[tokio::test]
async fn direct_visits_count_too() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();
    let shop_id = shop_record_id(&shop.id);

    // The POS flow records visits through the repository directly
    for n in 1..=4 {
        let customer = lifecycle
            .customers
            .record_visit(&shop_id, &shop.id, PHONE, "Ngozi", now_millis())
            .await
            .unwrap();
        assert_eq!(customer.visit_count, n);
    }
}

#[tokio::test]
async fn risk_flag_round_trip() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    lifecycle
        .check_in(&shop, with_customer(fixed_check_in(50), PHONE, "Ngozi"))
        .await
        .unwrap();

    let flagged = lifecycle
        .customers
        .set_risk_flag(&shop.id, PHONE, true, Some("walked out unpaid".to_string()))
        .await
        .unwrap();
    assert!(flagged.is_bad_actor);
    assert_eq!(flagged.bad_actor_reason.as_deref(), Some("walked out unpaid"));

    // Unflagging clears the reason
    let cleared = lifecycle
        .customers
        .set_risk_flag(&shop.id, PHONE, false, None)
        .await
        .unwrap();
    assert!(!cleared.is_bad_actor);
    assert!(cleared.bad_actor_reason.is_none());
}

#[tokio::test]
async fn unflag_ignores_a_stray_reason() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    lifecycle
        .check_in(&shop, with_customer(fixed_check_in(50), PHONE, "Ngozi"))
        .await
        .unwrap();

    let cleared = lifecycle
        .customers
        .set_risk_flag(&shop.id, PHONE, false, Some("leftover text".to_string()))
        .await
        .unwrap();
    assert!(!cleared.is_bad_actor);
    assert!(cleared.bad_actor_reason.is_none());
}

#[tokio::test]
async fn flagging_an_unknown_customer_is_not_found() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    let err = lifecycle
        .customers
        .set_risk_flag(&test_shop().id, PHONE, true, None)
        .await
        .unwrap_err();
    assert!(matches!(
        AppError::from(err),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn risk_flag_survives_later_visits() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;
    let shop = test_shop();

    lifecycle
        .check_in(&shop, with_customer(fixed_check_in(50), PHONE, "Ngozi"))
        .await
        .unwrap();
    lifecycle
        .customers
        .set_risk_flag(&shop.id, PHONE, true, Some("dispute".to_string()))
        .await
        .unwrap();

    // A known bad actor keeps the flag through new visits, so the next
    // check-in flow pre-sets its risk toggle from the lookup
    lifecycle
        .check_in(&shop, with_customer(fixed_check_in(50), PHONE, "Ngozi"))
        .await
        .unwrap();

    let customer = lifecycle
        .customers
        .find_by_phone(&shop.id, PHONE)
        .await
        .unwrap()
        .unwrap();
    assert!(customer.is_bad_actor);
    assert_eq!(customer.visit_count, 2);
}

#[tokio::test]
async fn directories_are_shop_scoped() {
    let (lifecycle, _tmp) = create_test_lifecycle().await;

    lifecycle
        .check_in(&test_shop(), with_customer(fixed_check_in(50), PHONE, "Ngozi"))
        .await
        .unwrap();

    let other = lifecycle
        .customers
        .find_by_phone(&other_shop().id, PHONE)
        .await
        .unwrap();
    assert!(other.is_none());
}
