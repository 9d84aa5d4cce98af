//! Billing Accrual Engine
//!
//! Pure fee arithmetic. Fixed devices cost their flat fee for life; hourly
//! devices accrue `ceil(elapsed_hours × rate)` with a half-hour minimum.
//! Once collected the frozen `final_fee` wins and `now` is never consulted
//! again.

use rust_decimal::Decimal;

use crate::db::models::Device;
use shared::models::BillingType;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Minimum billable duration: half an hour, charged even for shorter stays
fn min_billable_hours() -> Decimal {
    Decimal::new(5, 1)
}

/// Fee accrued by an hourly device between `start_time` and `now`
///
/// Rounded up to the nearest whole currency unit — no fractional currency.
pub fn hourly_fee(hourly_rate: Decimal, start_time: i64, now: i64) -> Decimal {
    let elapsed_millis = (now - start_time).max(0);
    let mut hours = Decimal::from(elapsed_millis) / Decimal::from(MILLIS_PER_HOUR);
    let floor = min_billable_hours();
    if hours < floor {
        hours = floor;
    }
    (hours * hourly_rate).ceil()
}

/// Current fee for a device at instant `now`
///
/// Idempotent after collection: the frozen value is returned unchanged
/// regardless of elapsed wall-clock time.
pub fn device_fee(device: &Device, now: i64) -> Decimal {
    if let Some(frozen) = device.final_fee {
        return frozen;
    }

    match device.billing_type {
        BillingType::Fixed => device.fixed_fee.unwrap_or(Decimal::ZERO),
        BillingType::Hourly => hourly_fee(
            device.hourly_rate.unwrap_or(Decimal::ZERO),
            device.start_time,
            now,
        ),
    }
}
