//! Fee Ticker
//!
//! Periodic background task publishing the live accrued fee of every active
//! hourly device, so counter terminals can show a running total without
//! polling.
//!
//! Registered as `TaskKind::Periodic` in `start_background_tasks()`.

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::billing;
use crate::core::ServerState;
use crate::db::repository::DeviceRepository;
use crate::utils::time::now_millis;

/// Payload of a `fee_tick` sync event
#[derive(Debug, Serialize)]
struct FeeTick {
    order_no: String,
    /// Accrued fee at tick time, whole currency units
    fee: rust_decimal::Decimal,
    /// Elapsed time since check-in, millis
    elapsed: i64,
}

pub struct FeeTicker {
    state: ServerState,
    shutdown: CancellationToken,
}

impl FeeTicker {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    /// Main loop: tick every `fee_tick_secs` until shutdown
    pub async fn run(self) {
        let period = Duration::from_secs(self.state.config.fee_tick_secs);
        tracing::info!("Fee ticker started (period {}s)", period.as_secs());

        loop {
            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Fee ticker received shutdown signal");
                    return;
                }
            }

            if let Err(e) = self.tick().await {
                tracing::error!("Fee tick failed: {}", e);
            }
        }
    }

    /// One pass: publish the current fee of every active hourly device
    async fn tick(&self) -> Result<(), String> {
        let repo = DeviceRepository::new(self.state.get_db());
        let devices = repo
            .find_active_hourly()
            .await
            .map_err(|e| e.to_string())?;

        let now = now_millis();
        for device in &devices {
            let tick = FeeTick {
                order_no: device.order_no.clone(),
                fee: billing::device_fee(device, now),
                elapsed: (now - device.start_time).max(0),
            };
            self.state.sync.publish(
                "device",
                "fee_tick",
                &device.order_no,
                device.shop.key().to_string().as_str(),
                Some(&tick),
            );
        }

        if !devices.is_empty() {
            tracing::debug!("Fee tick published for {} device(s)", devices.len());
        }

        Ok(())
    }
}
