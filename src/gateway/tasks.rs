//! Background tasks

use super::Gateway;
use crate::core::health::HealthStatus;
use crate::core::usage::UsageSink;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

impl Gateway {
    /// Re-probe all endpoints every `health_check_interval_ms`
    ///
    /// The first sweep runs immediately. Abort the handle to stop.
    pub fn spawn_health_monitor(&self) -> JoinHandle<()> {
        let gateway = self.clone();
        let period = self.config.gateway.load_balancer.health_check_interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!("Health monitor started, interval {:?}", period);

            loop {
                interval.tick().await;

                let health = gateway.health_status().await;
                match health.overall {
                    HealthStatus::Healthy => debug!("All endpoints healthy"),
                    HealthStatus::Degraded => warn!(
                        healthy = health.healthy_count(),
                        total = health.endpoints.len(),
                        "Gateway degraded"
                    ),
                    HealthStatus::Unhealthy => error!("No healthy endpoint"),
                }
            }
        })
    }

    /// Publish a usage snapshot to `sink` every `period`
    pub fn spawn_usage_reporter(&self, sink: Arc<dyn UsageSink>, period: Duration) -> JoinHandle<()> {
        let usage = Arc::clone(&self.usage);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                if let Err(e) = sink.publish(&usage.snapshot()).await {
                    warn!("Usage publish failed: {}", e);
                }
            }
        })
    }
}
