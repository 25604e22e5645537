//! Host status sampling for the dashboard: load, memory, disk, network
//! throughput, uptime, and the billing-cycle countdown.
//!
//! Every field is measured independently; a source that is missing or
//! unsupported degrades that one field to a zero/placeholder value and
//! never aborts the rest of the sample.

mod billing;
mod metrics;

use serde::Serialize;
use time::OffsetDateTime;

pub use billing::days_until_billing;

#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// Day of month (1-31) the billing cycle renews.
    pub pay_day: u8,
    /// Interface whose `/sys/class/net` counters are sampled.
    pub network_interface: String,
    /// Core count the 1-minute load average is normalized by.
    pub core_count_divisor: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            pay_day: 27,
            network_interface: "eth0".to_string(),
            core_count_divisor: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub cpu: f64,
    pub mem: f64,
    pub disk: f64,
    pub net_in: f64,
    pub net_out: f64,
    pub uptime: String,
    pub days_left: i64,
}

/// Takes a fresh sample. Blocks for one second measuring the network rate;
/// that is the only suspension point.
pub async fn sample(config: &StatusConfig) -> StatusSnapshot {
    let today = OffsetDateTime::now_utc().date();
    let (net_in, net_out) = metrics::net_rate_kbps(&config.network_interface).await;

    StatusSnapshot {
        cpu: metrics::cpu_percent(config.core_count_divisor),
        mem: metrics::mem_percent().await,
        disk: metrics::disk_percent(),
        net_in,
        net_out,
        uptime: metrics::uptime_text().await,
        days_left: days_until_billing(today, config.pay_day),
    }
}
