use std::path::Path;
use std::time::Duration;

use sysinfo::{Disks, System};

const UPTIME_PLACEHOLDER: &str = "获取中...";

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 1-minute load average as a percentage of the configured core count,
/// clamped to [0, 100]. Platforms without load averages report all zeros,
/// which degrades this to 0.
pub fn cpu_percent(core_count_divisor: u32) -> f64 {
    let load = System::load_average();
    let percent = round1(load.one * 100.0 / f64::from(core_count_divisor.max(1)));
    percent.clamp(0.0, 100.0)
}

/// used/total from the second line of `free`. Command missing or output
/// malformed degrades to 0.
pub async fn mem_percent() -> f64 {
    match tokio::process::Command::new("free").output().await {
        Ok(output) if output.status.success() => {
            parse_free(&String::from_utf8_lossy(&output.stdout)).unwrap_or(0.0)
        }
        Ok(output) => {
            tracing::debug!(status = %output.status, "free exited nonzero");
            0.0
        }
        Err(err) => {
            tracing::debug!(%err, "free unavailable");
            0.0
        }
    }
}

fn parse_free(text: &str) -> Option<f64> {
    let line = text.lines().nth(1)?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    let total: f64 = fields.get(1)?.parse().ok()?;
    let used: f64 = fields.get(2)?.parse().ok()?;
    if total <= 0.0 {
        return None;
    }
    Some(round1(used / total * 100.0))
}

/// Occupancy of the root filesystem; 0 when no disk is mounted at `/`.
pub fn disk_percent() -> f64 {
    let disks = Disks::new_with_refreshed_list();
    for disk in disks.list() {
        if disk.mount_point() == Path::new("/") {
            let total = disk.total_space() as f64;
            if total > 0.0 {
                let available = disk.available_space() as f64;
                return round1((1.0 - available / total) * 100.0);
            }
        }
    }
    0.0
}

/// Reads the interface's cumulative rx/tx byte counters one second apart
/// and reports the delta in KB/s. Missing counter files report 0/0.
pub async fn net_rate_kbps(interface: &str) -> (f64, f64) {
    let rx_path = format!("/sys/class/net/{interface}/statistics/rx_bytes");
    let tx_path = format!("/sys/class/net/{interface}/statistics/tx_bytes");

    let (Some(rx_before), Some(tx_before)) =
        (read_counter(&rx_path).await, read_counter(&tx_path).await)
    else {
        tracing::debug!(interface, "network counters unavailable");
        return (0.0, 0.0);
    };

    tokio::time::sleep(Duration::from_secs(1)).await;

    let (Some(rx_after), Some(tx_after)) =
        (read_counter(&rx_path).await, read_counter(&tx_path).await)
    else {
        return (0.0, 0.0);
    };

    (
        rate_kb(rx_before, rx_after),
        rate_kb(tx_before, tx_after),
    )
}

fn rate_kb(before: u64, after: u64) -> f64 {
    round1(after.saturating_sub(before) as f64 / 1024.0)
}

async fn read_counter(path: &str) -> Option<u64> {
    let text = tokio::fs::read_to_string(path).await.ok()?;
    text.trim().parse().ok()
}

/// Seconds-since-boot from `/proc/uptime`, formatted as "D天 H小时 M分"
/// (days omitted when zero).
pub async fn uptime_text() -> String {
    match tokio::fs::read_to_string("/proc/uptime").await {
        Ok(text) => parse_uptime(&text)
            .map(format_uptime)
            .unwrap_or_else(|| UPTIME_PLACEHOLDER.to_string()),
        Err(err) => {
            tracing::debug!(%err, "/proc/uptime unreadable");
            UPTIME_PLACEHOLDER.to_string()
        }
    }
}

fn parse_uptime(text: &str) -> Option<u64> {
    let seconds: f64 = text.split_whitespace().next()?.parse().ok()?;
    Some(seconds as u64)
}

fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{days}天 {hours}小时 {minutes}分")
    } else {
        format!("{hours}小时 {minutes}分")
    }
}
