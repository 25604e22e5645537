use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use time::{Date, OffsetDateTime, UtcOffset};

use crate::cache::FileCache;
use crate::clock::Clock;
use crate::config::Config;
use crate::github::ContributionSource;
use crate::snapshot::{Contributions, DayRecord, EVENTS_NOTE, Snapshot};

/// Days of history covered by the events-feed fallback.
const EVENTS_WINDOW_DAYS: i64 = 30;

/// Orchestrates cache lookup, remote fetch, and cache write-back.
///
/// Every call produces a snapshot; remote and cache failures only ever
/// degrade the result (stale data, then an empty snapshot with an error
/// note), they never surface as errors.
pub struct ContributionsService<S> {
    source: S,
    cache: FileCache,
    username: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<S: ContributionSource> ContributionsService<S> {
    pub fn new(source: S, config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: FileCache::new(&config.cache_file),
            username: config.username.clone(),
            ttl: config.cache_ttl,
            clock,
        }
    }

    pub async fn get(&self) -> Snapshot {
        let now = self.clock.now();

        if let Some(cached) = self.cache.load() {
            if self.is_fresh(&cached, now) && cached.has_records() {
                tracing::debug!(username = %self.username, "serving fresh cache");
                return cached;
            }
        }

        if let Some(contributions) = self.fetch_remote(now).await {
            let snapshot = Snapshot::fetched(contributions, &self.username, now);
            if let Err(err) = self.cache.store(&snapshot) {
                tracing::warn!(%err, "cache write failed, serving snapshot anyway");
            }
            return snapshot;
        }

        // Both remote sources are down; any cached data beats none.
        if let Some(cached) = self.cache.load() {
            if cached.has_records() {
                tracing::warn!(username = %self.username, "remote sources down, serving stale cache");
                return cached;
            }
        }

        tracing::warn!(username = %self.username, "no remote data and no usable cache");
        Snapshot::failed(&self.username, now)
    }

    fn is_fresh(&self, snapshot: &Snapshot, now: OffsetDateTime) -> bool {
        let age = now - snapshot.last_updated.assume_utc();
        age < time::Duration::seconds(self.ttl.as_secs() as i64)
    }

    async fn fetch_remote(&self, now: OffsetDateTime) -> Option<Contributions> {
        match self.source.fetch_calendar(&self.username).await {
            Ok(contributions) => return Some(contributions),
            Err(err) => {
                tracing::warn!(%err, "calendar query failed, falling back to events feed");
            }
        }

        match self.source.fetch_recent_events(&self.username).await {
            Ok(events) => Some(bucket_events(&events, now.date())),
            Err(err) => {
                tracing::warn!(%err, "events feed failed");
                None
            }
        }
    }
}

/// Derives approximate daily counts by grouping event timestamps (UTC) by
/// calendar day over the trailing 30-day window, ascending by date.
fn bucket_events(events: &[OffsetDateTime], today: Date) -> Contributions {
    let since = today - time::Duration::days(EVENTS_WINDOW_DAYS);

    let mut per_day: BTreeMap<Date, u32> = BTreeMap::new();
    for stamp in events {
        let date = stamp.to_offset(UtcOffset::UTC).date();
        if date >= since {
            *per_day.entry(date).or_default() += 1;
        }
    }

    let total = per_day.values().map(|count| u64::from(*count)).sum();
    let daily = per_day
        .into_iter()
        .map(|(date, count)| DayRecord {
            date,
            count,
            weekday: date.weekday().number_days_from_sunday(),
        })
        .collect();

    Contributions {
        total,
        daily,
        weeks: 5,
        note: Some(EVENTS_NOTE.to_string()),
    }
}
