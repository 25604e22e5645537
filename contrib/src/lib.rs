//! GitHub contribution activity: fetch pipeline, file cache, SVG calendar.

mod cache;
mod clock;
mod config;
mod github;
mod service;
mod snapshot;
mod svg;

pub use cache::{FileCache, StoreError};
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use github::{ContributionSource, FetchError, GithubClient};
pub use service::ContributionsService;
pub use snapshot::{Contributions, DayRecord, Snapshot};
pub use svg::render_svg;
