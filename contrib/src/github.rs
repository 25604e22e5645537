use std::time::Duration;

use serde::Deserialize;
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339};

use crate::config::Config;
use crate::snapshot::{Contributions, DayRecord};

pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const API_BASE_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "dashboard-contributions-fetcher";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A remote source of contribution activity. The production implementation
/// talks to GitHub; tests substitute stubs.
pub trait ContributionSource: Send + Sync {
    /// Full-year contribution calendar with exact daily counts.
    fn fetch_calendar(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Contributions, FetchError>> + Send;

    /// Timestamps of the user's most recent public events (up to 100).
    fn fetch_recent_events(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<OffsetDateTime>, FetchError>> + Send;
}

/// Any of these is the same soft failure to the caller: the pipeline moves
/// on to the next source.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed :: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status :: {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response :: {0}")]
    Malformed(&'static str),
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    graphql_url: String,
    events_api_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            graphql_url: config.graphql_url.clone(),
            events_api_url: config.events_api_url.clone(),
            token: config.auth_token.clone(),
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl ContributionSource for GithubClient {
    async fn fetch_calendar(&self, username: &str) -> Result<Contributions, FetchError> {
        let query = format!(
            "{{ user(login: \"{username}\") {{ contributionsCollection {{ \
             contributionCalendar {{ totalContributions weeks {{ contributionDays \
             {{ contributionCount date weekday }} }} }} }} }} }}"
        );
        let request = self
            .http
            .post(&self.graphql_url)
            .json(&serde_json::json!({ "query": query }));

        let response = self.authorize(request).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: GraphQlResponse = response.json().await?;
        parse_calendar(body)
    }

    async fn fetch_recent_events(&self, username: &str) -> Result<Vec<OffsetDateTime>, FetchError> {
        let url = format!(
            "{}/users/{username}/events/public?per_page=100",
            self.events_api_url
        );
        let response = self.authorize(self.http.get(&url)).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let events: Vec<Event> = response.json().await?;
        Ok(events
            .into_iter()
            .filter_map(|event| event.created_at)
            .filter_map(|stamp| OffsetDateTime::parse(&stamp, &Rfc3339).ok())
            .collect())
    }
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
}

#[derive(Deserialize)]
struct GraphQlData {
    user: Option<GraphQlUser>,
}

#[derive(Deserialize)]
struct GraphQlUser {
    #[serde(rename = "contributionsCollection")]
    contributions_collection: ContributionsCollection,
}

#[derive(Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    contribution_calendar: Calendar,
}

#[derive(Deserialize)]
struct Calendar {
    #[serde(rename = "totalContributions")]
    total_contributions: u64,
    weeks: Vec<Week>,
}

#[derive(Deserialize)]
struct Week {
    #[serde(rename = "contributionDays")]
    contribution_days: Vec<CalendarDay>,
}

#[derive(Deserialize)]
struct CalendarDay {
    #[serde(rename = "contributionCount")]
    contribution_count: u32,
    #[serde(with = "crate::snapshot::date_format")]
    date: Date,
    weekday: u8,
}

#[derive(Deserialize)]
struct Event {
    created_at: Option<String>,
}

fn parse_calendar(body: GraphQlResponse) -> Result<Contributions, FetchError> {
    let calendar = body
        .data
        .and_then(|data| data.user)
        .map(|user| user.contributions_collection.contribution_calendar)
        .ok_or(FetchError::Malformed("missing contribution calendar"))?;

    let weeks = calendar.weeks.len() as u32;
    let daily: Vec<DayRecord> = calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(|day| DayRecord {
            date: day.date,
            count: day.contribution_count,
            weekday: day.weekday,
        })
        .collect();

    Ok(Contributions {
        total: calendar.total_contributions,
        daily,
        weeks,
        note: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn calendar_response_flattens_weeks_in_order() {
        let body: GraphQlResponse = serde_json::from_value(serde_json::json!({
            "data": { "user": { "contributionsCollection": { "contributionCalendar": {
                "totalContributions": 6,
                "weeks": [
                    { "contributionDays": [
                        { "contributionCount": 1, "date": "2024-03-10", "weekday": 0 },
                        { "contributionCount": 2, "date": "2024-03-11", "weekday": 1 }
                    ]},
                    { "contributionDays": [
                        { "contributionCount": 3, "date": "2024-03-17", "weekday": 0 }
                    ]}
                ]
            }}}}
        }))
        .unwrap();

        let contributions = parse_calendar(body).unwrap();
        assert_eq!(contributions.total, 6);
        assert_eq!(contributions.weeks, 2);
        assert_eq!(
            contributions
                .daily
                .iter()
                .map(|day| day.date)
                .collect::<Vec<_>>(),
            vec![
                date!(2024 - 03 - 10),
                date!(2024 - 03 - 11),
                date!(2024 - 03 - 17)
            ]
        );
        assert!(contributions.note.is_none());
    }

    #[test]
    fn calendar_response_without_user_is_malformed() {
        let body: GraphQlResponse =
            serde_json::from_value(serde_json::json!({ "data": { "user": null } })).unwrap();
        assert!(matches!(
            parse_calendar(body),
            Err(FetchError::Malformed(_))
        ));
    }
}
