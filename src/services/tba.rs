use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{BoardError, WltRecord};

pub const TBA_BASE_URL: &str = "https://www.thebluealliance.com/api/v3";

/// Normalize user input into a full TBA event key: `"2026hiho"` passes
/// through lowercased, a bare code (`"HIHO"`) gets the current year prefixed,
/// empty input stays empty.
pub fn normalize_event_key(input: &str) -> String {
    let raw = input.trim();
    if raw.is_empty() {
        return String::new();
    }

    let has_year_prefix = raw.chars().take(4).filter(|c| c.is_ascii_digit()).count() == 4
        && raw.len() > 4
        && raw[4..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if has_year_prefix {
        return raw.to_ascii_lowercase();
    }

    format!("{}{}", Utc::now().year(), raw).to_ascii_lowercase()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamSimple {
    pub key: String,
    pub team_number: u32,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TbaMatch {
    pub key: String,
    pub comp_level: String,
    #[serde(default)]
    pub set_number: i64,
    #[serde(default)]
    pub match_number: i64,
    #[serde(default)]
    pub actual_time: Option<i64>,
    pub alliances: MatchAlliances,
    /// Game-specific breakdown; keys probed tolerantly by analytics.
    #[serde(default)]
    pub score_breakdown: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchAlliances {
    pub red: Alliance,
    pub blue: Alliance,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alliance {
    #[serde(default)]
    pub team_keys: Vec<String>,
    #[serde(default)]
    pub score: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRankings {
    #[serde(default)]
    pub rankings: Vec<RankingRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingRow {
    pub team_key: String,
    pub rank: i64,
    #[serde(default)]
    pub record: Option<WltRecord>,
    #[serde(default)]
    pub matches_played: i64,
    #[serde(default)]
    pub dq: i64,
}

/// The Blue Alliance v3 read client.
pub struct TbaClient {
    http: reqwest::Client,
    base_url: String,
    auth_key: String,
}

impl TbaClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, auth_key: impl Into<String>) -> TbaClient {
        TbaClient {
            http,
            base_url: base_url.into(),
            auth_key: auth_key.into(),
        }
    }

    pub async fn event_teams_simple(&self, event_key: &str) -> Result<Vec<TeamSimple>, BoardError> {
        self.get_json(&["event", event_key, "teams", "simple"]).await
    }

    pub async fn event_matches(&self, event_key: &str) -> Result<Vec<TbaMatch>, BoardError> {
        self.get_json(&["event", event_key, "matches"]).await
    }

    pub async fn event_rankings(&self, event_key: &str) -> Result<EventRankings, BoardError> {
        self.get_json(&["event", event_key, "rankings"]).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, BoardError> {
        if self.auth_key.is_empty() {
            return Err(BoardError::Config("missing TBA_AUTH_KEY".into()));
        }

        let url = endpoint_url(&self.base_url, segments)?;
        tracing::debug!(url = %url, "TBA fetch");

        let response = self
            .http
            .get(url)
            .header("X-TBA-Auth-Key", &self.auth_key)
            .header(reqwest::header::USER_AGENT, "alliance-board")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect();
            return Err(BoardError::Upstream { status: status.as_u16(), body });
        }

        Ok(response.json().await?)
    }
}

/// Join path segments onto the base URL with each segment percent-encoded,
/// so an unnormalized event key cannot mangle the request path.
fn endpoint_url(base_url: &str, segments: &[&str]) -> Result<reqwest::Url, BoardError> {
    let mut url = reqwest::Url::parse(base_url)
        .map_err(|err| BoardError::Config(format!("invalid TBA base url: {err}")))?;
    url.path_segments_mut()
        .map_err(|_| BoardError::Config("invalid TBA base url".into()))?
        .extend(segments);
    Ok(url)
}
