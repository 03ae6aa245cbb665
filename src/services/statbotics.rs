use serde_json::Value;

use crate::domain::BoardError;

pub const STATBOTICS_BASE_URL: &str = "https://api.statbotics.io/v3";

/// Statbotics v3 read client, used to enrich imported teams with EPA.
pub struct StatboticsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatboticsClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> StatboticsClient {
        StatboticsClient {
            http,
            base_url: base_url.into(),
        }
    }

    /// Season summary for one team. The payload schema shifts between
    /// seasons, so it stays a loose `Value`; see [`epa_total`].
    pub async fn team_year(&self, team_number: u32, year: i32) -> Result<Value, BoardError> {
        let url = format!("{}/team_year/{}/{}", self.base_url, team_number, year);
        tracing::debug!(url = %url, "Statbotics fetch");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect();
            return Err(BoardError::Upstream { status: status.as_u16(), body });
        }

        Ok(response.json().await?)
    }
}

/// Total EPA from a team-year payload: `epa.total` in current payloads,
/// `epa_total` in older ones.
pub fn epa_total(payload: &Value) -> Option<f64> {
    payload
        .get("epa")
        .and_then(|epa| epa.get("total"))
        .and_then(Value::as_f64)
        .or_else(|| payload.get("epa_total").and_then(Value::as_f64))
}
