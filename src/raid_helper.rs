//! Raid-Helper raid plan client
//!
//! Fetches the composition of a planned raid from
//! `{base_url}/raidplan/{raid_id}`. Only the `raidDrop` list is used: each
//! placed entry carries a party/slot position, the character name, the
//! Discord user id, a spec token and a class colour.

use crate::config::AppConfig;
use crate::error::sanitize_error_message;
use crate::roster::{RaidRoster, Raider, SpecInfo};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum RaidHelperError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Raid-Helper API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Invalid raid plan: {0}")]
    InvalidResponse(String),
}

/// Anything that can produce a roster for a raid id
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch_roster(&self, raid_id: u64) -> Result<RaidRoster, RaidHelperError>;
}

#[derive(Debug, Clone)]
pub struct RaidHelperConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RaidHelperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://raid-helper.dev/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&AppConfig> for RaidHelperConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.raid_helper.base_url.clone(),
            timeout: config.raid_helper_timeout(),
        }
    }
}

pub struct RaidHelperClient {
    config: RaidHelperConfig,
    client: Client,
}

impl RaidHelperClient {
    pub fn new(config: RaidHelperConfig) -> Result<Self, RaidHelperError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RaidHelperError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn plan_url(&self, raid_id: u64) -> String {
        format!(
            "{}/raidplan/{raid_id}",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl RosterSource for RaidHelperClient {
    async fn fetch_roster(&self, raid_id: u64) -> Result<RaidRoster, RaidHelperError> {
        let url = self.plan_url(raid_id);
        debug!(url = %url, "Fetching raid plan");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RaidHelperError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RaidHelperError::Api {
                status: status.as_u16(),
                message: sanitize_error_message(&body),
            });
        }

        let plan: RaidPlan = response
            .json()
            .await
            .map_err(|e| RaidHelperError::InvalidResponse(e.to_string()))?;

        let roster = plan.into_roster();
        info!(raid_id, raiders = roster.len(), "Fetched raid plan");
        Ok(roster)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaidPlan {
    #[serde(default)]
    raid_drop: Vec<RaidDropEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaidDropEntry {
    #[serde(default, deserialize_with = "lenient_u32")]
    party_id: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    slot_id: u32,
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    userid: String,
    #[serde(default, deserialize_with = "lenient_string")]
    spec: String,
    #[serde(default, deserialize_with = "lenient_string")]
    color: String,
}

impl RaidPlan {
    fn into_roster(self) -> RaidRoster {
        let mut roster = RaidRoster::new();
        for entry in self.raid_drop {
            let Some(name) = entry.name.filter(|n| !n.trim().is_empty()) else {
                continue;
            };
            let Some(info) = SpecInfo::from_raid_helper(&entry.spec) else {
                warn!(raider = %name, spec = %entry.spec, "Unknown spec, skipping raider");
                continue;
            };
            roster.add_raider(Raider {
                party: entry.party_id,
                slot: entry.slot_id,
                name,
                discord_id: entry.userid,
                wow_class: info.class,
                spec: info.spec.to_string(),
                role: info.role,
                color: entry.color,
                flex_healer: None,
            });
        }
        roster
    }
}

/// Raid-Helper sends ids as numbers or strings depending on the endpoint version
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid number {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "expected number, got {other}"
        ))),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
