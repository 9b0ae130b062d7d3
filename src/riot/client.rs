use std::fmt;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::AppError;

/// Authenticated client for the Riot API.
///
/// Platform calls (Summoner-v4, League-v4) and regional calls (Account-v1) go
/// to different clusters; both base URLs come from [`Config`].
pub struct RiotClient {
    http: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Riot API Key
    key: Option<String>,
    pub(crate) platform_url: String,
    pub(crate) regional_url: String,
}

impl RiotClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("summoner-banner/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            limiter: RateLimiter::direct(Quota::per_second(config.riot_rate_limit_per_second)),
            key: config.riot_api_key.clone(),
            platform_url: config.platform_url.clone(),
            regional_url: config.regional_url.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.key.is_some()
    }

    /// Shared request logic for every Riot endpoint.
    ///
    /// Refuses to send anything without a key and keeps the numeric status of
    /// any non-success response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let key = self.key.as_deref().ok_or(AppError::MissingApiKey)?;

        self.limiter.until_ready().await;
        tracing::trace!(url, "🛰️ GET");

        let res = self
            .http
            .get(url)
            .header("X-Riot-Token", key)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "🛰️ ⚠️ Riot API refused request");
            return Err(AppError::RiotApi {
                status: status.as_u16(),
                message: format!("GET {url} failed"),
            });
        }

        Ok(res.json().await?)
    }
}

impl fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotClient")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("platform_url", &self.platform_url)
            .field("regional_url", &self.regional_url)
            .finish()
    }
}
