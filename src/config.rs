use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::AppError;
use crate::riot::Platform;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when unset or blank; lookups then fail with `missing-api-key`.
    pub riot_api_key: Option<String>,
    pub platform: Platform,
    pub platform_url: String,
    pub regional_url: String,
    pub ddragon_url: String,
    pub ddragon_locale: String,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub image_timeout: Duration,
}

impl Config {
    const DEFAULT_PLATFORM: Platform = Platform::EUW1;
    const DEFAULT_DDRAGON_URL: &'static str = "https://ddragon.leagueoflegends.com";
    const DEFAULT_DDRAGON_LOCALE: &'static str = "fr_FR";
    const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;
    const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let riot_api_key = env::var("RIOT_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let platform = match env::var("RIOT_PLATFORM") {
            Ok(code) => code.parse()?,
            Err(_) => Self::DEFAULT_PLATFORM,
        };

        let mut config = Self::for_platform(platform);
        config.riot_api_key = riot_api_key;

        if let Ok(url) = env::var("RIOT_PLATFORM_URL") {
            config.platform_url = trim_url(url)?;
        }

        if let Ok(url) = env::var("RIOT_REGIONAL_URL") {
            config.regional_url = trim_url(url)?;
        }

        if let Ok(url) = env::var("DDRAGON_URL") {
            config.ddragon_url = trim_url(url)?;
        }

        if let Ok(locale) = env::var("DDRAGON_LOCALE") {
            config.ddragon_locale = locale;
        }

        if let Some(limit) = env::var("RIOT_RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
        {
            config.riot_rate_limit_per_second = limit;
        }

        if let Some(secs) = env::var("IMAGE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.image_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Defaults for `platform` without reading the environment.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            riot_api_key: None,
            platform,
            platform_url: platform.base_url(),
            regional_url: platform.to_region().base_url(),
            ddragon_url: Self::DEFAULT_DDRAGON_URL.into(),
            ddragon_locale: Self::DEFAULT_DDRAGON_LOCALE.into(),
            riot_rate_limit_per_second: NonZeroU32::new(Self::DEFAULT_RIOT_RATE_LIMIT_PER_SECOND)
                .unwrap_or(NonZeroU32::MIN),
            image_timeout: Duration::from_secs(Self::DEFAULT_IMAGE_TIMEOUT_SECS),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.riot_api_key = Some(key.into());
        self
    }
}

fn trim_url(url: String) -> Result<String, AppError> {
    let url = url.trim().trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::Config(format!("invalid base URL: {url}")));
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riot::Region;

    #[test]
    fn defaults_follow_the_platform() {
        let config = Config::for_platform(Platform::NA1);

        assert_eq!(config.platform_url, "https://na1.api.riotgames.com");
        assert_eq!(config.regional_url, "https://americas.api.riotgames.com");
        assert_eq!(config.platform.to_region(), Region::Americas);
        assert!(config.riot_api_key.is_none());
    }

    #[test]
    fn base_urls_lose_trailing_slashes() {
        assert_eq!(
            trim_url("http://localhost:5173/api/riot/platform/".into()).unwrap(),
            "http://localhost:5173/api/riot/platform"
        );
        assert!(matches!(
            trim_url("localhost".into()),
            Err(AppError::Config(_))
        ));
    }
}
