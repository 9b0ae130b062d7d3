//! Data Dragon static asset service: version, champion and skin catalogs.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::InFlightCache;
use crate::config::Config;
use crate::error::AppError;

/// Selectable decorative image (champion splash art).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOption {
    pub value: String,
    pub label: String,
    pub image_url: String,
}

pub type ChampionBackgroundOption = CatalogOption;
pub type ChampionSkinOption = CatalogOption;

#[derive(Debug, Deserialize)]
struct ChampionList {
    data: HashMap<String, ChampionSummary>,
}

#[derive(Debug, Deserialize)]
struct ChampionSummary {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ChampionDetail {
    data: HashMap<String, ChampionSkins>,
}

#[derive(Debug, Deserialize)]
struct ChampionSkins {
    skins: Vec<SkinDto>,
}

#[derive(Debug, Deserialize)]
struct SkinDto {
    num: u32,
    name: String,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    locale: String,
    version: InFlightCache<(), String>,
    champions: InFlightCache<(), Vec<ChampionBackgroundOption>>,
    skins: InFlightCache<String, Vec<ChampionSkinOption>>,
}

/// Handle to the Data Dragon gateway. Clones share the same caches.
#[derive(Clone)]
pub struct DataDragon {
    inner: Arc<Inner>,
}

impl DataDragon {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("summoner-banner/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: config.ddragon_url.clone(),
                locale: config.ddragon_locale.clone(),
                version: InFlightCache::new(),
                champions: InFlightCache::new(),
                skins: InFlightCache::new(),
            }),
        })
    }

    /// Latest published version, fetched once per process.
    pub async fn latest_version(&self) -> Result<String, AppError> {
        let this = self.clone();
        self.inner
            .version
            .get_or_fetch((), move || async move { this.fetch_latest_version().await })
            .await
    }

    /// Every champion as a background option, sorted by label.
    pub async fn champion_backgrounds(&self) -> Result<Vec<ChampionBackgroundOption>, AppError> {
        let this = self.clone();
        self.inner
            .champions
            .get_or_fetch((), move || async move { this.fetch_champion_backgrounds().await })
            .await
    }

    /// Skins of one champion, cached per champion id.
    pub async fn champion_skins(
        &self,
        champion_id: &str,
    ) -> Result<Vec<ChampionSkinOption>, AppError> {
        let champion_id = champion_id.trim();
        if champion_id.is_empty() {
            return Ok(Vec::new());
        }

        let this = self.clone();
        let key = champion_id.to_string();
        self.inner
            .skins
            .get_or_fetch(key.clone(), move || async move {
                this.fetch_champion_skins(key).await
            })
            .await
    }

    /// Profile icon URL for the latest version.
    pub async fn profile_icon_url(&self, icon_id: i64) -> Result<String, AppError> {
        let version = self.latest_version().await?;
        Ok(self.profile_icon_url_for(&version, icon_id))
    }

    pub fn profile_icon_url_for(&self, version: &str, icon_id: i64) -> String {
        format!(
            "{}/cdn/{}/img/profileicon/{}.png",
            self.inner.base_url, version, icon_id
        )
    }

    /// Splash art is not versioned.
    pub fn splash_url(&self, champion_id: &str, skin_num: u32) -> String {
        format!(
            "{}/cdn/img/champion/splash/{}_{}.jpg",
            self.inner.base_url, champion_id, skin_num
        )
    }

    async fn fetch_latest_version(&self) -> Result<String, AppError> {
        let url = format!("{}/api/versions.json", self.inner.base_url);
        let versions: Vec<String> = self.fetch_json(&url).await?;

        let latest = versions
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Catalog("no Data Dragon version available".into()))?;

        info!(version = %latest, "🐉 Using Data Dragon assets");
        Ok(latest)
    }

    async fn fetch_champion_backgrounds(&self) -> Result<Vec<ChampionBackgroundOption>, AppError> {
        let version = self.latest_version().await?;
        let url = format!(
            "{}/cdn/{}/data/{}/champion.json",
            self.inner.base_url, version, self.inner.locale
        );
        let list: ChampionList = self.fetch_json(&url).await?;

        let mut options: Vec<_> = list
            .data
            .into_values()
            .map(|champion| ChampionBackgroundOption {
                image_url: self.splash_url(&champion.id, 0),
                value: champion.id,
                label: champion.name,
            })
            .collect();
        sort_by_label(&mut options);

        debug!(count = options.len(), "🐉 Champion catalog loaded");
        Ok(options)
    }

    async fn fetch_champion_skins(
        &self,
        champion_id: String,
    ) -> Result<Vec<ChampionSkinOption>, AppError> {
        let version = self.latest_version().await?;
        let url = format!(
            "{}/cdn/{}/data/{}/champion/{}.json",
            self.inner.base_url,
            version,
            self.inner.locale,
            urlencoding::encode(&champion_id)
        );
        let mut detail: ChampionDetail = self.fetch_json(&url).await?;

        let champion = detail
            .data
            .remove(&champion_id)
            .ok_or_else(|| AppError::Catalog(format!("champion {champion_id} missing")))?;

        let skins: Vec<_> = champion
            .skins
            .into_iter()
            .map(|skin| ChampionSkinOption {
                value: skin.num.to_string(),
                label: if skin.name == "default" {
                    "Original".to_string()
                } else {
                    skin.name
                },
                image_url: self.splash_url(&champion_id, skin.num),
            })
            .collect();

        debug!(champion = %champion_id, count = skins.len(), "🐉 Skin catalog loaded");
        Ok(skins)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        tracing::trace!(url, "🐉 GET");
        let res = self.inner.http.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(AppError::DataDragon {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(res.json().await?)
    }
}

fn sort_by_label(options: &mut [CatalogOption]) {
    options.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.label.cmp(&b.label))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str) -> CatalogOption {
        CatalogOption {
            value: label.to_string(),
            label: label.to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn labels_sort_case_insensitively() {
        let mut options = vec![option("Zed"), option("aurelion Sol"), option("Ahri")];
        sort_by_label(&mut options);

        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Ahri", "aurelion Sol", "Zed"]);
    }

    #[test]
    fn asset_urls_are_templated() {
        let mut config = Config::for_platform(crate::riot::Platform::EUW1);
        config.ddragon_url = "https://cdn.test".into();
        let ddragon = DataDragon::new(&config).unwrap();

        assert_eq!(
            ddragon.profile_icon_url_for("15.12.1", 1234),
            "https://cdn.test/cdn/15.12.1/img/profileicon/1234.png"
        );
        assert_eq!(
            ddragon.splash_url("Lux", 7),
            "https://cdn.test/cdn/img/champion/splash/Lux_7.jpg"
        );
    }
}
