use async_trait::async_trait;
use tracing::{debug, warn};

use super::SummonerLookup;
use super::profile::{SummonerProfile, select_preferred_queue};
use super::query::IdentityQuery;
use crate::ddragon::DataDragon;
use crate::error::AppError;
use crate::riot::{LeagueEntryDto, RiotClient, SummonerDto};

/// Lookup backed by the Riot API and Data Dragon.
pub struct RiotLookup {
    riot: RiotClient,
    ddragon: DataDragon,
}

impl RiotLookup {
    pub fn new(riot: RiotClient, ddragon: DataDragon) -> Self {
        Self { riot, ddragon }
    }

    /// Ranked entries by PUUID, falling back to the summoner id endpoint.
    ///
    /// 404 and 400 on the first call trigger the fallback; a 404 there (or no
    /// summoner id to fall back on) means the player has no ranked entry.
    async fn league_entries(
        &self,
        summoner: &SummonerDto,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        let err = match self.riot.get_league_entries_by_puuid(&summoner.puuid).await {
            Ok(entries) => return Ok(entries),
            Err(err) => err,
        };

        if !matches!(err.status(), Some(404 | 400)) {
            return Err(err);
        }

        let Some(summoner_id) = summoner.id.as_deref() else {
            debug!(status = ?err.status(), "🏆 No ranked entries by PUUID and no summoner id");
            return Ok(Vec::new());
        };

        debug!(status = ?err.status(), "🏆 Retrying ranked entries by summoner id");
        match self.riot.get_league_entries_by_summoner_id(summoner_id).await {
            Ok(entries) => Ok(entries),
            Err(err) if err.status() == Some(404) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    /// Any failure here only costs the avatar.
    async fn icon_url(&self, icon_id: i64) -> Option<String> {
        match self.ddragon.profile_icon_url(icon_id).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, icon_id, "🖼️ ⚠️ Profile icon unavailable");
                None
            }
        }
    }
}

#[async_trait]
impl SummonerLookup for RiotLookup {
    async fn lookup(&self, query: &IdentityQuery) -> Result<SummonerProfile, AppError> {
        if !self.riot.has_api_key() {
            return Err(AppError::MissingApiKey);
        }

        let (summoner, name, tag_line) = match &query.tag_line {
            Some(tag_line) => {
                debug!(
                    stage = "resolving-account",
                    riot_id = %query.display(),
                    "🔎 Resolving Riot ID"
                );
                let account = self
                    .riot
                    .get_account_by_riot_id(&query.game_name, tag_line)
                    .await?;

                debug!(stage = "resolving-summoner", "🔎 Resolving summoner");
                let summoner = self.riot.get_summoner_by_puuid(&account.puuid).await?;

                let name = account.game_name.unwrap_or_else(|| query.game_name.clone());
                let tag_line = account.tag_line.or_else(|| Some(tag_line.clone()));
                (summoner, name, tag_line)
            }
            None => {
                debug!(stage = "resolving-summoner", "🔎 Resolving summoner by name");
                let summoner = self.riot.get_summoner_by_name(&query.game_name).await?;

                let name = summoner
                    .name
                    .clone()
                    .unwrap_or_else(|| query.game_name.clone());
                (summoner, name, None)
            }
        };

        debug!(stage = "resolving-details", "🔎 Fetching ranked entries and icon");
        let (entries, icon_url) = tokio::join!(
            self.league_entries(&summoner),
            self.icon_url(summoner.profile_icon_id)
        );
        let entries = entries?;

        Ok(SummonerProfile::from_entry(
            name,
            tag_line,
            select_preferred_queue(&entries),
            icon_url,
        ))
    }
}
