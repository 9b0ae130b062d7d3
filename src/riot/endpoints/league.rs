use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::types::LeagueEntryDto;

impl RiotClient {
    /// Ranked entries of a player, one per queue played.
    pub async fn get_league_entries_by_puuid(
        &self,
        puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        let url = format!(
            "{}/lol/league/v4/entries/by-puuid/{}",
            self.platform_url,
            urlencoding::encode(puuid)
        );

        self.get(&url).await
    }

    /// Same entries keyed by the encrypted summoner id.
    pub async fn get_league_entries_by_summoner_id(
        &self,
        summoner_id: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        let url = format!(
            "{}/lol/league/v4/entries/by-summoner/{}",
            self.platform_url,
            urlencoding::encode(summoner_id)
        );

        self.get(&url).await
    }
}
