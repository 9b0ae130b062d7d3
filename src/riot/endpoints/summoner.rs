use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::types::SummonerDto;

impl RiotClient {
    /// Get summoner by PUUID (for profile icon and summoner id)
    pub async fn get_summoner_by_puuid(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_url,
            urlencoding::encode(puuid)
        );

        self.get(&url).await
    }

    /// Legacy lookup for queries without a tag line.
    pub async fn get_summoner_by_name(&self, name: &str) -> Result<SummonerDto, AppError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-name/{}",
            self.platform_url,
            urlencoding::encode(name)
        );

        self.get(&url).await
    }
}
