use async_trait::async_trait;

use super::SummonerLookup;
use super::profile::SummonerProfile;
use super::query::IdentityQuery;
use crate::error::AppError;

const TIERS: [&str; 8] = [
    "Iron", "Bronze", "Silver", "Gold", "Platinum", "Emerald", "Diamond", "Master",
];

/// Offline lookup producing sample profiles, no API key needed.
#[derive(Debug, Default)]
pub struct PreviewLookup;

impl PreviewLookup {
    fn sample(name: &str) -> Option<SummonerProfile> {
        let (tier, lp, wins, losses) = match name.to_lowercase().as_str() {
            "faker" => ("Challenger", 1234, 999, 123),
            "caps" => ("Grandmaster", 820, 740, 410),
            _ => return None,
        };

        Some(profile(name, tier, "I", lp, wins, losses))
    }

    /// Same name, same profile.
    fn generated(name: &str) -> SummonerProfile {
        let seed: u32 = name.to_lowercase().chars().map(|c| c as u32).sum();
        let tier = TIERS[seed as usize % TIERS.len()];
        let wins = 10 + seed % 90;

        profile(name, tier, "IV", 50 + seed % 75, wins, wins * 6 / 10)
    }
}

fn profile(
    name: &str,
    tier: &str,
    rank: &str,
    league_points: u32,
    wins: u32,
    losses: u32,
) -> SummonerProfile {
    SummonerProfile {
        name: name.to_string(),
        tag_line: None,
        tier: tier.to_string(),
        rank: rank.to_string(),
        league_points,
        wins,
        losses,
        profile_icon_url: None,
        banner_url: None,
    }
}

#[async_trait]
impl SummonerLookup for PreviewLookup {
    async fn lookup(&self, query: &IdentityQuery) -> Result<SummonerProfile, AppError> {
        let mut profile = Self::sample(&query.game_name)
            .unwrap_or_else(|| Self::generated(&query.game_name));
        profile.tag_line = query.tag_line.clone();

        Ok(profile)
    }
}
