use crate::riot::LeagueEntryDto;

/// Tier shown for players without any ranked entry.
pub const UNRANKED_TIER: &str = "Non classé";

/// Display-ready result of one successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummonerProfile {
    pub name: String,
    pub tag_line: Option<String>,
    pub tier: String,
    pub rank: String,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
    pub profile_icon_url: Option<String>,
    pub banner_url: Option<String>,
}

impl SummonerProfile {
    /// Builds a profile from the preferred ranked entry, or unranked defaults.
    pub fn from_entry(
        name: String,
        tag_line: Option<String>,
        entry: Option<&LeagueEntryDto>,
        profile_icon_url: Option<String>,
    ) -> Self {
        Self {
            name,
            tag_line,
            tier: format_tier_label(entry.map(|e| e.tier.as_str())),
            rank: entry.map(|e| e.rank.clone()).unwrap_or_default(),
            league_points: entry.map_or(0, |e| e.league_points),
            wins: entry.map_or(0, |e| e.wins),
            losses: entry.map_or(0, |e| e.losses),
            profile_icon_url,
            banner_url: None,
        }
    }

    /// `Name #TAG`, or just the name.
    pub fn display_name(&self) -> String {
        match &self.tag_line {
            Some(tag) => format!("{} #{}", self.name, tag),
            None => self.name.clone(),
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.tier != UNRANKED_TIER
    }
}

/// Picks solo/duo, then flex 5v5, then flex 3v3, then whatever comes first.
pub fn select_preferred_queue(entries: &[LeagueEntryDto]) -> Option<&LeagueEntryDto> {
    LeagueEntryDto::QUEUE_PRIORITY
        .iter()
        .find_map(|queue| entries.iter().find(|e| e.queue_type == *queue))
        .or_else(|| entries.first())
}

/// `"GOLD"` becomes `"Gold"`; a missing or blank tier becomes [`UNRANKED_TIER`].
pub fn format_tier_label(tier: Option<&str>) -> String {
    let Some(tier) = tier.filter(|t| !t.trim().is_empty()) else {
        return UNRANKED_TIER.to_string();
    };

    let lower = tier.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
pub(crate) fn entry(queue: &str, tier: &str, lp: u32) -> LeagueEntryDto {
    LeagueEntryDto {
        queue_type: queue.to_string(),
        tier: tier.to_string(),
        rank: "II".to_string(),
        league_points: lp,
        wins: lp / 2,
        losses: lp / 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_queue_wins_over_flex() {
        let entries = vec![
            entry("RANKED_FLEX_TT", "SILVER", 10),
            entry("RANKED_FLEX_SR", "GOLD", 20),
            entry("RANKED_SOLO_5x5", "DIAMOND", 30),
        ];

        let preferred = select_preferred_queue(&entries).unwrap();
        assert_eq!(preferred.queue_type, "RANKED_SOLO_5x5");
    }

    #[test]
    fn flex_five_wins_over_flex_three() {
        let entries = vec![
            entry("RANKED_FLEX_TT", "SILVER", 10),
            entry("RANKED_FLEX_SR", "GOLD", 20),
        ];

        assert_eq!(
            select_preferred_queue(&entries).unwrap().queue_type,
            "RANKED_FLEX_SR"
        );
    }

    #[test]
    fn unknown_queues_fall_back_to_the_first_entry() {
        let entries = vec![entry("CHERRY", "GOLD", 20), entry("ARENA", "GOLD", 1)];
        assert_eq!(select_preferred_queue(&entries).unwrap().queue_type, "CHERRY");
        assert!(select_preferred_queue(&[]).is_none());
    }

    #[test]
    fn tier_labels_are_capitalized() {
        assert_eq!(format_tier_label(Some("GRANDMASTER")), "Grandmaster");
        assert_eq!(format_tier_label(Some("gold")), "Gold");
        assert_eq!(format_tier_label(None), UNRANKED_TIER);
        assert_eq!(format_tier_label(Some("  ")), UNRANKED_TIER);
    }

    #[test]
    fn missing_entry_gives_unranked_defaults() {
        let profile = SummonerProfile::from_entry("Caps".into(), Some("EUW".into()), None, None);

        assert_eq!(profile.tier, UNRANKED_TIER);
        assert_eq!(profile.rank, "");
        assert_eq!((profile.league_points, profile.wins, profile.losses), (0, 0, 0));
        assert!(!profile.is_ranked());
        assert_eq!(profile.display_name(), "Caps #EUW");
    }
}
