/// Colors of the banner frame and tier label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankStyle {
    pub border_color: &'static str,
    /// Border color at half opacity, blurred around the frame.
    pub glow_color: &'static str,
    pub text_color: &'static str,
}

const DEFAULT_RANK_STYLE: RankStyle = RankStyle {
    border_color: "#64748B",
    glow_color: "rgba(100, 116, 139, 0.5)",
    text_color: "#94A3B8",
};

pub fn rank_style(tier: &str) -> RankStyle {
    let (border_color, glow_color, text_color) = match tier.trim().to_uppercase().as_str() {
        "IRON" => ("#4A4A4A", "rgba(74, 74, 74, 0.5)", "#6B7280"),
        "BRONZE" => ("#8B5A3C", "rgba(139, 90, 60, 0.5)", "#92400E"),
        "SILVER" => ("#94A3B8", "rgba(148, 163, 184, 0.5)", "#475569"),
        "GOLD" => ("#F59E0B", "rgba(245, 158, 11, 0.5)", "#D97706"),
        "PLATINUM" => ("#06B6D4", "rgba(6, 182, 212, 0.5)", "#0891B2"),
        "EMERALD" => ("#10B981", "rgba(16, 185, 129, 0.5)", "#059669"),
        "DIAMOND" => ("#8B5CF6", "rgba(139, 92, 246, 0.5)", "#7C3AED"),
        "MASTER" => ("#EC4899", "rgba(236, 72, 153, 0.5)", "#DB2777"),
        "GRANDMASTER" => ("#EF4444", "rgba(239, 68, 68, 0.5)", "#DC2626"),
        "CHALLENGER" => ("#3B82F6", "rgba(59, 130, 246, 0.5)", "#2563EB"),
        _ => return DEFAULT_RANK_STYLE,
    };

    RankStyle {
        border_color,
        glow_color,
        text_color,
    }
}

/// Rounded win percentage, 0 without games.
pub fn win_rate(wins: u32, losses: u32) -> u32 {
    let total = u64::from(wins) + u64::from(losses);
    if total == 0 {
        return 0;
    }

    ((f64::from(wins) / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_matched_case_insensitively() {
        assert_eq!(rank_style("Gold").border_color, "#F59E0B");
        assert_eq!(rank_style("CHALLENGER").text_color, "#2563EB");
        assert_eq!(rank_style(" emerald ").glow_color, "rgba(16, 185, 129, 0.5)");
        assert_eq!(rank_style("Non classé"), DEFAULT_RANK_STYLE);
    }

    #[test]
    fn win_rate_rounds() {
        assert_eq!(win_rate(0, 0), 0);
        assert_eq!(win_rate(2, 1), 67);
        assert_eq!(win_rate(999, 123), 89);
    }

    #[test]
    fn win_rate_handles_huge_counts() {
        assert_eq!(win_rate(u32::MAX, u32::MAX), 50);
        assert_eq!(win_rate(u32::MAX, 0), 100);
    }
}
