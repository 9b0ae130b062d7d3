use crate::error::SearchErrorCode;

/// Longest tag line Riot accepts.
pub const MAX_TAG_LINE_LEN: usize = 5;

/// A validated Riot identity to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityQuery {
    pub game_name: String,
    /// `None` selects the legacy name-only lookup.
    pub tag_line: Option<String>,
}

impl IdentityQuery {
    /// Validates the two form fields.
    ///
    /// A supplied tag field is sanitized and wins when non-empty. Otherwise a
    /// `name#tag` game name is split on its `#`; a tag field that sanitized to
    /// empty with nothing to split is rejected.
    pub fn parse(game_name: &str, tag_line: Option<&str>) -> Result<Self, SearchErrorCode> {
        let tag_field = tag_line.map(sanitize_tag_line);
        let (game_name, tag_line) = match (tag_field, split_riot_id(game_name)) {
            (Some(tag), _) if !tag.is_empty() => (game_name.trim().to_string(), Some(tag)),
            (_, Some((name, tag))) => (name, Some(sanitize_tag_line(&tag))),
            (tag, None) => (game_name.trim().to_string(), tag),
        };

        if game_name.is_empty() {
            return Err(SearchErrorCode::EmptyName);
        }

        if tag_line.as_deref().is_some_and(str::is_empty) {
            return Err(SearchErrorCode::EmptyTagline);
        }

        Ok(Self {
            game_name,
            tag_line,
        })
    }

    /// `Name #TAG`, or just the name.
    pub fn display(&self) -> String {
        match &self.tag_line {
            Some(tag) => format!("{} #{}", self.game_name, tag),
            None => self.game_name.clone(),
        }
    }
}

/// Splits pasted `name#tag` text.
///
/// Returns `None` when there is no `#`, when it is the first or last character
/// of the trimmed text, or when either side is blank. The tag stops at the
/// next `#`.
pub fn split_riot_id(text: &str) -> Option<(String, String)> {
    let trimmed = text.trim();
    let (name, rest) = trimmed.split_once('#')?;

    let name = name.trim();
    let tag = rest.split('#').next().unwrap_or_default().trim();
    if name.is_empty() || tag.is_empty() {
        return None;
    }

    Some((name.to_string(), tag.to_string()))
}

/// Keeps ASCII letters and digits, at most [`MAX_TAG_LINE_LEN`], uppercased.
pub fn sanitize_tag_line(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_TAG_LINE_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_hash_splits() {
        assert_eq!(
            split_riot_id("  Le Conservateur # 3012 "),
            Some(("Le Conservateur".into(), "3012".into()))
        );
        assert_eq!(split_riot_id("a#b#c"), Some(("a".into(), "b".into())));
        assert_eq!(split_riot_id("a##c"), None);
    }

    #[test]
    fn edge_hash_does_not_split() {
        assert_eq!(split_riot_id("#EUW"), None);
        assert_eq!(split_riot_id("Faker#"), None);
        assert_eq!(split_riot_id("Faker"), None);
        assert_eq!(split_riot_id("Faker #   "), None);
        assert_eq!(split_riot_id("   # EUW"), None);
    }

    #[test]
    fn tag_lines_are_sanitized() {
        assert_eq!(sanitize_tag_line("euw"), "EUW");
        assert_eq!(sanitize_tag_line("#e-u w1!"), "EUW1");
        assert_eq!(sanitize_tag_line("abcdefgh"), "ABCDE");
        assert_eq!(sanitize_tag_line("éé12"), "12");
        assert_eq!(sanitize_tag_line("!!!"), "");
    }

    #[test]
    fn sanitizing_is_idempotent() {
        for raw in ["euw", "#e-u w1!", "abcdefgh", "ñ1ñ2ñ3ñ4ñ5ñ6", "", "KR 1"] {
            let once = sanitize_tag_line(raw);
            let twice = sanitize_tag_line(&once);

            assert_eq!(once, twice);
            assert!(once.len() <= MAX_TAG_LINE_LEN);
            assert!(
                once.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn empty_name_is_rejected_first() {
        assert_eq!(
            IdentityQuery::parse("   ", Some("")),
            Err(SearchErrorCode::EmptyName)
        );
        assert_eq!(IdentityQuery::parse("", None), Err(SearchErrorCode::EmptyName));
    }

    #[test]
    fn empty_tag_field_is_rejected() {
        assert_eq!(
            IdentityQuery::parse("Faker", Some(" -- ")),
            Err(SearchErrorCode::EmptyTagline)
        );
    }

    #[test]
    fn blank_tag_field_falls_back_to_the_name() {
        let query = IdentityQuery::parse("Faker#KR1", Some("  ")).unwrap();
        assert_eq!(query.game_name, "Faker");
        assert_eq!(query.tag_line.as_deref(), Some("KR1"));

        let query = IdentityQuery::parse("Faker#kr1", Some("EUW")).unwrap();
        assert_eq!(query.game_name, "Faker#kr1");
        assert_eq!(query.tag_line.as_deref(), Some("EUW"));
    }

    #[test]
    fn only_the_first_tag_segment_is_kept() {
        let query = IdentityQuery::parse("Faker#kr1#extra", None).unwrap();
        assert_eq!(query.game_name, "Faker");
        assert_eq!(query.tag_line.as_deref(), Some("KR1"));
    }

    #[test]
    fn name_field_may_carry_the_tag() {
        let query = IdentityQuery::parse(" Faker#kr1 ", None).unwrap();
        assert_eq!(query.game_name, "Faker");
        assert_eq!(query.tag_line.as_deref(), Some("KR1"));
        assert_eq!(query.display(), "Faker #KR1");
    }

    #[test]
    fn name_only_queries_use_the_legacy_flow() {
        let query = IdentityQuery::parse("#Faker", None).unwrap();
        assert_eq!(query.game_name, "#Faker");
        assert_eq!(query.tag_line, None);
    }
}
