//! Summoner lookup pipeline.
//!
//! A search goes `validating → resolving-account → resolving-summoner →
//! resolving-details → done`, or stops at the first failure. Failures are
//! classified exactly once, in [`SummonerSearch::search`].

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::error::{AppError, SearchErrorCode};

mod preview;
mod profile;
mod query;
mod riot;
mod session;

pub use preview::PreviewLookup;
pub use profile::{SummonerProfile, UNRANKED_TIER, format_tier_label, select_preferred_queue};
pub use query::{IdentityQuery, MAX_TAG_LINE_LEN, sanitize_tag_line, split_riot_id};
pub use riot::RiotLookup;
pub use session::{SearchSession, SearchTicket};

/// Exactly one of a profile or a classified error.
pub type SearchOutcome = Result<SummonerProfile, SearchErrorCode>;

/// Source of profiles for a validated query.
#[async_trait]
pub trait SummonerLookup: Send + Sync {
    async fn lookup(&self, query: &IdentityQuery) -> Result<SummonerProfile, AppError>;
}

pub struct SummonerSearch<L> {
    lookup: L,
    session: SearchSession,
}

impl<L: SummonerLookup> SummonerSearch<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            session: SearchSession::new(),
        }
    }

    /// Validates the form fields, then runs the lookup.
    #[instrument(skip(self))]
    pub async fn search(&self, game_name: &str, tag_line: Option<&str>) -> SearchOutcome {
        let query = IdentityQuery::parse(game_name, tag_line)?;

        match self.lookup.lookup(&query).await {
            Ok(profile) => {
                info!(
                    riot_id = %profile.display_name(),
                    tier = %profile.tier,
                    "🔎 ✅ Summoner found"
                );
                Ok(profile)
            }
            Err(e) => {
                let code = SearchErrorCode::classify(&e);
                warn!(error = %e, code = code.as_str(), "🔎 ⚠️ Summoner search failed");
                Err(code)
            }
        }
    }

    /// Like [`search`](Self::search), but yields `None` when a newer search was
    /// started before this one finished.
    pub async fn search_latest(
        &self,
        game_name: &str,
        tag_line: Option<&str>,
    ) -> Option<SearchOutcome> {
        let ticket = self.session.begin();
        let outcome = self.search(game_name, tag_line).await;
        self.session.accept(ticket, outcome)
    }
}
