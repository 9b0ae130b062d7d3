use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Riot API key is not configured")]
    MissingApiKey,

    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("Data Dragon error: {status} - {url}")]
    DataDragon { status: u16, url: String },

    #[error("Incomplete catalog data: {0}")]
    Catalog(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Search(#[from] SearchErrorCode),

    #[error("Impossible de télécharger la bannière")]
    ExportFailed,

    /// Failure observed by every waiter of a de-duplicated request.
    #[error(transparent)]
    Shared(Arc<AppError>),
}

impl AppError {
    /// Upstream HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RiotApi { status, .. } | Self::DataDragon { status, .. } => Some(*status),
            Self::Shared(inner) => inner.status(),
            _ => None,
        }
    }
}

/// Closed set of outcomes a failed summoner search can be reported as.
///
/// The [`Display`](std::fmt::Display) output is the message shown to the user,
/// [`SearchErrorCode::as_str`] the stable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SearchErrorCode {
    #[error("Veuillez saisir un pseudo avant de lancer une recherche.")]
    EmptyName,
    #[error("Veuillez saisir un tag avant de lancer une recherche.")]
    EmptyTagline,
    #[error("Clé API manquante. Définissez RIOT_API_KEY pour activer la recherche Riot.")]
    MissingApiKey,
    #[error("Aucun joueur ne correspond à ce pseudo. Vérifiez l'orthographe.")]
    NotFound,
    #[error("La limite d'appels à l'API Riot est atteinte. Réessayez dans quelques instants.")]
    RateLimited,
    #[error("Clé API invalide ou expirée. Générez-en une nouvelle dans le portail Riot.")]
    Unauthorized,
    #[error("Accès refusé par l'API Riot. Vérifiez les droits associés à votre clé.")]
    Forbidden,
    #[error("Le service Riot est momentanément indisponible. Réessayez plus tard.")]
    ServiceUnavailable,
    #[error("Une erreur inattendue est survenue avec l'API Riot. Veuillez réessayer.")]
    RiotApiError,
    #[error("Impossible de contacter l'API Riot. Vérifiez votre connexion et réessayez.")]
    NetworkError,
}

impl SearchErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty-name",
            Self::EmptyTagline => "empty-tagline",
            Self::MissingApiKey => "missing-api-key",
            Self::NotFound => "not-found",
            Self::RateLimited => "rate-limited",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::ServiceUnavailable => "service-unavailable",
            Self::RiotApiError => "riot-api-error",
            Self::NetworkError => "network-error",
        }
    }

    /// Local errors are detected before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::EmptyTagline | Self::MissingApiKey
        )
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500 | 502 | 503 | 504 => Self::ServiceUnavailable,
            _ => Self::RiotApiError,
        }
    }

    /// Maps any lookup failure onto a single code.
    pub fn classify(error: &AppError) -> Self {
        match error {
            AppError::MissingApiKey => Self::MissingApiKey,
            AppError::Search(code) => *code,
            AppError::Shared(inner) => Self::classify(inner),
            AppError::RiotApi { status, .. } | AppError::DataDragon { status, .. } => {
                Self::from_status(*status)
            }
            _ => Self::NetworkError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_codes() {
        assert_eq!(SearchErrorCode::from_status(401), SearchErrorCode::Unauthorized);
        assert_eq!(SearchErrorCode::from_status(403), SearchErrorCode::Forbidden);
        assert_eq!(SearchErrorCode::from_status(404), SearchErrorCode::NotFound);
        assert_eq!(SearchErrorCode::from_status(429), SearchErrorCode::RateLimited);
        for status in [500, 502, 503, 504] {
            assert_eq!(
                SearchErrorCode::from_status(status),
                SearchErrorCode::ServiceUnavailable
            );
        }
        for status in [400, 405, 418, 501] {
            assert_eq!(
                SearchErrorCode::from_status(status),
                SearchErrorCode::RiotApiError
            );
        }
    }

    #[test]
    fn shared_errors_keep_their_status() {
        let inner = AppError::RiotApi {
            status: 429,
            message: "GET /x failed".into(),
        };
        let shared = AppError::Shared(Arc::new(inner));

        assert_eq!(shared.status(), Some(429));
        assert_eq!(
            SearchErrorCode::classify(&shared),
            SearchErrorCode::RateLimited
        );
    }

    #[test]
    fn unexpected_errors_are_network_errors() {
        assert_eq!(
            SearchErrorCode::classify(&AppError::Config("boom".into())),
            SearchErrorCode::NetworkError
        );
        assert_eq!(
            SearchErrorCode::classify(&AppError::MissingApiKey),
            SearchErrorCode::MissingApiKey
        );
    }

    #[test]
    fn identifiers_are_kebab_case() {
        assert_eq!(SearchErrorCode::EmptyTagline.as_str(), "empty-tagline");
        assert_eq!(
            SearchErrorCode::ServiceUnavailable.as_str(),
            "service-unavailable"
        );
        assert!(SearchErrorCode::EmptyName.is_local());
        assert!(!SearchErrorCode::NotFound.is_local());
    }
}
