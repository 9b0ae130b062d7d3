use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Platform routing values for Riot API (Summoner-v4, League-v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    BR1,
    LA1,
    LA2,
    NA1,
    PBE1,
    JP1,
    KR,
    EUN1,
    EUW1,
    ME1,
    RU,
    TR1,
    OC1,
    PH2,
    SG2,
    TH2,
    TW2,
    VN2,
}

impl Platform {
    pub const ALL: [Platform; 18] = [
        Self::BR1,
        Self::LA1,
        Self::LA2,
        Self::NA1,
        Self::PBE1,
        Self::JP1,
        Self::KR,
        Self::EUN1,
        Self::EUW1,
        Self::ME1,
        Self::RU,
        Self::TR1,
        Self::OC1,
        Self::PH2,
        Self::SG2,
        Self::TH2,
        Self::TW2,
        Self::VN2,
    ];

    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BR1 => "br1",
            Self::LA1 => "la1",
            Self::LA2 => "la2",
            Self::NA1 => "na1",
            Self::PBE1 => "pbe1",
            Self::JP1 => "jp1",
            Self::KR => "kr",
            Self::EUN1 => "eun1",
            Self::EUW1 => "euw1",
            Self::ME1 => "me1",
            Self::RU => "ru",
            Self::TR1 => "tr1",
            Self::OC1 => "oc1",
            Self::PH2 => "ph2",
            Self::SG2 => "sg2",
            Self::TH2 => "th2",
            Self::TW2 => "tw2",
            Self::VN2 => "vn2",
        }
    }

    /// Account-v1 cluster serving this platform.
    pub fn to_region(self) -> Region {
        Region::from_platform_code(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    /// Accepts routing codes (`euw1`) and short names (`euw`, `eune`, `lan`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        let code = match code.as_str() {
            "lan" => "la1",
            "las" => "la2",
            "eune" | "eun" => "eun1",
            "oce" | "oc" => "oc1",
            other => other,
        };

        Self::ALL
            .into_iter()
            .find(|platform| {
                let full = platform.as_str();
                full == code || full.trim_end_matches(|c: char| c.is_ascii_digit()) == code
            })
            .ok_or_else(|| AppError::InvalidRegion(s.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Regional routing values for Riot API (Account-v1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    /// Cluster used when a platform code is not in the routing table.
    pub const FALLBACK: Region = Region::Americas;

    /// Resolves the regional cluster for a raw platform code such as `euw1`.
    /// Unknown codes resolve to [`Region::FALLBACK`].
    pub fn from_platform_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "br1" | "la1" | "la2" | "na1" | "oc1" | "pbe1" => Self::Americas,
            "eun1" | "euw1" | "tr1" | "ru" | "me1" => Self::Europe,
            "jp1" | "kr" => Self::Asia,
            "ph2" | "sg2" | "th2" | "tw2" | "vn2" => Self::Sea,
            _ => Self::FALLBACK,
        }
    }

    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
