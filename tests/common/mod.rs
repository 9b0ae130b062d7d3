#![allow(dead_code)]

use httpmock::prelude::*;
use serde_json::{Value, json};

use summoner_banner::Config;
use summoner_banner::riot::Platform;

pub const API_KEY: &str = "RGAPI-test";
pub const VERSION: &str = "14.1.1";

/// Config whose Riot and Data Dragon traffic all goes to `server`.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::for_platform(Platform::EUW1).with_api_key(API_KEY);
    config.platform_url = server.base_url();
    config.regional_url = server.base_url();
    config.ddragon_url = server.base_url();
    config
}

pub async fn mock_versions(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/versions.json");
            then.status(200).json_body(json!([VERSION, "14.0.1"]));
        })
        .await
}

pub fn ranked_entry(queue: &str, tier: &str, rank: &str, lp: u32) -> Value {
    json!({
        "leagueId": "league",
        "queueType": queue,
        "tier": tier,
        "rank": rank,
        "leaguePoints": lp,
        "wins": 20,
        "losses": 10,
        "hotStreak": false
    })
}

/// 2x2 opaque PNG, decodable by the banner pipeline.
pub fn tiny_png() -> Vec<u8> {
    let mut pixmap = tiny_skia::Pixmap::new(2, 2).unwrap();
    pixmap.fill(tiny_skia::Color::from_rgba8(200, 40, 40, 255));
    pixmap.encode_png().unwrap()
}
