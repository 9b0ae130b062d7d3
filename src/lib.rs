//! Look up a League of Legends player by Riot ID and export their ranked
//! profile as a banner image.
//!
//! [`search`] resolves profiles through the Riot API ([`riot`]) and Data
//! Dragon ([`ddragon`]); [`banner`] turns a profile into an image file.

pub mod banner;
pub mod cache;
pub mod config;
pub mod ddragon;
pub mod error;
pub mod logging;
pub mod riot;
pub mod search;

pub use config::Config;
pub use error::{AppError, SearchErrorCode};
