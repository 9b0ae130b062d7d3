//! summoner-banner - look up a League of Legends player and export their
//! ranked banner.
//!
//! # Commands
//!
//! - `summoner-banner search <NAME> --tag <TAG>` - print the ranked profile
//! - `summoner-banner banner <NAME> --tag <TAG>` - export the banner image
//! - `summoner-banner champions` - list champion backgrounds
//! - `summoner-banner skins <CHAMPION>` - list the skins of a champion
//!
//! `NAME` may also be written `name#tag`. Configuration comes from the
//! environment (or a `.env` file), `RIOT_API_KEY` being the only value needed
//! for online lookups.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use summoner_banner::banner::{BannerRenderer, BannerRequest, ExportFormat, win_rate};
use summoner_banner::ddragon::DataDragon;
use summoner_banner::riot::RiotClient;
use summoner_banner::search::{PreviewLookup, RiotLookup, SummonerProfile, SummonerSearch};
use summoner_banner::{AppError, Config, logging};

#[derive(Parser)]
#[command(name = "summoner-banner")]
#[command(about = "Look up a League of Legends player and export their ranked banner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a player and print their ranked profile
    Search(QueryArgs),

    /// Look up a player and save their banner as an image
    Banner(BannerArgs),

    /// List the champions usable as banner background
    Champions,

    /// List the skins of a champion
    Skins {
        /// Champion id, e.g. `Ahri`
        champion: String,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Game name (before the #), or the full `name#tag`
    name: String,

    /// Tag line (after the #)
    #[arg(short, long)]
    tag: Option<String>,

    /// Use sample profiles instead of the Riot API
    #[arg(long)]
    offline: bool,
}

#[derive(Args)]
struct BannerArgs {
    #[command(flatten)]
    query: QueryArgs,

    /// Champion whose splash art is used as background
    #[arg(short, long)]
    background: Option<String>,

    /// Skin number of the background champion
    #[arg(short, long, requires = "background")]
    skin: Option<u32>,

    #[arg(short, long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// JPEG quality
    #[arg(short, long, default_value_t = 92, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Directory the banner is written to
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Jpg,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let outcome = match Config::from_env() {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Search(code)) => {
            eprintln!("{code} [{}]", code.as_str());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: Config) -> Result<(), AppError> {
    debug!(platform = %config.platform, "🐙 Starting");
    let ddragon = DataDragon::new(&config)?;

    match cli.command {
        Commands::Search(args) => {
            let profile = lookup(&config, &args, ddragon).await?;
            print_profile(&profile);
        }
        Commands::Banner(args) => {
            let profile = lookup(&config, &args.query, ddragon.clone()).await?;
            let background = match &args.background {
                Some(champion) => Some(background_url(&ddragon, champion, args.skin).await?),
                None => None,
            };

            let format = match args.format {
                Format::Png => ExportFormat::Png,
                Format::Jpg => ExportFormat::jpeg(args.quality),
            };

            let renderer = BannerRenderer::new(&config)?;
            let request = BannerRequest {
                profile: &profile,
                background_url: background.as_deref(),
                format,
            };
            let path = renderer.export(&request, &args.out).await?;
            println!("{}", path.display());
        }
        Commands::Champions => {
            for option in ddragon.champion_backgrounds().await? {
                println!("{}\t{}", option.value, option.label);
            }
        }
        Commands::Skins { champion } => {
            for option in ddragon.champion_skins(&champion).await? {
                println!("{}\t{}", option.value, option.label);
            }
        }
    }

    Ok(())
}

async fn lookup(
    config: &Config,
    args: &QueryArgs,
    ddragon: DataDragon,
) -> Result<SummonerProfile, AppError> {
    let tag = args.tag.as_deref();

    let outcome = if args.offline {
        SummonerSearch::new(PreviewLookup).search(&args.name, tag).await
    } else {
        let riot = RiotClient::new(config)?;
        SummonerSearch::new(RiotLookup::new(riot, ddragon))
            .search(&args.name, tag)
            .await
    };

    Ok(outcome?)
}

/// Splash art of `champion`, matched on id or name, for the given skin.
async fn background_url(
    ddragon: &DataDragon,
    champion: &str,
    skin: Option<u32>,
) -> Result<String, AppError> {
    let champions = ddragon.champion_backgrounds().await?;
    let option = champions
        .iter()
        .find(|o| o.value.eq_ignore_ascii_case(champion) || o.label.eq_ignore_ascii_case(champion))
        .ok_or_else(|| AppError::Catalog(format!("unknown champion {champion}")))?;

    let Some(skin) = skin else {
        return Ok(option.image_url.clone());
    };

    let skins = ddragon.champion_skins(&option.value).await?;
    skins
        .into_iter()
        .find(|s| s.value == skin.to_string())
        .map(|s| s.image_url)
        .ok_or_else(|| AppError::Catalog(format!("{} has no skin {skin}", option.label)))
}

fn print_profile(profile: &SummonerProfile) {
    println!("{}", profile.display_name());
    println!("{} {} · {} LP", profile.tier, profile.rank, profile.league_points);
    println!(
        "{} victoires / {} défaites ({}%)",
        profile.wins,
        profile.losses,
        win_rate(profile.wins, profile.losses)
    );
    if let Some(icon) = &profile.profile_icon_url {
        println!("{icon}");
    }
}
