//! sponsorboard - Main entry point
//!
//! Loads campaign files, replays their seed sponsors through the ledger,
//! and renders placement plans from the command line.

use log::{error, info};
use std::path::Path;

use sponsorboard::api::SponsorBoard;
use sponsorboard::campaign::CampaignFile;
use sponsorboard::cli::{Cli, Commands};

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let cli = Cli::parse_args();
    match cli.command {
        Commands::Validate { file } => {
            info!("Validating campaign file: {:?}", file);
            match load_and_seed(&file) {
                Ok((_, campaign_file)) => {
                    println!(
                        "✓ Campaign file is valid: '{}' ({}, {} positions, {} seed sponsors)",
                        campaign_file.campaign.name,
                        campaign_file.campaign.campaign_type,
                        campaign_file.positions.len(),
                        campaign_file.sponsors.len()
                    );
                }
                Err(e) => {
                    error!("Campaign validation failed: {}", e);
                    eprintln!("✗ Campaign validation failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Plan { file, owner } => {
            let (board, campaign_file) = load_and_seed_or_exit(&file);
            let plan = if owner {
                board.owner_plan(&campaign_file.campaign.id)
            } else {
                board.public_plan(&campaign_file.campaign.slug)
            };
            match plan {
                Ok(plan) => println!("{}", plan.summary()),
                Err(e) => {
                    error!("Plan generation failed: {}", e);
                    eprintln!("✗ Plan generation failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Positions { file } => {
            let (board, campaign_file) = load_and_seed_or_exit(&file);
            match board.available_positions(&campaign_file.campaign.slug) {
                Ok(availability) => {
                    println!(
                        "Positions: {} total, {} claimed, {} open",
                        availability.total, availability.claimed, availability.remaining
                    );
                    for id in &availability.open_positions {
                        println!("  open: {}", id);
                    }
                }
                Err(e) => {
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Progress { file } => {
            let (board, campaign_file) = load_and_seed_or_exit(&file);
            match board.campaign_progress(&campaign_file.campaign.slug) {
                Ok(progress) => {
                    let currency = &campaign_file.campaign.currency;
                    println!(
                        "Raised: {} {} from {} sponsors",
                        progress.raised, currency, progress.sponsor_count
                    );
                    if let (Some(goal), Some(percent)) = (progress.goal, progress.percent) {
                        println!("Goal:   {} {} ({}%)", goal, currency, percent);
                    }
                }
                Err(e) => {
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Load a campaign file and replay it onto a fresh board
fn load_and_seed(path: &Path) -> Result<(SponsorBoard, CampaignFile), Box<dyn std::error::Error>> {
    let campaign_file = CampaignFile::load(path)?;
    let board = SponsorBoard::new();
    board.register_file(campaign_file.clone())?;
    Ok((board, campaign_file))
}

fn load_and_seed_or_exit(path: &Path) -> (SponsorBoard, CampaignFile) {
    match load_and_seed(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load campaign file: {}", e);
            eprintln!("✗ Failed to load campaign file: {}", e);
            std::process::exit(1);
        }
    }
}
