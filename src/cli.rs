use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sponsorboard - slot-based sponsorship campaign toolkit
#[derive(Parser)]
#[command(name = "sponsorboard")]
#[command(about = "Validate, inspect, and render sponsorship campaign files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a campaign file (definition, template, and seed sponsors)
    Validate {
        /// Path to campaign JSON file
        file: PathBuf,
    },
    /// Render the placement plan for a campaign file
    Plan {
        /// Path to campaign JSON file
        file: PathBuf,

        /// Render the organizer preview (includes pending sponsorships)
        #[arg(long)]
        owner: bool,
    },
    /// Show position availability for a campaign file
    Positions {
        /// Path to campaign JSON file
        file: PathBuf,
    },
    /// Show fundraising progress for a campaign file
    Progress {
        /// Path to campaign JSON file
        file: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_validate_command() {
        let cli = Cli::try_parse_from(["sponsorboard", "validate", "campaign.json"]).unwrap();
        match cli.command {
            Commands::Validate { file } => {
                assert_eq!(file.to_str().unwrap(), "campaign.json");
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_plan_owner_flag() {
        let cli =
            Cli::try_parse_from(["sponsorboard", "plan", "campaign.json", "--owner"]).unwrap();
        match cli.command {
            Commands::Plan { owner, .. } => assert!(owner),
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_plan_defaults_to_public() {
        let cli = Cli::try_parse_from(["sponsorboard", "plan", "campaign.json"]).unwrap();
        match cli.command {
            Commands::Plan { owner, .. } => assert!(!owner),
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["sponsorboard"]).is_err());
    }
}
