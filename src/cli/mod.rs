use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the data directory and the survey schema
    Init,

    /// Load survey groups, surveys, questions and votes from a JSON file
    Import { file: PathBuf },

    /// List survey groups
    Groups {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the surveys of a group
    Surveys {
        group_id: i64,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Report whether a fingerprint already voted in a restricted group
    Check {
        group_id: i64,

        fingerprint: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Commands {
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Commands::Groups { .. } | Commands::Surveys { .. } | Commands::Check { .. }
        )
    }
}
