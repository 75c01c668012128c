use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Extract entities from Greek text and map how they connect
#[derive(Parser)]
#[command(author, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write an interactive network (HTML) and a connections table (CSV) next to the input
    Graph {
        /// UTF-8 text file to analyze
        input: PathBuf,

        #[command(flatten)]
        options: CommonOptions,
    },

    /// Print verified and uncertain entities with their context
    Report {
        /// UTF-8 text file to analyze
        input: PathBuf,

        /// Only report places (LOC/GPE), skipping band detection
        #[arg(long)]
        places_only: bool,

        #[command(flatten)]
        options: CommonOptions,
    },
}

#[derive(Args, Clone, Debug)]
pub struct CommonOptions {
    /// JSON config file; missing fields use defaults
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Entity recognizer, overrides the config
    #[arg(long, short)]
    pub recognizer: Option<RecognizerArg>,

    /// Verify places against the configured place list instead of Nominatim
    #[arg(long)]
    pub offline: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RecognizerArg {
    /// Offline dictionary and date patterns
    Gazetteer,
    /// Local Ollama model
    Ollama,
}

impl From<RecognizerArg> for extract::RecognizerKind {
    fn from(arg: RecognizerArg) -> Self {
        match arg {
            RecognizerArg::Gazetteer => Self::Gazetteer,
            RecognizerArg::Ollama => Self::Ollama,
        }
    }
}
