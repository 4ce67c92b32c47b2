use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dub a single video file into the target language
    Translate {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output video file
        #[arg(short, long)]
        output: PathBuf,

        /// Target language (configured default when omitted)
        #[arg(short, long)]
        target_lang: Option<String>,

        /// Source language (inferred from the target when omitted)
        #[arg(short, long)]
        source_lang: Option<String>,
    },

    /// Serve the upload form and HTTP API
    Serve {
        /// Address to bind, overrides the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Check that ffmpeg runs and the speech-to-text key is set
    Check,

    /// Write the default configuration to a file
    InitConfig {
        /// Destination file
        #[arg(short, long, default_value = "redub.toml")]
        output: PathBuf,
    },

    /// Extract audio from video file
    Extract {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },
}
