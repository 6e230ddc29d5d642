use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "parla")]
#[command(about = "Voice-enabled translation CLI tool")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<String>,

    /// Target language name (e.g., Spanish, French, Japanese)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Translation model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Print the translation without speaking it
    #[arg(long)]
    pub text_only: bool,

    /// Suppress status messages on stderr
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure parla defaults
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// List supported target languages
    Languages,
    /// Capture a spoken phrase, translate it, and speak the result
    Listen {
        /// Target language name (e.g., Spanish, French, Japanese)
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Translation model name
        #[arg(short = 'm', long)]
        model: Option<String>,

        /// Print the translation without speaking it
        #[arg(long)]
        text_only: bool,
    },
    /// Interactive chat mode for translation
    Chat {
        /// Target language name (e.g., Spanish, French, Japanese)
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Translation model name
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
}
