use anyhow::Result;
use clap::Parser;

use parla_cli::cli::commands::{chat, configure, listen, translate};
use parla_cli::cli::{Args, Command};
use parla_cli::output::{self, OutputConfig};
use parla_cli::translation::{print_languages, validate_language};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        ..OutputConfig::default()
    });

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        Some(Command::Chat { to, model }) => {
            if let Some(ref lang) = to {
                validate_language(lang)?;
            }

            let options = chat::ChatOptions { to, model };
            chat::run_chat(options).await?;
        }
        Some(Command::Listen {
            to,
            model,
            text_only,
        }) => {
            if let Some(ref lang) = to {
                validate_language(lang)?;
            }

            let options = listen::ListenOptions {
                to,
                model,
                text_only,
            };
            listen::run_listen(options).await?;
        }
        None => {
            if let Some(ref lang) = args.to {
                validate_language(lang)?;
            }

            let options = translate::TranslateOptions {
                file: args.file,
                to: args.to,
                model: args.model,
                text_only: args.text_only,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
