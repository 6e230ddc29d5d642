//! Chat mode UI components.

use crate::ui::Style;

use super::session::SessionConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} - Interactive Translation Mode",
        Style::header("parla"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(config: &SessionConfig) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}          {} {}",
        Style::label("to"),
        Style::value(config.target.name),
        Style::code(format!("({})", config.target.speech_code))
    );
    println!(
        "  {}       {}",
        Style::label("model"),
        Style::value(&config.model)
    );
    println!(
        "  {} {}",
        Style::label("translation"),
        Style::secondary(&config.translation.endpoint)
    );
    match &config.speech {
        Some(speech) => println!(
            "  {}      {}",
            Style::label("speech"),
            Style::secondary(&speech.endpoint)
        ),
        None => println!(
            "  {}      {}",
            Style::label("speech"),
            Style::secondary("(text only)")
        ),
    }
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    println!(
        "  {}  {}",
        Style::command("/config"),
        Style::secondary("Show current configuration")
    );
    println!(
        "  {}    {}",
        Style::command("/help"),
        Style::secondary("Show this help")
    );
    println!(
        "  {}    {}",
        Style::command("/quit"),
        Style::secondary("Exit chat mode")
    );
    println!(
        "  {}     {}",
        Style::command("/set"),
        Style::secondary("Change a setting: /set to <language>, /set model <name>")
    );
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
