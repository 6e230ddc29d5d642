//! # parla - Voice-Enabled Translation CLI
//!
//! `parla` translates text with an OpenAI-compatible chat-completions
//! endpoint and speaks the result through a remote text-to-speech
//! service. It can also listen: capture a phrase from the microphone,
//! transcribe it remotely, and run the same translate-and-speak flow.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a file and speak the result
//! parla --to Spanish ./notes.txt
//!
//! # Translate from stdin, text only
//! echo "Good morning" | parla --to French --text-only
//!
//! # Speak into the microphone instead of typing
//! parla listen --to Japanese
//!
//! # Interactive mode
//! parla chat
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/parla/config.toml`:
//!
//! ```toml
//! [parla]
//! to = "Spanish"
//!
//! [translation]
//! endpoint = "https://api.example.com"
//! model = "gemini-1.5-flash-latest"
//! api_key_env = "PARLA_TRANSLATION_API_KEY"
//!
//! [speech]
//! endpoint = "https://tts.example.com"
//!
//! [recognition]
//! endpoint = "https://stt.example.com"
//! model = "whisper-1"
//! ```

/// Interactive chat mode for translation sessions.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and service settings.
pub mod config;

/// Input reading from files and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// The translate-and-speak pipeline shared by all input modes.
pub mod pipeline;

/// Microphone capture, speech recognition, synthesis, and playback.
pub mod speech;

/// Translation client for OpenAI-compatible APIs.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
