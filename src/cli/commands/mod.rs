//! Subcommand implementations.

/// Chat mode command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Spoken-input command handler.
pub mod listen;

/// Typed-input translation command handler.
pub mod translate;
