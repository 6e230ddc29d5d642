//! Configuration file management and service settings.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_TRANSLATION_MODEL, Needs, ParlaConfig, ResolveOptions,
    ResolvedConfig, ResolvedService, ServiceConfig, resolve_config,
};
