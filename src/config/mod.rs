// src/config/mod.rs

//! Project configuration.
//!
//! - [`model`] holds the raw TOML structures, the defaults and the validated
//!   [`ProjectConfig`].
//! - [`loader`] finds and reads the config file.
//! - [`validate`] turns a [`RawConfigFile`] into a [`ProjectConfig`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_raw_for_project};
pub use model::{
    ConsoleSection, ConsoleSettings, ProjectConfig, RawConfigFile, VendorWatch, WatchSection,
    WatchSettings,
};
