// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheWarmerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("no path provided")]
    NoProjectPath,

    #[error("project directory not found: {0}")]
    ProjectNotFound(PathBuf),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("symfony console not found at {0}")]
    ConsoleNotFound(PathBuf),

    #[error("error while globbing files: {0}")]
    GlobError(#[from] globset::Error),

    #[error(
        "can't get stats for the \"{path}\" file, check the project permissions or if a new file was created: {reason}"
    )]
    StatError { path: PathBuf, reason: String },

    #[error("command `{command}` failed with exit code {code}: {output}")]
    CommandFailed {
        command: String,
        code: i32,
        output: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CacheWarmerError>;
