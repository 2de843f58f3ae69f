// tests/config_loading.rs

mod common;
use crate::common::builders::{mock_project, ConfigBuilder};
use crate::common::{TestResult, ROOT};

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use cache_warmer::build_config;
use cache_warmer::cli::CliArgs;
use cache_warmer::config::{
    default_config_path, load_and_validate, load_raw_for_project, ProjectConfig, VendorWatch,
};
use cache_warmer::errors::CacheWarmerError;
use cache_warmer::types::{CacheMode, PoolSelection};

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["cache-warmer"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("valid arguments")
}

fn assert_config_error(cfg: ConfigBuilder, needle: &str) {
    match ProjectConfig::try_from(cfg.raw()) {
        Err(CacheWarmerError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "unexpected message: {msg}")
        }
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn defaults_apply_without_a_config_file() -> TestResult {
    let fs = mock_project(ROOT);
    let cfg = load_and_validate(&fs, Path::new(ROOT), None)?;

    let watch = cfg.watch();
    assert_eq!(
        watch.dirs,
        vec!["config", "src", "templates", "translations", "migrations"]
    );
    assert_eq!(watch.exclude, vec![".git", ".github", "node_modules"]);
    assert_eq!(watch.vendor, VendorWatch::Off);
    assert_eq!(cfg.interval(), Duration::from_millis(30));

    let console = cfg.console();
    assert_eq!(console.env, "dev");
    assert!(console.debug);
    assert_eq!(console.mode, CacheMode::Warmup);
    assert_eq!(console.pools, PoolSelection::None);
    assert_eq!(cfg.console_path(), PathBuf::from("/srv/app/bin/console"));
    Ok(())
}

#[test]
fn project_config_file_is_picked_up() -> TestResult {
    let fs = mock_project(ROOT);
    let root = Path::new(ROOT);
    fs.add_file(
        default_config_path(root),
        r#"
[watch]
dirs = ["src", "lib"]
vendor = ["acme/bundle"]
interval_ms = 250

[console]
env = "test"
debug = false
mode = "clear"
pools = []
"#,
    );

    let cfg = load_and_validate(&fs, root, None)?;

    assert_eq!(cfg.watch().dirs, vec!["src", "lib"]);
    assert_eq!(cfg.watch().exclude, vec![".git", ".github", "node_modules"]);
    assert_eq!(
        cfg.watch().vendor,
        VendorWatch::Packages(vec!["acme/bundle".to_string()])
    );
    assert_eq!(cfg.interval(), Duration::from_millis(250));
    assert_eq!(cfg.console().env, "test");
    assert!(!cfg.console().debug);
    assert_eq!(cfg.console().mode, CacheMode::Clear);
    assert_eq!(cfg.console().pools, PoolSelection::All);
    Ok(())
}

#[test]
fn explicit_config_path_must_exist() {
    let fs = mock_project(ROOT);
    let err = load_raw_for_project(&fs, Path::new(ROOT), Some(Path::new("/etc/missing.toml")))
        .unwrap_err();

    match err {
        CacheWarmerError::ConfigError(msg) => assert!(msg.contains("/etc/missing.toml")),
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_reported() {
    let fs = mock_project(ROOT);
    let root = Path::new(ROOT);
    fs.add_file(default_config_path(root), "[watch]\ninterval_ms = \"fast\"\n");

    let err = load_raw_for_project(&fs, root, None).unwrap_err();
    assert!(matches!(err, CacheWarmerError::TomlError(_)), "{err:?}");
}

#[test]
fn invalid_settings_are_rejected() {
    let root = Path::new(ROOT);

    assert_config_error(ConfigBuilder::new("relative/app"), "absolute");
    assert_config_error(ConfigBuilder::new(root).interval_ms(0), "interval_ms");
    assert_config_error(ConfigBuilder::new(root).dirs(&[" "]), "dirs");
    assert_config_error(ConfigBuilder::new(root).exclude(""), "exclude");
    assert_config_error(ConfigBuilder::new(root).vendor_package("../outside"), "vendor");
    assert_config_error(ConfigBuilder::new(root).vendor_package(""), "vendor");
    assert_config_error(ConfigBuilder::new(root).env(""), "env");
    assert_config_error(ConfigBuilder::new(root).php(""), "php");
}

#[test]
fn vendor_settings_map_to_watch_modes() {
    let root = Path::new(ROOT);

    let cfg = ConfigBuilder::new(root).watch_vendor(true).build();
    assert_eq!(cfg.watch().vendor, VendorWatch::All);

    // A package list wins over the plain flag.
    let cfg = ConfigBuilder::new(root)
        .watch_vendor(true)
        .vendor_package("symfony/framework-bundle")
        .build();
    assert_eq!(
        cfg.watch().vendor.packages(),
        &["symfony/framework-bundle".to_string()]
    );
}

#[test]
fn command_line_flags_override_the_config_file() -> TestResult {
    let fs = mock_project(ROOT);
    let root = Path::new(ROOT);
    fs.add_file(
        default_config_path(root),
        "[watch]\ninterval_ms = 100\n[console]\nenv = \"test\"\n",
    );

    let cli = args(&[
        ROOT,
        "--env=prod",
        "--no-debug",
        "--cache",
        "--exclude=var,assets",
        "--vendor=acme/bundle,acme/other",
        "--pools=cache.app,cache.system",
        "--interval=10",
    ]);
    let cfg = build_config(&fs, root, &cli)?;

    assert_eq!(cfg.console().env, "prod");
    assert!(!cfg.console().debug);
    assert_eq!(cfg.console().mode, CacheMode::Clear);
    assert_eq!(
        cfg.watch().exclude,
        vec![".git", ".github", "node_modules", "var", "assets"]
    );
    assert_eq!(
        cfg.watch().vendor,
        VendorWatch::Packages(vec!["acme/bundle".to_string(), "acme/other".to_string()])
    );
    assert_eq!(
        cfg.console().pools,
        PoolSelection::Named(vec!["cache.app".to_string(), "cache.system".to_string()])
    );
    assert_eq!(cfg.interval(), Duration::from_millis(10));
    Ok(())
}

#[test]
fn bare_vendor_and_pools_flags_select_everything() -> TestResult {
    let fs = mock_project(ROOT);
    let cli = args(&[ROOT, "--force", "--cache", "--vendor", "--pools"]);
    let cfg = build_config(&fs, Path::new(ROOT), &cli)?;

    assert_eq!(cfg.console().mode, CacheMode::Force);
    assert_eq!(cfg.watch().vendor, VendorWatch::All);
    assert_eq!(cfg.console().pools, PoolSelection::All);
    Ok(())
}

#[test]
fn missing_flags_leave_the_config_untouched() -> TestResult {
    let fs = mock_project(ROOT);
    let root = Path::new(ROOT);
    fs.add_file(default_config_path(root), "[console]\nmode = \"force\"\n");

    let cfg = build_config(&fs, root, &args(&[ROOT]))?;

    assert_eq!(cfg.console().mode, CacheMode::Force);
    assert_eq!(cfg.console().pools, PoolSelection::None);
    Ok(())
}
