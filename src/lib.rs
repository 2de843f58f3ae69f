// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod format;
pub mod fs;
pub mod logging;
pub mod project;
pub mod types;
pub mod watch;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{load_raw_for_project, ProjectConfig};
use crate::engine::Monitor;
use crate::exec::ConsoleBackend;
use crate::format::{duration_millis, format_duration, version_link, VERSION};
use crate::fs::{FileSystem, RealFileSystem};
use crate::project::{locate_project_root, verify_console};
use crate::watch::{FingerprintMap, WatchSpec};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project discovery and config loading
/// - the console check
/// - the initial scan (the first baseline)
/// - the monitoring loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    info!(version = VERSION, link = %version_link(VERSION), "cache-warmer");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let cwd = std::env::current_dir().context("reading current directory")?;

    let root = locate_project_root(fs.as_ref(), args.project.as_deref(), &cwd)
        .context("project directory not found")?;
    info!(root = %root.display(), "project directory");

    let cfg = build_config(fs.as_ref(), &root, &args)?;

    let console_path = verify_console(fs.as_ref(), &cfg).context("symfony console not found")?;
    info!(path = %console_path.display(), "symfony console");

    let spec = WatchSpec::from_config(&cfg)?;

    if args.dry_run {
        let baseline = crate::watch::scan(fs.as_ref(), &spec)?;
        print_dry_run(&cfg, &baseline);
        return Ok(());
    }

    let backend = ConsoleBackend::from_config(&cfg);
    let version = backend
        .console()
        .version()
        .await
        .context("error while running the Symfony version command")?;
    info!(version = %version, "symfony env");

    let started = Instant::now();
    let baseline = crate::watch::scan(fs.as_ref(), &spec)?;
    let elapsed = duration_millis(started.elapsed());

    if baseline.is_empty() {
        warn!("no file to watch found");
        return Ok(());
    }

    info!(
        files = baseline.len(),
        root = %root.display(),
        elapsed = %format_duration(elapsed),
        "file(s) watched"
    );
    info!(pid = std::process::id(), "press CTRL+C to stop watching");

    let monitor = Monitor::new(fs, spec, cfg.interval(), baseline, backend);

    // The loop never returns; Ctrl-C is the only way out.
    tokio::select! {
        _ = monitor.run() => {}
        res = tokio::signal::ctrl_c() => {
            res.context("listening for Ctrl+C")?;
            info!("stopped watching");
        }
    }

    Ok(())
}

/// Defaults, then the TOML file, then command-line flags.
pub fn build_config(fs: &dyn FileSystem, root: &Path, args: &CliArgs) -> Result<ProjectConfig> {
    let mut raw = load_raw_for_project(fs, root, args.config.as_deref())?;
    args.apply_to(&mut raw);
    let cfg = ProjectConfig::try_from(raw)?;
    debug!(?cfg, "effective configuration");
    Ok(cfg)
}

/// Dry-run output: the effective settings and every watched file.
fn print_dry_run(cfg: &ProjectConfig, baseline: &FingerprintMap) {
    let watch = cfg.watch();
    let console = cfg.console();

    println!("cache-warmer dry-run");
    println!("  root = {}", cfg.root().display());
    println!("  dirs = {:?}", watch.dirs);
    println!("  exclude = {:?}", watch.exclude);
    println!("  vendor = {:?}", watch.vendor);
    println!("  interval = {}", format_duration(duration_millis(watch.interval)));
    println!(
        "  console = {} (env: {}, debug: {}, mode: {})",
        console.path, console.env, console.debug, console.mode
    );
    if let Some(pools) = console.pools.console_args() {
        println!("  pools = {:?}", pools);
    }
    println!();

    println!("files ({}):", baseline.len());
    for path in baseline.keys() {
        let shown = crate::watch::path_utils::relative_str(cfg.root(), path)
            .unwrap_or_else(|| path.display().to_string());
        println!("  - {shown}");
    }

    debug!("dry-run complete (no execution)");
}
