//! Generate headers from templates and bump the build version.

use anyhow::{Context, Result};
use autogen_build::{Options, DEFAULT_CONF, DEFAULT_PATTERN};
use clap::Parser;
use env_logger::Target;
use log::LevelFilter;
use std::path::PathBuf;

/// Generate C headers from `$NAME$` templates.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file holding placeholder values and the build version.
    #[arg(short, long, env = "AUTOGEN_CONFIG", default_value = DEFAULT_CONF)]
    config: PathBuf,
    /// Template pattern.
    #[arg(short, long, env = "AUTOGEN_PATTERN", default_value = DEFAULT_PATTERN)]
    pattern: String,
    /// Only show what would be generated.
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Log level.
    #[arg(short, long, default_value_t = LevelFilter::Info)]
    level: LevelFilter,
    /// Project root.
    #[arg(default_value = ".")]
    root: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::builder().target(Target::Stdout).filter_level(args.level).format_target(false).init();

    log::info!("======== running header autogen in {} ========", args.root.display());

    let opts = Options { root: args.root, conf: args.config, pattern: args.pattern, dry_run: args.dry_run };
    let res = autogen_build::run(&opts).context("header generation failed");

    match &res {
        Ok(report) => log::info!(
            "======== generated {} header(s) with version {}, next version is {} ========",
            report.generated.len(),
            report.version,
            report.next_version
        ),
        Err(err) => log::error!("======== {err:#} ========"),
    }
    res?;

    Ok(())
}
