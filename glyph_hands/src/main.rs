//! glyph_hands — interactive entry point.

use std::path::PathBuf;

use anyhow::{bail, Context};
use glyph_hands::app::run;
use glyph_hands::config::AppConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Glyph Hands — Hand-Tracked Symbol Overlay           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse simulation  (use --features leap for hardware)");
    println!();

    let cfg = match parse_args(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Configuration rejected: {:#}", e);
            eprintln!("Usage: glyph_hands [--config <file.json>] [--two-hands] [--seed <n>]");
            std::process::exit(2);
        }
    };

    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// `--config` is applied first, so the other flags override the file.
fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<AppConfig> {
    let mut config_path: Option<PathBuf> = None;
    let mut two_hands = false;
    let mut seed: Option<u64> = None;

    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--two-hands" => two_hands = true,
            "--seed" => {
                let n = args.next().context("--seed needs a number")?;
                seed = Some(n.parse().with_context(|| format!("bad seed {:?}", n))?);
            }
            other => bail!("unknown argument {:?}", other),
        }
    }

    let mut cfg = match config_path {
        Some(path) => AppConfig::load(&path)?,
        None       => AppConfig::default(),
    };
    if two_hands {
        cfg.tracking.two_hands = true;
    }
    if seed.is_some() {
        cfg.scene.seed = seed;
    }
    Ok(cfg)
}
