use std::path::PathBuf;

use anyhow::Context;
use wing_hero::{HeroApp, HeroConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => HeroConfig::load_from(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => HeroConfig::load().context("loading default config")?,
    };
    log::debug!("starting with {config:?}");

    HeroApp::new(config)?.run()?;
    Ok(())
}
