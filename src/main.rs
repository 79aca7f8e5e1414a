mod config;

use anyhow::{Context, Result};
use clap::Parser;

use bicviz::{bicluster, data, render, RenderSession};
use config::Config;

fn main() -> Result<()> {
    let cfg = Config::parse();

    let default_level = if cfg.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let (dataset, meta) = data::loader::load_file(&cfg.data)?;
    let results = bicluster::load_biclusters(&cfg.results)?;

    let kind = cfg.mode.into();
    let mut session = RenderSession::new(cfg.out_dir.clone(), cfg.folder_label());

    for (index, records) in &results {
        if cfg.block.is_some_and(|b| b != *index) {
            continue;
        }
        for (i, record) in records.iter().enumerate() {
            render::render(kind, &mut session, record, &dataset, &meta)
                .with_context(|| format!("rendering bicluster {i} of block {index}"))?;
        }
    }

    if let Some(b) = cfg.block.filter(|b| !results.contains_key(b)) {
        log::warn!("Block {b} not found in {}", cfg.results.display());
    }

    println!(
        "{} chart(s) written to {}",
        session.counter(),
        session.output_dir(kind).display()
    );
    Ok(())
}
