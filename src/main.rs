use anyhow::{bail, Context};
use clap::Parser;
use std::fs;

use retell::args::Cli;
use retell::corrections::DEFAULT_CORRECTIONS;
use retell::{cues, page, runs};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cues = cues::extract_cues_from_file(&cli.transcript, DEFAULT_CORRECTIONS)?;
    if cues.is_empty() {
        bail!(
            "no cues found in '{}', not writing an output file",
            cli.transcript.display()
        );
    }
    log::info!("extracted {} cues from {}", cues.len(), cli.transcript.display());

    let runs = runs::group_runs(cues);
    let html = page::render_page(&runs, &cli.video_url, &cli.title);
    fs::write(&cli.output, html)
        .with_context(|| format!("failed to write '{}'", cli.output.display()))?;

    println!("HTML file generated: {}", cli.output.display());
    Ok(())
}
