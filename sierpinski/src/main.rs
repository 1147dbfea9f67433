use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use sierpinski::render::{default_output_path, render_to_file, DocumentStamp};
use sierpinski::Config;

const PROGRAM: &str = env!("CARGO_BIN_NAME");

/// Draw Sierpinski's triangle into a PDF.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// TOML file overriding the default page, colors and metadata
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (default: <program name>.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if args.print_config {
        let text = config
            .to_toml_string()
            .context("Failed to serialize config")?;
        print!("{}", text);
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(PROGRAM));
    info!("Rendering {:.1}x{:.1} page to {}", config.page_width, config.page_height(), output.display());

    let report = render_to_file(&config, &DocumentStamp::now(PROGRAM), &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Computation time {} seconds, triangle side {} pixels, {} sub-triangles.",
        report.compute_seconds, report.side_length, report.triangle_count
    );
    Ok(())
}
