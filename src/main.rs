use anyhow::{Context, Result};
use bond_calc::{BlockSet, Config, PanelPlan};
use clap::Parser;
use log::debug;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Count the running-bond wall panels that fit a width and height",
    long_about = None,
    allow_negative_numbers = true
)]
struct Args {
    /// Panel width, e.g. 7.5
    width: String,

    /// Panel height in rows
    height: i64,

    /// Configuration file path (TOML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Block lengths, comma separated (overrides config and BOND_CALC_BLOCKS)
    #[arg(short = 'b', long = "blocks")]
    blocks: Option<BlockSet>,

    /// Print the count for every height from 1 up to HEIGHT
    #[arg(short = 'e', long = "each-level")]
    each_level: bool,
}

fn main() {
    // Logs go to stderr; stdout carries only the result
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref(), args.blocks)
        .context("Failed to load configuration")?;
    let limits = &config.limits;

    let width = limits.parse_width(&args.width)?;
    let height = limits.check_height(args.height)?;
    limits.check_blocks(&config.blocks)?;

    debug!(
        "Counting panels {width} wide and {height} high with blocks [{}]",
        config.blocks
    );
    let plan = PanelPlan::build_with_limit(width, &config.blocks, limits.max_rows)?;

    if args.each_level {
        for (level, total) in plan.level_totals(height).enumerate() {
            println!("{} {}", level + 1, total?);
        }
    } else {
        println!("{}", plan.count(height)?);
    }
    Ok(())
}
