//! Tool to run a catalogue through the embedding pipeline and dump the
//! projected coordinates.

use anyhow::Context as _;
use clap::Parser;

use deepfield_core::{CosmologicalContext, UpdateScope};
use quasar_catalog::QuasarCatalog;

#[derive(Parser, Debug)]
#[command(about = "Project a quasar registry onto a 2D viewing plane")]
struct Args {
    /// Registry file: one `ascension_hours declination_degrees redshift`
    /// triple per line
    registry: std::path::PathBuf,

    /// Viewing plane selector (1..=6)
    #[arg(long, default_value_t = 1)]
    view: u8,

    /// Viewing right ascension in hours
    #[arg(long, default_value_t = 0.0)]
    ra1: f64,

    /// Viewing declination in degrees
    #[arg(long, default_value_t = 0.0)]
    dec1: f64,

    /// In-plane rotation in hours
    #[arg(long, default_value_t = 0.0)]
    beta: f64,

    /// Use the precise (trapezoid) integrator instead of Romberg
    #[arg(long)]
    precise: bool,

    /// Display positions in comoving space
    #[arg(long)]
    comoving: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = QuasarCatalog::from_path(&args.registry)
        .with_context(|| format!("loading {}", args.registry.display()))?;

    let mut ctx = CosmologicalContext::new();
    ctx.set_comoving_space(args.comoving)?;
    ctx.set_view_selector(args.view)?;
    ctx.set_view_angles(args.ra1, args.dec1, args.beta);
    ctx.set_precision(args.precise);
    ctx.load_catalogue(catalog);
    ctx.update(UpdateScope::All);

    println!(
        "# {} records, max ascension {:.4}h, view {}",
        ctx.catalog().len(),
        ctx.catalog().ascension_max_hours(),
        ctx.view_selector().number()
    );
    for q in ctx.quasars() {
        if let Some((x, y)) = q.projected {
            println!("{x:.6} {y:.6}");
        }
    }

    let health = ctx.domain_health();
    if !health.is_clean() {
        eprintln!(
            "warning: {} of {} records hit a negative radicand and are not finite",
            health.poisoned, health.total
        );
    }

    Ok(())
}
