use anyhow::Result;
use clap::Parser;
use tutor_render::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Route log::info!() etc. to <tmp>/tutor_render_debug.log; mirrored to
    // stderr when RUST_LOG is set. --log-level wins over RUST_LOG and DEBUG_LEVEL.
    tutor_render::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()));

    log::info!("Starting tutor-render {}", tutor_render::VERSION);

    let config = cli::commands::load_config(cli.config.as_deref())?;
    let result = cli::commands::run(cli.command, &config);

    if let Err(ref e) = result {
        log::error!("tutor-render failed: {e:#}");
    }
    result
}
