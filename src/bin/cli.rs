// src/bin/cli.rs
use bgg_shelf::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = cli::run() {
        log::error!("Run failed: {e}");
        return Err(e.into());
    }
    Ok(())
}
