//! Headless driver for the animated navigation cube.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    color_eyre::install()?;
    env_logger::builder().init();

    let prefs = navcube_prefs::Preferences::load(args.prefs.as_deref());
    cli::exec(args.subcommand, prefs)
}
