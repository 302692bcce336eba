use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use stepscan::cli;
use stepscan::logging::{self, Verbosity};
use stepscan::output::OutputFormatter;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let config = args.discovery_config()?;
    let resolver = config.build().context("Invalid discovery configuration")?;
    let result = resolver
        .resolve()
        .with_context(|| format!("Discovery failed for {}", resolver.root_location()))?;

    let rendered = OutputFormatter::format(&config.root, &result, args.format)?;
    if !args.quiet {
        print!("{rendered}");
    }

    Ok(())
}
