use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let outcome = cli::run(args)?;

    if outcome.check_failed {
        eprintln!(
            "{} file(s) contain fully qualified references that can be imported",
            outcome.summary.updated
        );
        std::process::exit(1);
    }
    Ok(())
}
