//! CLI entry point: parses arguments and hands off to [`mdcop_cli::run`].

use clap::Parser;

use mdcop_cli::args::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    mdcop_cli::init_logging(args.verbose);

    if let Err(err) = mdcop_cli::run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    Ok(())
}
