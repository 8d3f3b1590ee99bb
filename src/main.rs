use clap::Parser;
use log::{error, info};
use methylctools::cli::{Args, Commands};
use methylctools::commands::fqconv::{self, FqconvOptions};
use methylctools::config::Config;
use methylctools::utils::logging;

fn main() {
    let args = Args::parse();
    logging::init(args.silent);
    info!(
        "command: {}",
        std::env::args().collect::<Vec<_>>().join(" ")
    );

    let result = match args.command {
        Commands::Fqconv {
            input1,
            input2,
            output,
            batch_size,
            max_warnings,
            stats_json,
        } => fqconv::run(FqconvOptions {
            input1,
            input2,
            output,
            stats_json,
            silent: args.silent,
            config: Config::load().with_overrides(batch_size, max_warnings),
        })
        .map(|_| ()),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
