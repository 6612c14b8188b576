mod cli;

use clap::Parser;
use tracing::{debug, trace};

use cli::{Cli, Commands, Output};

fn init_tracing(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "daftar=debug",
        _ => "daftar=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("daftar started with verbosity level: {verbose}");
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let out = Output::resolve(cli.json);

    let result = match cli.command {
        Commands::Message { line } => cli::message::run(&line, out),
        Commands::Report { file } => cli::report::run(&file, out),
        Commands::Transactions { file, csv } => cli::transactions::run(&file, csv, out),
        Commands::Form { file } => cli::form::run(&file, out),
        Commands::Pnr { file } => cli::pnr::run(&file, out),
        Commands::Config { format, color } => cli::config::run(format, color),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
