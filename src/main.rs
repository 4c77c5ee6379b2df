use clap::Parser;
use sncli::cli::dispatcher::Dispatcher;
use sncli::cli::main_types::Cli;
use sncli::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.verbose {
        println!("Verbose mode is enabled");
        if let Some(path) = &cli.config {
            println!("Using config file: {}", path.display());
        }
    }

    let dispatcher = Dispatcher::new(cli.config, cli.verbose);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("{} Hint: {}", e.severity().emoji(), hint);
        }
        std::process::exit(1);
    }
}
