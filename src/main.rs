use clap::Parser;
use daybook::cli::commands::Cli;
use daybook::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => daybook::tui::run(cli.data_dir, cli.profile),
        Some(_) => handlers::dispatch(cli),
    };
    daybook::io::logging::flush_logging();
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
