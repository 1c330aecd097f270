use clap::Parser;
use color_eyre::Result;
use todo_card::{Config, cli::Cli, logging, tui};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();
    let profile = cli.profile();

    let config = cli.load_config()?;

    // Logging is optional, the app still runs without a log directory
    match Config::get_log_dir(profile) {
        Ok(log_dir) => {
            if let Err(e) = logging::init_logging(cli.log_level(&config), &log_dir) {
                eprintln!("Warning: file logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: file logging disabled: {}", e),
    }

    let app = tui::App::new(config)?;
    tui::run_event_loop(app)?;

    Ok(())
}
