/*!
 * Command-line interface for FileGather
 */

use std::fs;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::{info, warn};

use filegather::config::{Args, Config};
use filegather::error::Result;
use filegather::{logging, terminal, App};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        generate(shell, &mut Args::command(), "filegather", &mut io::stdout());
        return Ok(());
    }

    // Create configuration
    let mut config = Config::from_args(args);

    if !logging::init_global(&config.log_file) {
        eprintln!(
            "Warning: Failed to open log file {}",
            config.log_file.display()
        );
    }

    // Validate configuration
    config.validate()?;

    // Export labels and tree paths are absolute from here on
    config.start_dir = fs::canonicalize(&config.start_dir)?;
    info!("Starting in {}", config.start_dir.display());

    let mut app = App::new(&config);

    terminal::setup_panic_hook();
    let mut tui = terminal::init()?;
    let result = app.run(&mut tui);
    terminal::restore();

    if let Err(e) = &result {
        warn!("Exiting with error: {}", e);
    }
    result
}
