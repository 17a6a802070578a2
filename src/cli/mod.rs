pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;
use log::error;

use crate::config::ConfigOverrides;

/// Run the command-line interface and return the process exit code
pub fn run() -> i32 {
    let cli = types::Cli::parse();

    logging::init_logging(cli.debug, cli.quiet);

    let result = match cli.command {
        types::Commands::Build {
            input,
            output,
            delete_output,
            watch,
            marker,
            config,
        } => commands::handle_build_command(&ConfigOverrides {
            config_file: config,
            input,
            output,
            delete_output,
            watch,
            template_marker: marker,
        }),
        types::Commands::Clean {
            input,
            output,
            config,
        } => commands::handle_clean_command(&ConfigOverrides {
            config_file: config,
            input,
            output,
            ..Default::default()
        }),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}
