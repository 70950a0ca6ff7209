//! Binary entry point: parse arguments, set up logging and dispatch.

use anyhow::Result;

use earthview::args::{self, CliAction, ParsedArgs};
use earthview::commands;
use earthview::config;
use earthview::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use earthview::logger::{Log, LoggerGuard};
use earthview::{log_end, log_error_exit, log_indented};

/// Apply `--config` and `--log`. The returned guard must outlive the command.
fn prepare(config_dir: Option<String>, log_file: Option<String>) -> Result<Option<LoggerGuard>> {
    config::set_config_dir(config_dir)?;
    log_file.map(Log::start_file_logging).transpose()
}

fn run(action: CliAction) -> Result<()> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::HelpCommand { command } => commands::help::run_help_command(command.as_deref()),
        CliAction::Render {
            debug_enabled,
            config_dir,
            at,
            log_file,
        } => {
            let _guard = prepare(config_dir, log_file)?;
            commands::render::handle_render_command(at.as_deref(), debug_enabled)
        }
        CliAction::Animate {
            debug_enabled,
            config_dir,
            at,
            speed,
            frames,
            log_file,
        } => {
            let _guard = prepare(config_dir, log_file)?;
            commands::render::handle_animate_command(at.as_deref(), speed, frames, debug_enabled)
        }
        CliAction::Times {
            debug_enabled,
            longitude,
            latitude,
            date,
            json,
        } => commands::times::handle_times_command(
            longitude,
            latitude,
            date.as_deref(),
            json,
            debug_enabled,
        ),
    }
}

fn main() {
    let parsed_args = ParsedArgs::from_env();

    if let Err(e) = run(parsed_args.action) {
        // Errors go to the terminal even when output was silenced.
        Log::set_enabled(true);
        log_error_exit!("{}", e);
        for cause in e.chain().skip(1) {
            log_indented!("Caused by: {}", cause);
        }
        log_end!();
        std::process::exit(EXIT_FAILURE);
    }

    std::process::exit(EXIT_SUCCESS);
}
