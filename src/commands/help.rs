//! `earthview help [COMMAND]`.

use anyhow::Result;

/// Show help for one command, or the command overview.
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("animate") | Some("a") => super::render::display_help(),
        Some("render") => super::render::display_render_help(),
        Some("times") | Some("t") => super::times::display_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("(none)                  Draw the terminator for now or --at <time>");
    log_indented!("animate, a              Run the day/night cycle in the terminal");
    log_indented!("times, t <lon> <lat>    Print sunrise, sunset and twilight times");
    log_indented!("help, h [COMMAND]       Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'earthview help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'earthview --help' to see all options and general usage.");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: earthview help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  animate, render or times; omit for the overview");
    log_end!();
}
