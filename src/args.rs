//! Command-line argument parsing.
//!
//! Arguments are parsed by hand into a [`CliAction`]. Flags may appear
//! before or after the subcommand; anything unrecognised turns into
//! [`CliAction::ShowHelpDueToError`].

/// What the binary should do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Draw a single terminator frame
    Render {
        debug_enabled: bool,
        config_dir: Option<String>,
        at: Option<String>,
        log_file: Option<String>,
    },
    /// Animate the terminator, advancing the simulated clock each frame
    Animate {
        debug_enabled: bool,
        config_dir: Option<String>,
        at: Option<String>,
        speed: Option<u32>,
        frames: Option<u64>,
        log_file: Option<String>,
    },
    /// Print sun times for a location
    Times {
        debug_enabled: bool,
        longitude: f64,
        latitude: f64,
        date: Option<String>,
        json: bool,
    },
    /// `help [COMMAND]`
    HelpCommand { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

pub struct ParsedArgs {
    pub action: CliAction,
}

/// Options that take a value.
#[derive(Default)]
struct Options {
    config_dir: Option<String>,
    at: Option<String>,
    log_file: Option<String>,
    speed: Option<u32>,
    frames: Option<u64>,
}

impl Options {
    /// Any option that only the drawing commands understand.
    fn any_drawing_option(&self) -> bool {
        self.config_dir.is_some()
            || self.at.is_some()
            || self.log_file.is_some()
            || self.speed.is_some()
            || self.frames.is_some()
    }
}

/// Numbers such as `-74.0` are positional, not flags.
fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && arg.parse::<f64>().is_err()
}

impl ParsedArgs {
    /// Parse arguments, the first of which is the program name.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ParsedArgs {
            action: Self::parse_action(args),
        }
    }

    fn parse_action<I, S>(args: I) -> CliAction
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut json = false;
        let mut unknown_arg_found = false;
        let mut options = Options::default();
        let mut positional: Vec<String> = Vec::new();

        let mut iter = args_vec.into_iter();
        while let Some(arg) = iter.next() {
            if !is_flag(&arg) {
                positional.push(arg);
                continue;
            }

            match arg.as_str() {
                "-d" | "--debug" => debug_enabled = true,
                "-h" | "--help" => display_help = true,
                "-V" | "-v" | "--version" => display_version = true,
                "--json" => json = true,
                "-c" | "--config" => match iter.next() {
                    Some(dir) => options.config_dir = Some(dir),
                    None => unknown_arg_found = true,
                },
                "--at" => match iter.next() {
                    Some(at) => options.at = Some(at),
                    None => unknown_arg_found = true,
                },
                "--log" => match iter.next() {
                    Some(path) => options.log_file = Some(path),
                    None => unknown_arg_found = true,
                },
                "--speed" => match iter.next().and_then(|v| v.parse().ok()) {
                    Some(speed) => options.speed = Some(speed),
                    None => unknown_arg_found = true,
                },
                "--frames" => match iter.next().and_then(|v| v.parse().ok()) {
                    Some(frames) => options.frames = Some(frames),
                    None => unknown_arg_found = true,
                },
                _ => unknown_arg_found = true,
            }
        }

        // Version takes precedence, then help, then errors.
        if display_version {
            return CliAction::ShowVersion;
        }
        if display_help {
            return CliAction::ShowHelp;
        }
        if unknown_arg_found {
            return CliAction::ShowHelpDueToError;
        }

        let Some((command, rest)) = positional.split_first() else {
            if json || options.speed.is_some() || options.frames.is_some() {
                return CliAction::ShowHelpDueToError;
            }
            return CliAction::Render {
                debug_enabled,
                config_dir: options.config_dir,
                at: options.at,
                log_file: options.log_file,
            };
        };

        match command.as_str() {
            "animate" | "a" if rest.is_empty() && !json => CliAction::Animate {
                debug_enabled,
                config_dir: options.config_dir,
                at: options.at,
                speed: options.speed,
                frames: options.frames,
                log_file: options.log_file,
            },
            "times" | "t" if !options.any_drawing_option() => {
                Self::parse_times(rest, debug_enabled, json)
            }
            "help" | "h" if rest.len() <= 1 => CliAction::HelpCommand {
                command: rest.first().cloned(),
            },
            _ => CliAction::ShowHelpDueToError,
        }
    }

    fn parse_times(rest: &[String], debug_enabled: bool, json: bool) -> CliAction {
        let (longitude, latitude) = match rest {
            [lon, lat, ..] => match (lon.parse::<f64>(), lat.parse::<f64>()) {
                (Ok(lon), Ok(lat)) => (lon, lat),
                _ => return CliAction::ShowHelpDueToError,
            },
            _ => return CliAction::ShowHelpDueToError,
        };

        if rest.len() > 3 {
            return CliAction::ShowHelpDueToError;
        }

        CliAction::Times {
            debug_enabled,
            longitude,
            latitude,
            date: rest.get(2).cloned(),
            json,
        }
    }

    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays the top-level help message.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("earthview [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("    --at <time>        Render at a UTC instant, \"YYYY-MM-DD HH:MM\"");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("    --log <file>       Write output to a file instead of the terminal");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("animate, a             Run the day/night cycle in the terminal");
    log_indented!("times, t <lon> <lat>   Print sunrise, sunset and twilight times");
    log_indented!("help, h [command]      Show help for a command");
    log_end!();
}
