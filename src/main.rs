//! skiff - inline terminal prompts from the command line
//!
//! # Quick Start
//!
//! ```text
//! skiff list main develop release/1.2    # pick one, prints "<index>\t<item>"
//! skiff confirm --label "Deploy?"        # exit code 0 = yes, 1 = no
//! skiff themes                           # pick a palette, prints its name
//! ```
//!
//! Prompts draw on stderr, so `choice=$(skiff list ...)` captures only the
//! result.
//!
//! # Keybindings (list)
//!
//! | Key | Action |
//! |-----|--------|
//! | ↑/k, ↓/j | Move selection |
//! | / | Search |
//! | Esc | Leave search |
//! | Enter | Commit search / choose |
//! | Ctrl+C | Abort |

use std::env;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use skiff::config::data_dir;
use skiff::core::{CrosstermMode, TerminalMode};
use skiff::{
    Config, ConfirmPrompt, ListConfig, ListPrompt, Palette, PromptError, TerminalSession, Theme,
};

/// Exit code for an aborted prompt (128 + SIGINT)
const EXIT_ABORTED: u8 = 130;

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What to prompt for
enum Command {
    List {
        label: Option<String>,
        view_size: Option<usize>,
        no_search: bool,
        items: Vec<String>,
    },
    Confirm {
        label: Option<String>,
        default_no: bool,
        no_default: bool,
    },
    Themes,
}

fn print_version() {
    eprintln!("skiff {}", VERSION);
}

fn print_help() {
    eprintln!("skiff {} - inline terminal prompts", VERSION);
    eprintln!();
    eprintln!("Usage: skiff list [OPTIONS] ITEM...");
    eprintln!("       skiff confirm [OPTIONS]");
    eprintln!("       skiff themes");
    eprintln!();
    eprintln!("List options:");
    eprintln!("  -l, --label <TEXT>    Text shown above the list");
    eprintln!("  -n, --view <ROWS>     Max rows shown at once");
    eprintln!("      --no-search       Disable search mode");
    eprintln!();
    eprintln!("Confirm options:");
    eprintln!("  -l, --label <TEXT>    Question to ask");
    eprintln!("      --default-no      Empty answer means no");
    eprintln!("      --no-default      Require an explicit answer");
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  -t, --theme <NAME>    Color scheme ({})", Palette::list().join(", "));
    eprintln!();
    eprintln!("Other options:");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Output:");
    eprintln!("  list                  Prints \"<index>\\t<item>\" of the chosen item");
    eprintln!("  confirm               Exit code 0 for yes, 1 for no");
    eprintln!("  themes                Prints the chosen color scheme name");
    eprintln!("  (aborted)             Exit code 130");
    eprintln!("  Prompts are drawn on stderr; stdout carries only the result");
    eprintln!();
    eprintln!("Configuration: ~/.skiff/config.toml");
    eprintln!("Logs:          ~/.skiff/skiff.log (level from SKIFF_LOG)");
}

/// Parsed command line
struct Args {
    command: Command,
    theme: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(sub) = args.first() else {
        return Err("Missing command (list or confirm)".to_string());
    };

    match sub.as_str() {
        "-h" | "--help" => {
            print_help();
            std::process::exit(0);
        }
        "-v" | "--version" => {
            print_version();
            std::process::exit(0);
        }
        "list" | "confirm" | "themes" => {}
        other => return Err(format!("Unknown command: {}", other)),
    }

    let mut label = None;
    let mut theme = None;
    let mut view_size = None;
    let mut no_search = false;
    let mut default_no = false;
    let mut no_default = false;
    let mut items = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-l" | "--label" => {
                i += 1;
                label = Some(args.get(i).ok_or("Missing label argument")?.clone());
            }
            "-t" | "--theme" => {
                i += 1;
                theme = Some(args.get(i).ok_or("Missing theme argument")?.clone());
            }
            "-n" | "--view" => {
                i += 1;
                let rows = args.get(i).ok_or("Missing view size argument")?;
                view_size = Some(
                    rows.parse::<usize>()
                        .map_err(|_| format!("Invalid view size: {}", rows))?,
                );
            }
            "--no-search" => no_search = true,
            "--default-no" => default_no = true,
            "--no-default" => no_default = true,
            "--" => {
                items.extend(args[i + 1..].iter().cloned());
                break;
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("Unknown option: {}", arg));
            }
            item => items.push(item.to_string()),
        }
        i += 1;
    }

    let command = match sub.as_str() {
        "list" => Command::List {
            label,
            view_size,
            no_search,
            items,
        },
        "confirm" => Command::Confirm {
            label,
            default_no,
            no_default,
        },
        _ => Command::Themes,
    };
    Ok(Args { command, theme })
}

fn init_logging() {
    let log_path = data_dir()
        .map(|dir| dir.join("skiff.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("skiff.log"));

    // Create log directory if needed
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    // Never log to the terminal the prompt draws on
    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("SKIFF_LOG")
            .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

/// Run one prompt. Frames go to the session, the result goes to `out`.
fn run<R, W, M>(
    command: Command,
    config: Config,
    theme: Theme,
    session: &mut TerminalSession<R, W, M>,
    out: &mut impl Write,
) -> Result<ExitCode, PromptError>
where
    R: Read,
    W: Write,
    M: TerminalMode,
{
    match command {
        Command::List {
            label,
            view_size,
            no_search,
            items,
        } => {
            let mut list_config = config.list;
            if let Some(label) = label {
                list_config.label = label;
            }
            if let Some(rows) = view_size {
                list_config.view_size = rows;
            }
            if no_search {
                list_config.allow_search = false;
            }

            let mut prompt = ListPrompt::new(list_config).with_theme(theme);
            let index = prompt.prompt(session, items.as_slice())?;
            writeln!(out, "{}\t{}", index, items[index])?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Confirm {
            label,
            default_no,
            no_default,
        } => {
            let mut confirm_config = config.confirm;
            if let Some(label) = label {
                confirm_config.label = label;
            }
            if default_no {
                confirm_config.default_value = false;
            }
            if no_default {
                confirm_config.allow_default = false;
            }

            let mut prompt = ConfirmPrompt::new(confirm_config).with_theme(theme);
            if prompt.prompt(session)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Themes => {
            let names = Palette::list();
            let list_config = ListConfig {
                label: format!("Color scheme (current: {})", config.color_scheme),
                ..config.list
            };
            let mut prompt = ListPrompt::new(list_config).with_theme(theme);
            let index = prompt.prompt(session, names.as_slice())?;
            writeln!(out, "{}", names[index])?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let Args { command, theme } = match parse_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("skiff {} starting...", VERSION);

    let mut config = Config::load();
    if let Some(name) = theme {
        config.color_scheme = name;
    }
    let theme = Theme::new(config.get_palette());
    // Draw on stderr so stdout can be captured by the caller
    let mut session = TerminalSession::new(io::stdin(), io::stderr(), CrosstermMode);

    let stdout = io::stdout();
    let outcome = run(command, config, theme, &mut session, &mut stdout.lock());

    match outcome {
        Ok(code) => Ok(code),
        Err(PromptError::UserAborted) => {
            info!("aborted by user");
            Ok(ExitCode::from(EXIT_ABORTED))
        }
        Err(e) => Err(e.into()),
    }
}
