use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::cli::Cli;
use crate::logger::Logger;
use crate::menu::{pause_for_enter, prompt_selection, MenuIo, MenuSelection, TerminalMenuIo};
use crate::paths::{default_translators, resolve_script_path, PathTranslator};
use crate::runner::{run_operation, LaunchOutcome};

#[derive(Debug)]
pub(crate) struct Quit {
    pub(crate) code: i32,
    #[allow(dead_code)]
    pub(crate) reason: String,
}

impl Quit {
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code as u8)
    }
}

pub(crate) fn quit(logger: &Logger, reason: &str, code: i32) -> Quit {
    let logged = if reason.trim().is_empty() {
        "unknown"
    } else {
        reason
    };
    logger.log_event(&format!("quit reason={}", logged));
    Quit {
        code,
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    Running,
    Exited,
}

fn executable_base_dir() -> Result<PathBuf, String> {
    let exe = env::current_exe()
        .map_err(|err| format!("Failed to locate the running executable: {}", err))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| "Running executable has no parent directory.".to_string())
}

/// The interactive session. A single Exit transition (menu choice, or EOF on
/// either prompt) moves the state machine from Running to Exited; a finished
/// or missing script never does.
pub(crate) fn run_session(
    io: &mut dyn MenuIo,
    base_dir: &Path,
    translators: &[Box<dyn PathTranslator>],
    logger: &Logger,
) -> Result<(), Quit> {
    let mut state = SessionState::Running;
    logger.log_event("session start");

    while state == SessionState::Running {
        let selection = prompt_selection(io).map_err(|message| {
            eprintln!("{}", message);
            quit(logger, &message, 1)
        })?;
        let command = match selection {
            MenuSelection::Exit => {
                state = SessionState::Exited;
                continue;
            }
            MenuSelection::Operation(command) => command,
        };

        // Captured per launch so the script anchors to where the user is
        // standing, not where the binary lives.
        let project_root = env::current_dir().map_err(|err| {
            let message = format!("Failed to read the current directory: {}", err);
            eprintln!("{}", message);
            quit(logger, &message, 1)
        })?;
        let script_path = resolve_script_path(base_dir, command, translators);

        match run_operation(io, command, &script_path, &project_root, logger) {
            Ok(LaunchOutcome::Completed) | Ok(LaunchOutcome::NotFound) => {}
            Err(message) => {
                // A failed spawn is reported like any other bad outcome; the
                // menu keeps running.
                logger.log_event(&format!(
                    "launch error command={} detail={}",
                    command, message
                ));
                io.write_err(&format!("{}\n", message)).map_err(|m| {
                    eprintln!("{}", m);
                    quit(logger, &m, 1)
                })?;
            }
        }

        let keep_going = pause_for_enter(io).map_err(|message| {
            eprintln!("{}", message);
            quit(logger, &message, 1)
        })?;
        if !keep_going {
            state = SessionState::Exited;
        }
    }

    logger.log_event("quit reason=user_exit");
    Ok(())
}

fn run_with_cli(_cli: Cli) -> Result<(), Quit> {
    let logger = Logger::from_env();
    let base_dir = executable_base_dir().map_err(|message| {
        eprintln!("{}", message);
        quit(&logger, &message, 1)
    })?;
    let translators = default_translators();
    let mut io = TerminalMenuIo::new();
    run_session(&mut io, &base_dir, &translators, &logger)
}

pub(crate) fn run_with_args(args: Vec<OsString>) -> Result<(), Quit> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            // clap's `Error::print()` uses termcolor and can bypass Rust's test
            // output capturing. Rendering it ourselves keeps CLI errors
            // capture-friendly.
            eprintln!("{err}");
            return Err(Quit {
                code: err.exit_code(),
                reason: "cli_parse".to_string(),
            });
        }
    };
    run_with_cli(cli)
}

pub(crate) fn main_with_args(args: Vec<OsString>) -> ExitCode {
    match run_with_args(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(quit) => quit.exit_code(),
    }
}

pub(crate) fn main() -> ExitCode {
    main_with_args(env::args_os().collect())
}
