use shell_escape::unix::escape;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::logger::{sanitize_log_value, Logger};
use crate::menu::MenuIo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LaunchOutcome {
    Completed,
    NotFound,
}

/// Runs one operation script to completion. The script is always passed as
/// an argument to `bash` (it does not need an executable bit), inherits the
/// parent's streams for live output, runs from `project_root`, and sees that
/// same directory in VENTURE_PROJECT_ROOT. The child's exit code is logged
/// but never drives control flow.
pub(crate) fn run_operation(
    io: &mut dyn MenuIo,
    command: &str,
    script_path: &str,
    project_root: &Path,
    logger: &Logger,
) -> Result<LaunchOutcome, String> {
    if !Path::new(script_path).is_file() {
        logger.log_event(&format!(
            "launch skipped command={} reason=not_found script={}",
            command,
            sanitize_log_value(script_path)
        ));
        io.write_err(&format!("Error: Command '{}' not found.\n", command))?;
        return Ok(LaunchOutcome::NotFound);
    }

    io.write_out(&format!("Launching {}...\n", command))?;
    io.flush_out()?;
    logger.log_event(&format!(
        "launch start command={} script={}",
        command,
        escape(script_path.into())
    ));

    let mut cmd = Command::new("bash");
    cmd.arg(script_path);
    cmd.current_dir(project_root);
    cmd.env("VENTURE_PROJECT_ROOT", project_root);
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());
    let status = cmd
        .status()
        .map_err(|err| format!("Failed to launch '{}': {}", command, err))?;

    logger.log_event(&format!(
        "launch exit command={} code={}",
        command,
        status.code().unwrap_or(1)
    ));
    Ok(LaunchOutcome::Completed)
}
