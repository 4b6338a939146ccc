use std::io::{self, Write};

#[cfg(test)]
use std::collections::VecDeque;

/// The closed set of launchable operations, in menu order. Exit is always
/// appended as the final entry when rendering.
pub(crate) const OPERATIONS: [&str; 5] = ["doctor", "check-health", "ship", "update", "genesis"];

pub(crate) trait MenuIo {
    fn write_out(&mut self, s: &str) -> Result<(), String>;
    fn write_err(&mut self, s: &str) -> Result<(), String>;
    fn flush_out(&mut self) -> Result<(), String>;
    fn read_line(&mut self) -> Result<Option<String>, String>;
}

pub(crate) struct TerminalMenuIo {
    stdin: io::Stdin,
    stdout: io::Stdout,
    stderr: io::Stderr,
}

impl TerminalMenuIo {
    pub(crate) fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            stderr: io::stderr(),
        }
    }
}

impl MenuIo for TerminalMenuIo {
    fn write_out(&mut self, s: &str) -> Result<(), String> {
        self.stdout
            .write_all(s.as_bytes())
            .map_err(|err| format!("Failed to write stdout: {}", err))
    }

    fn write_err(&mut self, s: &str) -> Result<(), String> {
        self.stderr
            .write_all(s.as_bytes())
            .map_err(|err| format!("Failed to write stderr: {}", err))
    }

    fn flush_out(&mut self) -> Result<(), String> {
        self.stdout
            .flush()
            .map_err(|err| format!("Failed to flush stdout: {}", err))
    }

    fn read_line(&mut self) -> Result<Option<String>, String> {
        let mut input = String::new();
        let bytes = self
            .stdin
            .read_line(&mut input)
            .map_err(|err| format!("Failed to read selection: {}", err))?;
        if bytes == 0 {
            Ok(None)
        } else {
            Ok(Some(input))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuSelection {
    Operation(&'static str),
    Exit,
}

/// Renders the menu and reads a selection, reprompting until the input names
/// an operation or Exit. A closed stdin reads as Exit so piped sessions end
/// cleanly instead of spinning.
pub(crate) fn prompt_selection(io: &mut dyn MenuIo) -> Result<MenuSelection, String> {
    loop {
        io.write_out("\nVENTURE\n")?;
        io.write_out("Venture Orchestration Suite - select an operation:\n\n")?;
        for (index, operation) in OPERATIONS.iter().enumerate() {
            io.write_out(&format!("  {}) {}\n", index + 1, operation))?;
        }
        io.write_out(&format!("  {}) Exit\n", OPERATIONS.len() + 1))?;
        io.write_out("\nEnter number or name: ")?;
        io.flush_out()?;

        let Some(input) = io.read_line()? else {
            return Ok(MenuSelection::Exit);
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            io.write_err("Selection must not be empty.\n")?;
            continue;
        }
        if let Ok(choice) = trimmed.parse::<usize>() {
            if choice >= 1 && choice <= OPERATIONS.len() {
                return Ok(MenuSelection::Operation(OPERATIONS[choice - 1]));
            }
            if choice == OPERATIONS.len() + 1 {
                return Ok(MenuSelection::Exit);
            }
            io.write_err("Selection out of range.\n")?;
            continue;
        }
        if matches!(trimmed, "exit" | "quit" | "q" | "Exit") {
            return Ok(MenuSelection::Exit);
        }
        if let Some(operation) = OPERATIONS.iter().copied().find(|name| *name == trimmed) {
            return Ok(MenuSelection::Operation(operation));
        }
        io.write_err(&format!("Unknown operation: {}\n", trimmed))?;
    }
}

/// The return-to-menu pause. `false` means stdin closed and the session
/// should end.
pub(crate) fn pause_for_enter(io: &mut dyn MenuIo) -> Result<bool, String> {
    io.write_out("\n---------------------------------------\n")?;
    io.write_out("Task complete. Press ENTER to return to the main menu...")?;
    io.flush_out()?;
    let line = io.read_line()?;
    if line.is_some() {
        io.write_out("\n")?;
    }
    Ok(line.is_some())
}

#[cfg(test)]
pub(crate) struct TestMenuIo {
    inputs: VecDeque<String>,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

#[cfg(test)]
impl TestMenuIo {
    pub(crate) fn new(inputs: Vec<&str>) -> Self {
        Self {
            inputs: inputs.into_iter().map(String::from).collect(),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

#[cfg(test)]
impl MenuIo for TestMenuIo {
    fn write_out(&mut self, s: &str) -> Result<(), String> {
        self.stdout.push_str(s);
        Ok(())
    }

    fn write_err(&mut self, s: &str) -> Result<(), String> {
        self.stderr.push_str(s);
        Ok(())
    }

    fn flush_out(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, String> {
        Ok(self.inputs.pop_front())
    }
}
