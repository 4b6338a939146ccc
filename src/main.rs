use std::process::ExitCode;

mod app;
mod cli;
mod logger;
mod menu;
mod paths;
mod runner;


fn main() -> ExitCode {
    app::main()
}
