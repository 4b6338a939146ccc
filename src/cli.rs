use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "venture",
    version,
    about = "Venture Orchestration Suite - interactive launcher for operation scripts.",
    long_about = "Venture presents a menu of named operations and runs the matching script from the scripts/ directory next to the binary.\n\nScripts are invoked as `bash scripts/<operation>.sh` from the directory the launcher was started in, with VENTURE_PROJECT_ROOT set to that directory.",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {}
