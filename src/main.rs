//! texatlas - Command-line tool for inspecting and converting texture atlas descriptors

use std::process::ExitCode;

use texatlas::cli;

fn main() -> ExitCode {
    cli::run()
}
