use std::process::ExitCode;

fn main() -> ExitCode {
    glint_cli::run()
}
