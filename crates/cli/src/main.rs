use std::process::ExitCode;

fn main() -> ExitCode {
    scentdex_cli::run()
}
