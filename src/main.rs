use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = vault_metrics::run() {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
