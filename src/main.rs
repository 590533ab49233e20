use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = qnote::run() {
        eprintln!("error: {err:#}");
        return ExitCode::from(qnote::exit_code(&err));
    }
    ExitCode::SUCCESS
}
