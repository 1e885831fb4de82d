use std::process::ExitCode;

fn main() -> ExitCode {
    match datafold::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
