use std::process::ExitCode;

use svcreg::ui::output;

fn main() -> ExitCode {
    match svcreg::cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
