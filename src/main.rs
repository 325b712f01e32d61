use gitstatus::core::exit::ExitCode;
use gitstatus::{cli, ui};

fn main() -> std::process::ExitCode {
    match cli::run() {
        Ok(code) => code.into(),
        Err(err) => {
            ui::output::error(format!("{err:#}"));
            ExitCode::Error.into()
        }
    }
}
