mod cli;
mod commands;
mod infra;

use vota_informado::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
