mod cli;
mod commands;
mod render;

use recruitflow::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
