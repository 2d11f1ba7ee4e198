mod cli;
mod demo;
mod infra;
mod relay;
mod routes;
mod server;

use groundgame::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
