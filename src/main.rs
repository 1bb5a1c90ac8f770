use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _guard = glencity_booking::init_logging();

    match glencity_booking::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server failed to start: {}", e);
            ExitCode::FAILURE
        }
    }
}
