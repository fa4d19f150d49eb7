//! Submit one day-prediction task and poll it to completion.
//!
//! Environment variables:
//! - `FLOE_API_URL` / `FLOE_REQUEST_TIMEOUT_SECS` — see `ClientConfig`.
//! - `FLOE_START_DATE` — forecast start date, `YYYY-MM-DD`.
//! - `FLOE_IMAGE_PATHS` — comma-separated observation image paths.

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use floe_client::{ClientConfig, PollConfig, TaskClient};
use floe_core::request::{DayPredictionRequest, TaskRequest};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Loaded client configuration");

    let start_date: NaiveDate = std::env::var("FLOE_START_DATE")
        .expect("FLOE_START_DATE must be set")
        .parse()
        .expect("FLOE_START_DATE must be YYYY-MM-DD");

    let image_paths: Vec<String> = std::env::var("FLOE_IMAGE_PATHS")
        .expect("FLOE_IMAGE_PATHS must be set")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let client = TaskClient::new(&config).expect("Failed to build HTTP client");

    let request = TaskRequest::DayPrediction(DayPredictionRequest {
        start_date,
        image_paths,
    });

    let handle = match client.submit(&request).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "{}", e.user_message());
            std::process::exit(1);
        }
    };

    match client.await_completion(&handle, &PollConfig::default()).await {
        Ok(result) => {
            tracing::info!(task_id = %handle.task_id, "Prediction complete");
            println!("{result}");
        }
        Err(e) => {
            tracing::error!(task_id = %handle.task_id, error = %e, "{}", e.user_message());
            std::process::exit(1);
        }
    }
}
