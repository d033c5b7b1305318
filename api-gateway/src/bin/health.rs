//! Health Lambda - Liveness probe with a configuration summary.

use chrono::Utc;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::config::{EnvSource, ProcessEnv};
use shared::http::json_response;
use shared::HealthReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn handler(env: &impl EnvSource, _event: Request) -> Result<Response<Body>, Error> {
    let report = HealthReport::from_env(env, Utc::now());

    info!(
        database_url_set = report.database_url_set,
        session_secret_set = report.session_secret_set,
        paystack_secret_set = report.paystack_secret_set,
        app_url_set = report.app_url_set,
        "Health check"
    );

    json_response(200, &report)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    run(service_fn(|event| handler(&ProcessEnv, event))).await
}
