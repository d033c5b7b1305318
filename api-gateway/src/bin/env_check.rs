//! Env Check Lambda - Reports which server-side secrets are configured.
//!
//! Answers every request with presence flags only. Secret values are never
//! included in the response or the logs.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::config::{EnvSource, ProcessEnv};
use shared::http::json_response;
use shared::EnvCheckReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn handler(env: &impl EnvSource, _event: Request) -> Result<Response<Body>, Error> {
    let report = EnvCheckReport::from_env(env);

    info!(
        supabase_url_set = report.supabase_url_set,
        supabase_key_set = report.supabase_key_set,
        database_url_set = report.database_url_set,
        session_secret_set = report.session_secret_set,
        node_env = report.node_env.as_deref().unwrap_or("<unset>"),
        "Environment check"
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
