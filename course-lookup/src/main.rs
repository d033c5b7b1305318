//! Course Lookup - One-shot check that a course row is readable.
//!
//! Reads `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY` (from `.env` when
//! present), fetches the anatomy course by slug and prints it. Query failures
//! are printed and the program still exits cleanly; missing configuration
//! aborts before any request is made.

use anyhow::Context;
use shared::config::ProcessEnv;
use shared::{describe_outcome, fetch_course_by_slug, SupabaseClient, SupabaseConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const COURSE_SLUG: &str = "introduction-to-human-anatomy";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG can come from it.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file, using process environment"),
        Err(e) => return Err(e).context("Failed to read .env"),
    }

    let config = SupabaseConfig::service_role(&ProcessEnv)
        .context("Supabase service-role configuration")?;
    let client = SupabaseClient::new(config)?;

    info!(slug = COURSE_SLUG, role = client.role().as_str(), "Looking up course");

    let outcome = fetch_course_by_slug(&client, COURSE_SLUG).await;
    match &outcome {
        Ok(_) => println!("{}", describe_outcome(&outcome)),
        Err(_) => eprintln!("Error fetching course: {}", describe_outcome(&outcome)),
    }

    Ok(())
}
