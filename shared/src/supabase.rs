//! Supabase REST client.
//!
//! Talks to the PostgREST API that every Supabase project exposes under
//! `/rest/v1`. Configuration is always explicit: a missing URL or key is a
//! [`Error::Config`], never a silent fallback to built-in credentials.

use std::fmt;
use std::sync::OnceLock;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::auth::{key_role, KeyRole};
use crate::config::{
    non_empty, EnvSource, SUPABASE_SERVICE_ROLE_KEY, SUPABASE_URL, VITE_SUPABASE_ANON_KEY,
    VITE_SUPABASE_URL,
};
use crate::{Error, Result};

/// Process-wide browser-facing client, set once by [`init`].
static CLIENT: OnceLock<SupabaseClient> = OnceLock::new();

/// Connection settings for one Supabase project.
#[derive(Clone)]
pub struct SupabaseConfig {
    pub url: Url,
    pub api_key: String,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SupabaseConfig {
    /// Build a config from a project URL and API key.
    pub fn new(url: &str, api_key: impl Into<String>) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| Error::Config(format!("invalid Supabase URL {:?}: {}", url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Supabase URL must be http or https, got {}",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::Config(format!(
                "Supabase URL must not carry a query or fragment: {}",
                url
            )));
        }

        Ok(Self {
            url,
            api_key: api_key.into(),
        })
    }

    /// Anonymous credentials safe to ship to browsers.
    ///
    /// Rejects a service-role key: it bypasses row-level security and must
    /// never leave the server.
    pub fn browser(env: &impl EnvSource) -> Result<Self> {
        let config = Self::load(env, VITE_SUPABASE_URL, VITE_SUPABASE_ANON_KEY)?;
        if key_role(&config.api_key) == KeyRole::ServiceRole {
            warn!("{} holds a service-role key", VITE_SUPABASE_ANON_KEY);
            return Err(Error::Config(format!(
                "{} must be an anonymous key, not a service-role key",
                VITE_SUPABASE_ANON_KEY
            )));
        }
        Ok(config)
    }

    /// Privileged credentials for trusted server-side code.
    pub fn service_role(env: &impl EnvSource) -> Result<Self> {
        let config = Self::load(env, SUPABASE_URL, SUPABASE_SERVICE_ROLE_KEY)?;
        match key_role(&config.api_key) {
            KeyRole::ServiceRole => {}
            KeyRole::Anon => warn!(
                "{} holds an anonymous key, row-level security will apply",
                SUPABASE_SERVICE_ROLE_KEY
            ),
            KeyRole::Unknown => debug!("Could not determine the role of {}", SUPABASE_SERVICE_ROLE_KEY),
        }
        Ok(config)
    }

    fn load(env: &impl EnvSource, url_var: &str, key_var: &str) -> Result<Self> {
        let url = non_empty(env, url_var);
        let api_key = non_empty(env, key_var);

        match (url, api_key) {
            (Some(url), Some(api_key)) => Self::new(&url, api_key),
            (url, api_key) => {
                let missing: Vec<&str> = [(url_var, url.is_none()), (key_var, api_key.is_none())]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                let missing = missing.join(", ");
                warn!(missing = %missing, "Supabase configuration missing");
                Err(Error::Config(format!("{} not set", missing)))
            }
        }
    }
}

/// Client for a project's REST API.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("role", &self.role())
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build().map_err(setup_error)?;

        Ok(Self {
            http,
            base_url: config.url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Role granted by this client's API key.
    pub fn role(&self) -> KeyRole {
        key_role(&self.api_key)
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder {
            client: self,
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
        }
    }
}

fn setup_error(e: reqwest::Error) -> Error {
    Error::ClientSetup(e.to_string())
}

/// Initialize the process-wide browser-facing client.
///
/// Configuration is validated on every call so a missing variable always
/// fails, even after a previous successful initialization.
pub fn init(env: &impl EnvSource) -> Result<&'static SupabaseClient> {
    let config = SupabaseConfig::browser(env)?;
    if let Some(existing) = CLIENT.get() {
        return Ok(existing);
    }

    let client = SupabaseClient::new(config)?;
    info!(role = client.role().as_str(), "Supabase client initialized");
    Ok(CLIENT.get_or_init(|| client))
}

/// The client set up by [`init`], if any.
pub fn client() -> Option<&'static SupabaseClient> {
    CLIENT.get()
}

/// A PostgREST read query.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    client: &'a SupabaseClient,
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
}

impl<'a> QueryBuilder<'a> {
    /// Restrict the returned columns, e.g. `"title,slug"`.
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// Keep rows where `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Fetch every matching row.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        self.execute(None).await
    }

    /// Fetch exactly one matching row.
    pub async fn single<T: DeserializeOwned>(self) -> Result<T> {
        // Two rows are enough to tell "one" from "many".
        let rows = self.execute(Some(2)).await?;
        expect_single(&self.table, rows)
    }

    async fn execute<T: DeserializeOwned>(&self, limit: Option<usize>) -> Result<Vec<T>> {
        let endpoint = format!("{}/rest/v1/{}", self.client.base_url, self.table);

        let mut params: Vec<(&str, String)> = vec![("select", self.columns.clone())];
        params.extend(
            self.filters
                .iter()
                .map(|(column, filter)| (column.as_str(), filter.clone())),
        );
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        debug!(table = %self.table, ?params, "Querying Supabase");

        let resp = self
            .client
            .http
            .get(endpoint)
            .query(&params)
            .header("apikey", &self.client.api_key)
            .bearer_auth(&self.client.api_key)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Require exactly one row.
pub fn expect_single<T>(table: &str, rows: Vec<T>) -> Result<T> {
    let mut rows = rows.into_iter();
    match (rows.next(), rows.next()) {
        (Some(row), None) => Ok(row),
        (None, _) => Err(Error::NotFound {
            table: table.to_string(),
        }),
        (Some(_), Some(_)) => Err(Error::MultipleRows {
            table: table.to_string(),
        }),
    }
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    code: Option<String>,
}

fn status_error(status: StatusCode, body: &str) -> Error {
    let message = match serde_json::from_str::<PostgrestError>(body) {
        Ok(PostgrestError {
            message,
            code: Some(code),
        }) => format!("{} ({})", message, code),
        Ok(PostgrestError { message, code: None }) => message,
        Err(_) if body.is_empty() => status
            .canonical_reason()
            .unwrap_or("empty response")
            .to_string(),
        Err(_) => body.to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized {
            status: status.as_u16(),
            message,
        },
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}
