//! Configuration presence reports served by the diagnostic endpoints.
//!
//! Reports only ever carry booleans and the environment name. Secret values
//! never leave the process.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::{
    EnvSource, APP_URL, DATABASE_URL, NODE_ENV, PAYSTACK_SECRET_KEY, SESSION_SECRET,
    SUPABASE_SERVICE_ROLE_KEY, SUPABASE_URL,
};

/// Body of the environment check endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvCheckReport {
    pub supabase_url_set: bool,
    pub supabase_key_set: bool,
    pub database_url_set: bool,
    pub session_secret_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_env: Option<String>,
}

impl EnvCheckReport {
    pub fn from_env(env: &impl EnvSource) -> Self {
        Self {
            supabase_url_set: env.is_set(SUPABASE_URL),
            supabase_key_set: env.is_set(SUPABASE_SERVICE_ROLE_KEY),
            database_url_set: env.is_set(DATABASE_URL),
            session_secret_set: env.is_set(SESSION_SECRET),
            node_env: env.get(NODE_ENV),
        }
    }
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    /// ISO-8601 UTC timestamp of the invocation
    pub time: String,
    pub database_url_set: bool,
    pub session_secret_set: bool,
    pub paystack_secret_set: bool,
    pub app_url_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_env: Option<String>,
}

impl HealthReport {
    pub fn from_env(env: &impl EnvSource, now: DateTime<Utc>) -> Self {
        Self {
            status: "ok",
            time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            database_url_set: env.is_set(DATABASE_URL),
            session_secret_set: env.is_set(SESSION_SECRET),
            paystack_secret_set: env.is_set(PAYSTACK_SECRET_KEY),
            app_url_set: env.is_set(APP_URL),
            node_env: env.get(NODE_ENV),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    const ALL_VARS: [&str; 7] = [
        SUPABASE_URL,
        SUPABASE_SERVICE_ROLE_KEY,
        DATABASE_URL,
        SESSION_SECRET,
        PAYSTACK_SECRET_KEY,
        APP_URL,
        NODE_ENV,
    ];

    /// Environment where the variables selected by `mask` bits are set.
    fn env_from_mask(mask: u32) -> HashMap<String, String> {
        ALL_VARS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, name)| (name.to_string(), format!("value-of-{}", name)))
            .collect()
    }

    #[test]
    fn test_flags_track_every_subset() {
        for mask in 0..(1u32 << ALL_VARS.len()) {
            let env = env_from_mask(mask);
            let check = EnvCheckReport::from_env(&env);
            assert_eq!(check.supabase_url_set, env.contains_key(SUPABASE_URL));
            assert_eq!(check.supabase_key_set, env.contains_key(SUPABASE_SERVICE_ROLE_KEY));
            assert_eq!(check.database_url_set, env.contains_key(DATABASE_URL));
            assert_eq!(check.session_secret_set, env.contains_key(SESSION_SECRET));
            assert_eq!(check.node_env, env.get(NODE_ENV).cloned());

            let health = HealthReport::from_env(&env, Utc::now());
            assert_eq!(health.database_url_set, env.contains_key(DATABASE_URL));
            assert_eq!(health.session_secret_set, env.contains_key(SESSION_SECRET));
            assert_eq!(health.paystack_secret_set, env.contains_key(PAYSTACK_SECRET_KEY));
            assert_eq!(health.app_url_set, env.contains_key(APP_URL));
            assert_eq!(health.node_env, env.get(NODE_ENV).cloned());
        }
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let env: HashMap<String, String> = ALL_VARS
            .iter()
            .map(|name| (name.to_string(), String::new()))
            .collect();
        let check = EnvCheckReport::from_env(&env);
        assert!(!check.supabase_url_set);
        assert!(!check.supabase_key_set);
        assert!(!check.database_url_set);
        assert!(!check.session_secret_set);
    }

    #[test]
    fn test_env_check_json_shape() {
        let env: HashMap<String, String> = [
            (SUPABASE_URL.to_string(), "https://abc.supabase.co".to_string()),
            (SESSION_SECRET.to_string(), "hunter2".to_string()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(EnvCheckReport::from_env(&env)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "supabaseUrlSet": true,
                "supabaseKeySet": false,
                "databaseUrlSet": false,
                "sessionSecretSet": true,
            })
        );
        let text = json.to_string();
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("abc.supabase.co"));
    }

    #[test]
    fn test_health_json_shape() {
        let env: HashMap<String, String> = [
            (NODE_ENV.to_string(), "production".to_string()),
            (PAYSTACK_SECRET_KEY.to_string(), "sk_live_123".to_string()),
        ]
        .into_iter()
        .collect();
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();

        let json = serde_json::to_value(HealthReport::from_env(&env, now)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "ok",
                "time": "2026-03-01T12:30:00.000Z",
                "databaseUrlSet": false,
                "sessionSecretSet": false,
                "paystackSecretSet": true,
                "appUrlSet": false,
                "nodeEnv": "production",
            })
        );
    }

    #[test]
    fn test_health_time_parses_close_to_now() {
        let before = Utc::now();
        let report = HealthReport::from_env(&HashMap::<String, String>::new(), Utc::now());
        let parsed = DateTime::parse_from_rfc3339(&report.time).unwrap();
        let delta = parsed.with_timezone(&Utc) - before;
        assert!(delta.num_seconds().abs() < 5);
    }
}
