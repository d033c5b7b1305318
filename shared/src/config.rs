//! Configuration read from environment variables.

use std::collections::HashMap;
use std::env;

/// Supabase project URL used by server-side code.
pub const SUPABASE_URL: &str = "SUPABASE_URL";
/// Privileged Supabase key for trusted server-side code.
pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
/// Direct Postgres connection string.
pub const DATABASE_URL: &str = "DATABASE_URL";
/// Secret used to sign user sessions.
pub const SESSION_SECRET: &str = "SESSION_SECRET";
/// Deployment environment name (`development`, `production`, ...).
pub const NODE_ENV: &str = "NODE_ENV";
/// Paystack payment provider secret key.
pub const PAYSTACK_SECRET_KEY: &str = "PAYSTACK_SECRET_KEY";
/// Public base URL of the application.
pub const APP_URL: &str = "APP_URL";
/// Supabase project URL exposed to the browser.
pub const VITE_SUPABASE_URL: &str = "VITE_SUPABASE_URL";
/// Anonymous Supabase key exposed to the browser.
pub const VITE_SUPABASE_ANON_KEY: &str = "VITE_SUPABASE_ANON_KEY";

/// A source of named configuration values.
pub trait EnvSource {
    /// Raw value of `name`, if present.
    fn get(&self, name: &str) -> Option<String>;

    /// Whether `name` is present and non-empty.
    fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }
}

/// The process environment, read at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }

    fn is_set(&self, name: &str) -> bool {
        env::var_os(name).is_some_and(|value| !value.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// Read `name`, treating an empty value as absent.
pub fn non_empty(env: &impl EnvSource, name: &str) -> Option<String> {
    env.get(name).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_value_is_not_set() {
        let env = env(&[(SESSION_SECRET, ""), (APP_URL, "https://app.example.com")]);
        assert!(!env.is_set(SESSION_SECRET));
        assert!(env.is_set(APP_URL));
        assert!(!env.is_set(DATABASE_URL));
        assert_eq!(non_empty(&env, SESSION_SECRET), None);
        assert_eq!(EnvSource::get(&env, SESSION_SECRET), Some(String::new()));
    }

    #[test]
    fn test_process_env_reads_missing_as_none() {
        assert_eq!(ProcessEnv.get("COURSE_PLATFORM_SURELY_UNSET_VARIABLE"), None);
        assert!(!ProcessEnv.is_set("COURSE_PLATFORM_SURELY_UNSET_VARIABLE"));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_env_non_utf8_value_is_set() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = "COURSE_PLATFORM_NON_UTF8_SESSION_SECRET";
        env::set_var(name, OsStr::from_bytes(b"s\xffcret"));

        assert!(ProcessEnv.is_set(name));
        assert_eq!(ProcessEnv.get(name), Some("s\u{FFFD}cret".to_string()));
        assert_eq!(non_empty(&ProcessEnv, name), Some("s\u{FFFD}cret".to_string()));

        env::set_var(name, "");
        assert!(!ProcessEnv.is_set(name));
        env::remove_var(name);
    }
}
