use anyhow::{Context, Result};
use bip_thread_sync::{POLL_INTERVAL, ThreadSettings};
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) struct ThreadWatchConfig {
    pub history_url: String,
    pub poll_interval: Duration,
    pub session_cookie: Option<String>,
    client_name: Option<String>,
    client_initials: Option<String>,
}

impl ThreadWatchConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let history_url = read("BIP_HISTORY_URL").context("BIP_HISTORY_URL is required")?;

        let poll_interval = match read("BIP_POLL_INTERVAL_MS") {
            Some(raw) => {
                let ms: u64 = raw
                    .parse()
                    .with_context(|| format!("BIP_POLL_INTERVAL_MS must be milliseconds, got '{raw}'"))?;
                if ms == 0 {
                    anyhow::bail!("BIP_POLL_INTERVAL_MS must be greater than zero");
                }
                Duration::from_millis(ms)
            }
            None => POLL_INTERVAL,
        };

        Ok(Self {
            history_url,
            poll_interval,
            session_cookie: read("BIP_SESSION_COOKIE"),
            client_name: read("BIP_CLIENT_NAME"),
            client_initials: read("BIP_CLIENT_INITIALS"),
        })
    }

    pub(crate) fn thread_settings(&self) -> ThreadSettings {
        ThreadSettings::from_dataset(|key| match key {
            "clientName" => self.client_name.clone(),
            "clientInitials" => self.client_initials.clone(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ThreadWatchConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ThreadWatchConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() -> Result<()> {
        let config = config(&[("BIP_HISTORY_URL", "http://localhost:8000/contact/history/")])?;
        assert_eq!(config.poll_interval, POLL_INTERVAL);
        assert_eq!(config.session_cookie, None);

        let settings = config.thread_settings();
        assert_eq!(settings.client.name, "You");
        assert_eq!(settings.admin.initials, "RC");
        Ok(())
    }

    #[test]
    fn overrides_apply() -> Result<()> {
        let config = config(&[
            ("BIP_HISTORY_URL", "http://localhost:8000/contact/history/"),
            ("BIP_POLL_INTERVAL_MS", "2500"),
            ("BIP_SESSION_COOKIE", "sessionid=abc"),
            ("BIP_CLIENT_NAME", "Maria Santos"),
            ("BIP_CLIENT_INITIALS", "MS"),
        ])?;
        assert_eq!(config.poll_interval, Duration::from_millis(2500));
        assert_eq!(config.session_cookie.as_deref(), Some("sessionid=abc"));
        assert_eq!(config.thread_settings().client.initials, "MS");
        Ok(())
    }

    #[test]
    fn rejects_missing_url_and_bad_interval() {
        assert!(config(&[]).is_err());
        assert!(config(&[("BIP_HISTORY_URL", "  ")]).is_err());
        assert!(config(&[("BIP_HISTORY_URL", "http://x"), ("BIP_POLL_INTERVAL_MS", "soon")]).is_err());
        assert!(config(&[("BIP_HISTORY_URL", "http://x"), ("BIP_POLL_INTERVAL_MS", "0")]).is_err());
    }
}
