use crate::contract;
use std::{env, path::PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct VapidKeys {
    pub public_key: String,
    pub private_key: String,
}

/// Built once in `main` and handed to the components that need it; there
/// is no ambient global configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub vapid: Option<VapidKeys>,
    pub reminder_click_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let data_dir = env::var("TRACKER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let vapid = match (
            env::var("PUSH_VAPID_PUBLIC_KEY"),
            env::var("PUSH_VAPID_PRIVATE_KEY"),
        ) {
            (Ok(public_key), Ok(private_key)) if !public_key.is_empty() && !private_key.is_empty() => {
                Some(VapidKeys {
                    public_key,
                    private_key,
                })
            }
            _ => {
                warn!("VAPID keys not configured; push reminders are disabled");
                None
            }
        };

        let reminder_click_url = env::var("REMINDER_CLICK_URL")
            .unwrap_or_else(|_| contract::DEFAULT_CLICK_URL.to_string());

        Self {
            port,
            data_dir,
            vapid,
            reminder_click_url,
        }
    }
}
