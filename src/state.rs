use crate::config::AppConfig;
use crate::registry::{FileSubscriptionStore, TokenStore};
use crate::reminder::HttpGateway;
use crate::storage;
use crate::store::TrackerData;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub tracker_path: PathBuf,
    pub tracker: Arc<Mutex<TrackerData>>,
    pub subscriptions: FileSubscriptionStore,
    pub tokens: TokenStore,
    pub gateway: Option<HttpGateway>,
    pub reminder_click_url: String,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> io::Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let tracker_path = storage::tracker_file(&config.data_dir);
        let tracker = storage::load_tracker(&tracker_path).await;
        let subscriptions =
            FileSubscriptionStore::load(FileSubscriptionStore::file(&config.data_dir)).await;
        let tokens = TokenStore::load(TokenStore::file(&config.data_dir)).await;
        let gateway = config.vapid.clone().map(HttpGateway::new);

        Ok(Self {
            tracker_path,
            tracker: Arc::new(Mutex::new(tracker)),
            subscriptions,
            tokens,
            gateway,
            reminder_click_url: config.reminder_click_url.clone(),
        })
    }
}
