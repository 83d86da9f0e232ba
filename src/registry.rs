use crate::contract;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    #[serde(default)]
    pub p256dh: String,
    #[serde(default)]
    pub auth: String,
}

/// A push subscription as the client hands it over; unknown fields are
/// kept so the stored document stays verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    #[serde(default)]
    pub keys: SubscriptionKeys,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Endpoint-keyed subscription storage. The endpoint string is the
/// natural unique key; `set` overwrites an existing registration.
pub trait SubscriptionStore: Clone + Send + Sync + 'static {
    fn get(&self, endpoint: &str) -> impl Future<Output = io::Result<Option<Subscription>>> + Send;
    fn set(&self, sub: Subscription) -> impl Future<Output = io::Result<()>> + Send;
    fn delete(&self, endpoint: &str) -> impl Future<Output = io::Result<()>> + Send;
    fn list_all(&self) -> impl Future<Output = io::Result<Vec<Subscription>>> + Send;
}

#[derive(Clone)]
pub struct FileSubscriptionStore {
    path: Arc<PathBuf>,
    subs: Arc<Mutex<BTreeMap<String, Subscription>>>,
}

impl FileSubscriptionStore {
    pub fn file(data_dir: &Path) -> PathBuf {
        data_dir.join(contract::SUBSCRIPTIONS_FILE)
    }

    pub async fn load(path: PathBuf) -> Self {
        let subs = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => map,
                Err(err) => {
                    error!("failed to parse subscriptions file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read subscriptions file: {err}");
                BTreeMap::new()
            }
        };
        Self {
            path: Arc::new(path),
            subs: Arc::new(Mutex::new(subs)),
        }
    }

    async fn persist(&self, subs: &BTreeMap<String, Subscription>) -> io::Result<()> {
        let payload = serde_json::to_vec_pretty(subs).map_err(io::Error::other)?;
        fs::write(self.path.as_ref(), payload).await
    }
}

impl SubscriptionStore for FileSubscriptionStore {
    fn get(&self, endpoint: &str) -> impl Future<Output = io::Result<Option<Subscription>>> + Send {
        async move { Ok(self.subs.lock().await.get(endpoint).cloned()) }
    }

    fn set(&self, sub: Subscription) -> impl Future<Output = io::Result<()>> + Send {
        async move {
            let mut subs = self.subs.lock().await;
            subs.insert(sub.endpoint.clone(), sub);
            self.persist(&subs).await
        }
    }

    fn delete(&self, endpoint: &str) -> impl Future<Output = io::Result<()>> + Send {
        async move {
            let mut subs = self.subs.lock().await;
            if subs.remove(endpoint).is_some() {
                self.persist(&subs).await?;
            }
            Ok(())
        }
    }

    fn list_all(&self) -> impl Future<Output = io::Result<Vec<Subscription>>> + Send {
        async move { Ok(self.subs.lock().await.values().cloned().collect()) }
    }
}

#[derive(Clone, Default)]
pub struct MemorySubscriptionStore {
    subs: Arc<Mutex<BTreeMap<String, Subscription>>>,
}

impl SubscriptionStore for MemorySubscriptionStore {
    fn get(&self, endpoint: &str) -> impl Future<Output = io::Result<Option<Subscription>>> + Send {
        async move { Ok(self.subs.lock().await.get(endpoint).cloned()) }
    }

    fn set(&self, sub: Subscription) -> impl Future<Output = io::Result<()>> + Send {
        async move {
            self.subs.lock().await.insert(sub.endpoint.clone(), sub);
            Ok(())
        }
    }

    fn delete(&self, endpoint: &str) -> impl Future<Output = io::Result<()>> + Send {
        async move {
            self.subs.lock().await.remove(endpoint);
            Ok(())
        }
    }

    fn list_all(&self) -> impl Future<Output = io::Result<Vec<Subscription>>> + Send {
        async move { Ok(self.subs.lock().await.values().cloned().collect()) }
    }
}

/// Singleton FCM token document under the fixed contract key.
#[derive(Clone)]
pub struct TokenStore {
    path: Arc<PathBuf>,
    token: Arc<Mutex<Option<String>>>,
}

impl TokenStore {
    pub fn file(data_dir: &Path) -> PathBuf {
        data_dir.join(contract::FCM_TOKEN_FILE)
    }

    pub async fn load(path: PathBuf) -> Self {
        let token = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
                Ok(mut doc) => doc.remove(contract::FCM_TOKEN_DOC),
                Err(err) => {
                    error!("failed to parse token file: {err}");
                    None
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read token file: {err}");
                None
            }
        };
        Self {
            path: Arc::new(path),
            token: Arc::new(Mutex::new(token)),
        }
    }

    pub async fn get(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    pub async fn set(&self, token: String) -> io::Result<()> {
        let mut guard = self.token.lock().await;
        *guard = Some(token.clone());
        let doc = BTreeMap::from([(contract::FCM_TOKEN_DOC.to_string(), token)]);
        let payload = serde_json::to_vec_pretty(&doc).map_err(io::Error::other)?;
        fs::write(self.path.as_ref(), payload).await
    }
}
