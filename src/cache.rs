use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub url: String,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
        }
    }

    fn is_cacheable(&self) -> bool {
        self.method == "GET"
            && (self.url.starts_with("http://") || self.url.starts_with("https://"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError(pub String);

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fetch failed: {}", self.0)
    }
}

impl std::error::Error for FetchError {}

/// The network behind the worker.
pub trait Origin: Clone + Send + Sync + 'static {
    fn fetch(
        &self,
        req: FetchRequest,
    ) -> impl Future<Output = Result<CachedResponse, FetchError>> + Send;
}

/// Named response buckets, one per deployed version. Lookups search every
/// bucket; after an activate sweep only the current one is left.
#[derive(Default)]
pub struct BucketStore {
    buckets: Mutex<HashMap<String, HashMap<String, CachedResponse>>>,
}

impl BucketStore {
    pub fn open(&self, name: &str) {
        self.buckets.lock().unwrap().entry(name.to_string()).or_default();
    }

    pub fn keys(&self) -> Vec<String> {
        self.buckets.lock().unwrap().keys().cloned().collect()
    }

    pub fn delete(&self, name: &str) -> bool {
        self.buckets.lock().unwrap().remove(name).is_some()
    }

    pub fn put(&self, bucket: &str, url: &str, response: CachedResponse) {
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default()
            .insert(url.to_string(), response);
    }

    pub fn match_any(&self, url: &str) -> Option<CachedResponse> {
        let buckets = self.buckets.lock().unwrap();
        buckets.values().find_map(|bucket| bucket.get(url).cloned())
    }
}

/// The platform's keep-alive extension point: detached work registered
/// here keeps the worker's execution context alive until `settle` drains
/// it. Without this the runtime may tear the handler down mid-flight and
/// drop the write-back.
#[derive(Clone, Default)]
pub struct EventScope {
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl EventScope {
    pub fn wait_until(&self, task: JoinHandle<()>) {
        self.pending.lock().unwrap().push(task);
    }

    /// Await everything registered so far, including work registered by
    /// tasks that settle along the way.
    pub async fn settle(&self) {
        loop {
            let drained: Vec<JoinHandle<()>> =
                std::mem::take(&mut *self.pending.lock().unwrap());
            if drained.is_empty() {
                return;
            }
            for task in drained {
                let _ = task.await;
            }
        }
    }
}

pub struct OfflineCache<O: Origin> {
    version: String,
    shell_urls: Vec<String>,
    store: Arc<BucketStore>,
    origin: O,
}

impl<O: Origin> OfflineCache<O> {
    pub fn new(version: impl Into<String>, shell_urls: Vec<String>, store: Arc<BucketStore>, origin: O) -> Self {
        Self {
            version: version.into(),
            shell_urls,
            store,
            origin,
        }
    }

    /// Pre-populate the version bucket with the app shell. All-or-nothing:
    /// every URL is fetched before anything is inserted, and one failure
    /// fails the whole install, leaving prior buckets untouched.
    pub async fn install(&self) -> Result<(), FetchError> {
        let mut fetched = Vec::with_capacity(self.shell_urls.len());
        for url in &self.shell_urls {
            let response = self.origin.fetch(FetchRequest::get(url.clone())).await?;
            fetched.push((url.clone(), response));
        }

        self.store.open(&self.version);
        for (url, response) in fetched {
            self.store.put(&self.version, &url, response);
        }
        Ok(())
    }

    /// Generational sweep: every bucket not named for this version is
    /// deleted, after which this version is the only one addressable.
    pub fn activate(&self) {
        self.store.open(&self.version);
        for name in self.store.keys() {
            if name != self.version {
                self.store.delete(&name);
                debug!("evicted stale cache bucket {name}");
            }
        }
    }

    /// Stale-while-revalidate. A cached hit is returned immediately while
    /// the refresh runs as detached work on the event scope; the response
    /// is never blocked on the cache write, so there is no read-your-write
    /// guarantee for the very next fetch of the same URL.
    pub async fn handle_fetch(
        &self,
        req: FetchRequest,
        scope: &EventScope,
    ) -> Result<CachedResponse, FetchError> {
        if !req.is_cacheable() {
            return self.origin.fetch(req).await;
        }

        match self.store.match_any(&req.url) {
            Some(hit) => {
                let origin = self.origin.clone();
                let store = Arc::clone(&self.store);
                let version = self.version.clone();
                scope.wait_until(tokio::spawn(async move {
                    match origin.fetch(req.clone()).await {
                        Ok(fresh) => store.put(&version, &req.url, fresh),
                        Err(err) => debug!("revalidation of {} failed: {err}", req.url),
                    }
                }));
                Ok(hit)
            }
            None => {
                let response = self.origin.fetch(req.clone()).await?;
                let copy = response.clone();
                let store = Arc::clone(&self.store);
                let version = self.version.clone();
                scope.wait_until(tokio::spawn(async move {
                    store.put(&version, &req.url, copy);
                }));
                Ok(response)
            }
        }
    }
}
