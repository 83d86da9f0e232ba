use crate::config::VapidKeys;
use crate::push::NotificationSpec;
use crate::registry::{Subscription, SubscriptionStore};
use serde::Serialize;
use std::future::Future;
use std::io;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Outcome of one delivery attempt. `Expired` is the only outcome that
/// triggers a corrective action; `Failed` is logged and left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Expired,
    Failed(String),
}

/// The deliver-or-report-expired primitive. Implementations decide what
/// counts as a permanently dead target.
pub trait PushGateway: Clone + Send + Sync + 'static {
    fn deliver(
        &self,
        sub: &Subscription,
        payload: &[u8],
    ) -> impl Future<Output = Delivery> + Send;
}

/// Plain HTTP delivery to the subscription endpoint. 404 and 410 are the
/// push services' "subscription is gone" answers; everything else that
/// goes wrong is transient.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    vapid: VapidKeys,
}

impl HttpGateway {
    pub fn new(vapid: VapidKeys) -> Self {
        Self {
            client: reqwest::Client::new(),
            vapid,
        }
    }
}

impl PushGateway for HttpGateway {
    fn deliver(
        &self,
        sub: &Subscription,
        payload: &[u8],
    ) -> impl Future<Output = Delivery> + Send {
        let request = self
            .client
            .post(&sub.endpoint)
            .header("TTL", "86400")
            .header("Authorization", format!("vapid k={}", self.vapid.public_key))
            .body(payload.to_vec());
        async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => Delivery::Delivered,
                Ok(response)
                    if response.status() == reqwest::StatusCode::NOT_FOUND
                        || response.status() == reqwest::StatusCode::GONE =>
                {
                    Delivery::Expired
                }
                Ok(response) => Delivery::Failed(format!("status {}", response.status())),
                Err(err) => Delivery::Failed(err.to_string()),
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReminderSummary {
    pub delivered: usize,
    pub pruned: usize,
    pub failed: usize,
}

/// Deliver `spec` to every stored subscription. Deliveries run as
/// independent tasks with no ordering between them; one dead endpoint
/// never blocks the rest. Expired registrations are deleted, transient
/// failures are logged and not retried. An empty registry is a
/// successful no-op.
pub async fn run<S: SubscriptionStore, G: PushGateway>(
    store: &S,
    gateway: &G,
    spec: &NotificationSpec,
) -> io::Result<ReminderSummary> {
    let subs = store.list_all().await?;
    if subs.is_empty() {
        info!("no subscriptions stored, skipping reminder");
        return Ok(ReminderSummary::default());
    }

    let payload = serde_json::to_vec(&spec.to_wire()).map_err(io::Error::other)?;

    let mut deliveries = JoinSet::new();
    for sub in subs {
        let gateway = gateway.clone();
        let payload = payload.clone();
        deliveries.spawn(async move {
            let outcome = gateway.deliver(&sub, &payload).await;
            (sub.endpoint, outcome)
        });
    }

    let mut summary = ReminderSummary::default();
    while let Some(joined) = deliveries.join_next().await {
        let Ok((endpoint, outcome)) = joined else {
            summary.failed += 1;
            continue;
        };
        match outcome {
            Delivery::Delivered => summary.delivered += 1,
            Delivery::Expired => {
                store.delete(&endpoint).await?;
                info!("pruned expired subscription {endpoint}");
                summary.pruned += 1;
            }
            Delivery::Failed(reason) => {
                warn!("delivery to {endpoint} failed: {reason}");
                summary.failed += 1;
            }
        }
    }

    info!(
        "reminder run: {} delivered, {} pruned, {} failed",
        summary.delivered, summary.pruned, summary.failed
    );
    Ok(summary)
}
