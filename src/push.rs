use crate::contract;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Wire shapes accepted from the push service. The flat shape is what the
/// reminder backend sends today; the nested one is tried first because it
/// has a real discriminator (`notification`), while the flat shape would
/// match anything.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WirePayload {
    Nested {
        notification: NestedFields,
        #[serde(default)]
        data: Option<ClickData>,
    },
    Flat {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        body: Option<String>,
        #[serde(default)]
        icon: Option<String>,
        #[serde(default)]
        data: Option<ClickData>,
    },
}

#[derive(Debug, Deserialize)]
struct NestedFields {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickData {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationSpec {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub url: String,
}

impl Default for NotificationSpec {
    fn default() -> Self {
        Self {
            title: contract::DEFAULT_NOTIFICATION_TITLE.to_string(),
            body: contract::DEFAULT_NOTIFICATION_BODY.to_string(),
            icon: contract::DEFAULT_NOTIFICATION_ICON.to_string(),
            url: contract::DEFAULT_CLICK_URL.to_string(),
        }
    }
}

impl NotificationSpec {
    /// Canonical flat wire shape, as sent by the reminder job.
    pub fn to_wire(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "body": self.body,
            "icon": self.icon,
            "data": { "url": self.url },
        })
    }
}

/// Absent or malformed payloads fall back to the defaults; partial
/// payloads fill in the missing fields.
pub fn parse_payload(payload: Option<&[u8]>) -> NotificationSpec {
    let defaults = NotificationSpec::default();
    let Some(bytes) = payload else {
        return defaults;
    };
    let Ok(wire) = serde_json::from_slice::<WirePayload>(bytes) else {
        return defaults;
    };

    match wire {
        WirePayload::Nested { notification, data } => NotificationSpec {
            title: notification.title.unwrap_or(defaults.title),
            body: notification.body.unwrap_or(defaults.body),
            icon: defaults.icon,
            url: data.and_then(|d| d.url).unwrap_or(defaults.url),
        },
        WirePayload::Flat {
            title,
            body,
            icon,
            data,
        } => NotificationSpec {
            title: title.unwrap_or(defaults.title),
            body: body.unwrap_or(defaults.body),
            icon: icon.unwrap_or(defaults.icon),
            url: data.and_then(|d| d.url).unwrap_or(defaults.url),
        },
    }
}

/// The platform notification surface. `show` resolves once the
/// notification is on screen; the push handler stays alive until then.
pub trait NotificationSurface: Send + Sync {
    fn show(&self, spec: NotificationSpec) -> impl Future<Output = Result<(), String>> + Send;
}

/// Open-or-focus a browser window; resolves once navigation has started.
pub trait ClientWindows: Send + Sync {
    fn open(&self, url: &str) -> impl Future<Output = Result<(), String>> + Send;
}

/// A notification currently on screen, as handed to the click handler.
pub trait DisplayedNotification: Send + Sync {
    fn data_url(&self) -> Option<&str>;
    fn close(&self);
}

/// Push event handler: parse, then display. The returned future completes
/// only after the display call settles, which is the keep-alive contract.
pub async fn handle_push<S: NotificationSurface>(
    payload: Option<&[u8]>,
    surface: &S,
) -> Result<NotificationSpec, String> {
    let spec = parse_payload(payload);
    surface.show(spec.clone()).await?;
    Ok(spec)
}

/// Notification-click handler: close, then navigate to the embedded URL
/// (site root when absent). Completes only after navigation settles.
pub async fn handle_notification_click<N: DisplayedNotification, W: ClientWindows>(
    clicked: &N,
    windows: &W,
) -> Result<(), String> {
    clicked.close();
    let url = clicked.data_url().unwrap_or(contract::DEFAULT_CLICK_URL);
    windows.open(url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSurface {
        shown: Mutex<Vec<NotificationSpec>>,
    }

    impl NotificationSurface for RecordingSurface {
        fn show(&self, spec: NotificationSpec) -> impl Future<Output = Result<(), String>> + Send {
            self.shown.lock().unwrap().push(spec);
            async { Ok(()) }
        }
    }

    #[derive(Default)]
    struct RecordingWindows {
        opened: Mutex<Vec<String>>,
    }

    impl ClientWindows for RecordingWindows {
        fn open(&self, url: &str) -> impl Future<Output = Result<(), String>> + Send {
            self.opened.lock().unwrap().push(url.to_string());
            async { Ok(()) }
        }
    }

    struct OnScreen {
        url: Option<String>,
        closed: Mutex<bool>,
    }

    impl DisplayedNotification for OnScreen {
        fn data_url(&self) -> Option<&str> {
            self.url.as_deref()
        }

        fn close(&self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    #[test]
    fn parses_canonical_flat_shape() {
        let spec = parse_payload(Some(
            br#"{"title":"T","body":"B","icon":"/i.png","data":{"url":"/x"}}"#,
        ));
        assert_eq!(spec.title, "T");
        assert_eq!(spec.body, "B");
        assert_eq!(spec.icon, "/i.png");
        assert_eq!(spec.url, "/x");
    }

    #[test]
    fn parses_legacy_nested_shape() {
        let spec = parse_payload(Some(
            br#"{"notification":{"title":"Legacy","body":"Old sender"},"data":{"url":"/q"}}"#,
        ));
        assert_eq!(spec.title, "Legacy");
        assert_eq!(spec.body, "Old sender");
        assert_eq!(spec.url, "/q");
    }

    #[test]
    fn absent_payload_and_fields_use_defaults() {
        let spec = parse_payload(None);
        assert_eq!(spec.title, contract::DEFAULT_NOTIFICATION_TITLE);
        assert_eq!(spec.body, contract::DEFAULT_NOTIFICATION_BODY);
        assert_eq!(spec.url, "/");

        let partial = parse_payload(Some(br#"{"title":"Only title"}"#));
        assert_eq!(partial.title, "Only title");
        assert_eq!(partial.body, contract::DEFAULT_NOTIFICATION_BODY);
        assert_eq!(partial.url, "/");
    }

    #[test]
    fn malformed_payload_uses_defaults() {
        let spec = parse_payload(Some(b"not json at all"));
        assert_eq!(spec, NotificationSpec::default());
    }

    #[test]
    fn wire_round_trip_through_parser() {
        let spec = NotificationSpec {
            title: "T".into(),
            body: "B".into(),
            icon: "/icon.svg".into(),
            url: "/cal".into(),
        };
        let bytes = serde_json::to_vec(&spec.to_wire()).unwrap();
        assert_eq!(parse_payload(Some(&bytes)), spec);
    }

    #[tokio::test]
    async fn push_event_displays_notification() {
        let surface = RecordingSurface::default();
        let shown = handle_push(
            Some(br#"{"title":"T","body":"B","data":{"url":"/x"}}"#.as_slice()),
            &surface,
        )
        .await
        .unwrap();

        assert_eq!(shown.title, "T");
        let displayed = surface.shown.lock().unwrap();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].title, "T");
    }

    #[tokio::test]
    async fn click_closes_then_navigates_to_embedded_url() {
        let surface = RecordingSurface::default();
        let windows = RecordingWindows::default();

        let shown = handle_push(
            Some(br#"{"title":"T","body":"B","data":{"url":"/x"}}"#.as_slice()),
            &surface,
        )
        .await
        .unwrap();
        let on_screen = OnScreen {
            url: Some(shown.url),
            closed: Mutex::new(false),
        };
        handle_notification_click(&on_screen, &windows).await.unwrap();

        assert!(*on_screen.closed.lock().unwrap());
        assert_eq!(*windows.opened.lock().unwrap(), vec!["/x".to_string()]);
    }

    #[tokio::test]
    async fn click_defaults_to_site_root() {
        let windows = RecordingWindows::default();
        let on_screen = OnScreen {
            url: None,
            closed: Mutex::new(false),
        };
        handle_notification_click(&on_screen, &windows).await.unwrap();

        assert_eq!(*windows.opened.lock().unwrap(), vec!["/".to_string()]);
    }
}
