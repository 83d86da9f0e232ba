//! Names shared between the tracker API, the offline worker, and the
//! reminder backend.

/// Storage key for the attendance state; also the on-disk file name (with
/// a `.json` suffix).
pub const STORAGE_KEY: &str = "officeTracker_v1";

/// File holding the endpoint-keyed subscription map.
pub const SUBSCRIPTIONS_FILE: &str = "subscriptions.json";

/// File holding the singleton FCM token document.
pub const FCM_TOKEN_FILE: &str = "fcmToken.json";

/// Fixed document key for the singleton FCM token.
pub const FCM_TOKEN_DOC: &str = "user-token";

/// Cache bucket name for the current deployment; bump the suffix to evict
/// every prior generation on activate.
pub const CACHE_NAME: &str = "office-tracker-cache-v1";

/// App-shell URLs pre-populated at install time.
pub const OFFLINE_URLS: &[&str] = &["/", "/index.html", "/manifest.webmanifest"];

pub const DEFAULT_TARGET_PER_QUARTER: u32 = 24;

pub const DEFAULT_NOTIFICATION_TITLE: &str = "Office Tracker Reminder";
pub const DEFAULT_NOTIFICATION_BODY: &str = "Time to check your office attendance for today!";
pub const DEFAULT_NOTIFICATION_ICON: &str = "/icon.svg";
pub const DEFAULT_CLICK_URL: &str = "/";

pub const CSV_HEADER: [&str; 3] = ["Date", "Status", "Notes"];
