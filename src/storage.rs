use crate::contract;
use crate::errors::AppError;
use crate::store::TrackerData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

pub fn tracker_file(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{}.json", contract::STORAGE_KEY))
}

/// Missing or unreadable state yields the default; corrupt JSON is logged
/// and replaced with the default rather than propagated.
pub async fn load_tracker(path: &Path) -> TrackerData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse tracker file: {err}");
                TrackerData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => TrackerData::default(),
        Err(err) => {
            error!("failed to read tracker file: {err}");
            TrackerData::default()
        }
    }
}

pub async fn persist_tracker(path: &Path, data: &TrackerData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
