use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::model::dimension::Dimension;
use crate::model::metrics::{MetricFile, RawMetrics};

pub fn metric_file_path(raw_users_dir: &Path, username: &str, dimension: Dimension) -> PathBuf {
    raw_users_dir
        .join(username)
        .join(format!("{username}_{}.json", dimension.name()))
}

/// Never fails: an absent, unreadable, or malformed file yields zeroed metrics.
pub fn load_raw_metrics(raw_users_dir: &Path, username: &str) -> RawMetrics {
    let path = |dim| metric_file_path(raw_users_dir, username, dim);
    RawMetrics {
        influence: load_dimension(&path(Dimension::Influence), username),
        contribution: load_dimension(&path(Dimension::Contribution), username),
        maintainership: load_dimension(&path(Dimension::Maintainership), username),
        engagement: load_dimension(&path(Dimension::Engagement), username),
        diversity: load_dimension(&path(Dimension::Diversity), username),
        code_capability: load_dimension(&path(Dimension::CodeCapability), username),
    }
}

fn load_dimension<T>(path: &Path, username: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(err) => {
            tracing::warn!("failed to read {}: {err}", path.display());
            return T::default();
        }
    };
    match serde_json::from_str::<MetricFile<T>>(&text) {
        Ok(file) => {
            if let Some(owner) = file.username.as_deref().filter(|owner| *owner != username) {
                tracing::warn!(
                    "{} is labelled for user {owner}, scoring it for {username} anyway",
                    path.display()
                );
            }
            file.raw_metrics.unwrap_or_default()
        }
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}", path.display());
            T::default()
        }
    }
}
