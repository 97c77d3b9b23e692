use std::path::PathBuf;

pub mod cohort;
pub mod metrics;

pub use cohort::{UsersListFormat, load_cohort, load_users_list, save_users_list};
pub use metrics::{load_raw_metrics, metric_file_path};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("cohort is empty: {0}")]
    EmptyCohort(PathBuf),
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
