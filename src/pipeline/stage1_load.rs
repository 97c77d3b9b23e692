use std::path::Path;

use crate::input::load_raw_metrics;
use crate::model::metrics::RawMetrics;

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub users: Vec<String>,
    pub metrics: Vec<RawMetrics>,
}

pub fn run_stage1(raw_users_dir: &Path, users: &[String]) -> Stage1Output {
    let mut metrics = Vec::with_capacity(users.len());
    let mut without_data = 0usize;
    for user in users {
        let m = load_raw_metrics(raw_users_dir, user);
        if m == RawMetrics::default() {
            without_data += 1;
        }
        metrics.push(m);
    }
    if without_data > 0 {
        tracing::info!(
            "{without_data} of {} users have no usable raw metrics; they score at the floor",
            users.len()
        );
    }
    Stage1Output {
        users: users.to_vec(),
        metrics,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_load.rs"]
mod tests;
