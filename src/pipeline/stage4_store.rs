use std::collections::BTreeSet;
use std::path::Path;

use crate::model::scores::RadarScore;
use crate::store::{RadarStore, StoreError};

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub users: &'a [String],
    pub radar: &'a [RadarScore],
    pub out_path: &'a Path,
    pub refresh: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage4Output {
    pub written: usize,
    pub carried_forward: usize,
}

/// Cohort entries always replace prior ones. Without `refresh`, entries for
/// users outside the cohort survive from the previous file.
pub fn build_store(users: &[String], radar: &[RadarScore], prior: RadarStore) -> RadarStore {
    let mut store = prior;
    for (user, scores) in users.iter().zip(radar) {
        store.insert(user, scores);
    }
    store
}

pub fn run_stage4(input: &Stage4Input<'_>) -> Result<Stage4Output, StoreError> {
    let prior = if input.refresh {
        RadarStore::new()
    } else {
        load_prior(input.out_path)
    };
    if !prior.is_empty() {
        tracing::debug!("loaded {} previous entries", prior.len());
    }

    let store = build_store(input.users, input.radar, prior);
    let cohort: BTreeSet<&String> = input.users.iter().collect();
    let carried_forward = store.len().saturating_sub(cohort.len());

    tracing::info!("saving results to {}", input.out_path.display());
    store.save(input.out_path)?;

    Ok(Stage4Output {
        written: store.len(),
        carried_forward,
    })
}

fn load_prior(path: &Path) -> RadarStore {
    match RadarStore::load_or_empty(path) {
        Ok(store) => store,
        Err(err) => {
            tracing::warn!("ignoring unreadable previous output: {err}");
            RadarStore::new()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_store.rs"]
mod tests;
