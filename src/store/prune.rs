use std::fs;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use crate::input::{InputError, load_users_list, save_users_list};
use crate::store::{RadarStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct PrunePaths {
    pub users_list: PathBuf,
    pub radar_scores: PathBuf,
    pub raw_users_dir: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct PruneOptions {
    pub threshold: f64,
    pub apply: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrunePlan {
    pub kept: Vec<String>,
    /// Sorted by ascending mean.
    pub removed: Vec<(String, f64)>,
    pub missing_in_radar: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PruneReport {
    pub plan: PrunePlan,
    pub applied: bool,
    pub deleted_dirs: usize,
    pub skipped_dirs: usize,
}

/// Mean of the numeric entries of a stored radar; `None` when there are none.
pub fn radar_mean(value: &Value) -> Option<f64> {
    let numeric: Vec<f64> = value.as_array()?.iter().filter_map(Value::as_f64).collect();
    if numeric.is_empty() {
        return None;
    }
    Some(numeric.iter().sum::<f64>() / numeric.len() as f64)
}

/// Users without a stored radar, or whose radar has no numbers, are kept.
pub fn plan_prune(users: &[String], store: &RadarStore, threshold: f64) -> PrunePlan {
    let mut plan = PrunePlan::default();
    for user in users {
        let Some(value) = store.get(user) else {
            plan.kept.push(user.clone());
            plan.missing_in_radar.push(user.clone());
            continue;
        };
        match radar_mean(value) {
            Some(avg) if avg < threshold => plan.removed.push((user.clone(), avg)),
            _ => plan.kept.push(user.clone()),
        }
    }
    plan.removed.sort_by(|a, b| a.1.total_cmp(&b.1));
    plan
}

pub fn prune(paths: &PrunePaths, options: PruneOptions) -> Result<PruneReport, PruneError> {
    let users = load_users_list(&paths.users_list)?;
    let mut store = RadarStore::load(&paths.radar_scores)?;

    let plan = plan_prune(&users.users, &store, options.threshold);
    log_plan(&plan, users.users.len(), options.threshold);

    let mut report = PruneReport {
        plan,
        ..PruneReport::default()
    };
    if !options.apply {
        tracing::info!("dry run only; re-run with --apply to write files and delete directories");
        return Ok(report);
    }

    for (user, _) in &report.plan.removed {
        store.remove(user);
    }
    save_users_list(&paths.users_list, &report.plan.kept, users.format)?;
    store.save(&paths.radar_scores)?;
    tracing::info!("updated {}", paths.users_list.display());
    tracing::info!("updated {}", paths.radar_scores.display());

    if paths.raw_users_dir.exists() {
        for (user, _) in &report.plan.removed {
            if remove_user_dir(&paths.raw_users_dir, user) {
                report.deleted_dirs += 1;
            } else {
                report.skipped_dirs += 1;
            }
        }
    }
    report.applied = true;

    tracing::info!("deleted raw user dirs: {}", report.deleted_dirs);
    if report.skipped_dirs > 0 {
        tracing::info!(
            "skipped raw user dirs (not found, not a directory, or outside root): {}",
            report.skipped_dirs
        );
    }
    Ok(report)
}

fn remove_user_dir(root: &Path, username: &str) -> bool {
    let dir = root.join(username);
    if !is_strictly_within(root, &dir) {
        tracing::warn!(
            "refusing to delete {}: not inside {}",
            dir.display(),
            root.display()
        );
        return false;
    }
    if !parent_resolves_within(root, &dir) {
        tracing::warn!(
            "refusing to delete {}: resolves outside {}",
            dir.display(),
            root.display()
        );
        return false;
    }
    // symlink_metadata so a symlinked user entry is never followed.
    let is_dir = fs::symlink_metadata(&dir)
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return false;
    }
    match fs::remove_dir_all(&dir) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("failed to delete {}: {err}", dir.display());
            false
        }
    }
}

/// Lexical containment check; `candidate == root` is rejected.
pub fn is_strictly_within(root: &Path, candidate: &Path) -> bool {
    let (Some(root), Some(candidate)) = (absolute_lexical(root), absolute_lexical(candidate))
    else {
        return false;
    };
    candidate != root && candidate.starts_with(&root)
}

/// Symlinked intermediate components must not lead out of `root`.
fn parent_resolves_within(root: &Path, dir: &Path) -> bool {
    let Some(parent) = dir.parent() else {
        return false;
    };
    match (fs::canonicalize(root), fs::canonicalize(parent)) {
        (Ok(root), Ok(parent)) => parent.starts_with(&root),
        _ => false,
    }
}

fn absolute_lexical(path: &Path) -> Option<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

fn log_plan(plan: &PrunePlan, users_in_list: usize, threshold: f64) {
    tracing::info!("threshold: {threshold}");
    tracing::info!("users in list: {users_in_list}");
    tracing::info!("kept: {}", plan.kept.len());
    tracing::info!("removed (avg < threshold): {}", plan.removed.len());
    if !plan.missing_in_radar.is_empty() {
        tracing::info!(
            "missing in radar store (kept as-is): {}",
            plan.missing_in_radar.len()
        );
    }
    let preview: Vec<String> = plan
        .removed
        .iter()
        .take(20)
        .map(|(user, avg)| format!("{user}({avg:.1})"))
        .collect();
    if !preview.is_empty() {
        tracing::info!(
            "removed sample (lowest {}): {}",
            preview.len(),
            preview.join(", ")
        );
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/prune.rs"]
mod tests;
