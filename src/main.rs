mod input;
mod logging;
mod model;
mod pipeline;
mod store;

use std::path::{Path, PathBuf};

use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};

use crate::input::load_cohort;
use crate::model::dimension::Dimension;
use crate::model::profile::ScoringProfile;
use crate::pipeline::stage1_load::run_stage1;
use crate::pipeline::stage2_aggregate::run_stage2;
use crate::pipeline::stage3_normalize::run_stage3;
use crate::pipeline::stage4_store::{Stage4Input, run_stage4};
use crate::store::RadarStore;
use crate::store::prune::{PruneOptions, PrunePaths, prune};

/// Six-dimension developer radar scoring over a cohort of GitHub users.
#[derive(Debug, Parser)]
#[command(name = "openscout-radar", version)]
struct Cli {
    /// Root of the data directory.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Cohort file. Defaults to `<data-dir>/users_list.json`.
    #[arg(long, global = true)]
    users_list: Option<PathBuf>,

    /// Per-user raw metric directories. Defaults to `<data-dir>/raw_users`.
    #[arg(long, global = true)]
    raw_users_dir: Option<PathBuf>,

    /// Radar store. Defaults to `<data-dir>/radar_scores.json`.
    #[arg(long, global = true)]
    radar_scores: Option<PathBuf>,

    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score the whole cohort and write the radar store.
    Score {
        /// Discard previously written scores instead of carrying them forward.
        #[arg(long, env = "REFRESH_DATA", value_parser = FalseyValueParser::new())]
        refresh: bool,
    },
    /// Drop users whose mean radar score is below a threshold.
    Prune {
        #[arg(long, default_value_t = 60.0)]
        threshold: f64,
        /// Write files and delete directories; otherwise only report.
        #[arg(long)]
        apply: bool,
    },
    /// Print the stored radar for one user as JSON.
    Show { username: String },
}

#[derive(Debug, Clone, PartialEq)]
struct RunPaths {
    users_list: PathBuf,
    raw_users_dir: PathBuf,
    radar_scores: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let paths = resolve_paths(&cli);
    match cli.command {
        Command::Score { refresh } => run_score(&paths, refresh),
        Command::Prune { threshold, apply } => {
            let prune_paths = PrunePaths {
                users_list: paths.users_list,
                radar_scores: paths.radar_scores,
                raw_users_dir: paths.raw_users_dir,
            };
            prune(&prune_paths, PruneOptions { threshold, apply })
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
        Command::Show { username } => run_show(&paths.radar_scores, &username),
    }
}

fn resolve_paths(cli: &Cli) -> RunPaths {
    let or_default = |path: &Option<PathBuf>, name: &str| {
        path.clone().unwrap_or_else(|| cli.data_dir.join(name))
    };
    RunPaths {
        users_list: or_default(&cli.users_list, "users_list.json"),
        raw_users_dir: or_default(&cli.raw_users_dir, "raw_users"),
        radar_scores: or_default(&cli.radar_scores, "radar_scores.json"),
    }
}

fn run_score(paths: &RunPaths, refresh: bool) -> Result<(), String> {
    tracing::info!("loading user list from {}", paths.users_list.display());
    let cohort = load_cohort(&paths.users_list).map_err(|e| e.to_string())?;
    tracing::info!("processing {} users", cohort.users.len());

    let profile = ScoringProfile::default_v1();
    let stage1 = run_stage1(&paths.raw_users_dir, &cohort.users);
    let raw = run_stage2(&stage1, &profile);
    let stage3 = run_stage3(&raw, &profile);
    for dim in Dimension::ALL {
        let s = &stage3.stats[dim.index()];
        tracing::info!("stats for {dim}: mu={:.4}, sigma={:.4}", s.mu, s.sigma);
    }

    let stage4 = run_stage4(&Stage4Input {
        users: &stage1.users,
        radar: &stage3.radar,
        out_path: &paths.radar_scores,
        refresh,
    })
    .map_err(|e| e.to_string())?;
    tracing::info!(
        "done: {} entries written ({} carried forward from previous output)",
        stage4.written,
        stage4.carried_forward
    );
    Ok(())
}

fn run_show(radar_scores: &Path, username: &str) -> Result<(), String> {
    let store = RadarStore::load_or_empty(radar_scores).map_err(|e| e.to_string())?;
    let profile = ScoringProfile::default_v1();
    let lookup = store.lookup(username, &profile.unscored_radar());
    let json = serde_json::to_string_pretty(&lookup).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
