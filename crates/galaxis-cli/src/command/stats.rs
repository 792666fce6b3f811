use galaxis_engine::{Achievement, LifetimeStats, Progress, ProgressStore};
use serde::Serialize;

use crate::{command::StoreArg, store::JsonFileStore, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    #[clap(flatten)]
    pub(super) store: StoreArg,
    /// Print the report as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressReport {
    high_score: usize,
    galaxy_points: usize,
    tetris_count: usize,
    lifetime: LifetimeStats,
    achievements: Vec<Achievement>,
}

impl From<&Progress> for ProgressReport {
    fn from(progress: &Progress) -> Self {
        Self {
            high_score: progress.high_score,
            galaxy_points: progress.achievements.galaxy_points(),
            tetris_count: progress.tetris_count,
            lifetime: progress.lifetime,
            achievements: progress.achievements.achievements(),
        }
    }
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let store = JsonFileStore::open(&arg.store.path)?;
    let report = ProgressReport::from(&ProgressStore::new(store).load());
    if arg.json {
        util::print_json(&report)?;
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

fn format_report(report: &ProgressReport) -> String {
    let mut out = format!(
        "High score:     {}\n\
         Galaxy points:  {}\n\
         Lines cleared:  {}\n\
         Pieces placed:  {}\n\
         Hard drops:     {}\n\
         \n\
         Achievements:\n",
        report.high_score,
        report.galaxy_points,
        report.lifetime.total_lines_cleared,
        report.lifetime.total_pieces_placed,
        report.lifetime.total_hard_drops,
    );
    for a in &report.achievements {
        let mark = if a.unlocked { "x" } else { " " };
        out.push_str(&format!(
            "  [{mark}] {} {:<16} {:>3} pts  {}\n",
            a.icon, a.name, a.points, a.description
        ));
    }
    out
}
