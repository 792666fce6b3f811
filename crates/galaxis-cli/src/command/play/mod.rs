use std::path::PathBuf;

use galaxis_engine::{GameSession, PieceSeed, SessionConfig, TetrisCounterPolicy};

use crate::{
    command::{StoreArg, play::app::PlayApp},
    store::JsonFileStore,
    tui::Tui,
    util,
};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(super) store: StoreArg,
    /// Seed for the piece sequence as 32 hex digits; random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Keep the four-line-clear counter across games instead of resetting it
    #[clap(long, default_value_t = false)]
    persistent_tetris_count: bool,
    /// Write log records to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        store,
        seed,
        persistent_tetris_count,
        log_file,
    } = arg;

    util::init_logger(log_file.as_deref())?;

    let store = JsonFileStore::open(&store.path)?;
    log::info!("using store {}", store.path().display());
    let config = SessionConfig {
        seed: *seed,
        tetris_counter: if *persistent_tetris_count {
            TetrisCounterPolicy::Persistent
        } else {
            TetrisCounterPolicy::ResetPerGame
        },
    };
    let mut app = PlayApp::new(GameSession::new(store, config));
    Tui::new().run(&mut app)?;
    log::info!("exiting with high score {}", app.session().high_score());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use crate::command::{CommandArgs, Mode};

    #[test]
    fn test_play_flags() {
        let args = CommandArgs::try_parse_from([
            "galaxis",
            "play",
            "--seed",
            "000000000000000000000000000000ff",
            "--persistent-tetris-count",
            "--store",
            "/tmp/progress.json",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(
            arg.seed.map(|seed| seed.to_string()).as_deref(),
            Some("000000000000000000000000000000ff")
        );
        assert!(arg.persistent_tetris_count);
        assert_eq!(arg.store.path.to_str(), Some("/tmp/progress.json"));
        assert_eq!(arg.log_file, None);
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        assert!(CommandArgs::try_parse_from(["galaxis", "play", "--seed", "xyz"]).is_err());
    }
}
