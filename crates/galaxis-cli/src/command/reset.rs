use galaxis_engine::{Progress, ProgressStore};

use crate::{command::StoreArg, store::JsonFileStore};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ResetArg {
    #[clap(flatten)]
    pub(super) store: StoreArg,
}

pub(crate) fn run(arg: &ResetArg) -> anyhow::Result<()> {
    let store = JsonFileStore::open(&arg.store.path)?;
    let path = store.path().to_owned();
    ProgressStore::new(store).save(&Progress::default())?;
    println!("Progress in {} has been reset.", path.display());
    Ok(())
}
