use std::{
    fs::File,
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context;

/// Installs a logger writing to `log_file`.
///
/// The terminal belongs to the TUI, so logs never go to stderr; without a
/// file no logger is installed and log records are dropped. The level is
/// taken from `RUST_LOG` and defaults to `info`.
pub fn init_logger(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")?;
    Ok(())
}

/// Writes `value` to stdout as pretty JSON followed by a newline.
pub fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON to stdout")?;
    writeln!(stdout).context("Failed to write newline after JSON to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
