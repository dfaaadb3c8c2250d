//! Run a script file against a fresh space.

use crate::config::Config;
use crate::script::Interpreter;
use anyhow::{Context, Result};
use linda_core::SharedSpace;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

pub fn run_script(config_path: &Path, script: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    let file = File::open(script)
        .with_context(|| format!("Failed to open script {}", script.display()))?;

    let space = SharedSpace::new();
    let mut interpreter = Interpreter::new(&space, io::stdout()).with_echo(config.script.echo);
    let executed = interpreter
        .run(BufReader::new(file))
        .with_context(|| format!("Script {} failed", script.display()))?;

    tracing::info!(
        "{}: {} commands, {} tuples left in the space",
        script.display(),
        executed,
        space.size()
    );
    Ok(())
}
