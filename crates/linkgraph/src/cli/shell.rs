//! `linkgraph shell` command implementation.

use std::io;

use anyhow::{Context, Result};
use linkgraph::shell::{Shell, TokenReader, prompt_for_sources};

use super::Session;

/// Run the interactive shell on stdin and stdout.
///
/// Data files missing from the configuration are asked for first.
pub fn run(session: &Session) -> Result<()> {
    let mut tokens = TokenReader::new(io::stdin().lock());
    let mut stdout = io::stdout().lock();

    let Some(sources) = prompt_for_sources(&mut tokens, &mut stdout, &session.config.data)
        .context("failed to read data file names")?
    else {
        return Ok(());
    };
    let graph = session.load(&sources)?;

    let executed = Shell::new(&graph, tokens, stdout, session.output)
        .run()
        .context("shell I/O failed")?;
    tracing::debug!(executed, "Shell finished");
    Ok(())
}
