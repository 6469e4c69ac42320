//! `linkgraph stats` command implementation.

use std::io;

use anyhow::Result;
use linkgraph::output;

use super::Session;

/// Run the stats command.
pub fn run(session: &Session) -> Result<()> {
    let graph = session.load_configured()?;
    let stats = graph.stats();
    let mut stdout = io::stdout().lock();

    if session.json {
        output::write_json(&mut stdout, &stats)?;
    } else {
        output::write_stats(&mut stdout, &stats, &session.output)?;
    }
    Ok(())
}
