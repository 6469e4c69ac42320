//! `linkgraph path`, `landmark` and `cycle` command implementations.

use std::io;

use anyhow::Result;
use linkgraph::VertexId;
use linkgraph::output;

use super::Session;

/// Run the path command.
pub fn path(session: &Session, from: usize, to: usize) -> Result<()> {
    let graph = session.load_configured()?;
    let outcome = graph.shortest_path(VertexId(from), VertexId(to))?;
    let mut stdout = io::stdout().lock();

    if session.json {
        output::write_json(&mut stdout, &outcome)?;
    } else {
        output::write_path(&mut stdout, &graph, outcome.path(), &session.output)?;
    }
    Ok(())
}

/// Run the landmark command.
pub fn landmark(session: &Session, from: usize, via: usize, to: usize) -> Result<()> {
    let graph = session.load_configured()?;
    let route = graph.landmark_path(VertexId(from), VertexId(via), VertexId(to))?;
    let mut stdout = io::stdout().lock();

    if session.json {
        output::write_json(&mut stdout, &route)?;
    } else {
        output::write_landmark(&mut stdout, &graph, route.as_ref(), &session.output)?;
    }
    Ok(())
}

/// Run the cycle command.
pub fn cycle(session: &Session, id: usize) -> Result<()> {
    let graph = session.load_configured()?;
    let outcome = graph.find_cycle_from(VertexId(id))?;
    let mut stdout = io::stdout().lock();

    if session.json {
        output::write_json(&mut stdout, &outcome)?;
    } else {
        let cycle = outcome.cycle().map(|c| c.vertices());
        output::write_cycle(&mut stdout, &graph, cycle, &session.output)?;
    }
    Ok(())
}
