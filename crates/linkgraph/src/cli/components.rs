//! `linkgraph scc` command implementation.

use std::io;

use anyhow::Result;
use linkgraph::VertexId;
use linkgraph::output;
use serde::Serialize;

use super::Session;

#[derive(Serialize)]
struct ComponentJson<'a> {
    representative: VertexId,
    size: usize,
    members: &'a [VertexId],
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    components: usize,
    singletons: usize,
    largest: Vec<ComponentJson<'a>>,
}

/// Run the scc command, listing the `list` largest components.
pub fn run(session: &Session, list: usize) -> Result<()> {
    let graph = session.load_configured()?;
    let components = graph.strongly_connected_components();
    let mut stdout = io::stdout().lock();

    if session.json {
        let largest = components
            .largest(list)
            .into_iter()
            .map(|(representative, members)| ComponentJson {
                representative,
                size: members.len(),
                members,
            })
            .collect();
        let summary = SummaryJson {
            components: components.len(),
            singletons: components.singleton_count(),
            largest,
        };
        output::write_json(&mut stdout, &summary)?;
    } else {
        output::write_components(&mut stdout, &graph, &components, list, &session.output)?;
    }
    Ok(())
}
