//! `linkgraph name`, `neighbors` and `categories` command implementations.

use std::io;

use anyhow::Result;
use linkgraph::output;
use linkgraph::{CategoryId, VertexId};
use serde::Serialize;

use super::{Session, VertexJson};

#[derive(Serialize)]
struct NeighborsJson<'g> {
    vertex: VertexJson<'g>,
    neighbors: Vec<VertexJson<'g>>,
}

#[derive(Serialize)]
struct CategoryJson<'g> {
    id: CategoryId,
    name: &'g str,
}

#[derive(Serialize)]
struct CategoriesJson<'g> {
    vertex: VertexJson<'g>,
    categories: Vec<CategoryJson<'g>>,
}

/// Run the name command.
pub fn name(session: &Session, id: usize) -> Result<()> {
    let graph = session.load_configured()?;
    let id = VertexId(id);
    let mut stdout = io::stdout().lock();

    if session.json {
        output::write_json(&mut stdout, &VertexJson::new(&graph, id)?)?;
    } else {
        graph.vertex(id)?;
        output::write_name(&mut stdout, &graph, id, &session.output)?;
    }
    Ok(())
}

/// Run the neighbors command.
pub fn neighbors(session: &Session, id: usize) -> Result<()> {
    let graph = session.load_configured()?;
    let id = VertexId(id);
    let neighbors = graph.neighbors_of(id)?;
    let mut stdout = io::stdout().lock();

    if session.json {
        let json = NeighborsJson {
            vertex: VertexJson::new(&graph, id)?,
            neighbors: VertexJson::many(&graph, neighbors)?,
        };
        output::write_json(&mut stdout, &json)?;
    } else {
        output::write_name(&mut stdout, &graph, id, &session.output)?;
        output::write_vertices(&mut stdout, &graph, "Neighbors", neighbors, &session.output)?;
    }
    Ok(())
}

/// Run the categories command.
pub fn categories(session: &Session, id: usize) -> Result<()> {
    let graph = session.load_configured()?;
    let id = VertexId(id);
    let categories = graph.categories_of(id)?;
    let mut stdout = io::stdout().lock();

    if session.json {
        let categories = categories
            .iter()
            .map(|&category| {
                Ok(CategoryJson {
                    id: category,
                    name: graph.category_name(category)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let json = CategoriesJson {
            vertex: VertexJson::new(&graph, id)?,
            categories,
        };
        output::write_json(&mut stdout, &json)?;
    } else {
        output::write_name(&mut stdout, &graph, id, &session.output)?;
        output::write_categories(&mut stdout, &graph, "Categories", categories, &session.output)?;
    }
    Ok(())
}
