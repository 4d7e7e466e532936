//! Multi-graph documents
//!
//! A [`DeuteriumFile`] is the in-memory form of a saved document: a name, a
//! description and any number of graphs keyed by graph id.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deuterium_core::{DeuteriumError, DeuteriumResult};

use crate::graph::DependencyGraph;
use crate::snapshot::GraphSnapshot;

/// A named collection of dependency graphs
#[derive(Debug, Clone, Default)]
pub struct DeuteriumFile {
    pub name: String,
    pub description: String,
    graphs: IndexMap<Uuid, DependencyGraph>,
}

/// Serializable form of a [`DeuteriumFile`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeuteriumFileSnapshot {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub graphs: Vec<GraphSnapshot>,
}

impl DeuteriumFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            graphs: IndexMap::new(),
        }
    }

    /// Add a graph, replacing any graph with the same id
    pub fn add_graph(&mut self, graph: DependencyGraph) -> Option<DependencyGraph> {
        self.graphs.insert(graph.id(), graph)
    }

    pub fn remove_graph(&mut self, id: Uuid) -> Option<DependencyGraph> {
        self.graphs.shift_remove(&id)
    }

    pub fn graph(&self, id: Uuid) -> Option<&DependencyGraph> {
        self.graphs.get(&id)
    }

    pub fn graph_mut(&mut self, id: Uuid) -> Option<&mut DependencyGraph> {
        self.graphs.get_mut(&id)
    }

    pub fn graphs(&self) -> impl Iterator<Item = &DependencyGraph> {
        self.graphs.values()
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Find a graph by id string or by name
    pub fn find_graph(&self, key: &str) -> DeuteriumResult<&DependencyGraph> {
        let by_id = Uuid::parse_str(key.trim())
            .ok()
            .and_then(|id| self.graphs.get(&id));

        by_id
            .or_else(|| self.graphs.values().find(|graph| graph.name() == key))
            .ok_or_else(|| DeuteriumError::graph_not_found(key))
    }

    /// The only graph of a single-graph document
    pub fn sole_graph(&self) -> Option<&DependencyGraph> {
        match self.graphs.len() {
            1 => self.graphs.values().next(),
            _ => None,
        }
    }

    pub fn from_snapshot(snapshot: DeuteriumFileSnapshot) -> DeuteriumResult<Self> {
        let mut file = DeuteriumFile::new(snapshot.name);
        file.description = snapshot.description;
        for graph in snapshot.graphs {
            file.add_graph(DependencyGraph::from_snapshot(graph)?);
        }
        Ok(file)
    }

    pub fn to_snapshot(&self) -> DeuteriumFileSnapshot {
        DeuteriumFileSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            graphs: self.graphs.values().map(DependencyGraph::to_snapshot).collect(),
        }
    }
}
