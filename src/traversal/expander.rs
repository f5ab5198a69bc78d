//! Expanders: which neighbors a vertex leads to.

use std::sync::Arc;

use crate::error::DatasourceError;
use crate::graph::{Datasource, EdgeRef, Path, VertexRef};
use crate::trace::warn_event;

use super::config::TraversalConfig;

pub use super::config::Direction;

/// An edge together with the neighbor it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// The traversed edge.
    pub edge: EdgeRef,
    /// The vertex reached through `edge`.
    pub vertex: VertexRef,
}

impl Connection {
    /// Pairs an edge with its neighbor.
    pub fn new(edge: EdgeRef, vertex: VertexRef) -> Self {
        Self { edge, vertex }
    }
}

/// Produces the ordered neighbors of a vertex.
///
/// The order of the returned connections is the `Forward` item order. Expanders may read
/// the configuration (labels, sort, edge examples) and the path that reached `vertex`.
pub trait Expander: Send + Sync {
    /// Lists the connections leaving `vertex`.
    fn expand(
        &self,
        config: &TraversalConfig,
        datasource: &dyn Datasource,
        vertex: &VertexRef,
        path: &Path,
    ) -> Result<Vec<Connection>, DatasourceError>;

    /// Returns `true` if this expander cannot run without configured labels.
    fn requires_labels(&self) -> bool {
        false
    }
}

impl<F> Expander for F
where
    F: Fn(&TraversalConfig, &dyn Datasource, &VertexRef, &Path) -> Result<Vec<Connection>, DatasourceError>
        + Send
        + Sync,
{
    fn expand(
        &self,
        config: &TraversalConfig,
        datasource: &dyn Datasource,
        vertex: &VertexRef,
        path: &Path,
    ) -> Result<Vec<Connection>, DatasourceError> {
        self(config, datasource, vertex, path)
    }
}

/// Follows the edges of one direction, optionally restricted to the configured labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeExpander {
    direction: Direction,
    label_restricted: bool,
}

impl EdgeExpander {
    /// Follows every edge in `direction`.
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            label_restricted: false,
        }
    }

    /// Follows edges in `direction` whose label is one of the configured labels.
    pub const fn with_labels(direction: Direction) -> Self {
        Self {
            direction,
            label_restricted: true,
        }
    }

    /// The followed direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    fn edges(&self, datasource: &dyn Datasource, vertex: &VertexRef) -> Result<Vec<EdgeRef>, DatasourceError> {
        match self.direction {
            Direction::Outbound => datasource.out_edges(vertex),
            Direction::Inbound => datasource.in_edges(vertex),
            Direction::Any => datasource.all_edges(vertex),
        }
    }

    fn neighbor(
        &self,
        datasource: &dyn Datasource,
        edge: &EdgeRef,
        vertex: &VertexRef,
    ) -> Result<Option<VertexRef>, DatasourceError> {
        match self.direction {
            Direction::Outbound => datasource.in_vertex(edge),
            Direction::Inbound => datasource.out_vertex(edge),
            Direction::Any => datasource.peer_vertex(edge, vertex),
        }
    }
}

impl Expander for EdgeExpander {
    fn expand(
        &self,
        config: &TraversalConfig,
        datasource: &dyn Datasource,
        vertex: &VertexRef,
        _: &Path,
    ) -> Result<Vec<Connection>, DatasourceError> {
        let mut edges = self.edges(datasource, vertex)?;
        if edges.len() > 1 {
            if let Some(sort) = config.sort() {
                edges.sort_by(|l, r| sort(l.as_ref(), r.as_ref()));
            }
        }

        let mut connections = Vec::with_capacity(edges.len());
        for edge in edges {
            if self.label_restricted && !config.accepts_label(edge.label()) {
                continue;
            }
            if !config.follows(&edge) {
                continue;
            }
            match self.neighbor(datasource, &edge, vertex)? {
                Some(neighbor) => connections.push(Connection::new(edge, neighbor)),
                None => warn_event!(
                    edge = edge.id(),
                    vertex = vertex.id(),
                    "skipping edge with a dangling endpoint"
                ),
            }
        }
        Ok(connections)
    }

    fn requires_labels(&self) -> bool {
        self.label_restricted
    }
}

/// Follows outbound edges to their `to` vertex.
pub fn outbound_expander() -> Arc<dyn Expander> {
    Arc::new(EdgeExpander::new(Direction::Outbound))
}

/// Follows inbound edges to their `from` vertex.
pub fn inbound_expander() -> Arc<dyn Expander> {
    Arc::new(EdgeExpander::new(Direction::Inbound))
}

/// Follows incident edges in both directions to the opposite endpoint.
pub fn any_expander() -> Arc<dyn Expander> {
    Arc::new(EdgeExpander::new(Direction::Any))
}

/// Like [`any_expander`], restricted to the configured labels.
pub fn expand_edges_with_labels() -> Arc<dyn Expander> {
    Arc::new(EdgeExpander::with_labels(Direction::Any))
}

/// Like [`inbound_expander`], restricted to the configured labels.
pub fn expand_in_edges_with_labels() -> Arc<dyn Expander> {
    Arc::new(EdgeExpander::with_labels(Direction::Inbound))
}

/// Like [`outbound_expander`], restricted to the configured labels.
pub fn expand_out_edges_with_labels() -> Arc<dyn Expander> {
    Arc::new(EdgeExpander::with_labels(Direction::Outbound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, MemoryDatasource, Vertex};
    use crate::traversal::config::sort_by_key;
    use serde_json::json;

    fn fixture() -> (MemoryDatasource, VertexRef) {
        let ds = MemoryDatasource::from_parts(
            ["v/A", "v/B", "v/C", "v/D"].map(Vertex::new),
            [
                Edge::new("e/AC", "v/A", "v/C").labeled("likes"),
                Edge::new("e/AB", "v/A", "v/B").labeled("hates"),
                Edge::new("e/DA", "v/D", "v/A").labeled("likes"),
                Edge::new("e/AX", "v/A", "v/X"),
            ],
        );
        let a = ds.get("v/A").cloned().unwrap();
        (ds, a)
    }

    fn neighbors(expander: &dyn Expander, config: &TraversalConfig, ds: &MemoryDatasource, v: &VertexRef) -> Vec<String> {
        expander
            .expand(config, ds, v, &Path::seed(Arc::clone(v)))
            .unwrap()
            .into_iter()
            .map(|c| c.vertex.id().to_owned())
            .collect()
    }

    #[test]
    fn directions_pick_the_opposite_endpoint() {
        let (ds, a) = fixture();
        let config = TraversalConfig::default();
        assert_eq!(neighbors(&*outbound_expander(), &config, &ds, &a), ["v/C", "v/B"]);
        assert_eq!(neighbors(&*inbound_expander(), &config, &ds, &a), ["v/D"]);
        assert_eq!(neighbors(&*any_expander(), &config, &ds, &a), ["v/D", "v/C", "v/B"]);
    }

    #[test]
    fn sort_applies_before_expansion() {
        let (ds, a) = fixture();
        let config = TraversalConfig::default().with_sort(sort_by_key());
        assert_eq!(neighbors(&*outbound_expander(), &config, &ds, &a), ["v/B", "v/C"]);
    }

    #[test]
    fn label_expanders_skip_other_labels() {
        let (ds, a) = fixture();
        let config = TraversalConfig::default().with_labels(["likes"]);
        assert_eq!(neighbors(&*expand_out_edges_with_labels(), &config, &ds, &a), ["v/C"]);
        assert_eq!(neighbors(&*expand_in_edges_with_labels(), &config, &ds, &a), ["v/D"]);
        assert_eq!(neighbors(&*expand_edges_with_labels(), &config, &ds, &a), ["v/D", "v/C"]);
        assert!(expand_edges_with_labels().requires_labels());
        assert!(!any_expander().requires_labels());
    }

    #[test]
    fn edge_examples_restrict_expansion() {
        let (ds, a) = fixture();
        let example = json!({ "_key": "AB" }).as_object().cloned().unwrap();
        let config = TraversalConfig::default().with_follow_edges(vec![example]);
        assert_eq!(neighbors(&*outbound_expander(), &config, &ds, &a), ["v/B"]);
    }

    #[test]
    fn closures_are_expanders() {
        let (ds, a) = fixture();
        let only_first = |config: &TraversalConfig, ds: &dyn Datasource, v: &VertexRef, path: &Path| -> Result<Vec<Connection>, DatasourceError> {
            let mut all = EdgeExpander::new(Direction::Outbound).expand(config, ds, v, path)?;
            all.truncate(1);
            Ok(all)
        };
        assert_eq!(neighbors(&only_first, &TraversalConfig::default(), &ds, &a), ["v/C"]);
    }
}
