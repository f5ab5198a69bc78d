//! Visitors receive every vertex the filters let through.

use serde::Serialize;
use serde_json::Value;

use crate::error::ConfigurationError;
use crate::graph::{Path, VertexRef};

use super::config::TraversalConfig;

/// Callback invoked once per visited vertex.
///
/// `path` ends at `vertex`. Visitors cannot influence the walk; use a
/// [`Filter`](super::Filter) for that.
pub trait Visitor {
    /// Handles one visited vertex.
    fn visit(&mut self, config: &TraversalConfig, vertex: &VertexRef, path: &Path);
}

impl<F> Visitor for F
where
    F: FnMut(&TraversalConfig, &VertexRef, &Path),
{
    fn visit(&mut self, config: &TraversalConfig, vertex: &VertexRef, path: &Path) {
        self(config, vertex, path);
    }
}

/// Vertices and paths in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Visited {
    /// Visited vertices.
    pub vertices: Vec<VertexRef>,
    /// Path to each visited vertex, parallel to `vertices`. Empty when path tracking is off.
    pub paths: Vec<Path>,
}

/// Output of [`TrackingVisitor`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitResult {
    /// Everything that was visited.
    pub visited: Visited,
}

impl VisitResult {
    /// Identifiers of the visited vertices.
    pub fn vertex_ids(&self) -> Vec<&str> {
        self.visited.vertices.iter().map(|v| v.id()).collect()
    }

    /// Keys of the visited vertices.
    pub fn vertex_keys(&self) -> Vec<&str> {
        self.visited.vertices.iter().map(|v| v.key()).collect()
    }

    /// Vertex identifiers along each recorded path.
    pub fn path_ids(&self) -> Vec<Vec<&str>> {
        self.visited.paths.iter().map(Path::vertex_ids).collect()
    }

    /// Number of visited vertices.
    pub fn len(&self) -> usize {
        self.visited.vertices.len()
    }

    /// Returns `true` if nothing was visited.
    pub fn is_empty(&self) -> bool {
        self.visited.vertices.is_empty()
    }
}

/// Records every visited vertex and, if the configuration tracks paths, its path.
#[derive(Debug, Clone, Default)]
pub struct TrackingVisitor {
    result: VisitResult,
}

impl TrackingVisitor {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// What has been recorded so far.
    pub fn result(&self) -> &VisitResult {
        &self.result
    }

    /// Consumes the recorder.
    pub fn into_result(self) -> VisitResult {
        self.result
    }
}

impl Visitor for TrackingVisitor {
    fn visit(&mut self, config: &TraversalConfig, vertex: &VertexRef, path: &Path) {
        self.result.visited.vertices.push(VertexRef::clone(vertex));
        if config.track_paths() {
            self.result.visited.paths.push(path.clone());
        }
    }
}

/// One vertex of the tree and the subtrees reached from it, in first-visit order.
#[derive(Debug, Clone)]
struct TreeNode {
    vertex: VertexRef,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn into_document(self, connect: &str) -> Value {
        let mut document = self.vertex.to_document_map();
        if !self.children.is_empty() {
            let children = self
                .children
                .into_iter()
                .map(|child| child.into_document(connect))
                .collect();
            document.insert(connect.to_owned(), Value::Array(children));
        }
        Value::Object(document)
    }
}

/// Builds a nested JSON document mirroring the traversal tree.
///
/// Each node is the vertex document (attributes plus `_id` and `_key`); children are
/// listed under the `connect` attribute in first-visit order. A vertex reached over two
/// different paths appears under both parents.
#[derive(Debug, Clone)]
pub struct TreeVisitor {
    connect: String,
    roots: Vec<TreeNode>,
}

impl TreeVisitor {
    /// Creates a tree builder nesting children under `connect`.
    pub fn new(connect: impl Into<String>) -> Result<Self, ConfigurationError> {
        let connect = connect.into();
        if connect.is_empty() {
            return Err(ConfigurationError::InvalidOption {
                option: "connect",
                value: connect,
            });
        }
        Ok(Self {
            connect,
            roots: Vec::new(),
        })
    }

    /// Attribute holding child nodes.
    pub fn connect(&self) -> &str {
        &self.connect
    }

    /// The top-level nodes (normally just the seed).
    pub fn into_tree(self) -> Vec<Value> {
        let connect = self.connect;
        self.roots
            .into_iter()
            .map(|root| root.into_document(&connect))
            .collect()
    }
}

impl Visitor for TreeVisitor {
    fn visit(&mut self, _: &TraversalConfig, _: &VertexRef, path: &Path) {
        let mut level = &mut self.roots;
        for vertex in path.vertices() {
            let index = match level.iter().position(|node| node.vertex.id() == vertex.id()) {
                Some(index) => index,
                None => {
                    level.push(TreeNode {
                        vertex: VertexRef::clone(vertex),
                        children: Vec::new(),
                    });
                    level.len() - 1
                }
            };
            level = &mut level[index].children;
        }
    }
}
