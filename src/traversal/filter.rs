//! Filters and the filter pipeline.
//!
//! A filter inspects a candidate vertex (and the path that reached it) and answers with a
//! [`VisitDirective`]. The pipeline evaluates the implicit depth-bound stage first and
//! then every configured filter in order, unioning the answers.

use std::collections::BTreeSet;

use crate::graph::{Attributes, Document, Path, Vertex};

use super::config::TraversalConfig;
use super::directive::VisitDirective;

/// Decides whether a vertex is visited and whether it is expanded.
pub trait Filter: Send + Sync {
    /// Evaluates `vertex`, reached via `path` (whose last vertex is `vertex`).
    fn evaluate(&self, config: &TraversalConfig, vertex: &Vertex, path: &Path) -> VisitDirective;
}

impl<F> Filter for F
where
    F: Fn(&TraversalConfig, &Vertex, &Path) -> VisitDirective + Send + Sync,
{
    fn evaluate(&self, config: &TraversalConfig, vertex: &Vertex, path: &Path) -> VisitDirective {
        self(config, vertex, path)
    }
}

/// Visits and expands everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitAllFilter;

impl Filter for VisitAllFilter {
    fn evaluate(&self, _: &TraversalConfig, _: &Vertex, _: &Path) -> VisitDirective {
        VisitDirective::INCLUDE
    }
}

/// Excludes vertices closer to the seed than the configured minimum depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinDepthFilter;

impl Filter for MinDepthFilter {
    fn evaluate(&self, config: &TraversalConfig, _: &Vertex, path: &Path) -> VisitDirective {
        match config.min_depth() {
            Some(min) if path.depth() < min => VisitDirective::EXCLUDE,
            _ => VisitDirective::INCLUDE,
        }
    }
}

/// Prunes vertices at (or beyond) the configured maximum depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDepthFilter;

impl Filter for MaxDepthFilter {
    fn evaluate(&self, config: &TraversalConfig, _: &Vertex, path: &Path) -> VisitDirective {
        match config.max_depth() {
            Some(max) if path.depth() >= max => VisitDirective::PRUNE,
            _ => VisitDirective::INCLUDE,
        }
    }
}

/// Excludes every vertex that matches none of the attribute patterns.
///
/// Matching is subset equality: all entries of a pattern must be present on the vertex
/// with equal values. `_id` and `_key` address the vertex identifier.
#[derive(Debug, Clone, Default)]
pub struct IncludeMatchingAttributesFilter {
    patterns: Vec<Attributes>,
}

impl IncludeMatchingAttributesFilter {
    /// Creates the filter.
    pub fn new(patterns: Vec<Attributes>) -> Self {
        Self { patterns }
    }

    /// The patterns, in declaration order.
    pub fn patterns(&self) -> &[Attributes] {
        &self.patterns
    }
}

impl Filter for IncludeMatchingAttributesFilter {
    fn evaluate(&self, _: &TraversalConfig, vertex: &Vertex, _: &Path) -> VisitDirective {
        if vertex.matches_any(&self.patterns) {
            VisitDirective::INCLUDE
        } else {
            VisitDirective::EXCLUDE
        }
    }
}

/// Restricts visits to vertex examples and vertex collections.
///
/// A vertex outside the allowed collections is excluded but still expanded. A vertex
/// matching none of the examples gets `method` (exclude and prune by default) on top.
#[derive(Debug, Clone)]
pub struct VertexExampleFilter {
    examples: Option<Vec<Attributes>>,
    method: VisitDirective,
    collections: Option<BTreeSet<String>>,
}

impl Default for VertexExampleFilter {
    fn default() -> Self {
        Self {
            examples: None,
            method: VisitDirective::EXCLUDE_AND_PRUNE,
            collections: None,
        }
    }
}

impl VertexExampleFilter {
    /// Creates a filter that lets everything through until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices must match at least one of `examples`.
    #[must_use]
    pub fn with_examples(mut self, examples: Vec<Attributes>) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Directive applied to vertices matching no example.
    #[must_use]
    pub fn with_method(mut self, method: VisitDirective) -> Self {
        self.method = method;
        self
    }

    /// Vertices must be stored in one of `collections` to be visited.
    #[must_use]
    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = Some(collections.into_iter().map(Into::into).collect());
        self
    }

    /// The examples, if any.
    pub fn examples(&self) -> Option<&[Attributes]> {
        self.examples.as_deref()
    }

    /// Directive for non-matching vertices.
    pub fn method(&self) -> VisitDirective {
        self.method
    }

    /// The allowed vertex collections, if restricted.
    pub fn collections(&self) -> Option<&BTreeSet<String>> {
        self.collections.as_ref()
    }
}

impl Filter for VertexExampleFilter {
    fn evaluate(&self, _: &TraversalConfig, vertex: &Vertex, _: &Path) -> VisitDirective {
        let collection = vertex.collection().unwrap_or(vertex.id());
        let mut directive = match &self.collections {
            Some(allowed) if !allowed.contains(collection) => VisitDirective::EXCLUDE,
            _ => VisitDirective::INCLUDE,
        };
        if let Some(examples) = &self.examples {
            if !vertex.matches_any(examples) {
                directive |= self.method;
            }
        }
        directive
    }
}

/// Depth bounds from the configuration, applied before user filters.
fn depth_bounds(config: &TraversalConfig, vertex: &Vertex, path: &Path) -> VisitDirective {
    MinDepthFilter.evaluate(config, vertex, path) | MaxDepthFilter.evaluate(config, vertex, path)
}

/// The ordered filter stages of a configuration.
#[derive(Debug, Clone, Copy)]
pub struct FilterPipeline<'a> {
    config: &'a TraversalConfig,
}

impl<'a> FilterPipeline<'a> {
    /// Pipeline over the filters of `config`.
    pub fn new(config: &'a TraversalConfig) -> Self {
        Self { config }
    }

    /// Unions the directives of the depth-bound stage and every configured filter.
    pub fn evaluate(&self, vertex: &Vertex, path: &Path) -> VisitDirective {
        let mut directive = depth_bounds(self.config, vertex, path);
        for filter in self.config.filters() {
            directive |= filter.evaluate(self.config, vertex, path);
        }
        directive
    }
}
