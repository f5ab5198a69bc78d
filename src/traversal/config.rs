//! Traversal configuration.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::error::ConfigurationError;
use crate::graph::{Attributes, Document, Edge};

use super::expander::{EdgeExpander, Expander};
use super::filter::Filter;

/// Default upper bound on processed frontier entries.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000_000;

/// Orders the edges an expander returns.
pub type EdgeComparator = Arc<dyn Fn(&Edge, &Edge) -> Ordering + Send + Sync>;

/// Comparator ordering edges by key, the part of the id after `/`.
pub fn sort_by_key() -> EdgeComparator {
    Arc::new(|l: &Edge, r: &Edge| l.key().cmp(r.key()))
}

/// Lowercases an option value and drops its first `-` (`"Depth-First"` -> `"depthfirst"`).
pub(crate) fn normalize_option(value: &str) -> String {
    value.to_lowercase().replacen('-', "", 1)
}

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $option:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Canonical option spelling.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigurationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match normalize_option(s).as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ConfigurationError::InvalidOption {
                        option: $option,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

option_enum! {
    /// Walk order over the frontier.
    Strategy, "strategy" {
        /// Explicit stack.
        DepthFirst => "depthfirst",
        /// FIFO frontier.
        BreadthFirst => "breadthfirst",
    }
}

option_enum! {
    /// When a vertex is handed to the visitor relative to its descendants.
    Order, "order" {
        /// Before any descendant.
        PreOrder => "preorder",
        /// After all descendants.
        PostOrder => "postorder",
    }
}

option_enum! {
    /// Order in which a vertex's neighbors are scheduled.
    ItemOrder, "itemOrder" {
        /// Expander order.
        Forward => "forward",
        /// Reversed expander order.
        Backward => "backward",
    }
}

option_enum! {
    /// Deduplication scope.
    Uniqueness, "uniqueness" {
        /// No deduplication.
        None => "none",
        /// Unique within the current path.
        Path => "path",
        /// Unique across the whole traversal.
        Global => "global",
    }
}

option_enum! {
    /// Which incident edges an expander follows.
    Direction, "direction" {
        /// Edges starting at the vertex.
        Outbound => "outbound",
        /// Edges ending at the vertex.
        Inbound => "inbound",
        /// Both, treating edges as undirected.
        Any => "any",
    }
}

/// Uniqueness rules for vertices and edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UniquenessConfig {
    /// Scope for vertex ids.
    pub vertices: Uniqueness,
    /// Scope for edge ids.
    pub edges: Uniqueness,
}

impl UniquenessConfig {
    /// Builds a rule set.
    pub const fn new(vertices: Uniqueness, edges: Uniqueness) -> Self {
        Self { vertices, edges }
    }

    /// Returns `true` if neither vertices nor edges are deduplicated.
    pub fn is_none(&self) -> bool {
        self.vertices == Uniqueness::None && self.edges == Uniqueness::None
    }
}

impl Default for UniquenessConfig {
    fn default() -> Self {
        Self::new(Uniqueness::None, Uniqueness::Path)
    }
}

/// Immutable description of a traversal.
///
/// Built from [`TraversalConfig::default`] with the consuming `with_*` methods and checked
/// by [`validate`](Self::validate) before a traversal starts.
#[derive(Clone)]
pub struct TraversalConfig {
    strategy: Strategy,
    order: Order,
    item_order: ItemOrder,
    uniqueness: UniquenessConfig,
    min_depth: Option<usize>,
    max_depth: Option<usize>,
    track_paths: bool,
    filters: Vec<Arc<dyn Filter>>,
    expander: Arc<dyn Expander>,
    labels: Option<BTreeSet<String>>,
    follow_edges: Option<Vec<Attributes>>,
    edge_collections: Option<BTreeSet<String>>,
    sort: Option<EdgeComparator>,
    max_iterations: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::DepthFirst,
            order: Order::PreOrder,
            item_order: ItemOrder::Forward,
            uniqueness: UniquenessConfig::default(),
            min_depth: None,
            max_depth: None,
            track_paths: true,
            filters: Vec::new(),
            expander: Arc::new(EdgeExpander::new(Direction::Outbound)),
            labels: None,
            follow_edges: None,
            edge_collections: None,
            sort: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl TraversalConfig {
    /// Default configuration with the given expander.
    pub fn new(expander: impl Expander + 'static) -> Self {
        Self::default().with_expander(expander)
    }

    /// Sets the walk strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets pre- or post-order visitation.
    #[must_use]
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Sets the neighbor scheduling order.
    #[must_use]
    pub fn with_item_order(mut self, item_order: ItemOrder) -> Self {
        self.item_order = item_order;
        self
    }

    /// Sets both uniqueness scopes.
    #[must_use]
    pub fn with_uniqueness(mut self, vertices: Uniqueness, edges: Uniqueness) -> Self {
        self.uniqueness = UniquenessConfig::new(vertices, edges);
        self
    }

    /// Vertices closer to the seed than `depth` edges are not visited.
    #[must_use]
    pub fn with_min_depth(mut self, depth: usize) -> Self {
        self.min_depth = Some(depth);
        self
    }

    /// Vertices `depth` edges away from the seed are not expanded.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Whether the tracking visitor records paths next to vertices.
    #[must_use]
    pub fn with_track_paths(mut self, track: bool) -> Self {
        self.track_paths = track;
        self
    }

    /// Appends a filter to the pipeline.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Appends an already shared filter to the pipeline.
    #[must_use]
    pub fn with_shared_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Replaces the expander.
    #[must_use]
    pub fn with_expander(mut self, expander: impl Expander + 'static) -> Self {
        self.expander = Arc::new(expander);
        self
    }

    /// Replaces the expander with an already shared one.
    #[must_use]
    pub fn with_shared_expander(mut self, expander: Arc<dyn Expander>) -> Self {
        self.expander = expander;
        self
    }

    /// Restricts label-aware expanders to these labels.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Only follow edges matching at least one of these examples.
    #[must_use]
    pub fn with_follow_edges(mut self, examples: Vec<Attributes>) -> Self {
        self.follow_edges = Some(examples);
        self
    }

    /// Only follow edges stored in one of these edge collections.
    ///
    /// An empty list follows nothing.
    #[must_use]
    pub fn with_edge_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edge_collections = Some(collections.into_iter().map(Into::into).collect());
        self
    }

    /// Sorts every expansion with `comparator`.
    #[must_use]
    pub fn with_sort(mut self, comparator: EdgeComparator) -> Self {
        self.sort = Some(comparator);
        self
    }

    /// Upper bound on processed frontier entries.
    #[must_use]
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = limit;
        self
    }

    /// Walk strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Visitation order.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Neighbor scheduling order.
    pub fn item_order(&self) -> ItemOrder {
        self.item_order
    }

    /// Uniqueness scopes.
    pub fn uniqueness(&self) -> UniquenessConfig {
        self.uniqueness
    }

    /// Inclusive lower depth bound.
    pub fn min_depth(&self) -> Option<usize> {
        self.min_depth
    }

    /// Inclusive upper depth bound.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Whether paths are recorded by the tracking visitor.
    pub fn track_paths(&self) -> bool {
        self.track_paths
    }

    /// User filters, in evaluation order.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// The expander.
    pub fn expander(&self) -> &Arc<dyn Expander> {
        &self.expander
    }

    /// Labels for label-restricted expanders.
    pub fn labels(&self) -> Option<&BTreeSet<String>> {
        self.labels.as_ref()
    }

    /// Edge examples restricting expansion.
    pub fn follow_edges(&self) -> Option<&[Attributes]> {
        self.follow_edges.as_deref()
    }

    /// Edge collections expansion is restricted to.
    pub fn edge_collections(&self) -> Option<&BTreeSet<String>> {
        self.edge_collections.as_ref()
    }

    /// Expansion comparator.
    pub fn sort(&self) -> Option<&EdgeComparator> {
        self.sort.as_ref()
    }

    /// Iteration budget.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns `true` if `label` is one of the configured labels.
    pub fn accepts_label(&self, label: Option<&str>) -> bool {
        match (&self.labels, label) {
            (Some(labels), Some(label)) => labels.contains(label),
            _ => false,
        }
    }

    /// Returns `true` if `edge` lies in an allowed edge collection and passes the
    /// configured edge examples.
    pub fn follows(&self, edge: &Edge) -> bool {
        let collection = edge.collection().unwrap_or(edge.id());
        self.edge_collections
            .as_ref()
            .map_or(true, |allowed| allowed.contains(collection))
            && self
                .follow_edges
                .as_deref()
                .map_or(true, |examples| edge.matches_any(examples))
    }

    /// Rejects settings that contradict each other.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let (Some(min), Some(max)) = (self.min_depth, self.max_depth) {
            if min > max {
                return Err(ConfigurationError::MinDepthExceedsMaxDepth { min, max });
            }
        }
        if self.expander.requires_labels() && self.labels.as_ref().map_or(true, BTreeSet::is_empty) {
            return Err(ConfigurationError::MissingLabels);
        }
        if self.follow_edges.as_ref().is_some_and(Vec::is_empty) {
            return Err(ConfigurationError::EmptyFollowEdges);
        }
        Ok(())
    }
}

impl fmt::Debug for TraversalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalConfig")
            .field("strategy", &self.strategy)
            .field("order", &self.order)
            .field("item_order", &self.item_order)
            .field("uniqueness", &self.uniqueness)
            .field("min_depth", &self.min_depth)
            .field("max_depth", &self.max_depth)
            .field("track_paths", &self.track_paths)
            .field("filters", &self.filters.len())
            .field("labels", &self.labels)
            .field("follow_edges", &self.follow_edges)
            .field("edge_collections", &self.edge_collections)
            .field("sort", &self.sort.is_some())
            .field("max_iterations", &self.max_iterations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_values_are_normalized() {
        assert_eq!("depth-first".parse::<Strategy>().unwrap(), Strategy::DepthFirst);
        assert_eq!("BreadthFirst".parse::<Strategy>().unwrap(), Strategy::BreadthFirst);
        assert_eq!("post-order".parse::<Order>().unwrap(), Order::PostOrder);
        assert_eq!("Backward".parse::<ItemOrder>().unwrap(), ItemOrder::Backward);
        assert_eq!("GLOBAL".parse::<Uniqueness>().unwrap(), Uniqueness::Global);

        let err = "sideways".parse::<Strategy>().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidOption {
                option: "strategy",
                value: "sideways".to_owned()
            }
        );
    }

    #[test]
    fn only_the_first_dash_is_dropped() {
        assert!("depth--first".parse::<Strategy>().is_err());
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let config = TraversalConfig::default();
        assert_eq!(config.strategy(), Strategy::DepthFirst);
        assert_eq!(config.order(), Order::PreOrder);
        assert_eq!(config.item_order(), ItemOrder::Forward);
        assert_eq!(
            config.uniqueness(),
            UniquenessConfig::new(Uniqueness::None, Uniqueness::Path)
        );
        assert!(config.track_paths());
        assert_eq!(config.max_iterations(), DEFAULT_MAX_ITERATIONS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn contradictory_depths_are_rejected() {
        let config = TraversalConfig::default().with_min_depth(3).with_max_depth(2);
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::MinDepthExceedsMaxDepth { min: 3, max: 2 })
        );
        assert!(TraversalConfig::default()
            .with_min_depth(2)
            .with_max_depth(2)
            .validate()
            .is_ok());
    }

    #[test]
    fn label_expanders_need_labels() {
        let config = TraversalConfig::new(EdgeExpander::with_labels(Direction::Any));
        assert_eq!(config.validate(), Err(ConfigurationError::MissingLabels));

        let empty = config.clone().with_labels(Vec::<String>::new());
        assert_eq!(empty.validate(), Err(ConfigurationError::MissingLabels));

        assert!(config.with_labels(["likes"]).validate().is_ok());
    }

    #[test]
    fn empty_edge_examples_are_rejected() {
        let config = TraversalConfig::default().with_follow_edges(Vec::new());
        assert_eq!(config.validate(), Err(ConfigurationError::EmptyFollowEdges));
    }

    #[test]
    fn follows_checks_edge_examples() {
        let example = json!({ "label": "likes" }).as_object().cloned().unwrap();
        let config = TraversalConfig::default().with_follow_edges(vec![example]);
        assert!(config.follows(&Edge::new("e/1", "a", "b").labeled("likes")));
        assert!(!config.follows(&Edge::new("e/2", "a", "b").labeled("hates")));
        assert!(TraversalConfig::default().follows(&Edge::new("e/3", "a", "b")));
    }

    #[test]
    fn sort_by_key_ignores_the_collection() {
        let cmp = sort_by_key();
        let a = Edge::new("z/AB", "a", "b");
        let b = Edge::new("a/AD", "a", "d");
        assert_eq!(cmp(&a, &b), Ordering::Less);
    }

    #[test]
    fn follows_checks_edge_collections() {
        let config = TraversalConfig::default().with_edge_collections(["knows"]);
        assert!(config.follows(&Edge::new("knows/1", "a", "b")));
        assert!(!config.follows(&Edge::new("likes/1", "a", "b")));
        assert_eq!(config.edge_collections().map(BTreeSet::len), Some(1));

        let example = json!({ "label": "old" }).as_object().cloned().unwrap();
        let both = config.with_follow_edges(vec![example]);
        assert!(both.follows(&Edge::new("knows/2", "a", "b").labeled("old")));
        assert!(!both.follows(&Edge::new("knows/3", "a", "b").labeled("new")));
        assert!(!both.follows(&Edge::new("likes/2", "a", "b").labeled("old")));
    }
}
