//! Traversal options as plain data.
//!
//! [`TraversalOptions`] is what a query layer or a JSON request body hands over: every
//! field is optional and enum values are loose strings. [`TraversalOptions::into_config`]
//! turns it into a checked [`TraversalConfig`].

use core::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::graph::Attributes;

use super::config::{
    normalize_option, sort_by_key, Direction, ItemOrder, Order, Strategy, TraversalConfig, Uniqueness,
};
use super::directive::VisitDirective;
use super::expander::EdgeExpander;
use super::filter::VertexExampleFilter;

/// A single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// One value.
    One(String),
    /// Several values.
    Many(Vec<String>),
}

impl OneOrMany {
    /// The values as a list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

/// Per-kind uniqueness values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniquenessOptions {
    /// `none`, `path` or `global`.
    pub vertices: Option<String>,
    /// `none`, `path` or `global`.
    pub edges: Option<String>,
}

/// Loosely typed traversal options, deserializable from camelCase JSON.
///
/// ```
/// use trailhead::traversal::TraversalOptions;
///
/// let options: TraversalOptions = serde_json::from_str(
///     r#"{ "strategy": "breadth-first", "maxDepth": 2, "uniqueness": { "vertices": "global" } }"#,
/// )
/// .unwrap();
/// let config = options.into_config().unwrap();
/// assert_eq!(config.max_depth(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TraversalOptions {
    /// `depthfirst` or `breadthfirst`.
    pub strategy: Option<String>,
    /// `preorder` or `postorder`.
    pub order: Option<String>,
    /// `forward` or `backward`.
    pub item_order: Option<String>,
    /// Uniqueness scopes.
    pub uniqueness: Option<UniquenessOptions>,
    /// Minimum depth of visited vertices.
    pub min_depth: Option<usize>,
    /// Maximum depth of expanded vertices.
    pub max_depth: Option<usize>,
    /// Whether paths are recorded.
    pub paths: Option<bool>,
    /// `outbound`, `inbound` or `any`.
    pub direction: Option<String>,
    /// Edge labels; selects the label-restricted expander.
    pub labels: Option<Vec<String>>,
    /// Edge examples.
    pub follow_edges: Option<Vec<Attributes>>,
    /// Sort every expansion by edge key.
    pub sort: Option<bool>,
    /// Iteration budget.
    pub max_iterations: Option<usize>,
    /// Vertex examples; vertices matching none get `vertexFilterMethod`.
    pub filter_vertices: Option<Vec<Attributes>>,
    /// `prune`, `exclude` or both; defaults to both.
    pub vertex_filter_method: Option<OneOrMany>,
    /// Vertex collections whose vertices may be visited.
    pub filter_vertex_collections: Option<OneOrMany>,
    /// Edge collections that may be followed.
    pub edge_collection_restriction: Option<OneOrMany>,
}

fn parse_filter_method(method: OneOrMany) -> Result<VisitDirective, ConfigurationError> {
    method
        .into_vec()
        .into_iter()
        .map(|value| match normalize_option(&value).as_str() {
            "prune" => Ok(VisitDirective::PRUNE),
            "exclude" => Ok(VisitDirective::EXCLUDE),
            _ => Err(ConfigurationError::InvalidOption {
                option: "vertexFilterMethod",
                value,
            }),
        })
        .collect()
}

fn parse<T: FromStr<Err = ConfigurationError>>(value: Option<&str>) -> Result<Option<T>, ConfigurationError> {
    value.map(str::parse).transpose()
}

impl TraversalOptions {
    /// Builds and validates the configuration these options describe.
    pub fn into_config(self) -> Result<TraversalConfig, ConfigurationError> {
        let mut config = TraversalConfig::default();

        if let Some(strategy) = parse::<Strategy>(self.strategy.as_deref())? {
            config = config.with_strategy(strategy);
        }
        if let Some(order) = parse::<Order>(self.order.as_deref())? {
            config = config.with_order(order);
        }
        if let Some(item_order) = parse::<ItemOrder>(self.item_order.as_deref())? {
            config = config.with_item_order(item_order);
        }
        if let Some(uniqueness) = self.uniqueness {
            let defaults = config.uniqueness();
            let vertices = parse::<Uniqueness>(uniqueness.vertices.as_deref())?.unwrap_or(defaults.vertices);
            let edges = parse::<Uniqueness>(uniqueness.edges.as_deref())?.unwrap_or(defaults.edges);
            config = config.with_uniqueness(vertices, edges);
        }
        if let Some(depth) = self.min_depth {
            config = config.with_min_depth(depth);
        }
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        if let Some(paths) = self.paths {
            config = config.with_track_paths(paths);
        }

        let direction = parse::<Direction>(self.direction.as_deref())?.unwrap_or(Direction::Outbound);
        config = match self.labels {
            Some(labels) => config
                .with_expander(EdgeExpander::with_labels(direction))
                .with_labels(labels),
            None => config.with_expander(EdgeExpander::new(direction)),
        };

        if let Some(examples) = self.follow_edges {
            config = config.with_follow_edges(examples);
        }
        if self.sort == Some(true) {
            config = config.with_sort(sort_by_key());
        }
        if let Some(limit) = self.max_iterations {
            config = config.with_max_iterations(limit);
        }
        if let Some(collections) = self.edge_collection_restriction {
            config = config.with_edge_collections(collections.into_vec());
        }

        if self.filter_vertices.is_some() || self.filter_vertex_collections.is_some() {
            let mut filter = VertexExampleFilter::new();
            if let Some(examples) = self.filter_vertices {
                if examples.is_empty() {
                    return Err(ConfigurationError::EmptyFilterVertices);
                }
                filter = filter.with_examples(examples);
                if let Some(method) = self.vertex_filter_method {
                    filter = filter.with_method(parse_filter_method(method)?);
                }
            }
            if let Some(collections) = self.filter_vertex_collections {
                filter = filter.with_collections(collections.into_vec());
            }
            config = config.with_filter(filter);
        }

        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<TraversalOptions> for TraversalConfig {
    type Error = ConfigurationError;

    fn try_from(options: TraversalOptions) -> Result<Self, Self::Error> {
        options.into_config()
    }
}
