//! Vertices, edges and example matching.
//!
//! Identifiers follow the `collection/key` convention: the part before the first `/`
//! names the collection a document lives in, the part after it is the key. Identifiers
//! without a `/` have no collection and use the whole id as their key.
//!
//! Equality and hashing of [`Vertex`] and [`Edge`] are by identifier only.

use core::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute bag attached to vertices and edges.
pub type Attributes = serde_json::Map<String, Value>;

/// Shared handle to a vertex. Paths and results hold these instead of copies.
pub type VertexRef = Arc<Vertex>;

/// Shared handle to an edge.
pub type EdgeRef = Arc<Edge>;

/// Splits `collection/key`, returning `(Some(collection), key)` or `(None, id)`.
fn split_id(id: &str) -> (Option<&str>, &str) {
    match id.split_once('/') {
        Some((collection, key)) => (Some(collection), key),
        None => (None, id),
    }
}

/// A graph vertex: an opaque identifier plus attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    id: String,
    #[serde(default)]
    attributes: Attributes,
}

impl Vertex {
    /// Creates a vertex without attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
        }
    }

    /// Creates a vertex with the given attributes.
    pub fn with_attributes(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Adds or replaces a single attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the vertex identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the collection part of the identifier, if any.
    pub fn collection(&self) -> Option<&str> {
        split_id(&self.id).0
    }

    /// Returns the key part of the identifier.
    pub fn key(&self) -> &str {
        split_id(&self.id).1
    }

    /// Returns the attribute bag.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The attributes together with `_id` and `_key`.
    pub fn to_document_map(&self) -> Attributes {
        let mut doc = self.attributes.clone();
        doc.insert("_id".to_owned(), Value::String(self.id.clone()));
        doc.insert("_key".to_owned(), Value::String(self.key().to_owned()));
        doc
    }

    /// Renders the vertex as a JSON document with `_id` and `_key` next to its attributes.
    pub fn to_document(&self) -> Value {
        Value::Object(self.to_document_map())
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A directed edge. Direction-agnostic expansion never rewrites `from`/`to`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    id: String,
    from: String,
    to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default)]
    attributes: Attributes,
}

impl Edge {
    /// Creates an unlabeled edge `from -> to`.
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            label: None,
            attributes: Attributes::new(),
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds or replaces a single attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the edge identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the key part of the identifier.
    pub fn key(&self) -> &str {
        split_id(&self.id).1
    }

    /// Returns the collection part of the identifier, if any.
    pub fn collection(&self) -> Option<&str> {
        split_id(&self.id).0
    }

    /// Identifier of the source vertex.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Identifier of the target vertex.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Optional edge label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the attribute bag.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the endpoint opposite to `vertex_id`, or `None` if the edge does not touch it.
    pub fn peer_of(&self, vertex_id: &str) -> Option<&str> {
        if self.from == vertex_id {
            Some(&self.to)
        } else if self.to == vertex_id {
            Some(&self.from)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Something that can be compared against attribute examples.
///
/// An example matches when every one of its entries is present on the document with an
/// equal value. Reserved `_`-prefixed names address identifier fields that are not part
/// of the attribute bag.
pub trait Document {
    /// Identifier of the document.
    fn id(&self) -> &str;

    /// Attribute bag of the document.
    fn attributes(&self) -> &Attributes;

    /// Looks up a reserved field (`_key`, `_from`, ...). `_id` is handled by [`matches`](Self::matches).
    fn reserved(&self, name: &str) -> Option<&str>;

    /// Returns `true` if every entry of `example` matches this document.
    fn matches(&self, example: &Attributes) -> bool {
        example.iter().all(|(name, expected)| {
            if name == "_id" {
                return expected.as_str() == Some(self.id());
            }
            match self.reserved(name) {
                Some(value) => expected.as_str() == Some(value),
                None => self.attributes().get(name) == Some(expected),
            }
        })
    }

    /// Returns `true` if at least one example matches.
    fn matches_any(&self, examples: &[Attributes]) -> bool {
        examples.iter().any(|example| self.matches(example))
    }
}

impl Document for Vertex {
    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn reserved(&self, name: &str) -> Option<&str> {
        match name {
            "_key" => Some(self.key()),
            _ => None,
        }
    }
}

impl Document for Edge {
    fn id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn reserved(&self, name: &str) -> Option<&str> {
        match name {
            "_key" => Some(self.key()),
            "_from" => Some(&self.from),
            "_to" => Some(&self.to),
            "label" => self.label.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn example(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn ids_split_into_collection_and_key() {
        let v = Vertex::new("people/alice");
        assert_eq!(v.collection(), Some("people"));
        assert_eq!(v.key(), "alice");

        let bare = Vertex::new("alice");
        assert_eq!(bare.collection(), None);
        assert_eq!(bare.key(), "alice");
    }

    #[test]
    fn identity_ignores_attributes() {
        let a = Vertex::new("v/1").attribute("name", "one");
        let b = Vertex::new("v/1").attribute("name", "uno");
        assert_eq!(a, b);
    }

    #[test]
    fn vertex_examples_use_subset_equality() {
        let v = Vertex::new("vertices/Diana").attribute("name", "Diana");
        assert!(v.matches(&example(json!({ "name": "Diana" }))));
        assert!(v.matches(&example(json!({ "_id": "vertices/Diana" }))));
        assert!(v.matches(&example(json!({ "_key": "Diana" }))));
        assert!(!v.matches(&example(json!({ "name": "Diana", "key": "FAIL" }))));
        assert!(v.matches(&example(json!({}))));
    }

    #[test]
    fn edge_examples_see_reserved_fields() {
        let e = Edge::new("edges/AxB", "v/A", "v/B")
            .labeled("likes")
            .attribute("weight", 3);
        assert!(e.matches(&example(json!({ "_from": "v/A", "label": "likes" }))));
        assert!(e.matches(&example(json!({ "weight": 3 }))));
        assert!(!e.matches(&example(json!({ "_to": "v/A" }))));
        assert!(e.matches_any(&[
            example(json!({ "weight": 4 })),
            example(json!({ "_key": "AxB" })),
        ]));
    }

    #[test]
    fn peer_resolves_either_endpoint() {
        let e = Edge::new("e/1", "v/A", "v/B");
        assert_eq!(e.peer_of("v/A"), Some("v/B"));
        assert_eq!(e.peer_of("v/B"), Some("v/A"));
        assert_eq!(e.peer_of("v/C"), None);
    }

    #[test]
    fn documents_carry_reserved_fields() {
        let doc = Vertex::new("v/A").attribute("name", "A").to_document();
        assert_eq!(doc, json!({ "_id": "v/A", "_key": "A", "name": "A" }));
    }
}
