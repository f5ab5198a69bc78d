//! Shared graph fixtures for the integration tests.
#![allow(dead_code)]

use trailhead::{
    CollectionDatasource, CollectionSet, EdgeCollection, EdgeDefinition, GraphDatasource, MemoryDatasource,
    TraversalConfig, Traverser, VertexCollection, VisitResult,
};
use trailhead::{Datasource, Edge, Vertex};

pub const WORLD: &[&str] = &[
    "World", "Nothing", "Europe", "Asia", "America", "Australia", "Antarctica", "Africa", "Blackhole", "DE", "FR",
    "GB", "IE", "CN", "JP", "TW", "US", "MX", "AU", "EG", "ZA", "AN", "London", "Paris", "Lyon", "Cologne",
    "Dusseldorf", "Beijing", "Shanghai", "Tokyo", "Kyoto", "Taipeh", "Perth", "Sydney",
];

pub const WORLD_EDGES: &[(&str, &str)] = &[
    ("World", "Europe"),
    ("World", "Asia"),
    ("World", "America"),
    ("World", "Australia"),
    ("World", "Africa"),
    ("World", "Antarctica"),
    ("Europe", "DE"),
    ("Europe", "FR"),
    ("Europe", "GB"),
    ("Europe", "IE"),
    ("Asia", "CN"),
    ("Asia", "JP"),
    ("Asia", "TW"),
    ("America", "US"),
    ("America", "MX"),
    ("Australia", "AU"),
    ("Antarctica", "AN"),
];

pub const PEOPLE: &[&str] = &["Alice", "Bob", "Charly", "Diana", "Eric", "Frank"];

pub const PEOPLE_EDGES: &[(&str, &str, &str)] = &[
    ("Alice", "Bob", "likes"),
    ("Bob", "Alice", "likes"),
    ("Alice", "Diana", "hates"),
    ("Alice", "Eric", "hates"),
    ("Eric", "Alice", "hates"),
    ("Bob", "Charly", "likes"),
    ("Charly", "Diana", "hates"),
    ("Diana", "Charly", "hates"),
    ("Diana", "Alice", "likes"),
    ("Diana", "Eric", "likes"),
    ("Alice", "Frank", "l"),
    ("Frank", "Bob", "likes"),
];

/// `vertices/<name>`.
pub fn v(name: &str) -> String {
    format!("vertices/{name}")
}

fn memory_vertex(name: &str) -> Vertex {
    Vertex::new(v(name)).attribute("name", name)
}

fn memory_edge(from: &str, to: &str) -> Edge {
    Edge::new(format!("edges/{from}x{to}"), v(from), v(to)).attribute("what", format!("{from}->{to}"))
}

/// Continents and countries, all edges pointing away from `World`.
pub fn world() -> MemoryDatasource {
    MemoryDatasource::from_parts(
        WORLD.iter().copied().map(memory_vertex),
        WORLD_EDGES.iter().map(|(from, to)| memory_edge(from, to)),
    )
}

/// A small cyclic social graph with labelled edges.
pub fn people() -> MemoryDatasource {
    MemoryDatasource::from_parts(
        PEOPLE.iter().copied().map(memory_vertex),
        PEOPLE_EDGES
            .iter()
            .map(|(from, to, label)| memory_edge(from, to).labeled(*label)),
    )
}

pub const PLAIN_EDGES: &[(&str, &str)] = &[
    ("A", "B"),
    ("B", "C"),
    ("C", "D"),
    ("A", "D"),
    ("D", "E"),
    ("D", "F"),
    ("B", "G"),
    ("B", "I"),
    ("G", "H"),
    ("I", "H"),
];

pub const UNIT_VERTICES: &str = "UnitTestsVertices";
pub const UNIT_EDGES: &str = "UnitTestsEdges";

/// Nine vertices `A..I` in one collection, ten edges in one edge collection.
pub fn single_collection() -> CollectionDatasource<VertexCollection, EdgeCollection> {
    let mut vertices = VertexCollection::new(UNIT_VERTICES);
    for key in ["A", "B", "C", "D", "E", "F", "G", "H", "I"] {
        vertices.save(key);
    }
    let mut edges = EdgeCollection::new(UNIT_EDGES);
    for (from, to) in PLAIN_EDGES {
        edges.save(
            &format!("{UNIT_VERTICES}/{from}"),
            &format!("{UNIT_VERTICES}/{to}"),
            &format!("{from}{to}"),
        );
    }
    CollectionDatasource::new(vertices, edges)
}

pub const VN_A: &str = "UnitTestsVertices1";
pub const VN_BDH: &str = "UnitTestsVertices2";
pub const VN_CEFGI: &str = "UnitTestsVertices3";
pub const EN_DIR: &str = "UnitTestsEdges1";
pub const EN_UNDIR: &str = "UnitTestsEdges2";

/// The same topology as [`single_collection`], spread over three vertex collections and
/// two edge collections tied together by edge definitions.
pub fn general_graph() -> GraphDatasource<CollectionSet, EdgeCollection> {
    let mut a = VertexCollection::new(VN_A);
    a.save("A");
    let mut bdh = VertexCollection::new(VN_BDH);
    for key in ["B", "D", "H"] {
        bdh.save(key);
    }
    let mut cefgi = VertexCollection::new(VN_CEFGI);
    for key in ["C", "E", "F", "G", "I"] {
        cefgi.save(key);
    }

    let mut directed = EdgeCollection::new(EN_DIR);
    for (from, to) in [("A", "B"), ("A", "D")] {
        directed.save(&format!("{VN_A}/{from}"), &format!("{VN_BDH}/{to}"), &format!("{from}{to}"));
    }
    let mut undirected = EdgeCollection::new(EN_UNDIR);
    for (from, to) in [("B", "C"), ("D", "E"), ("D", "F"), ("B", "G"), ("B", "I")] {
        undirected.save(&format!("{VN_BDH}/{from}"), &format!("{VN_CEFGI}/{to}"), &format!("{from}{to}"));
    }
    for (from, to) in [("C", "D"), ("G", "H"), ("I", "H")] {
        undirected.save(&format!("{VN_CEFGI}/{from}"), &format!("{VN_BDH}/{to}"), &format!("{from}{to}"));
    }

    GraphDatasource::new(CollectionSet::new().with(a).with(bdh).with(cefgi))
        .with_relation(EdgeDefinition::relation(EN_DIR, [VN_A], [VN_BDH]), directed)
        .and_then(|graph| {
            graph.with_relation(
                EdgeDefinition::relation(EN_UNDIR, [VN_BDH, VN_CEFGI], [VN_BDH, VN_CEFGI]),
                undirected,
            )
        })
        .expect("edge definitions match their collections")
}

/// Runs a tracking traversal and panics on any error.
pub fn run<D: Datasource>(config: TraversalConfig, datasource: D, seed: &str) -> VisitResult {
    Traverser::new(config, datasource)
        .expect("valid configuration")
        .traverse(seed)
        .expect("traversal succeeds")
}

/// Visited vertex ids as owned strings.
pub fn ids(result: &VisitResult) -> Vec<String> {
    result.vertex_ids().into_iter().map(str::to_owned).collect()
}

/// Recorded paths as owned vertex-id lists.
pub fn paths(result: &VisitResult) -> Vec<Vec<String>> {
    result
        .path_ids()
        .into_iter()
        .map(|path| path.into_iter().map(str::to_owned).collect())
        .collect()
}

/// Prefixes every name with `vertices/`.
pub fn vs(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| v(name)).collect()
}

/// Turns `[["World", "Europe"], ...]` into full-id paths.
pub fn vpaths(paths: &[&[&str]]) -> Vec<Vec<String>> {
    paths.iter().map(|path| vs(path)).collect()
}
