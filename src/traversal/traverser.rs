//! The traversal engine.
//!
//! Both strategies share one step: admit the candidate under the uniqueness rules,
//! extend the path, run the filter pipeline, maybe visit, maybe expand. They differ only
//! in the frontier.
//!
//! - Depth-first keeps an explicit stack of `Enter`/`Leave` frames. A `Leave` frame is
//!   pushed below a vertex's children so the path is unwound (and post-order visits
//!   happen) once the whole subtree is done.
//! - Breadth-first keeps a FIFO queue of candidates. Admitted candidates move into a tree
//!   arena where each entry remembers its parent's index, which is enough to rebuild its
//!   path. Rejected candidates are dropped on the spot.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Result, TraversalError};
use crate::graph::{Datasource, EdgeRef, Path, VertexRef};
use crate::trace::{debug_event, warn_event};

use super::config::{ItemOrder, Order, Strategy, TraversalConfig};
use super::expander::Connection;
use super::filter::FilterPipeline;
use super::uniqueness::UniquenessTracker;
use super::visitor::{TrackingVisitor, VisitResult, Visitor};

/// Counters describing a finished traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Frontier entries taken off the stack or queue.
    pub iterations: usize,
    /// Vertices handed to the visitor.
    pub visited: usize,
    /// Candidates turned away by the uniqueness rules.
    pub rejected: usize,
    /// Breadth-first entries kept to rebuild paths; zero for depth-first walks.
    pub retained: usize,
    /// Whether the seed vertex existed.
    pub seed_resolved: bool,
}

/// Runs traversals of one configuration over one datasource.
///
/// The configuration is validated once, on construction; every traversal afterwards uses
/// fresh uniqueness state, so a `Traverser` can be reused for any number of seeds.
///
/// Depth-first walks only hold the current path plus pending siblings. Breadth-first
/// walks keep every admitted entry until the run ends, since paths are rebuilt from
/// parent links; under `Uniqueness::None` that can approach `max_iterations` entries.
#[derive(Debug, Clone)]
pub struct Traverser<D> {
    config: TraversalConfig,
    datasource: D,
}

impl<D: Datasource> Traverser<D> {
    /// Validates `config` and binds it to `datasource`.
    pub fn new(config: TraversalConfig, datasource: D) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, datasource })
    }

    /// The configuration.
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// The datasource.
    pub fn datasource(&self) -> &D {
        &self.datasource
    }

    /// Traverses from `seed` and records everything with a [`TrackingVisitor`].
    pub fn traverse(&self, seed: &str) -> Result<VisitResult> {
        let mut visitor = TrackingVisitor::new();
        self.traverse_with(seed, &mut visitor)?;
        Ok(visitor.into_result())
    }

    /// Traverses from the vertex with id `seed`, feeding `visitor`.
    ///
    /// A seed the datasource cannot resolve yields an empty traversal, not an error.
    pub fn traverse_with<V>(&self, seed: &str, visitor: &mut V) -> Result<TraversalStats>
    where
        V: Visitor + ?Sized,
    {
        match self.datasource.vertex(seed)? {
            Some(vertex) => self.traverse_vertex(vertex, visitor),
            None => {
                warn_event!(seed, "seed vertex not found, nothing to traverse");
                Ok(TraversalStats::default())
            }
        }
    }

    /// Traverses from an already resolved seed vertex.
    pub fn traverse_vertex<V>(&self, seed: VertexRef, visitor: &mut V) -> Result<TraversalStats>
    where
        V: Visitor + ?Sized,
    {
        debug_event!(
            seed = seed.id(),
            strategy = %self.config.strategy(),
            order = %self.config.order(),
            item_order = %self.config.item_order(),
            "traversal started"
        );

        let mut run = Run::new(&self.config, &self.datasource);
        match self.config.strategy() {
            Strategy::DepthFirst => run.depth_first(seed, visitor)?,
            Strategy::BreadthFirst => run.breadth_first(seed, visitor)?,
        }
        run.stats.seed_resolved = true;

        debug_event!(
            iterations = run.stats.iterations,
            visited = run.stats.visited,
            rejected = run.stats.rejected,
            "traversal finished"
        );
        Ok(run.stats)
    }
}

#[cfg(feature = "parallel")]
impl<D: Datasource + Sync> Traverser<D> {
    /// Runs one independent [`traverse`](Self::traverse) per seed on the rayon pool.
    ///
    /// Results are returned in seed order.
    pub fn traverse_many<S>(&self, seeds: &[S]) -> Vec<Result<VisitResult>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        seeds.par_iter().map(|seed| self.traverse(seed.as_ref())).collect()
    }
}

enum Frame {
    Enter {
        edge: Option<EdgeRef>,
        vertex: VertexRef,
    },
    Leave {
        visit: bool,
    },
}

/// A breadth-first candidate waiting for admission.
struct Pending {
    edge: Option<EdgeRef>,
    vertex: VertexRef,
    parent: Option<usize>,
}

/// An admitted breadth-first entry; `parent` indexes the same tree.
struct Discovery {
    edge: Option<EdgeRef>,
    vertex: VertexRef,
    parent: Option<usize>,
    visit: bool,
}

/// State of a single traversal.
struct Run<'a> {
    config: &'a TraversalConfig,
    datasource: &'a dyn Datasource,
    uniqueness: UniquenessTracker,
    stats: TraversalStats,
}

impl<'a> Run<'a> {
    fn new(config: &'a TraversalConfig, datasource: &'a dyn Datasource) -> Self {
        Self {
            config,
            datasource,
            uniqueness: UniquenessTracker::new(config.uniqueness()),
            stats: TraversalStats::default(),
        }
    }

    fn tick(&mut self) -> Result<()> {
        self.stats.iterations += 1;
        if self.stats.iterations > self.config.max_iterations() {
            return Err(TraversalError::TooManyIterations {
                limit: self.config.max_iterations(),
            });
        }
        Ok(())
    }

    fn admit(&mut self, prefix: &Path, edge: Option<&EdgeRef>, vertex: &VertexRef) -> bool {
        let admitted = self.uniqueness.admit(prefix, edge, vertex);
        if !admitted {
            self.stats.rejected += 1;
        }
        admitted
    }

    fn expand(&self, vertex: &VertexRef, path: &Path) -> Result<Vec<Connection>> {
        self.config
            .expander()
            .expand(self.config, self.datasource, vertex, path)
            .map_err(|err| {
                debug_event!(vertex = vertex.id(), error = %err, "datasource failure aborted the traversal");
                err.into()
            })
    }

    fn visit<V: Visitor + ?Sized>(&mut self, visitor: &mut V, vertex: &VertexRef, path: &Path) {
        self.stats.visited += 1;
        visitor.visit(self.config, vertex, path);
    }

    fn depth_first<V: Visitor + ?Sized>(&mut self, seed: VertexRef, visitor: &mut V) -> Result<()> {
        let pre_order = self.config.order() == Order::PreOrder;
        let mut path = Path::new();
        let mut stack = vec![Frame::Enter {
            edge: None,
            vertex: seed,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter { edge, vertex } => {
                    self.tick()?;
                    if !self.admit(&path, edge.as_ref(), &vertex) {
                        continue;
                    }
                    path.push(edge, Arc::clone(&vertex));

                    let directive = FilterPipeline::new(self.config).evaluate(&vertex, &path);
                    if pre_order && directive.visits() {
                        self.visit(visitor, &vertex, &path);
                    }
                    stack.push(Frame::Leave {
                        visit: !pre_order && directive.visits(),
                    });

                    if directive.expands() {
                        let mut connections = self.expand(&vertex, &path)?;
                        // the stack pops in reverse, so forward order pushes reversed
                        if self.config.item_order() == ItemOrder::Forward {
                            connections.reverse();
                        }
                        stack.extend(connections.into_iter().map(|c| Frame::Enter {
                            edge: Some(c.edge),
                            vertex: c.vertex,
                        }));
                    }
                }
                Frame::Leave { visit } => {
                    if visit {
                        if let Some(vertex) = path.last().cloned() {
                            self.visit(visitor, &vertex, &path);
                        }
                    }
                    path.pop();
                }
            }
        }
        Ok(())
    }

    fn breadth_first<V: Visitor + ?Sized>(&mut self, seed: VertexRef, visitor: &mut V) -> Result<()> {
        let pre_order = self.config.order() == Order::PreOrder;
        // post-order replays the tree back to front, which flips sibling order again
        let reverse = match self.config.item_order() {
            ItemOrder::Forward => !pre_order,
            ItemOrder::Backward => pre_order,
        };

        let mut queue = VecDeque::from([Pending {
            edge: None,
            vertex: seed,
            parent: None,
        }]);
        let mut tree: Vec<Discovery> = Vec::new();

        while let Some(Pending { edge, vertex, parent }) = queue.pop_front() {
            self.tick()?;
            let prefix = path_to(&tree, parent);
            if !self.admit(&prefix, edge.as_ref(), &vertex) {
                continue;
            }
            let mut path = prefix;
            path.push(edge.clone(), Arc::clone(&vertex));

            let directive = FilterPipeline::new(self.config).evaluate(&vertex, &path);
            if pre_order && directive.visits() {
                self.visit(visitor, &vertex, &path);
            }

            let index = tree.len();
            tree.push(Discovery {
                edge,
                vertex: Arc::clone(&vertex),
                parent,
                visit: !pre_order && directive.visits(),
            });

            if directive.expands() {
                let mut connections = self.expand(&vertex, &path)?;
                if reverse {
                    connections.reverse();
                }
                queue.extend(connections.into_iter().map(|c| Pending {
                    edge: Some(c.edge),
                    vertex: c.vertex,
                    parent: Some(index),
                }));
            }
        }

        self.stats.retained = tree.len();
        if !pre_order {
            for index in (0..tree.len()).rev() {
                if tree[index].visit {
                    let path = path_to(&tree, Some(index));
                    let vertex = Arc::clone(&tree[index].vertex);
                    self.visit(visitor, &vertex, &path);
                }
            }
        }
        Ok(())
    }
}

/// Rebuilds the path ending at `index` by following parent links.
fn path_to(tree: &[Discovery], mut index: Option<usize>) -> Path {
    let mut chain = Vec::new();
    while let Some(i) = index {
        chain.push(i);
        index = tree[i].parent;
    }
    let mut path = Path::new();
    for i in chain.into_iter().rev() {
        path.push(tree[i].edge.clone(), Arc::clone(&tree[i].vertex));
    }
    path
}
