//! Visit directives produced by filters.

use core::ops::{BitOr, BitOrAssign};

/// The combined decision for a candidate vertex.
///
/// Directives only accumulate: once a filter excluded or pruned a vertex, no later filter
/// can take that back. The empty directive means "visit and expand".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VisitDirective {
    exclude: bool,
    prune: bool,
}

impl VisitDirective {
    /// Visit and expand.
    pub const INCLUDE: Self = Self {
        exclude: false,
        prune: false,
    };

    /// Do not visit, but still expand.
    pub const EXCLUDE: Self = Self {
        exclude: true,
        prune: false,
    };

    /// Visit, but do not expand.
    pub const PRUNE: Self = Self {
        exclude: false,
        prune: true,
    };

    /// Neither visit nor expand.
    pub const EXCLUDE_AND_PRUNE: Self = Self {
        exclude: true,
        prune: true,
    };

    /// Returns `true` if the vertex must not be handed to the visitor.
    pub const fn excludes(self) -> bool {
        self.exclude
    }

    /// Returns `true` if the vertex must not be expanded.
    pub const fn prunes(self) -> bool {
        self.prune
    }

    /// Returns `true` if the vertex is handed to the visitor.
    pub const fn visits(self) -> bool {
        !self.exclude
    }

    /// Returns `true` if the vertex's neighbors are scheduled.
    pub const fn expands(self) -> bool {
        !self.prune
    }

    /// Union of two directive sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            exclude: self.exclude || other.exclude,
            prune: self.prune || other.prune,
        }
    }
}

impl BitOr for VisitDirective {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for VisitDirective {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl FromIterator<VisitDirective> for VisitDirective {
    fn from_iter<I: IntoIterator<Item = VisitDirective>>(iter: I) -> Self {
        iter.into_iter().fold(Self::INCLUDE, Self::union)
    }
}
