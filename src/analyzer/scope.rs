//! Nested naming scopes and the symbols they bind (§3 `ReferenceScope`, §4.4).
//!
//! Scopes live in a flat arena on [`super::context::AnalysisContext`], keyed
//! by [`ScopeId`], for the same reason the AST does (§9 design note):
//! a scope needs to point at its parent, and an index sidesteps an owning
//! cycle. Name lookup is ASCII-case-insensitive and never mutates the
//! source text; keys are lower-cased at insertion and at lookup time.

use std::collections::HashMap;

use crate::ast::NodeId;
use crate::table::Table;

/// A stable index into the scope arena on [`super::context::AnalysisContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A name bound in a scope. Only the table-like variants (`Table`,
/// `Subquery`, `Cte`) are ever placed in a statement's `from_sources`; a
/// bare `Column` only ever appears as the *result* of resolving a
/// `Reference`, written into `AnalysisContext.resolved_references`.
#[derive(Debug, Clone)]
pub enum Symbol {
    /// A real, registered table.
    Table(Table),
    /// A single column reached through a qualified or unqualified lookup.
    /// `source_alias` is the `FROM`-source alias (or table name) it was
    /// found through, so downstream consumers can re-qualify it.
    Column {
        column: crate::table::Column,
        source_alias: Option<String>,
    },
    /// A `FROM (SELECT ...) AS alias` source, exposing its projection's
    /// column names (no type information — the projection may be an
    /// arbitrary expression with no backing table column).
    Subquery { query: NodeId, columns: Vec<String> },
    /// A `WITH name AS (...)` common table expression, registered before
    /// its own body is analyzed so a `RECURSIVE` CTE can reference itself.
    Cte { body: NodeId, columns: Vec<String> },
}

impl Symbol {
    /// Column names exposed by this symbol when used as a `FROM` source,
    /// in declaration/projection order. Used by both star-expansion
    /// (§4.5) and unqualified reference search (§4.6).
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        match self {
            Self::Table(t) => t.columns.iter().map(|c| c.name.clone()).collect(),
            Self::Subquery { columns, .. } | Self::Cte { columns, .. } => columns.clone(),
            Self::Column { .. } => Vec::new(),
        }
    }

    /// Looks up a single exposed column by name (case-insensitive),
    /// returning a [`Symbol::Column`] for a real table or a typeless
    /// placeholder column for a subquery/CTE-derived one.
    #[must_use]
    pub fn find_column(&self, name: &str, source_alias: Option<String>) -> Option<Symbol> {
        match self {
            Self::Table(t) => t.column(name).map(|c| Symbol::Column {
                column: c.clone(),
                source_alias,
            }),
            Self::Subquery { columns, .. } | Self::Cte { columns, .. } => {
                columns.iter().find(|c| c.eq_ignore_ascii_case(name)).map(|c| Symbol::Column {
                    column: crate::table::Column::new(c.clone(), crate::table::ColumnType::Text, true),
                    source_alias,
                })
            }
            Self::Column { .. } => None,
        }
    }
}

/// A naming environment bound to a statement or sub-select (§3).
#[derive(Debug, Clone, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    /// Every name reachable via a *qualified* lookup in this scope:
    /// table names, aliases, CTE names. Keyed lower-case.
    bindings: HashMap<String, Symbol>,
    /// The `FROM`-source symbols owned directly by this statement, in
    /// left-to-right order, paired with the alias/name they're reached
    /// through. Used for unqualified reference search (§4.6 rule 2) and
    /// star expansion (§4.5); deliberately *not* inherited from the
    /// parent, unlike `bindings`.
    from_sources: Vec<(String, Symbol)>,
}

impl Scope {
    #[must_use]
    pub const fn with_parent(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            bindings: HashMap::new(),
            from_sources: Vec::new(),
        }
    }

    #[must_use]
    pub const fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Binds `name` in this scope. Returns the previously bound symbol, if
    /// any, so callers can detect conflicting aliases (§4.4).
    pub fn bind(&mut self, name: &str, symbol: Symbol) -> Option<Symbol> {
        self.bindings.insert(name.to_ascii_lowercase(), symbol)
    }

    #[must_use]
    pub fn get_local(&self, name: &str) -> Option<&Symbol> {
        self.bindings.get(&name.to_ascii_lowercase())
    }

    pub fn push_from_source(&mut self, name: impl Into<String>, symbol: Symbol) {
        self.from_sources.push((name.into(), symbol));
    }

    #[must_use]
    pub fn from_sources(&self) -> &[(String, Symbol)] {
        &self.from_sources
    }
}

/// Owns every [`Scope`] produced during one analysis pass, keyed by
/// [`ScopeId`] (§9 design note: arena with stable indices, not owning
/// cycles). Shared by [`super::context::AnalysisContext`].
#[derive(Debug, Clone, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Self { scopes: Vec::new() };
        arena.scopes.push(Scope::with_parent(None));
        arena
    }

    /// The empty scope created with the arena; every statement's local
    /// scope chains up to this one (§4.4).
    #[must_use]
    pub const fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn push(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(u32::try_from(self.scopes.len()).expect("scope arena exceeds u32::MAX"));
        self.scopes.push(Scope::with_parent(parent));
        id
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    /// Walks the parent chain looking for `name`, returning the innermost
    /// binding (§8 testable property: scope lookup returns the innermost
    /// binding and is case-insensitive).
    #[must_use]
    pub fn lookup(&self, mut scope: ScopeId, name: &str) -> Option<&Symbol> {
        loop {
            if let Some(sym) = self.get(scope).get_local(name) {
                return Some(sym);
            }
            scope = self.get(scope).parent()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnType};

    #[test]
    fn lookup_returns_innermost_binding() {
        let mut arena = ScopeArena::new();
        let outer = arena.push(Some(arena.root()));
        let inner = arena.push(Some(outer));
        arena.get_mut(outer).bind(
            "t",
            Symbol::Table(Table::new("outer_t", vec![Column::new("a", ColumnType::Integer, false)])),
        );
        arena.get_mut(inner).bind(
            "t",
            Symbol::Table(Table::new("inner_t", vec![Column::new("b", ColumnType::Integer, false)])),
        );
        let found = arena.lookup(inner, "T").expect("binding present");
        assert!(matches!(found, Symbol::Table(t) if t.name == "inner_t"));
    }

    #[test]
    fn lookup_is_case_insensitive_and_walks_parent() {
        let mut arena = ScopeArena::new();
        let stmt = arena.push(Some(arena.root()));
        arena.get_mut(stmt).bind("Demo", Symbol::Table(Table::new("demo", Vec::new())));
        assert!(arena.lookup(stmt, "demo").is_some());
        assert!(arena.lookup(stmt, "DEMO").is_some());
        assert!(arena.lookup(stmt, "missing").is_none());
    }
}
