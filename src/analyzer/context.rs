//! The analyzer's shared mutable state (§3 `AnalysisContext`, §9 design
//! note on the visitor pattern: rather than threading a mutable context
//! reference through a deep visitor-class hierarchy, every analyzer
//! submodule is a plain function taking `&mut AnalysisContext` and
//! dispatching on `AstNodeKind` with a `match`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::{Ast, NodeId};
use crate::lexer::Span;

use super::scope::{ScopeArena, ScopeId, Symbol};

/// The SQL-level base type of a resolved expression (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseType {
    Int,
    Text,
    Real,
    Blob,
    Boolean,
    Null,
}

/// A refinement riding alongside a [`ResolvedType`] (§4.7, GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeHint {
    IsDateTime,
    IsBoolean,
}

/// A fully resolved type for one `Typeable` node (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedType {
    pub base: BaseType,
    pub nullable: bool,
    /// `true` only for a bind variable that will expand into an `IN ?`
    /// list at bind time (§3, §4.7).
    pub is_array: bool,
    pub hint: Option<TypeHint>,
}

impl ResolvedType {
    #[must_use]
    pub const fn new(base: BaseType) -> Self {
        Self {
            base,
            nullable: false,
            is_array: false,
            hint: None,
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub const fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    #[must_use]
    pub const fn with_hint(mut self, hint: TypeHint) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// The tri-state result of attempting to resolve a node's type (§3).
/// `NeedsContext` marks a bind variable whose type depends on its parent
/// expression and hasn't been visited from that direction yet; it is never
/// the TypeResolver's final answer (§3 invariant: `types` is total over
/// `Typeable` descendants once the resolver reaches a fixed point) — a
/// variable that never receives an expectation from any parent settles on
/// `Unknown`, not `NeedsContext`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum ResolveResult {
    #[default]
    Unknown,
    NeedsContext,
    Resolved(ResolvedType),
}

impl ResolveResult {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[must_use]
    pub const fn as_resolved(&self) -> Option<&ResolvedType> {
        match self {
            Self::Resolved(t) => Some(t),
            _ => None,
        }
    }
}

/// Severity of an [`AnalysisError`] (§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
}

/// One analysis-stage diagnostic (§3, §7). Unlike lexer errors (fatal) and
/// parser errors (recovered in-band but still fatal to the statement),
/// analysis errors never abort the pipeline — every visitor in this module
/// is total: every failure path pushes an `AnalysisError` and returns,
/// rather than propagating a `Result` across a visitor boundary (§9 open
/// question resolution).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AnalysisError {
    pub message: String,
    pub severity: Severity,
    pub span: Span,
    pub affected_node: Option<NodeId>,
}

impl AnalysisError {
    #[must_use]
    pub const fn new(message: String, severity: Severity, span: Span, affected_node: Option<NodeId>) -> Self {
        Self {
            message,
            severity,
            span,
            affected_node,
        }
    }
}

/// The AST plus every piece of state the analyzer visitors accumulate
/// while walking it: resolved symbols, resolved types, and diagnostics
/// (§3). This is the sole mutable state threaded through `analyzer::*`.
#[derive(Debug)]
pub struct AnalysisContext {
    pub ast: Ast,
    pub source: String,
    pub root: NodeId,
    pub errors: Vec<AnalysisError>,
    types: HashMap<NodeId, ResolveResult>,
    resolved_references: HashMap<NodeId, Symbol>,
    scopes: ScopeArena,
    statement_scopes: HashMap<NodeId, ScopeId>,
}

impl AnalysisContext {
    #[must_use]
    pub fn new(ast: Ast, source: String, root: NodeId) -> Self {
        Self {
            ast,
            source,
            root,
            errors: Vec::new(),
            types: HashMap::new(),
            resolved_references: HashMap::new(),
            scopes: ScopeArena::new(),
            statement_scopes: HashMap::new(),
        }
    }

    pub fn push_error(&mut self, error: AnalysisError) {
        tracing::debug!(message = %error.message, severity = ?error.severity, "analysis error");
        self.errors.push(error);
    }

    #[must_use]
    pub fn has_critical_errors(&self) -> bool {
        self.errors.iter().any(|e| e.severity == Severity::Critical)
    }

    #[must_use]
    pub fn type_of(&self, node: NodeId) -> ResolveResult {
        self.types.get(&node).cloned().unwrap_or_default()
    }

    pub fn set_type(&mut self, node: NodeId, result: ResolveResult) {
        self.types.insert(node, result);
    }

    #[must_use]
    pub fn resolved_reference(&self, node: NodeId) -> Option<&Symbol> {
        self.resolved_references.get(&node)
    }

    pub fn set_resolved_reference(&mut self, node: NodeId, symbol: Symbol) {
        self.resolved_references.insert(node, symbol);
    }

    #[must_use]
    pub const fn root_scope(&self) -> ScopeId {
        self.scopes.root()
    }

    pub fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Some(parent))
    }

    #[must_use]
    pub fn scopes(&self) -> &ScopeArena {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeArena {
        &mut self.scopes
    }

    pub fn bind_statement_scope(&mut self, statement: NodeId, scope: ScopeId) {
        self.statement_scopes.insert(statement, scope);
    }

    #[must_use]
    pub fn statement_scope(&self, statement: NodeId) -> Option<ScopeId> {
        self.statement_scopes.get(&statement).copied()
    }
}
