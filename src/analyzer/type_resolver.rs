//! Bidirectional type inference (§4.7): resolves every `Typeable` node's
//! [`ResolveResult`], most importantly every bind [`crate::ast::VariableExpr`].
//!
//! Two passes repeat until neither changes anything:
//!
//! - **Synthesize**: walk every `Typeable` node id in ascending order,
//!   computing its type bottom-up from its already-visited children.
//!   Ascending [`NodeId`] order is a valid topological order for free —
//!   the parser only ever pushes a node after all of its children are
//!   already in the arena — so this needs no explicit recursion.
//! - **Propagate**: walk the same nodes again; any node still unresolved
//!   asks its parent what type it expects of it (a bind variable on one
//!   side of `=` takes the other side's type, an argument to `LIKE` is
//!   forced to `Text`, a frame bound is forced to `Int`, and so on).
//!
//! A node that synthesizes a type in one round can unlock an expectation
//! for a sibling in the next (`nth_value('x', ?1) = ?2`: the call's
//! return type depends only on its literal argument, so it resolves in
//! the very first synthesize pass — which makes `?2`'s expected type
//! available the first time `=` is asked about it). Iteration is capped
//! at the arena size as a defensive bound; real statements converge in a
//! handful of rounds.

use crate::ast::{
    AstNodeKind, BinaryOp, CaseExpr, CreateIndexStatement, CreateTriggerStatement, DataType,
    FrameBound, InSource, InsertSource, InsertStatement, JoinNode, Literal, NodeId, SelectStatement,
    UnaryOp, UpdateStatement, WindowFunctionExpr, WindowSpec,
};
use crate::table::Column;

use super::context::{AnalysisContext, BaseType, ResolveResult, ResolvedType, TypeHint};
use super::scope::Symbol;

pub fn run(ctx: &mut AnalysisContext) {
    let cap = ctx.ast.len().saturating_add(2);
    for _ in 0..cap {
        let synthesized = synthesize(ctx);
        let propagated = propagate(ctx);
        if !synthesized && !propagated {
            break;
        }
    }
}

fn synthesize(ctx: &mut AnalysisContext) -> bool {
    let mut changed = false;
    for id in ctx.ast.ids().collect::<Vec<_>>() {
        if !ctx.ast.kind(id).is_typeable() {
            continue;
        }
        let before = ctx.type_of(id);
        let result = compute_synthesized(ctx, id);
        if result != before {
            ctx.set_type(id, result);
            changed = true;
        }
    }
    changed
}

fn propagate(ctx: &mut AnalysisContext) -> bool {
    let mut changed = false;
    for id in ctx.ast.ids().collect::<Vec<_>>() {
        if !ctx.ast.kind(id).is_typeable() || ctx.type_of(id).is_resolved() {
            continue;
        }
        if let Some(expected) = expected_type_for(ctx, id) {
            ctx.set_type(id, ResolveResult::Resolved(expected));
            changed = true;
        }
    }
    changed
}

fn compute_synthesized(ctx: &AnalysisContext, id: NodeId) -> ResolveResult {
    match ctx.ast.kind(id).clone() {
        AstNodeKind::Literal(l) => literal_type(&l),
        AstNodeKind::Reference(_) => reference_type(ctx, id),
        AstNodeKind::Variable(_) => ctx.type_of(id),
        AstNodeKind::BinaryOp(b) => binary_op_type(ctx, b.op, b.left, b.right),
        AstNodeKind::UnaryOp(u) => unary_op_type(ctx, u.op, u.operand),
        AstNodeKind::Between(_) | AstNodeKind::In(_) | AstNodeKind::Like(_) | AstNodeKind::Exists(_) => {
            ResolveResult::Resolved(ResolvedType::new(BaseType::Boolean))
        }
        AstNodeKind::Case(c) => case_type(ctx, &c),
        AstNodeKind::FunctionCall(f) => function_call_type(ctx, &f),
        AstNodeKind::WindowFunction(w) => ctx.type_of(w.function),
        AstNodeKind::Cast(c) => ResolveResult::Resolved(cast_target_type(&c.target)),
        AstNodeKind::Collate(c) => ctx.type_of(c.expr),
        AstNodeKind::ScalarSubquery(q) => scalar_subquery_type(ctx, q),
        AstNodeKind::ExpressionResultColumn(c) => ctx.type_of(c.expr),
        _ => ResolveResult::Unknown,
    }
}

fn literal_type(lit: &Literal) -> ResolveResult {
    let t = match lit {
        Literal::Integer(_) => ResolvedType::new(BaseType::Int),
        Literal::Float(_) => ResolvedType::new(BaseType::Real),
        Literal::String(_) => ResolvedType::new(BaseType::Text),
        Literal::Blob(_) => ResolvedType::new(BaseType::Blob),
        Literal::Boolean(_) => ResolvedType::new(BaseType::Boolean),
        Literal::Null => ResolvedType::new(BaseType::Null).nullable(),
    };
    ResolveResult::Resolved(t)
}

fn reference_type(ctx: &AnalysisContext, id: NodeId) -> ResolveResult {
    match ctx.resolved_reference(id) {
        Some(Symbol::Column { column, .. }) => ResolveResult::Resolved(column_resolved_type(column)),
        _ => ResolveResult::Unknown,
    }
}

fn column_resolved_type(column: &Column) -> ResolvedType {
    use crate::table::ColumnType;
    let base = match column.column_type {
        ColumnType::Boolean => BaseType::Boolean,
        ColumnType::Text => BaseType::Text,
        ColumnType::Integer | ColumnType::Datetime => BaseType::Int,
        ColumnType::Real => BaseType::Real,
        ColumnType::Blob => BaseType::Blob,
    };
    let mut t = ResolvedType::new(base);
    if column.nullable {
        t = t.nullable();
    }
    if matches!(column.column_type, ColumnType::Datetime) {
        t = t.with_hint(TypeHint::IsDateTime);
    }
    t
}

fn binary_op_type(ctx: &AnalysisContext, op: BinaryOp, left: NodeId, right: NodeId) -> ResolveResult {
    match op {
        BinaryOp::And
        | BinaryOp::Or
        | BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq
        | BinaryOp::Is
        | BinaryOp::IsNot => ResolveResult::Resolved(ResolvedType::new(BaseType::Boolean)),
        BinaryOp::Concat => ResolveResult::Resolved(ResolvedType::new(BaseType::Text)),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::LeftShift | BinaryOp::RightShift => {
            ResolveResult::Resolved(ResolvedType::new(BaseType::Int))
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            match (ctx.type_of(left).as_resolved(), ctx.type_of(right).as_resolved()) {
                (Some(l), Some(r)) => {
                    let base = if l.base == BaseType::Real || r.base == BaseType::Real {
                        BaseType::Real
                    } else {
                        BaseType::Int
                    };
                    let mut t = ResolvedType::new(base);
                    if l.nullable || r.nullable {
                        t = t.nullable();
                    }
                    ResolveResult::Resolved(t)
                }
                (Some(t), None) | (None, Some(t)) => ResolveResult::Resolved(t.clone()),
                (None, None) => ResolveResult::Unknown,
            }
        }
    }
}

fn unary_op_type(ctx: &AnalysisContext, op: UnaryOp, operand: NodeId) -> ResolveResult {
    match op {
        UnaryOp::Not | UnaryOp::IsNull | UnaryOp::IsNotNull => {
            ResolveResult::Resolved(ResolvedType::new(BaseType::Boolean))
        }
        UnaryOp::Neg | UnaryOp::Plus | UnaryOp::BitNot => ctx.type_of(operand),
    }
}

fn case_type(ctx: &AnalysisContext, c: &CaseExpr) -> ResolveResult {
    for (_, then) in &c.whens {
        if let Some(t) = ctx.type_of(*then).as_resolved() {
            return ResolveResult::Resolved(t.clone());
        }
    }
    if let Some(else_branch) = c.else_branch {
        if let Some(t) = ctx.type_of(else_branch).as_resolved() {
            return ResolveResult::Resolved(t.clone());
        }
    }
    ResolveResult::Unknown
}

fn cast_target_type(target: &DataType) -> ResolvedType {
    let base = match target {
        DataType::Smallint | DataType::Integer | DataType::Bigint => BaseType::Int,
        DataType::Real | DataType::Double | DataType::Decimal { .. } | DataType::Numeric { .. } => {
            BaseType::Real
        }
        DataType::Char(_) | DataType::Varchar(_) | DataType::Text | DataType::Custom(_) => BaseType::Text,
        DataType::Blob | DataType::Binary(_) | DataType::Varbinary(_) => BaseType::Blob,
        DataType::Date | DataType::Time | DataType::Timestamp | DataType::Datetime => BaseType::Int,
        DataType::Boolean => BaseType::Boolean,
    };
    let mut t = ResolvedType::new(base);
    if matches!(
        target,
        DataType::Date | DataType::Time | DataType::Timestamp | DataType::Datetime
    ) {
        t = t.with_hint(TypeHint::IsDateTime);
    }
    t
}

fn scalar_subquery_type(ctx: &AnalysisContext, query: NodeId) -> ResolveResult {
    let AstNodeKind::Select(sel) = ctx.ast.kind(query).clone() else {
        return ResolveResult::Unknown;
    };
    match sel.columns.as_slice() {
        [only] => ctx.type_of(*only),
        _ => ResolveResult::Unknown,
    }
}

/// A minimal built-in function signature: fixed argument base types (`None`
/// means "no constraint", used for generic args like `abs`/`coalesce`), an
/// optional type repeated for any trailing variadic args, and how the
/// return type is derived.
struct FunctionSignature {
    args: Vec<Option<BaseType>>,
    variadic_arg: Option<BaseType>,
    ret: FnReturn,
}

enum FnReturn {
    Fixed(BaseType),
    SameAsArg(usize),
}

fn function_signature(name: &str) -> Option<FunctionSignature> {
    match name.to_ascii_lowercase().as_str() {
        "lower" | "upper" | "trim" | "ltrim" | "rtrim" | "replace" | "substr" | "substring" => {
            Some(FunctionSignature {
                args: vec![Some(BaseType::Text)],
                variadic_arg: Some(BaseType::Text),
                ret: FnReturn::Fixed(BaseType::Text),
            })
        }
        "length" => Some(FunctionSignature {
            args: vec![Some(BaseType::Text)],
            variadic_arg: None,
            ret: FnReturn::Fixed(BaseType::Int),
        }),
        "abs" => Some(FunctionSignature {
            args: vec![None],
            variadic_arg: None,
            ret: FnReturn::SameAsArg(0),
        }),
        "coalesce" | "ifnull" => Some(FunctionSignature {
            args: Vec::new(),
            variadic_arg: None,
            ret: FnReturn::SameAsArg(0),
        }),
        "count" => Some(FunctionSignature {
            args: vec![None],
            variadic_arg: None,
            ret: FnReturn::Fixed(BaseType::Int),
        }),
        "sum" | "avg" => Some(FunctionSignature {
            args: vec![None],
            variadic_arg: None,
            ret: FnReturn::Fixed(BaseType::Real),
        }),
        "min" | "max" => Some(FunctionSignature {
            args: vec![None],
            variadic_arg: None,
            ret: FnReturn::SameAsArg(0),
        }),
        "nth_value" => Some(FunctionSignature {
            args: vec![None, Some(BaseType::Int)],
            variadic_arg: None,
            ret: FnReturn::SameAsArg(0),
        }),
        "row_number" | "rank" | "dense_rank" => Some(FunctionSignature {
            args: Vec::new(),
            variadic_arg: None,
            ret: FnReturn::Fixed(BaseType::Int),
        }),
        "date" | "datetime" | "strftime" => Some(FunctionSignature {
            args: Vec::new(),
            variadic_arg: Some(BaseType::Text),
            ret: FnReturn::Fixed(BaseType::Text),
        }),
        _ => None,
    }
}

fn function_call_type(ctx: &AnalysisContext, f: &crate::ast::FunctionCallExpr) -> ResolveResult {
    let Some(sig) = function_signature(&f.name) else {
        return ResolveResult::Unknown;
    };
    match sig.ret {
        FnReturn::Fixed(base) => ResolveResult::Resolved(ResolvedType::new(base)),
        FnReturn::SameAsArg(i) => f
            .args
            .get(i)
            .and_then(|a| ctx.type_of(*a).as_resolved().cloned())
            .map_or(ResolveResult::Unknown, ResolveResult::Resolved),
    }
}

fn frame_bound_ids(spec: &WindowSpec) -> Vec<NodeId> {
    let mut ids = Vec::new();
    if let Some(frame) = &spec.frame {
        ids.extend(single_frame_bound_id(&frame.start));
        if let Some(end) = &frame.end {
            ids.extend(single_frame_bound_id(end));
        }
    }
    ids
}

fn single_frame_bound_id(bound: &FrameBound) -> Option<NodeId> {
    match bound {
        FrameBound::Preceding(id) | FrameBound::Following(id) => Some(*id),
        FrameBound::UnboundedPreceding | FrameBound::UnboundedFollowing | FrameBound::CurrentRow => None,
    }
}

/// Ascends to `id`'s parent and asks what type that parent expects of it,
/// per the shape of the parent node and `id`'s position within it. Returns
/// `None` when the parent imposes no constraint (e.g. a `CAST` operand, or
/// a `WHERE`-clause owner other than the ones listed here).
fn expected_type_for(ctx: &AnalysisContext, id: NodeId) -> Option<ResolvedType> {
    let parent = ctx.ast.parent(id)?;
    match ctx.ast.kind(parent).clone() {
        AstNodeKind::BinaryOp(b) => expected_from_binary(ctx, b.op, b.left, b.right, id),
        AstNodeKind::UnaryOp(u) if u.operand == id => match u.op {
            UnaryOp::Not => Some(ResolvedType::new(BaseType::Boolean)),
            _ => None,
        },
        AstNodeKind::Between(b) => [b.expr, b.low, b.high]
            .into_iter()
            .filter(|&other| other != id)
            .find_map(|other| ctx.type_of(other).as_resolved().cloned()),
        AstNodeKind::In(i) => expected_from_in(ctx, &i, id),
        AstNodeKind::Like(l) if id == l.expr || id == l.pattern || Some(id) == l.escape => {
            Some(ResolvedType::new(BaseType::Text))
        }
        AstNodeKind::Case(c) => expected_from_case(ctx, &c, id),
        AstNodeKind::FunctionCall(f) => expected_from_function(&f, id),
        AstNodeKind::WindowFunction(w) => expected_from_window(&w, id),
        AstNodeKind::Select(s) => expected_from_select(&s, id),
        AstNodeKind::Update(u) => expected_from_update(ctx, &u, id),
        AstNodeKind::Insert(ins) => expected_from_insert(ctx, &ins, id),
        AstNodeKind::Delete(d) if d.where_clause == Some(id) => Some(ResolvedType::new(BaseType::Boolean)),
        AstNodeKind::Join(j) => expected_from_join(&j, id),
        AstNodeKind::CreateIndex(ci) => expected_from_create_index(&ci, id),
        AstNodeKind::CreateTrigger(ct) => expected_from_create_trigger(&ct, id),
        _ => None,
    }
}

fn expected_from_binary(
    ctx: &AnalysisContext,
    op: BinaryOp,
    left: NodeId,
    right: NodeId,
    id: NodeId,
) -> Option<ResolvedType> {
    let peer = if left == id {
        right
    } else if right == id {
        left
    } else {
        return None;
    };
    match op {
        BinaryOp::And | BinaryOp::Or => Some(ResolvedType::new(BaseType::Boolean)),
        BinaryOp::Concat => Some(ResolvedType::new(BaseType::Text)),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::LeftShift | BinaryOp::RightShift => {
            Some(ResolvedType::new(BaseType::Int))
        }
        BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq
        | BinaryOp::Is
        | BinaryOp::IsNot
        | BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod => ctx.type_of(peer).as_resolved().cloned(),
    }
}

fn expected_from_in(ctx: &AnalysisContext, i: &crate::ast::InExpr, id: NodeId) -> Option<ResolvedType> {
    match &i.source {
        InSource::List(items) if items.contains(&id) => ctx.type_of(i.expr).as_resolved().cloned(),
        InSource::Variable { var, parenthesized } if *var == id => {
            let t = ctx.type_of(i.expr).as_resolved().cloned()?;
            Some(if *parenthesized { t } else { t.array() })
        }
        _ => None,
    }
}

fn expected_from_case(ctx: &AnalysisContext, c: &CaseExpr, id: NodeId) -> Option<ResolvedType> {
    if let Some(operand) = c.operand {
        if c.whens.iter().any(|(when, _)| *when == id) {
            return ctx.type_of(operand).as_resolved().cloned();
        }
    } else if c.whens.iter().any(|(when, _)| *when == id) {
        return Some(ResolvedType::new(BaseType::Boolean));
    }

    let is_branch = c.whens.iter().any(|(_, then)| *then == id) || c.else_branch == Some(id);
    if !is_branch {
        return None;
    }
    c.whens
        .iter()
        .map(|(_, then)| *then)
        .chain(c.else_branch)
        .filter(|&branch| branch != id)
        .find_map(|branch| ctx.type_of(branch).as_resolved().cloned())
}

fn expected_from_function(f: &crate::ast::FunctionCallExpr, id: NodeId) -> Option<ResolvedType> {
    let sig = function_signature(&f.name)?;
    let pos = f.args.iter().position(|&a| a == id)?;
    sig.args
        .get(pos)
        .copied()
        .flatten()
        .or(sig.variadic_arg)
        .map(ResolvedType::new)
}

fn expected_from_window(w: &WindowFunctionExpr, id: NodeId) -> Option<ResolvedType> {
    frame_bound_ids(&w.window)
        .contains(&id)
        .then_some(ResolvedType::new(BaseType::Int))
}

fn expected_from_select(s: &SelectStatement, id: NodeId) -> Option<ResolvedType> {
    if s.where_clause == Some(id) || s.having == Some(id) {
        return Some(ResolvedType::new(BaseType::Boolean));
    }
    if s.limit == Some(id) || s.offset == Some(id) {
        return Some(ResolvedType::new(BaseType::Int));
    }
    s.windows
        .iter()
        .find_map(|w| frame_bound_ids(&w.spec).contains(&id).then_some(ResolvedType::new(BaseType::Int)))
}

fn expected_from_join(j: &JoinNode, id: NodeId) -> Option<ResolvedType> {
    (j.on == Some(id)).then_some(ResolvedType::new(BaseType::Boolean))
}

fn expected_from_create_index(ci: &CreateIndexStatement, id: NodeId) -> Option<ResolvedType> {
    (ci.where_clause == Some(id)).then_some(ResolvedType::new(BaseType::Boolean))
}

fn expected_from_create_trigger(ct: &CreateTriggerStatement, id: NodeId) -> Option<ResolvedType> {
    (ct.when_clause == Some(id)).then_some(ResolvedType::new(BaseType::Boolean))
}

fn expected_from_update(ctx: &AnalysisContext, u: &UpdateStatement, id: NodeId) -> Option<ResolvedType> {
    if u.where_clause == Some(id) {
        return Some(ResolvedType::new(BaseType::Boolean));
    }
    u.assignments
        .iter()
        .find(|a| a.value == id)
        .and_then(|a| column_type_for(ctx, &u.table, &a.column))
}

fn expected_from_insert(ctx: &AnalysisContext, ins: &InsertStatement, id: NodeId) -> Option<ResolvedType> {
    let InsertSource::Values(rows) = &ins.source else {
        return None;
    };
    for row in rows {
        let Some(pos) = row.iter().position(|&value| value == id) else {
            continue;
        };
        let column_name = if ins.columns.is_empty() {
            table_column_name_by_position(ctx, &ins.table, pos)
        } else {
            ins.columns.get(pos).cloned()
        };
        if let Some(name) = column_name {
            return column_type_for(ctx, &ins.table, &name);
        }
    }
    None
}

fn column_type_for(ctx: &AnalysisContext, table_name: &str, column_name: &str) -> Option<ResolvedType> {
    match ctx.scopes().lookup(ctx.root_scope(), table_name) {
        Some(Symbol::Table(table)) => table.column(column_name).map(column_resolved_type),
        _ => None,
    }
}

fn table_column_name_by_position(ctx: &AnalysisContext, table_name: &str, pos: usize) -> Option<String> {
    match ctx.scopes().lookup(ctx.root_scope(), table_name) {
        Some(Symbol::Table(table)) => table.columns.get(pos).map(|c| c.name.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{column_resolver, reference_finder, set_parent};
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::table::{ColumnType, Table};

    fn analyze(sql: &str, tables: Vec<Table>) -> AnalysisContext {
        let lexer = Lexer::new(sql);
        let tokens = lexer.tokenize().expect("lex");
        let mut parser = Parser::new(sql, tokens);
        let root = parser.statement();
        let (ast, _errors) = parser.into_parts();
        let mut ctx = AnalysisContext::new(ast, sql.to_string(), root);
        let root_scope = ctx.root_scope();
        for table in tables {
            ctx.scopes_mut().get_mut(root_scope).bind(&table.name.clone(), Symbol::Table(table));
        }
        set_parent::run(&mut ctx);
        reference_finder::run(&mut ctx);
        column_resolver::run(&mut ctx);
        super::super::reference_resolver::run(&mut ctx);
        run(&mut ctx);
        ctx
    }

    fn demo_tables() -> Vec<Table> {
        vec![Table::new(
            "demo",
            vec![
                Column::new("id", ColumnType::Integer, false),
                Column::new("created_at", ColumnType::Datetime, false),
            ],
        )]
    }

    fn variable_ids(ctx: &AnalysisContext) -> Vec<NodeId> {
        ctx.ast
            .ids()
            .filter(|id| ctx.ast.kind(*id).as_variable().is_some())
            .collect()
    }

    #[test]
    fn comparison_unifies_variable_with_column_type() {
        let ctx = analyze("SELECT * FROM demo WHERE id = ?1", demo_tables());
        let var = variable_ids(&ctx)[0];
        let resolved = ctx.type_of(var).as_resolved().cloned().expect("resolved");
        assert_eq!(resolved.base, BaseType::Int);
    }

    #[test]
    fn like_forces_text() {
        let ctx = analyze("SELECT * FROM demo WHERE 'x' LIKE ?1", demo_tables());
        let var = variable_ids(&ctx)[0];
        let resolved = ctx.type_of(var).as_resolved().cloned().expect("resolved");
        assert_eq!(resolved.base, BaseType::Text);
    }

    #[test]
    fn between_unifies_all_three_operands() {
        let ctx = analyze("SELECT * FROM demo WHERE id BETWEEN ?1 AND 10", demo_tables());
        let var = variable_ids(&ctx)[0];
        let resolved = ctx.type_of(var).as_resolved().cloned().expect("resolved");
        assert_eq!(resolved.base, BaseType::Int);
    }

    #[test]
    fn unparenthesized_in_variable_is_array_typed() {
        let ctx = analyze("SELECT * FROM demo WHERE id IN ?1", demo_tables());
        let var = variable_ids(&ctx)[0];
        let resolved = ctx.type_of(var).as_resolved().cloned().expect("resolved");
        assert_eq!(resolved.base, BaseType::Int);
        assert!(resolved.is_array);
    }

    #[test]
    fn parenthesized_in_variable_is_scalar() {
        let ctx = analyze("SELECT * FROM demo WHERE id IN (?1)", demo_tables());
        let var = variable_ids(&ctx)[0];
        let resolved = ctx.type_of(var).as_resolved().cloned().expect("resolved");
        assert!(!resolved.is_array);
    }

    #[test]
    fn join_on_clause_forces_boolean_operands() {
        let ctx = analyze(
            "SELECT * FROM demo AS a JOIN demo AS b ON a.created_at = ?1",
            demo_tables(),
        );
        let var = variable_ids(&ctx)[0];
        let resolved = ctx.type_of(var).as_resolved().cloned().expect("resolved");
        assert_eq!(resolved.base, BaseType::Int);
        assert_eq!(resolved.hint, Some(TypeHint::IsDateTime));
    }

    #[test]
    fn function_return_type_flows_through_equality() {
        let ctx = analyze("SELECT * FROM demo WHERE nth_value('x', ?1) = ?2", demo_tables());
        let vars = variable_ids(&ctx);
        let first = ctx.type_of(vars[0]).as_resolved().cloned().expect("?1 resolved");
        let second = ctx.type_of(vars[1]).as_resolved().cloned().expect("?2 resolved");
        assert_eq!(first.base, BaseType::Int);
        assert_eq!(second.base, BaseType::Text);
    }
}
