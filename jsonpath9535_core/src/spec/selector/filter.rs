//! The filter selector, `?<expr>`, and the logical/comparison expression tree it contains
use serde_json::Value;

use crate::eval::EvalContext;

use crate::spec::{
    functions::{FunctionExpr, JsonPathTypeKind},
    query::{Query, QueryKind, Queryable},
};

/// A filter selector, `?<expr>`, keeping only the nodes for which `expr` is truthy
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Filter(pub LogicalOrExpr);

/// Evaluates a filter-expression node against a candidate value, without reference to
/// any particular result location
pub trait TestFilter {
    /// Whether `current` satisfies this expression, relative to `root`
    fn test(&self, current: &Value, root: &Value, ctx: &mut EvalContext<'_>) -> bool;
}

impl Filter {
    /// Keep `candidate` (an array element or object member) iff this filter is truthy
    pub fn test<'b>(&self, candidate: &'b Value, root: &'b Value, ctx: &mut EvalContext<'_>) -> bool {
        self.0.test(candidate, root, ctx)
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// `||`-separated disjunction of [`LogicalAndExpr`]s
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LogicalOrExpr(pub Vec<LogicalAndExpr>);

impl TestFilter for LogicalOrExpr {
    fn test(&self, current: &Value, root: &Value, ctx: &mut EvalContext<'_>) -> bool {
        self.0.iter().any(|e| e.test(current, root, ctx))
    }
}

impl std::fmt::Display for LogicalOrExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", strs.join(" || "))
    }
}

/// `&&`-separated conjunction of [`BasicExpr`]s
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LogicalAndExpr(pub Vec<BasicExpr>);

impl TestFilter for LogicalAndExpr {
    fn test(&self, current: &Value, root: &Value, ctx: &mut EvalContext<'_>) -> bool {
        self.0.iter().all(|e| e.test(current, root, ctx))
    }
}

impl std::fmt::Display for LogicalAndExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", strs.join(" && "))
    }
}

/// The smallest unit of a filter expression: a comparison, an existence test, a function
/// call used in boolean position, a parenthesized sub-expression, or a negation of one
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BasicExpr {
    /// `<comparable> <op> <comparable>`
    Comparison(ComparisonExpr),
    /// `<query>`, truthy iff the query produces at least one node
    Exist(ExistExpr),
    /// `!<expr>`
    NotExist(ExistExpr),
    /// `(<expr>)`
    Paren(Box<LogicalOrExpr>),
    /// `!(<expr>)`
    NotParen(Box<LogicalOrExpr>),
    /// A function call with a `LogicalType` return, used directly in boolean position
    FunctionExpr(FunctionExpr),
    /// `!<func>(...)`, a negated function call
    NotFunctionExpr(FunctionExpr),
}

impl TestFilter for BasicExpr {
    fn test(&self, current: &Value, root: &Value, ctx: &mut EvalContext<'_>) -> bool {
        match self {
            BasicExpr::Comparison(c) => c.test(current, root, ctx),
            BasicExpr::Exist(e) => e.test(current, root, ctx),
            BasicExpr::NotExist(e) => !e.test(current, root, ctx),
            BasicExpr::Paren(e) => e.test(current, root, ctx),
            BasicExpr::NotParen(e) => !e.test(current, root, ctx),
            BasicExpr::FunctionExpr(f) => f
                .evaluate(current, root, ctx)
                .as_logical()
                .unwrap_or(false),
            BasicExpr::NotFunctionExpr(f) => !f
                .evaluate(current, root, ctx)
                .as_logical()
                .unwrap_or(false),
        }
    }
}

impl std::fmt::Display for BasicExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasicExpr::Comparison(c) => write!(f, "{c}"),
            BasicExpr::Exist(e) => write!(f, "{e}"),
            BasicExpr::NotExist(e) => write!(f, "!{e}"),
            BasicExpr::Paren(e) => write!(f, "({e})"),
            BasicExpr::NotParen(e) => write!(f, "!({e})"),
            BasicExpr::FunctionExpr(fe) => write!(f, "{fe}"),
            BasicExpr::NotFunctionExpr(fe) => write!(f, "!{fe}"),
        }
    }
}

/// An existence test, `<query>`: truthy iff the embedded query produces any nodes
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExistExpr(pub Query);

impl TestFilter for ExistExpr {
    fn test(&self, current: &Value, root: &Value, ctx: &mut EvalContext<'_>) -> bool {
        !self.0.query(current, root, ctx).is_empty()
    }
}

impl std::fmt::Display for ExistExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comparison between two [`Comparable`]s, per RFC 9535 §2.3.5.2.2
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ComparisonExpr {
    /// The left-hand side
    pub lhs: Comparable,
    /// The comparison operator
    pub op: ComparisonOp,
    /// The right-hand side
    pub rhs: Comparable,
}

/// A comparison operator
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ComparisonOp {
    /// `==`
    EqualTo,
    /// `!=`
    NotEqualTo,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
}

impl std::fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ComparisonOp::EqualTo => "==",
            ComparisonOp::NotEqualTo => "!=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessThanEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterThanEqual => ">=",
        };
        write!(f, "{s}")
    }
}

impl TestFilter for ComparisonExpr {
    fn test(&self, current: &Value, root: &Value, ctx: &mut EvalContext<'_>) -> bool {
        let lhs = self.lhs.resolve(current, root, ctx);
        let rhs = self.rhs.resolve(current, root, ctx);
        let mut eq_ctx = ctx.for_equality();
        match self.op {
            ComparisonOp::EqualTo => value_equal_to(lhs.as_ref(), rhs.as_ref(), &mut eq_ctx),
            ComparisonOp::NotEqualTo => !value_equal_to(lhs.as_ref(), rhs.as_ref(), &mut eq_ctx),
            ComparisonOp::LessThan => value_less_than(lhs.as_ref(), rhs.as_ref()),
            ComparisonOp::GreaterThan => value_less_than(rhs.as_ref(), lhs.as_ref()),
            ComparisonOp::LessThanEqual => {
                value_less_than(lhs.as_ref(), rhs.as_ref()) || value_equal_to(lhs.as_ref(), rhs.as_ref(), &mut eq_ctx)
            }
            ComparisonOp::GreaterThanEqual => {
                value_less_than(rhs.as_ref(), lhs.as_ref()) || value_equal_to(lhs.as_ref(), rhs.as_ref(), &mut eq_ctx)
            }
        }
    }
}

impl std::fmt::Display for ComparisonExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// An operand of a [`ComparisonExpr`]: a literal, a singular query, or a function call
/// returning `ValueType`
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Comparable {
    /// A literal value
    Literal(Literal),
    /// A singular query, evaluated relative to `$` or `@`
    SingularQuery(SingularQuery),
    /// A function call whose declared return type is `ValueType`
    FunctionExpr(FunctionExpr),
}

impl Comparable {
    fn resolve(&self, current: &Value, root: &Value, ctx: &mut EvalContext<'_>) -> Option<Value> {
        match self {
            Comparable::Literal(l) => Some(l.0.clone()),
            Comparable::SingularQuery(q) => q.query(current, root, ctx).cloned(),
            Comparable::FunctionExpr(f) => f.evaluate(current, root, ctx).as_value().cloned(),
        }
    }
}

impl std::fmt::Display for Comparable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparable::Literal(l) => write!(f, "{l}"),
            Comparable::SingularQuery(q) => write!(f, "{q}"),
            Comparable::FunctionExpr(fe) => write!(f, "{fe}"),
        }
    }
}

/// A literal value appearing in a filter expression
#[derive(Debug, Clone)]
pub struct Literal(pub Value);

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Literal {}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A query guaranteed by construction to produce at most one node, used directly as a
/// [`Comparable`] operand
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SingularQuery {
    /// Whether the query is rooted at `$` or `@`
    pub kind: QueryKind,
    /// The chain of name/index steps making up the query
    pub segments: Vec<SingularQuerySegment>,
}

impl SingularQuery {
    /// Resolve this query against `current`/`root`, returning the single matched value
    /// if any
    pub fn query<'b>(&self, current: &'b Value, root: &'b Value, _ctx: &mut EvalContext<'_>) -> Option<&'b Value> {
        let mut node = match self.kind {
            QueryKind::Root => root,
            QueryKind::Current => current,
        };
        for seg in &self.segments {
            node = match seg {
                SingularQuerySegment::Name(name) => node.as_object()?.get(name)?,
                SingularQuerySegment::Index(i) => index_into(node, *i)?,
            };
        }
        Some(node)
    }
}

fn index_into(value: &Value, index: i64) -> Option<&Value> {
    let arr = value.as_array()?;
    let len = arr.len() as i64;
    let resolved = if index >= 0 { index } else { len + index };
    if resolved < 0 || resolved >= len {
        None
    } else {
        arr.get(resolved as usize)
    }
}

impl std::fmt::Display for SingularQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            QueryKind::Root => write!(f, "$")?,
            QueryKind::Current => write!(f, "@")?,
        }
        for seg in &self.segments {
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

/// One step of a [`SingularQuery`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SingularQuerySegment {
    /// `['name']` or `.name`
    Name(String),
    /// `[i]`
    Index(i64),
}

impl std::fmt::Display for SingularQuerySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingularQuerySegment::Name(n) => write!(f, "['{n}']"),
            SingularQuerySegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Structural equality per RFC 9535 §2.3.5.2.2, treating `Nothing` (`None`) specially:
/// two `Nothing`s are equal, and `Nothing` equals nothing else
fn value_equal_to(a: Option<&Value>, b: Option<&Value>, ctx: &mut EvalContext<'_>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => deep_equal(a, b, ctx),
        _ => false,
    }
}

fn deep_equal(a: &Value, b: &Value, ctx: &mut EvalContext<'_>) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => number_equal_to(a, b),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            if !ctx.enter(a, "") {
                return false;
            }
            let equal = match (a, b) {
                (Value::Array(a), Value::Array(b)) => {
                    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| deep_equal(x, y, ctx))
                }
                (Value::Object(a), Value::Object(b)) => {
                    a.len() == b.len()
                        && a.iter()
                            .all(|(k, v)| b.get(k).map(|bv| deep_equal(v, bv, ctx)).unwrap_or(false))
                }
                _ => unreachable!(),
            };
            ctx.exit(a);
            equal
        }
        _ => a == b,
    }
}

fn number_equal_to(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a == b;
    }
    a.as_f64() == b.as_f64()
}

/// Ordering per RFC 9535 §2.3.5.2.2: only same-typed numbers and strings are ordered;
/// everything else (including any comparison touching `Nothing`) is `false`
fn value_less_than(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
        (Some(Value::String(a)), Some(Value::String(b))) => a < b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::NoopSink;
    use serde_json::json;

    #[test]
    fn numbers_of_different_representation_compare_equal() {
        let mut sink = NoopSink;
        let mut ctx = EvalContext::new(&mut sink);
        assert!(value_equal_to(Some(&json!(1)), Some(&json!(1.0)), &mut ctx));
    }

    #[test]
    fn nothing_equals_nothing_but_not_null() {
        let mut sink = NoopSink;
        let mut ctx = EvalContext::new(&mut sink);
        assert!(value_equal_to(None, None, &mut ctx));
        assert!(!value_equal_to(None, Some(&Value::Null), &mut ctx));
    }

    #[test]
    fn strings_compare_lexicographically() {
        assert!(value_less_than(
            Some(&json!("a")),
            Some(&json!("b"))
        ));
    }

    #[test]
    fn mixed_types_never_order() {
        assert!(!value_less_than(Some(&json!(1)), Some(&json!("1"))));
    }
}
