//! The function-extension type system and registry, per RFC 9535 §2.4
//!
//! Function extensions are type-checked at parse time against the three-type system
//! ([`JsonPathType`]) and evaluated against [`JsonPathTypeKind`]-tagged runtime values.
//! Built-in functions are registered at startup via [`inventory`]; callers may also
//! register additional functions at runtime with [`register_function`].
use std::{
    collections::HashMap,
    sync::RwLock,
};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{eval::EvalContext, node::NodeList};

use super::selector::filter::{Filter, SingularQuery};

/// One of the three static types in the filter-expression type system (RFC 9535 §2.4.1)
///
/// A function's declared parameter and return types are always one of `NodesType`,
/// `ValueType`, or `LogicalType`; [`NodeType`](JsonPathTypeKind::NodeType) is not a
/// declarable type but the *actual* kind of an argument expression that is a singular
/// query, which RFC 9535 §2.4.2 treats as convertible to either `NodesType` (it names at
/// most one node) or `ValueType` (that node's value) — unlike a bare literal, which is
/// `ValueType` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonPathTypeKind {
    /// A (possibly empty) ordered list of nodes
    NodesType,
    /// A JSON value, or "Nothing" if absent
    ValueType,
    /// A boolean produced by a logical expression
    LogicalType,
    /// The actual kind of a singular-query argument: convertible to `NodesType` or
    /// `ValueType`, but never itself a declarable parameter or return type
    NodeType,
}

impl std::fmt::Display for JsonPathTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonPathTypeKind::NodesType => write!(f, "NodesType"),
            JsonPathTypeKind::ValueType | JsonPathTypeKind::NodeType => write!(f, "ValueType"),
            JsonPathTypeKind::LogicalType => write!(f, "LogicalType"),
        }
    }
}

/// A function argument or return value, tagged with its [`JsonPathTypeKind`]
#[derive(Debug, Clone)]
pub enum JsonPathType<'a> {
    /// A nodelist
    Nodes(NodeList<'a>),
    /// A value, or `None` for "Nothing"
    Value(Option<Value>),
    /// A logical (boolean) result
    Logical(bool),
}

impl<'a> JsonPathType<'a> {
    /// This value's type tag
    pub fn kind(&self) -> JsonPathTypeKind {
        match self {
            JsonPathType::Nodes(_) => JsonPathTypeKind::NodesType,
            JsonPathType::Value(_) => JsonPathTypeKind::ValueType,
            JsonPathType::Logical(_) => JsonPathTypeKind::LogicalType,
        }
    }

    /// Coerce to a value, per RFC 9535 §2.4.2's conversion rules: a `NodesType` converts
    /// to its first node's value (or Nothing, if empty), and a `ValueType` is unchanged
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            JsonPathType::Nodes(nl) => nl.first(),
            JsonPathType::Value(v) => v.as_ref(),
            JsonPathType::Logical(_) => None,
        }
    }

    /// Coerce to a logical result, per RFC 9535 §2.4.2: a `NodesType` is `true` iff
    /// non-empty
    pub fn as_logical(&self) -> Option<bool> {
        match self {
            JsonPathType::Nodes(nl) => Some(!nl.is_empty()),
            JsonPathType::Logical(b) => Some(*b),
            JsonPathType::Value(_) => None,
        }
    }
}

/// Whether a function's declared parameter/return `kind` can receive a value of `actual`
/// kind, per RFC 9535 §2.4.1's conversion table
///
/// Conversion is allowed only at the two boundaries RFC 9535 §2.4.2 names: a nodelist
/// converts to `LogicalType` (true iff non-empty), and a singular query's actual
/// [`NodeType`](JsonPathTypeKind::NodeType) converts to either `NodesType` (itself, as an
/// at-most-one-element list) or `ValueType` (the node's value). A bare literal
/// (`ValueType`) never converts to `LogicalType`, and a non-singular nodelist
/// (`NodesType`) never converts to `ValueType`.
pub fn converts_to(actual: JsonPathTypeKind, declared: JsonPathTypeKind) -> bool {
    use JsonPathTypeKind::*;
    match (actual, declared) {
        (a, b) if a == b => true,
        (NodesType, LogicalType) => true,
        (NodeType, NodesType) => true,
        (NodeType, ValueType) => true,
        _ => false,
    }
}

/// One resolved argument to a function call, as it appears in a filter expression
#[derive(Debug, Clone)]
pub enum FunctionExprArg {
    /// A literal value
    Literal(Value),
    /// A singular query, evaluated to `ValueType`
    SingularQuery(SingularQuery),
    /// A filter query (possibly non-singular), evaluated to `NodesType`
    FilterQuery(super::query::Query),
    /// A nested logical expression, evaluated to `LogicalType`
    LogicalExpr(Box<Filter>),
    /// A nested function call, evaluated to its own declared return type
    FunctionExpr(Box<FunctionExpr>),
}

impl FunctionExprArg {
    /// The static type this argument will produce, used for type-checking at parse time
    pub fn as_type_kind(&self) -> JsonPathTypeKind {
        match self {
            FunctionExprArg::Literal(_) => JsonPathTypeKind::ValueType,
            FunctionExprArg::SingularQuery(_) => JsonPathTypeKind::NodeType,
            FunctionExprArg::FilterQuery(_) => JsonPathTypeKind::NodesType,
            FunctionExprArg::LogicalExpr(_) => JsonPathTypeKind::LogicalType,
            FunctionExprArg::FunctionExpr(f) => f.return_type,
        }
    }

    fn evaluate<'b>(
        &self,
        current: &'b Value,
        root: &'b Value,
        ctx: &mut EvalContext<'_>,
    ) -> JsonPathType<'b> {
        match self {
            FunctionExprArg::Literal(v) => JsonPathType::Value(Some(v.clone())),
            FunctionExprArg::SingularQuery(q) => JsonPathType::Value(q.query(current, root, ctx).cloned()),
            FunctionExprArg::FilterQuery(q) => {
                use super::query::Queryable;
                JsonPathType::Nodes(NodeList(q.query(current, root, ctx)))
            }
            FunctionExprArg::LogicalExpr(f) => JsonPathType::Logical(f.test(current, root, ctx)),
            FunctionExprArg::FunctionExpr(f) => f.evaluate(current, root, ctx),
        }
    }
}

impl std::fmt::Display for FunctionExprArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionExprArg::Literal(v) => write!(f, "{v}"),
            FunctionExprArg::SingularQuery(q) => write!(f, "{q}"),
            FunctionExprArg::FilterQuery(q) => write!(f, "{q}"),
            FunctionExprArg::LogicalExpr(e) => write!(f, "{e}"),
            FunctionExprArg::FunctionExpr(fe) => write!(f, "{fe}"),
        }
    }
}

/// A parsed, type-checked function call, e.g. `length(@.foo)`
#[derive(Debug, Clone)]
pub struct FunctionExpr {
    /// The function's registered name
    pub name: String,
    /// The already-resolved arguments
    pub args: Vec<FunctionExprArg>,
    /// The function's declared return type, resolved at parse time
    pub return_type: JsonPathTypeKind,
}

impl FunctionExpr {
    /// Evaluate this call against `current`/`root`
    pub fn evaluate<'b>(&self, current: &'b Value, root: &'b Value, ctx: &mut EvalContext<'_>) -> JsonPathType<'b> {
        let args: Vec<JsonPathType<'b>> = self
            .args
            .iter()
            .map(|a| a.evaluate(current, root, ctx))
            .collect();
        match lookup(&self.name) {
            Some(func) => (func.evaluator)(args),
            None => JsonPathType::Value(None),
        }
    }
}

impl std::fmt::Display for FunctionExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, a) in self.args.iter().enumerate() {
            write!(f, "{a}{}", if i + 1 == self.args.len() { "" } else { "," })?;
        }
        write!(f, ")")
    }
}

impl PartialEq for FunctionExpr {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.return_type == other.return_type
    }
}
impl Eq for FunctionExpr {}

/// A registered function extension's static descriptor
pub struct Function {
    /// The name used to invoke this function in a query
    pub name: &'static str,
    /// The number of arguments this function accepts
    pub arity: usize,
    /// The declared kind of each parameter, used for type-checking at parse time
    pub param_kinds: &'static [JsonPathTypeKind],
    /// The declared return type
    pub return_type: JsonPathTypeKind,
    evaluator: fn(Vec<JsonPathType<'_>>) -> JsonPathType<'_>,
}

impl Function {
    /// Type-check a call to this function against its declared signature
    pub fn validate(&self, args: &[JsonPathTypeKind]) -> Result<(), FunctionValidationError> {
        if args.len() != self.arity {
            return Err(FunctionValidationError::NumberOfArgsMismatch {
                name: self.name,
                expected: self.arity,
                actual: args.len(),
            });
        }
        for (i, (actual, declared)) in args.iter().zip(self.param_kinds).enumerate() {
            if !converts_to(*actual, *declared) {
                return Err(FunctionValidationError::MismatchTypeKind {
                    name: self.name,
                    index: i,
                    expected: *declared,
                    actual: *actual,
                });
            }
        }
        Ok(())
    }
}

inventory::collect!(Function);

fn lookup(name: &str) -> Option<&'static Function> {
    if let Some(f) = inventory::iter::<Function>().find(|f| f.name == name) {
        return Some(f);
    }
    EXTRA_FUNCTIONS.read().ok()?.get(name).map(|f| {
        // SAFETY-free: leak the boxed descriptor once, so `&'static Function` remains
        // valid for the lifetime of the process, matching the inventory-registered case.
        let leaked: &'static Function = Box::leak(Box::new(Function {
            name: f.name,
            arity: f.arity,
            param_kinds: f.param_kinds,
            return_type: f.return_type,
            evaluator: f.evaluator,
        }));
        leaked
    })
}

struct StoredFunction {
    name: &'static str,
    arity: usize,
    param_kinds: &'static [JsonPathTypeKind],
    return_type: JsonPathTypeKind,
    evaluator: fn(Vec<JsonPathType<'_>>) -> JsonPathType<'_>,
}

static EXTRA_FUNCTIONS: Lazy<RwLock<HashMap<&'static str, StoredFunction>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Look up a function's declared signature by name, searching both built-ins and
/// functions registered at runtime via [`register_function`]
pub fn signature(name: &str) -> Option<(usize, &'static [JsonPathTypeKind], JsonPathTypeKind)> {
    lookup(name).map(|f| (f.arity, f.param_kinds, f.return_type))
}

/// Type-check a call to function `name` against `arg_kinds`, returning its declared
/// return type on success
///
/// Used by the parser to reject ill-typed function calls (RFC 9535 §2.4.3) before a
/// query is ever evaluated.
pub fn validate_call(name: &str, arg_kinds: &[JsonPathTypeKind]) -> Result<JsonPathTypeKind, FunctionValidationError> {
    let func = lookup(name).ok_or_else(|| FunctionValidationError::Undefined(name.to_owned()))?;
    func.validate(arg_kinds)?;
    Ok(func.return_type)
}

/// Confirm that function `name` is usable as a standalone filter test expression rather
/// than one side of a comparison
///
/// Per RFC 9535 §2.4.2 a test expression accepts either a `LogicalType` result directly,
/// or a `NodesType` result converted per the existential rule (true iff non-empty). Used
/// by the parser to reject e.g. `?value(@.a)` as a bare filter expression: `value`
/// returns `ValueType`, which only makes sense compared against something.
pub fn require_logical_return(name: &str) -> Result<(), FunctionValidationError> {
    let func = lookup(name).ok_or_else(|| FunctionValidationError::Undefined(name.to_owned()))?;
    if matches!(func.return_type, JsonPathTypeKind::LogicalType | JsonPathTypeKind::NodesType) {
        Ok(())
    } else {
        Err(FunctionValidationError::IncorrectFunctionReturnType {
            name: func.name,
            actual: func.return_type,
        })
    }
}

/// Confirm that function `name` is usable as one side of a comparison
///
/// Per RFC 9535 §2.4.2, only a `ValueType`-returning function may appear in a comparable
/// position: `NodesType` and `LogicalType` results have no defined comparison semantics.
/// Used by the parser to reject e.g. `?match(@, 'a') == true`: `match` returns
/// `LogicalType`, which cannot be compared.
pub fn require_value_return(name: &str) -> Result<(), FunctionValidationError> {
    let func = lookup(name).ok_or_else(|| FunctionValidationError::Undefined(name.to_owned()))?;
    if func.return_type == JsonPathTypeKind::ValueType {
        Ok(())
    } else {
        Err(FunctionValidationError::IncorrectFunctionReturnType {
            name: func.name,
            actual: func.return_type,
        })
    }
}

/// Register a function extension at runtime
///
/// Built-in functions (`length`, `count`, `match`, `search`, `value`) are registered
/// automatically via [`inventory`] and cannot be overridden. This is for embedding
/// applications that need additional, domain-specific function extensions.
pub fn register_function(
    name: &'static str,
    param_kinds: &'static [JsonPathTypeKind],
    return_type: JsonPathTypeKind,
    evaluator: fn(Vec<JsonPathType<'_>>) -> JsonPathType<'_>,
) {
    let mut map = EXTRA_FUNCTIONS.write().expect("function registry poisoned");
    map.insert(
        name,
        StoredFunction {
            name,
            arity: param_kinds.len(),
            param_kinds,
            return_type,
            evaluator,
        },
    );
}

/// An error produced while type-checking a function call at parse time
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FunctionValidationError {
    /// No function is registered under this name
    #[error("function `{0}` is not defined")]
    Undefined(String),
    /// The call passed the wrong number of arguments
    #[error("function `{name}` expects {expected} argument(s), but got {actual}")]
    NumberOfArgsMismatch {
        /// The function's name
        name: &'static str,
        /// The declared arity
        expected: usize,
        /// The number of arguments actually passed
        actual: usize,
    },
    /// An argument's static type does not convert to the declared parameter type
    #[error("function `{name}` argument {index} expected {expected}, found {actual}")]
    MismatchTypeKind {
        /// The function's name
        name: &'static str,
        /// The zero-based index of the mismatched argument
        index: usize,
        /// The declared parameter type
        expected: JsonPathTypeKind,
        /// The argument's actual static type
        actual: JsonPathTypeKind,
    },
    /// A function used where a `LogicalType` or comparable result was required declared
    /// a return type that cannot satisfy that context
    #[error("function `{name}` returns {actual}, which cannot be used in this position")]
    IncorrectFunctionReturnType {
        /// The function's name
        name: &'static str,
        /// The function's declared return type
        actual: JsonPathTypeKind,
    },
}

inventory::submit! {
    Function {
        name: "length",
        arity: 1,
        param_kinds: &[JsonPathTypeKind::ValueType],
        return_type: JsonPathTypeKind::ValueType,
        evaluator: length_fn,
    }
}

fn length_fn<'a>(mut args: Vec<JsonPathType<'a>>) -> JsonPathType<'a> {
    let arg = args.pop().unwrap_or(JsonPathType::Value(None));
    let len = match arg.as_value() {
        Some(Value::String(s)) => Some(s.chars().count() as u64),
        Some(Value::Array(a)) => Some(a.len() as u64),
        Some(Value::Object(o)) => Some(o.len() as u64),
        _ => None,
    };
    JsonPathType::Value(len.map(|n| Value::from(n)))
}

inventory::submit! {
    Function {
        name: "count",
        arity: 1,
        param_kinds: &[JsonPathTypeKind::NodesType],
        return_type: JsonPathTypeKind::ValueType,
        evaluator: count_fn,
    }
}

fn count_fn<'a>(mut args: Vec<JsonPathType<'a>>) -> JsonPathType<'a> {
    let arg = args.pop().unwrap_or(JsonPathType::Nodes(NodeList(Vec::new())));
    let n = match arg {
        JsonPathType::Nodes(nl) => nl.len() as u64,
        _ => 0,
    };
    JsonPathType::Value(Some(Value::from(n)))
}

inventory::submit! {
    Function {
        name: "match",
        arity: 2,
        param_kinds: &[JsonPathTypeKind::ValueType, JsonPathTypeKind::ValueType],
        return_type: JsonPathTypeKind::LogicalType,
        evaluator: match_fn,
    }
}

fn match_fn<'a>(args: Vec<JsonPathType<'a>>) -> JsonPathType<'a> {
    regex_test(args, true)
}

inventory::submit! {
    Function {
        name: "search",
        arity: 2,
        param_kinds: &[JsonPathTypeKind::ValueType, JsonPathTypeKind::ValueType],
        return_type: JsonPathTypeKind::LogicalType,
        evaluator: search_fn,
    }
}

fn search_fn<'a>(args: Vec<JsonPathType<'a>>) -> JsonPathType<'a> {
    regex_test(args, false)
}

fn regex_test<'a>(args: Vec<JsonPathType<'a>>, full_match: bool) -> JsonPathType<'a> {
    let mut it = args.into_iter();
    let (Some(subject), Some(pattern)) = (it.next(), it.next()) else {
        return JsonPathType::Logical(false);
    };
    let (Some(Value::String(subject)), Some(Value::String(pattern))) =
        (subject.as_value().cloned(), pattern.as_value().cloned())
    else {
        return JsonPathType::Logical(false);
    };
    let anchored = if full_match {
        format!("^(?:{pattern})$")
    } else {
        pattern
    };
    match Regex::new(&anchored) {
        Ok(re) => JsonPathType::Logical(re.is_match(&subject)),
        Err(_) => JsonPathType::Logical(false),
    }
}

inventory::submit! {
    Function {
        name: "value",
        arity: 1,
        param_kinds: &[JsonPathTypeKind::NodesType],
        return_type: JsonPathTypeKind::ValueType,
        evaluator: value_fn,
    }
}

fn value_fn<'a>(mut args: Vec<JsonPathType<'a>>) -> JsonPathType<'a> {
    let arg = args.pop().unwrap_or(JsonPathType::Nodes(NodeList(Vec::new())));
    match arg {
        JsonPathType::Nodes(nl) if nl.len() == 1 => JsonPathType::Value(nl.first().cloned()),
        _ => JsonPathType::Value(None),
    }
}
