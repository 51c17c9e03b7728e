//! A small expression tree for the interpolations the generator emits.
//!
//! Expressions render to configuration-language text through [`Display`] and
//! can also be evaluated against concrete variable values with
//! [`Expr::evaluate`]. Evaluation only covers what generated modules use:
//! `var.*`, `local.*`, `each.value`, object literals, empty lists, attribute
//! access and the `setunion`, `lookup` and `toset` functions.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Built-in functions referenced by generated modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    SetUnion,
    Lookup,
    ToSet,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::SetUnion => "setunion",
            Function::Lookup => "lookup",
            Function::ToSet => "toset",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `var.<name>`
    Var(String),
    /// `local.<name>`
    Local(String),
    /// `each.value`
    EachValue,
    /// `[]`
    EmptyList,
    /// `{ a = .., b = .. }`, members kept in insertion order.
    Object(Vec<(String, Expr)>),
    Call { function: Function, args: Vec<Expr> },
    /// `<target>.<name>`
    Attr { target: Box<Expr>, name: String },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn local(name: impl Into<String>) -> Self {
        Expr::Local(name.into())
    }

    pub fn call(function: Function, args: Vec<Expr>) -> Self {
        Expr::Call { function, args }
    }

    pub fn attr(self, name: impl Into<String>) -> Self {
        Expr::Attr {
            target: Box::new(self),
            name: name.into(),
        }
    }

    /// Wraps the expression as a string interpolation, `${...}`.
    pub fn interpolate(&self) -> String {
        format!("${{{self}}}")
    }

    /// Evaluates the expression.
    pub fn evaluate(&self, ctx: &EvalContext) -> Result<Value, EvalError> {
        match self {
            Expr::Var(name) => ctx
                .variables
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::UnknownReference(format!("var.{name}"))),
            Expr::Local(name) => ctx
                .locals
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::UnknownReference(format!("local.{name}"))),
            Expr::EachValue => ctx
                .each_value
                .clone()
                .ok_or_else(|| EvalError::UnknownReference("each.value".to_string())),
            Expr::EmptyList => Ok(Value::Array(Vec::new())),
            Expr::Object(members) => {
                let mut object = serde_json::Map::new();
                for (name, value) in members {
                    object.insert(name.clone(), value.evaluate(ctx)?);
                }
                Ok(Value::Object(object))
            }
            Expr::Attr { target, name } => match target.evaluate(ctx)? {
                Value::Object(mut object) => object
                    .remove(name)
                    .ok_or_else(|| EvalError::MissingAttribute(name.clone())),
                other => Err(EvalError::type_mismatch("object", &other)),
            },
            Expr::Call { function, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.evaluate(ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                call(*function, args)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "var.{name}"),
            Expr::Local(name) => write!(f, "local.{name}"),
            Expr::EachValue => f.write_str("each.value"),
            Expr::EmptyList => f.write_str("[]"),
            Expr::Object(members) => {
                f.write_str("{ ")?;
                for (i, (name, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name} = {value}")?;
                }
                f.write_str(" }")
            }
            Expr::Call { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expr::Attr { target, name } => write!(f, "{target}.{name}"),
        }
    }
}

/// Values visible to an expression during evaluation.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    pub variables: BTreeMap<String, Value>,
    pub locals: BTreeMap<String, Value>,
    pub each_value: Option<Value>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    pub fn with_local(mut self, name: impl Into<String>, value: Value) -> Self {
        self.locals.insert(name.into(), value);
        self
    }

    pub fn with_each_value(mut self, value: Value) -> Self {
        self.each_value = Some(value);
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unknown reference {0}")]
    UnknownReference(String),

    #[error("missing attribute `{0}`")]
    MissingAttribute(String),

    #[error("{function}() takes {expected} argument(s), got {found}")]
    Arity {
        function: Function,
        expected: &'static str,
        found: usize,
    },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
}

impl EvalError {
    fn type_mismatch(expected: &'static str, found: &Value) -> Self {
        EvalError::TypeMismatch {
            expected,
            found: found.to_string(),
        }
    }
}

fn call(function: Function, args: Vec<Value>) -> Result<Value, EvalError> {
    let found = args.len();
    let arity = |expected: &'static str| EvalError::Arity {
        function,
        expected,
        found,
    };

    match function {
        Function::SetUnion => {
            if args.is_empty() {
                return Err(arity("at least 1"));
            }
            let mut members = BTreeMap::new();
            for arg in args {
                let items = match arg {
                    Value::Array(items) => items,
                    other => return Err(EvalError::type_mismatch("list or set", &other)),
                };
                for item in items {
                    members.insert(item.to_string(), item);
                }
            }
            Ok(Value::Array(members.into_values().collect()))
        }
        Function::ToSet => {
            if found != 1 {
                return Err(arity("1"));
            }
            call(Function::SetUnion, args)
        }
        Function::Lookup => {
            let [map, key, default]: [Value; 3] = args.try_into().map_err(|_| arity("3"))?;
            let map = match map {
                Value::Object(map) => map,
                other => return Err(EvalError::type_mismatch("map", &other)),
            };
            let key = match key {
                Value::String(key) => key,
                other => return Err(EvalError::type_mismatch("string", &other)),
            };
            Ok(map.get(&key).cloned().unwrap_or(default))
        }
    }
}
