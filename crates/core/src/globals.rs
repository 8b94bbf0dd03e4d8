//! Helpers for assembling a globals mapping with its nested builtins.

use crate::config::ScopeConfig;
use dynscope_api::{BuiltinFn, Namespace, Value};

/// Nest `builtins` inside `globals` under the configured reserved key.
pub fn with_builtins(config: &ScopeConfig, mut globals: Namespace, builtins: Namespace) -> Namespace {
    globals.insert(config.builtins_key.clone(), Value::Map(builtins));
    globals
}

/// A minimal builtins mapping: `len`, `abs` and `str`.
pub fn standard_builtins() -> Namespace {
    [
        BuiltinFn::new("len", builtin_len),
        BuiltinFn::new("abs", builtin_abs),
        BuiltinFn::new("str", builtin_str),
    ]
    .into_iter()
    .map(|func| (func.name(), Value::Builtin(func)))
    .collect()
}

fn builtin_len(args: &[Value]) -> Option<Value> {
    let len = match args {
        [Value::Str(s)] => s.chars().count(),
        [Value::List(items)] => items.len(),
        [Value::Map(ns)] => ns.len(),
        _ => return None,
    };
    i64::try_from(len).ok().map(Value::Int)
}

fn builtin_abs(args: &[Value]) -> Option<Value> {
    match args {
        [Value::Int(i)] => i.checked_abs().map(Value::Int),
        [Value::Float(x)] => Some(Value::Float(x.abs())),
        _ => None,
    }
}

fn builtin_str(args: &[Value]) -> Option<Value> {
    match args {
        [Value::Str(s)] => Some(Value::Str(s.clone())),
        [other] => Some(Value::from(other.to_string())),
        _ => None,
    }
}
