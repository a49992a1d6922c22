use crate::error::ToolError;
use crate::tools::{ToolContext, success_result, tool_error_result};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn from_value(value: &Value) -> Option<Self> {
        if let Some(int) = value.as_i64() {
            return Some(Number::Int(int));
        }
        value.as_f64().map(Number::Float)
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(int) => int as f64,
            Number::Float(float) => float,
        }
    }

    fn to_value(self) -> Value {
        match self {
            Number::Int(int) => json!(int),
            Number::Float(float) => json!(float),
        }
    }
}

/// Integer sum when both sides are integers, float otherwise. Integer
/// overflow falls back to a float sum.
pub fn add(a: Number, b: Number) -> Number {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => a
            .checked_add(b)
            .map(Number::Int)
            .unwrap_or_else(|| Number::Float(a as f64 + b as f64)),
        _ => Number::Float(a.as_f64() + b.as_f64()),
    }
}

pub fn call(_ctx: &ToolContext, args: &Value) -> Value {
    let operands = number_arg(args, "a").and_then(|a| Ok((a, number_arg(args, "b")?)));
    let (a, b) = match operands {
        Ok(operands) => operands,
        Err(err) => return tool_error_result(&err),
    };

    let sum = add(a, b).to_value();
    success_result(sum.to_string(), sum)
}

fn number_arg(args: &Value, name: &str) -> Result<Number, ToolError> {
    let value = args
        .get(name)
        .ok_or_else(|| ToolError::invalid_input(format!("{name} is required")))?;
    Number::from_value(value)
        .ok_or_else(|| ToolError::invalid_input(format!("{name} must be a number")))
}
