use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ExprError;
use serde_json::Value;

/// Intermediate value while walking an expression tree.
///
/// Numbers stay `f64` so IEEE edge cases (NaN, infinities) survive until the
/// final coercion; arrays and objects ride along as JSON.
#[derive(Clone, Debug)]
enum EvalValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Json(Value),
}

impl EvalValue {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => EvalValue::Null,
            Value::Bool(b) => EvalValue::Bool(*b),
            Value::Number(n) => EvalValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => EvalValue::Str(s.clone()),
            Value::Array(_) | Value::Object(_) => EvalValue::Json(value.clone()),
        }
    }

    fn into_json(self) -> Value {
        match self {
            EvalValue::Null => Value::Null,
            EvalValue::Bool(b) => Value::Bool(b),
            EvalValue::Number(n) => serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number),
            EvalValue::Str(s) => Value::String(s),
            EvalValue::Json(v) => v,
        }
    }

    fn truthy(&self) -> bool {
        match self {
            EvalValue::Null => false,
            EvalValue::Bool(b) => *b,
            EvalValue::Number(n) => *n != 0.0 && !n.is_nan(),
            EvalValue::Str(s) => !s.is_empty(),
            EvalValue::Json(_) => true,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            EvalValue::Null => "null",
            EvalValue::Bool(_) => "boolean",
            EvalValue::Number(_) => "number",
            EvalValue::Str(_) => "string",
            EvalValue::Json(Value::Array(_)) => "array",
            EvalValue::Json(_) => "object",
        }
    }
}

impl Expr {
    /// Evaluate against `env` and coerce the result to a boolean.
    pub fn evaluate_bool(&self, env: &Value) -> Result<bool, ExprError> {
        Ok(eval(self, env)?.truthy())
    }

    /// Evaluate against `env`, yielding a JSON value.
    ///
    /// Non-finite numeric results have no JSON representation and collapse
    /// to `null`.
    pub fn evaluate(&self, env: &Value) -> Result<Value, ExprError> {
        Ok(eval(self, env)?.into_json())
    }
}

fn eval(expr: &Expr, env: &Value) -> Result<EvalValue, ExprError> {
    match expr {
        Expr::Null => Ok(EvalValue::Null),
        Expr::Bool(b) => Ok(EvalValue::Bool(*b)),
        Expr::Number(n) => Ok(EvalValue::Number(*n)),
        Expr::Str(s) => Ok(EvalValue::Str(s.clone())),
        Expr::Ident(name) => match env.get(name) {
            Some(value) => Ok(EvalValue::from_json(value)),
            None => Err(ExprError::UnknownIdentifier { name: name.clone() }),
        },
        Expr::Member { object, field } => {
            let object = eval(object, env)?;
            member(&object, field)
        }
        Expr::Index { object, index } => {
            let object = eval(object, env)?;
            let index = eval(index, env)?;
            index_value(&object, &index)
        }
        Expr::Unary { op, operand } => {
            let operand = eval(operand, env)?;
            match op {
                UnaryOp::Not => Ok(EvalValue::Bool(!operand.truthy())),
                UnaryOp::Neg => match operand {
                    EvalValue::Number(n) => Ok(EvalValue::Number(-n)),
                    other => Err(ExprError::UnaryTypeMismatch {
                        op: op.symbol(),
                        operand: other.type_name(),
                    }),
                },
            }
        }
        Expr::Binary { op, lhs, rhs } => eval_binary(*op, lhs, rhs, env),
    }
}

fn member(object: &EvalValue, field: &str) -> Result<EvalValue, ExprError> {
    match object {
        EvalValue::Json(Value::Object(map)) => match map.get(field) {
            Some(value) => Ok(EvalValue::from_json(value)),
            None => Err(ExprError::UnknownMember {
                member: field.to_string(),
            }),
        },
        other => Err(ExprError::MemberOfNonObject {
            member: field.to_string(),
            value_type: other.type_name(),
        }),
    }
}

fn index_value(object: &EvalValue, index: &EvalValue) -> Result<EvalValue, ExprError> {
    match (object, index) {
        (EvalValue::Json(Value::Array(items)), EvalValue::Number(n)) => {
            if n.fract() != 0.0 || n.is_nan() {
                return Err(ExprError::InvalidIndex {
                    value_type: "array",
                    index_type: "fractional number",
                });
            }
            let raw = *n as i64;
            if raw < 0 || raw as usize >= items.len() {
                return Err(ExprError::IndexOutOfBounds {
                    index: raw,
                    len: items.len(),
                });
            }
            Ok(EvalValue::from_json(&items[raw as usize]))
        }
        (EvalValue::Json(Value::Object(map)), EvalValue::Str(key)) => match map.get(key) {
            Some(value) => Ok(EvalValue::from_json(value)),
            None => Err(ExprError::UnknownMember {
                member: key.clone(),
            }),
        },
        (object, index) => Err(ExprError::InvalidIndex {
            value_type: object.type_name(),
            index_type: index.type_name(),
        }),
    }
}

fn eval_binary(op: BinaryOp, lhs: &Expr, rhs: &Expr, env: &Value) -> Result<EvalValue, ExprError> {
    // Short-circuit forms keep the deciding operand's value and never touch
    // the other side.
    match op {
        BinaryOp::Or => {
            let left = eval(lhs, env)?;
            if left.truthy() {
                return Ok(left);
            }
            return eval(rhs, env);
        }
        BinaryOp::And => {
            let left = eval(lhs, env)?;
            if !left.truthy() {
                return Ok(left);
            }
            return eval(rhs, env);
        }
        _ => {}
    }

    let left = eval(lhs, env)?;
    let right = eval(rhs, env)?;
    match op {
        BinaryOp::Eq => Ok(EvalValue::Bool(loose_eq(&left, &right))),
        BinaryOp::Ne => Ok(EvalValue::Bool(!loose_eq(&left, &right))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => compare(op, &left, &right),
        BinaryOp::Add => match (&left, &right) {
            (EvalValue::Number(a), EvalValue::Number(b)) => Ok(EvalValue::Number(a + b)),
            (EvalValue::Str(a), EvalValue::Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(EvalValue::Str(joined))
            }
            _ => Err(type_mismatch(op, &left, &right)),
        },
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            match (&left, &right) {
                (EvalValue::Number(a), EvalValue::Number(b)) => {
                    let result = match op {
                        BinaryOp::Sub => a - b,
                        BinaryOp::Mul => a * b,
                        // IEEE semantics: x/0 is an infinity, 0/0 is NaN.
                        BinaryOp::Div => a / b,
                        _ => a % b,
                    };
                    Ok(EvalValue::Number(result))
                }
                _ => Err(type_mismatch(op, &left, &right)),
            }
        }
        BinaryOp::Or | BinaryOp::And => unreachable!("handled above"),
    }
}

/// Equality across types is `false`, never an error; rule predicates compare
/// dependency severities to string literals and must stay total.
fn loose_eq(left: &EvalValue, right: &EvalValue) -> bool {
    match (left, right) {
        (EvalValue::Null, EvalValue::Null) => true,
        (EvalValue::Bool(a), EvalValue::Bool(b)) => a == b,
        (EvalValue::Number(a), EvalValue::Number(b)) => a == b,
        (EvalValue::Str(a), EvalValue::Str(b)) => a == b,
        (EvalValue::Json(a), EvalValue::Json(b)) => a == b,
        _ => false,
    }
}

fn compare(op: BinaryOp, left: &EvalValue, right: &EvalValue) -> Result<EvalValue, ExprError> {
    let ordered = match (left, right) {
        // f64 comparisons are false for NaN operands, matching the source
        // semantics of ordered comparison.
        (EvalValue::Number(a), EvalValue::Number(b)) => match op {
            BinaryOp::Lt => a < b,
            BinaryOp::Le => a <= b,
            BinaryOp::Gt => a > b,
            _ => a >= b,
        },
        (EvalValue::Str(a), EvalValue::Str(b)) => match op {
            BinaryOp::Lt => a < b,
            BinaryOp::Le => a <= b,
            BinaryOp::Gt => a > b,
            _ => a >= b,
        },
        _ => return Err(type_mismatch(op, left, right)),
    };
    Ok(EvalValue::Bool(ordered))
}

fn type_mismatch(op: BinaryOp, left: &EvalValue, right: &EvalValue) -> ExprError {
    ExprError::TypeMismatch {
        op: op.symbol(),
        lhs: left.type_name(),
        rhs: right.type_name(),
    }
}
