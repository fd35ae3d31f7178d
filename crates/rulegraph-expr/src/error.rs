use thiserror::Error;

/// Errors from parsing or evaluating a rule expression.
///
/// Evaluation errors are fatal to the rule that raised them: a lookup miss
/// or a type clash means the rule or the input snapshot is wrong, and
/// coercing it to `false` would hide that.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("parse error at byte {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("unknown identifier: {name}")]
    UnknownIdentifier { name: String },

    #[error("unknown member: {member}")]
    UnknownMember { member: String },

    #[error("cannot access member `{member}` of {value_type}")]
    MemberOfNonObject {
        member: String,
        value_type: &'static str,
    },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("cannot index {value_type} with {index_type}")]
    InvalidIndex {
        value_type: &'static str,
        index_type: &'static str,
    },

    #[error("type mismatch: cannot apply `{op}` to {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("type mismatch: cannot apply unary `{op}` to {operand}")]
    UnaryTypeMismatch {
        op: &'static str,
        operand: &'static str,
    },
}
