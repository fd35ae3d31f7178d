use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shared severity scale for rule outcomes and the aggregate verdict.
///
/// The derived `Ord` follows declaration order, so aggregation is a plain
/// `max` over `pass < warn < fail`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Pass,
    Warn,
    Fail,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Pass => "pass",
            Severity::Warn => "warn",
            Severity::Fail => "fail",
        }
    }
}

/// The subset of severities a rule may declare for its triggered state.
///
/// A triggered rule is never `pass`, so `severity_on_fail` excludes it at the
/// type level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FailSeverity {
    Warn,
    Fail,
}

impl From<FailSeverity> for Severity {
    fn from(value: FailSeverity) -> Self {
        match value {
            FailSeverity::Warn => Severity::Warn,
            FailSeverity::Fail => Severity::Fail,
        }
    }
}
