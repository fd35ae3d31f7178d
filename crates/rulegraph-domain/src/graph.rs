//! Topological ordering of rule definitions by declared dependencies.

use crate::error::GraphError;
use rulegraph_types::RuleDefinition;
use std::collections::{BTreeMap, BTreeSet};

/// Order rules so every dependency precedes its dependents.
///
/// Depth-first with three-color marking: `visiting` is the gray set,
/// `visited` the black set. Ties between independent rules keep the
/// caller's list order, and dependency-free rules append as soon as they
/// are visited. All errors abort the sort; there is no partial order.
pub fn sort_rules(definitions: &[RuleDefinition]) -> Result<Vec<RuleDefinition>, GraphError> {
    let mut by_code: BTreeMap<&str, &RuleDefinition> = BTreeMap::new();
    for def in definitions {
        if by_code.insert(def.code.as_str(), def).is_some() {
            return Err(GraphError::DuplicateCode {
                code: def.code.clone(),
            });
        }
    }

    let mut state = SortState {
        by_code,
        visited: BTreeSet::new(),
        visiting: BTreeSet::new(),
        stack: Vec::new(),
        ordered: Vec::with_capacity(definitions.len()),
    };
    for def in definitions {
        state.visit(def)?;
    }
    Ok(state.ordered)
}

struct SortState<'a> {
    by_code: BTreeMap<&'a str, &'a RuleDefinition>,
    visited: BTreeSet<&'a str>,
    visiting: BTreeSet<&'a str>,
    /// Codes on the current DFS path, for cycle reporting.
    stack: Vec<String>,
    ordered: Vec<RuleDefinition>,
}

impl<'a> SortState<'a> {
    fn visit(&mut self, def: &'a RuleDefinition) -> Result<(), GraphError> {
        if self.visited.contains(def.code.as_str()) {
            return Ok(());
        }
        if self.visiting.contains(def.code.as_str()) {
            let mut path = self.stack.clone();
            path.push(def.code.clone());
            return Err(GraphError::Cycle { path });
        }

        self.visiting.insert(def.code.as_str());
        self.stack.push(def.code.clone());
        for dep_code in &def.dependencies {
            let Some(&dep) = self.by_code.get(dep_code.as_str()) else {
                return Err(GraphError::MissingDependency {
                    code: dep_code.clone(),
                });
            };
            self.visit(dep)?;
        }
        self.stack.pop();
        self.visiting.remove(def.code.as_str());

        self.visited.insert(def.code.as_str());
        self.ordered.push(def.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rule, with_dependencies};

    fn codes(ordered: &[RuleDefinition]) -> Vec<&str> {
        ordered.iter().map(|r| r.code.as_str()).collect()
    }

    #[test]
    fn independent_rules_keep_list_order() {
        let rules = vec![rule("C", "true"), rule("A", "true"), rule("B", "true")];
        let ordered = sort_rules(&rules).unwrap();
        assert_eq!(codes(&ordered), ["C", "A", "B"]);
    }

    #[test]
    fn dependencies_precede_dependents() {
        let rules = vec![
            with_dependencies(rule("MANUAL_REVIEW", "true"), &["FICO_MIN"]),
            rule("FICO_MIN", "true"),
        ];
        let ordered = sort_rules(&rules).unwrap();
        assert_eq!(codes(&ordered), ["FICO_MIN", "MANUAL_REVIEW"]);
    }

    #[test]
    fn chain_orders_depth_first() {
        let rules = vec![
            with_dependencies(rule("C", "true"), &["B"]),
            with_dependencies(rule("B", "true"), &["A"]),
            rule("A", "true"),
        ];
        let ordered = sort_rules(&rules).unwrap();
        assert_eq!(codes(&ordered), ["A", "B", "C"]);
    }

    #[test]
    fn diamond_resolves_each_rule_once() {
        let rules = vec![
            with_dependencies(rule("D", "true"), &["B", "C"]),
            with_dependencies(rule("B", "true"), &["A"]),
            with_dependencies(rule("C", "true"), &["A"]),
            rule("A", "true"),
        ];
        let ordered = sort_rules(&rules).unwrap();
        assert_eq!(codes(&ordered), ["A", "B", "C", "D"]);
    }

    #[test]
    fn cycle_is_reported_with_its_path() {
        let rules = vec![
            with_dependencies(rule("A", "true"), &["B"]),
            with_dependencies(rule("B", "true"), &["A"]),
        ];
        let err = sort_rules(&rules).unwrap_err();
        assert_eq!(
            err,
            GraphError::Cycle {
                path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
            }
        );
        assert_eq!(
            err.to_string(),
            "cycle detected in rule dependencies: A -> B -> A"
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let rules = vec![with_dependencies(rule("A", "true"), &["A"])];
        let err = sort_rules(&rules).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cycle detected in rule dependencies: A -> A"
        );
    }

    #[test]
    fn missing_dependency_is_an_error() {
        let rules = vec![with_dependencies(rule("A", "true"), &["GHOST"])];
        let err = sort_rules(&rules).unwrap_err();
        assert_eq!(
            err,
            GraphError::MissingDependency {
                code: "GHOST".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let rules = vec![rule("A", "true"), rule("A", "false")];
        let err = sort_rules(&rules).unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateCode {
                code: "A".to_string(),
            }
        );
    }
}
