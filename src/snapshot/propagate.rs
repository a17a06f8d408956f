//! Transitive severity propagation.
//!
//! A diagnostic on a library must be visible on everything that depends on
//! it, so for every node the effective level is the maximum of its own
//! level and the effective levels of its dependencies. The graph comes from
//! the resolver as a DAG; a cycle is a contract violation and is reported,
//! not recursed into.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::{LogLevel, TargetLibrary};
use crate::snapshot::errors::SnapshotError;
use crate::util::CaselessName;

/// Visitation state for one node of the iterative DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Compute every library's effective level and store it on the entry.
///
/// `own` holds the per-library maximum of directly attributed diagnostics.
/// The DFS keeps its own explicit stack and a per-node state arena, so
/// deep graphs cannot exhaust the call stack, and memoized results make the
/// whole pass linear in the number of edges. Encountering an `InProgress`
/// node again means a cycle.
pub(crate) fn propagate_levels(
    framework: &str,
    libraries: &mut HashMap<CaselessName, TargetLibrary>,
    own: &HashMap<CaselessName, LogLevel>,
) -> Result<(), SnapshotError> {
    let mut graph: DiGraph<CaselessName, ()> = DiGraph::with_capacity(libraries.len(), 0);
    let mut nodes: HashMap<CaselessName, NodeIndex> = HashMap::with_capacity(libraries.len());

    for name in libraries.keys() {
        let index = graph.add_node(name.clone());
        nodes.insert(name.clone(), index);
    }

    for (name, library) in libraries.iter() {
        let from = nodes[name];
        for dependency in &library.dependencies {
            // The builder synthesized placeholders for dangling edges, so
            // every dependency resolves to a node here.
            if let Some(&to) = nodes.get(&CaselessName::new(dependency.as_str())) {
                graph.add_edge(from, to, ());
            }
        }
    }

    let mut effective: Vec<Option<LogLevel>> = graph
        .node_indices()
        .map(|index| own.get(&graph[index]).copied())
        .collect();
    let mut state = vec![VisitState::Unvisited; graph.node_count()];

    for start in graph.node_indices() {
        if state[start.index()] != VisitState::Unvisited {
            continue;
        }

        state[start.index()] = VisitState::InProgress;
        let mut stack = vec![(start, graph.neighbors(start))];

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let node = stack[top].0;
            let next = stack[top].1.next();

            match next {
                Some(dependency) => match state[dependency.index()] {
                    VisitState::Unvisited => {
                        state[dependency.index()] = VisitState::InProgress;
                        stack.push((dependency, graph.neighbors(dependency)));
                    }
                    VisitState::InProgress => {
                        return Err(cycle_error(framework, &graph, &stack, dependency));
                    }
                    VisitState::Done => {
                        effective[node.index()] =
                            effective[node.index()].max(effective[dependency.index()]);
                    }
                },
                None => {
                    state[node.index()] = VisitState::Done;
                    stack.pop();
                    if let Some(&(parent, _)) = stack.last() {
                        effective[parent.index()] =
                            effective[parent.index()].max(effective[node.index()]);
                    }
                }
            }
        }
    }

    for index in graph.node_indices() {
        if let Some(library) = libraries.get_mut(&graph[index]) {
            library.effective_level = effective[index.index()];
        }
    }

    Ok(())
}

/// Reconstruct the cycle path from the DFS stack, from the first occurrence
/// of the revisited node back around to itself.
fn cycle_error(
    framework: &str,
    graph: &DiGraph<CaselessName, ()>,
    stack: &[(NodeIndex, petgraph::graph::Neighbors<'_, ()>)],
    revisited: NodeIndex,
) -> SnapshotError {
    let start = stack
        .iter()
        .position(|&(node, _)| node == revisited)
        .unwrap_or(0);

    let mut path: Vec<String> = stack[start..]
        .iter()
        .map(|&(node, _)| graph[node].as_str().to_string())
        .collect();
    path.push(graph[revisited].as_str().to_string());

    SnapshotError::CycleDetected {
        target: framework.to_string(),
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(name: &str, dependencies: &[&str]) -> (CaselessName, TargetLibrary) {
        let mut lib = TargetLibrary::unknown(name);
        lib.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
        (CaselessName::new(name), lib)
    }

    fn own(levels: &[(&str, LogLevel)]) -> HashMap<CaselessName, LogLevel> {
        levels
            .iter()
            .map(|&(name, level)| (CaselessName::new(name), level))
            .collect()
    }

    #[test]
    fn test_chain_inherits_warning() {
        // A -> B -> C, warning attached to C
        let mut libraries: HashMap<_, _> = [
            library("A", &["B"]),
            library("B", &["C"]),
            library("C", &[]),
            library("X", &[]),
        ]
        .into_iter()
        .collect();
        let own = own(&[("C", LogLevel::Warning)]);

        propagate_levels("net8.0", &mut libraries, &own).unwrap();

        let level = |name: &str| libraries[&CaselessName::new(name)].effective_level;
        assert_eq!(level("C"), Some(LogLevel::Warning));
        assert_eq!(level("B"), Some(LogLevel::Warning));
        assert_eq!(level("A"), Some(LogLevel::Warning));
        assert_eq!(level("X"), None);
    }

    #[test]
    fn test_maximum_wins_across_branches() {
        // A depends on both B (warning) and C (error); A sees the error.
        let mut libraries: HashMap<_, _> = [
            library("A", &["B", "C"]),
            library("B", &[]),
            library("C", &[]),
        ]
        .into_iter()
        .collect();
        let own = own(&[("B", LogLevel::Warning), ("C", LogLevel::Error)]);

        propagate_levels("net8.0", &mut libraries, &own).unwrap();

        let level = |name: &str| libraries[&CaselessName::new(name)].effective_level;
        assert_eq!(level("A"), Some(LogLevel::Error));
        assert_eq!(level("B"), Some(LogLevel::Warning));
    }

    #[test]
    fn test_own_level_not_lowered_by_dependencies() {
        let mut libraries: HashMap<_, _> =
            [library("A", &["B"]), library("B", &[])].into_iter().collect();
        let own = own(&[("A", LogLevel::Error), ("B", LogLevel::Information)]);

        propagate_levels("net8.0", &mut libraries, &own).unwrap();

        let level = |name: &str| libraries[&CaselessName::new(name)].effective_level;
        assert_eq!(level("A"), Some(LogLevel::Error));
        assert_eq!(level("B"), Some(LogLevel::Information));
    }

    #[test]
    fn test_diamond_is_linear_not_exponential() {
        // A -> {B, C} -> D; D is visited once thanks to memoization.
        let mut libraries: HashMap<_, _> = [
            library("A", &["B", "C"]),
            library("B", &["D"]),
            library("C", &["D"]),
            library("D", &[]),
        ]
        .into_iter()
        .collect();
        let own = own(&[("D", LogLevel::Warning)]);

        propagate_levels("net8.0", &mut libraries, &own).unwrap();

        let level = |name: &str| libraries[&CaselessName::new(name)].effective_level;
        assert_eq!(level("A"), Some(LogLevel::Warning));
        assert_eq!(level("B"), Some(LogLevel::Warning));
        assert_eq!(level("C"), Some(LogLevel::Warning));
    }

    #[test]
    fn test_cycle_is_reported_not_hung() {
        let mut libraries: HashMap<_, _> = [
            library("A", &["B"]),
            library("B", &["C"]),
            library("C", &["A"]),
        ]
        .into_iter()
        .collect();
        let own = HashMap::new();

        let err = propagate_levels("net8.0", &mut libraries, &own).unwrap_err();
        match err {
            SnapshotError::CycleDetected { target, path } => {
                assert_eq!(target, "net8.0");
                assert!(path.len() >= 2);
                assert_eq!(path.first(), path.last());
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_self_cycle_is_reported() {
        let mut libraries: HashMap<_, _> = [library("A", &["A"])].into_iter().collect();
        let own = HashMap::new();

        let err = propagate_levels("net8.0", &mut libraries, &own).unwrap_err();
        assert!(matches!(err, SnapshotError::CycleDetected { .. }));
    }

    #[test]
    fn test_empty_graph_is_fine() {
        let mut libraries = HashMap::new();
        let own = HashMap::new();
        propagate_levels("net8.0", &mut libraries, &own).unwrap();
    }

    #[test]
    fn test_case_insensitive_edges_resolve() {
        // Dependency edge written in a different casing still finds its node.
        let mut libraries: HashMap<_, _> = [
            library("System.Runtime", &["FROB"]),
            library("Frob", &[]),
        ]
        .into_iter()
        .collect();
        let own = own(&[("frob", LogLevel::Warning)]);

        propagate_levels("net5.0", &mut libraries, &own).unwrap();

        let level = |name: &str| libraries[&CaselessName::new(name)].effective_level;
        assert_eq!(level("System.Runtime"), Some(LogLevel::Warning));
    }
}
