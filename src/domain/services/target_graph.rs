//! Target graph
//!
//! A directed acyclic graph of build targets. An edge `A → B` means
//! "B depends on A": A must finish before B may run. Nodes are keyed by a
//! stable id so two requesters of the same target share one node.
//!
//! Cycles are rejected at insertion time. Topological order uses Kahn's
//! algorithm and breaks ties by insertion order, so a plan evaluates the
//! same way on every run.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown target '{id}'")]
    UnknownTarget { id: String },

    #[error("dependency cycle: {}", targets.join(" -> "))]
    Cycle { targets: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct TargetGraph<T> {
    ids: Vec<String>,
    nodes: Vec<T>,
    index: HashMap<String, usize>,
    /// `node → nodes it depends on`
    upstream: Vec<BTreeSet<usize>>,
    /// `node → nodes depending on it`
    downstream: Vec<BTreeSet<usize>>,
}

impl<T> Default for TargetGraph<T> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            nodes: Vec::new(),
            index: HashMap::new(),
            upstream: Vec::new(),
            downstream: Vec::new(),
        }
    }
}

impl<T> TargetGraph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a target. Returns `false` (and keeps the existing node) when
    /// the id is already present.
    pub fn add_target(&mut self, id: impl Into<String>, target: T) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        self.nodes.push(target);
        self.upstream.push(BTreeSet::new());
        self.downstream.push(BTreeSet::new());
        true
    }

    /// Add an edge: `dependent` depends on `dependency`.
    pub fn add_dependency(&mut self, dependency: &str, dependent: &str) -> Result<(), GraphError> {
        let from = self.position(dependency)?;
        let to = self.position(dependent)?;

        if from == to || self.reaches(to, from) {
            let mut targets = vec![dependency.to_string(), dependent.to_string()];
            if from != to {
                targets.push(dependency.to_string());
            }
            return Err(GraphError::Cycle { targets });
        }

        self.downstream[from].insert(to);
        self.upstream[to].insert(from);
        Ok(())
    }

    /// True when `target` is reachable from `start` along downstream edges.
    fn reaches(&self, start: usize, target: usize) -> bool {
        let mut stack = vec![start];
        let mut seen = HashSet::new();
        while let Some(node) = stack.pop() {
            if node == target {
                return true;
            }
            if seen.insert(node) {
                stack.extend(self.downstream[node].iter().copied());
            }
        }
        false
    }

    fn position(&self, id: &str) -> Result<usize, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownTarget { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Targets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.ids.iter().map(String::as_str).zip(self.nodes.iter())
    }

    /// Direct dependencies of `id`, in insertion order
    pub fn dependencies_of(&self, id: &str) -> Result<Vec<&str>, GraphError> {
        let pos = self.position(id)?;
        Ok(self.upstream[pos]
            .iter()
            .map(|&i| self.ids[i].as_str())
            .collect())
    }

    /// Direct dependents of `id`, in insertion order
    pub fn dependents_of(&self, id: &str) -> Result<Vec<&str>, GraphError> {
        let pos = self.position(id)?;
        Ok(self.downstream[pos]
            .iter()
            .map(|&i| self.ids[i].as_str())
            .collect())
    }

    /// `roots` plus everything they transitively depend on
    pub fn closure(&self, roots: &[&str]) -> Result<HashSet<String>, GraphError> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        for root in roots {
            queue.push_back(self.position(root)?);
        }
        while let Some(node) = queue.pop_front() {
            if visited.insert(node) {
                queue.extend(self.upstream[node].iter().copied());
            }
        }
        Ok(visited.into_iter().map(|i| self.ids[i].clone()).collect())
    }

    /// Dependencies before dependents; ties resolved by insertion order.
    pub fn topological_order(&self) -> Result<Vec<&str>, GraphError> {
        let mut in_degree: Vec<usize> = self.upstream.iter().map(BTreeSet::len).collect();
        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 0)
            .map(|(i, _)| i)
            .collect();

        let mut sorted = Vec::with_capacity(self.nodes.len());
        while let Some(node) = ready.pop_first() {
            sorted.push(self.ids[node].as_str());
            for &next in &self.downstream[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.insert(next);
                }
            }
        }

        if sorted.len() != self.nodes.len() {
            let placed: HashSet<&str> = sorted.iter().copied().collect();
            return Err(GraphError::Cycle {
                targets: self
                    .ids
                    .iter()
                    .filter(|id| !placed.contains(id.as_str()))
                    .cloned()
                    .collect(),
            });
        }
        Ok(sorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> TargetGraph<()> {
        let mut g = TargetGraph::new();
        for (a, b) in edges {
            g.add_target(*a, ());
            g.add_target(*b, ());
        }
        for (a, b) in edges {
            g.add_dependency(a, b).unwrap();
        }
        g
    }

    #[test]
    fn shared_target_is_inserted_once() {
        let mut g: TargetGraph<u32> = TargetGraph::new();
        assert!(g.add_target("toolchain:23", 1));
        assert!(!g.add_target("toolchain:23", 2));
        assert_eq!(g.get("toolchain:23"), Some(&1));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn topological_order_respects_edges() {
        let g = graph(&[
            ("merge", "compile"),
            ("resolve", "compile"),
            ("compile", "package"),
        ]);
        let order = g.topological_order().unwrap();
        let pos = |id: &str| order.iter().position(|x| *x == id).unwrap();
        assert!(pos("merge") < pos("compile"));
        assert!(pos("resolve") < pos("compile"));
        assert!(pos("compile") < pos("package"));
    }

    #[test]
    fn topological_order_breaks_ties_by_insertion() {
        let mut g: TargetGraph<()> = TargetGraph::new();
        for id in ["c", "a", "b"] {
            g.add_target(id, ());
        }
        assert_eq!(g.topological_order().unwrap(), vec!["c", "a", "b"]);
    }

    #[test]
    fn cycle_is_rejected_and_not_committed() {
        let mut g = graph(&[("a", "b"), ("b", "c")]);
        let err = g.add_dependency("c", "a").unwrap_err();
        assert!(matches!(err, GraphError::Cycle { .. }));
        assert!(g.dependencies_of("a").unwrap().is_empty());
        assert!(g.topological_order().is_ok());
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let mut g = graph(&[]);
        g.add_target("a", ());
        assert!(g.add_dependency("a", "a").is_err());
    }

    #[test]
    fn unknown_target_is_reported() {
        let mut g = graph(&[]);
        g.add_target("a", ());
        assert_eq!(
            g.add_dependency("a", "missing"),
            Err(GraphError::UnknownTarget {
                id: "missing".into()
            })
        );
    }

    #[test]
    fn closure_follows_upstream_only() {
        let g = graph(&[("t", "web"), ("t", "matcher"), ("jpa", "web")]);
        let closure = g.closure(&["matcher"]).unwrap();
        assert!(closure.contains("matcher"));
        assert!(closure.contains("t"));
        assert!(!closure.contains("jpa"));
        assert!(!closure.contains("web"));
    }
}
