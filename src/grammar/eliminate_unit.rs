use std::collections::{HashMap, HashSet};

use super::{Grammar, Production};

impl Grammar {
    /// Edges `A -> B` for every unit production.
    fn unit_graph(&self) -> HashMap<&str, Vec<&str>> {
        let mut graph: HashMap<&str, Vec<&str>> = self
            .non_terminal_iter()
            .map(|nt| (nt.as_str(), Vec::new()))
            .collect();
        for p in self.productions.iter().filter(|p| p.is_unit()) {
            if let (Some(edges), Some(target)) =
                (graph.get_mut(p.left.as_str()), p.right[0].non_terminal())
            {
                if !edges.contains(&target) {
                    edges.push(target);
                }
            }
        }
        graph
    }

    /// Non-terminals reachable from `from` through one or more unit productions,
    /// in discovery order.
    pub fn unit_reachable(&self, from: &str) -> Vec<String> {
        let graph = self.unit_graph();
        Self::reachable_in(&graph, from)
    }

    fn reachable_in(graph: &HashMap<&str, Vec<&str>>, from: &str) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut order: Vec<String> = Vec::new();
        let mut stack: Vec<&str> = vec![from];
        while let Some(current) = stack.pop() {
            for &next in graph.get(current).into_iter().flatten() {
                if visited.insert(next) {
                    order.push(next.to_string());
                    stack.push(next);
                }
            }
        }
        order
    }

    /// Replaces every chain of unit productions by the non-unit bodies it leads to.
    pub fn eliminate_unit(&self) -> Grammar {
        let graph = self.unit_graph();

        let mut productions: Vec<Production> = self
            .productions
            .iter()
            .filter(|p| !p.is_unit())
            .cloned()
            .collect();
        let mut seen: HashSet<Production> = productions.iter().cloned().collect();

        for a in self.non_terminal_iter() {
            for b in Self::reachable_in(&graph, a) {
                for p in self.productions_of(&b).filter(|p| !p.is_unit()) {
                    let substituted = Production::new(a, p.right.clone());
                    if seen.insert(substituted.clone()) {
                        productions.push(substituted);
                    }
                }
            }
        }

        Grammar {
            productions,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Grammar;

    #[test]
    fn reachability_is_transitive_but_not_reflexive() {
        let g = Grammar::parse("A -> B\nB -> C\nC -> c | A").unwrap();
        assert_eq!(g.unit_reachable("A"), vec!["B", "C", "A"]);
        let g = Grammar::parse("A -> B\nB -> b").unwrap();
        assert_eq!(g.unit_reachable("A"), vec!["B"]);
        assert!(g.unit_reachable("B").is_empty());
    }

    #[test]
    fn chains_are_collapsed() {
        let g = Grammar::parse("S -> A | s s\nA -> B\nB -> b | S").unwrap();
        let u = g.eliminate_unit();
        assert!(u.productions.iter().all(|p| !p.is_unit()));
        let s: Vec<String> = u.productions_of("S").map(|p| p.to_string()).collect();
        assert_eq!(s, vec!["S -> s s", "S -> b"]);
        let a: Vec<String> = u.productions_of("A").map(|p| p.to_string()).collect();
        assert_eq!(a, vec!["A -> b", "A -> s s"]);
    }
}
