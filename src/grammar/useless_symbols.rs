use std::collections::HashSet;

use super::{Grammar, Symbol};

impl Grammar {
    /// Non-terminals that derive at least one terminal string.
    pub fn productive_set(&self) -> HashSet<String> {
        let mut productive: HashSet<String> = HashSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for p in &self.productions {
                if productive.contains(&p.left) {
                    continue;
                }
                if p.right.iter().all(|s| Self::is_productive_symbol(s, &productive)) {
                    productive.insert(p.left.clone());
                    changed = true;
                }
            }
        }
        productive
    }

    // ε only survives as the body of an augmented start symbol
    fn is_productive_symbol(symbol: &Symbol, productive: &HashSet<String>) -> bool {
        match symbol {
            Symbol::Terminal(_) | Symbol::Epsilon => true,
            Symbol::NonTerminal(name) => productive.contains(name),
        }
    }

    /// Non-terminals reachable from the start symbol.
    pub fn accessible_set(&self) -> HashSet<String> {
        let mut accessible: HashSet<String> = HashSet::new();
        accessible.insert(self.start_symbol.clone());
        let mut changed = true;
        while changed {
            changed = false;
            for p in &self.productions {
                if !accessible.contains(&p.left) {
                    continue;
                }
                for name in p.right.iter().filter_map(|s| s.non_terminal()) {
                    if !accessible.contains(name) {
                        accessible.insert(name.to_string());
                        changed = true;
                    }
                }
            }
        }
        accessible
    }

    pub fn remove_non_productive(&self) -> Grammar {
        let productive = self.productive_set();
        Grammar {
            non_terminals: self
                .non_terminal_iter()
                .filter(|nt| productive.contains(*nt))
                .cloned()
                .collect(),
            productions: self
                .productions
                .iter()
                .filter(|p| {
                    productive.contains(&p.left)
                        && p.right
                            .iter()
                            .all(|s| Self::is_productive_symbol(s, &productive))
                })
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    pub fn remove_inaccessible(&self) -> Grammar {
        let accessible = self.accessible_set();
        Grammar {
            non_terminals: self
                .non_terminal_iter()
                .filter(|nt| accessible.contains(*nt))
                .cloned()
                .collect(),
            productions: self
                .productions
                .iter()
                .filter(|p| accessible.contains(&p.left))
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Productive pass first: accessibility is computed on what survives it.
    pub fn remove_useless(&self) -> Grammar {
        self.remove_non_productive().remove_inaccessible()
    }
}
