use std::collections::HashSet;

use super::{Grammar, GrammarError, Production, Symbol};

/// Bodies with more nullable positions than this are rejected: each one
/// doubles the number of variants.
pub const MAX_NULLABLE_POSITIONS: usize = 16;

impl Grammar {
    /// Non-terminals that derive the empty string.
    pub fn nullable_set(&self) -> HashSet<String> {
        let mut nullable: HashSet<String> = HashSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for p in &self.productions {
                if nullable.contains(&p.left) {
                    continue;
                }
                let derives_empty = p.right.iter().all(|s| match s {
                    Symbol::Epsilon => true,
                    Symbol::NonTerminal(name) => nullable.contains(name),
                    Symbol::Terminal(_) => false,
                });
                if derives_empty {
                    nullable.insert(p.left.clone());
                    changed = true;
                }
            }
        }
        nullable
    }

    /// Rewrites every production so that no non-terminal derives ε.
    ///
    /// Each production with `k` nullable positions expands into up to `2^k`
    /// variants, one per subset of those positions left out. `k` is capped at
    /// [`MAX_NULLABLE_POSITIONS`].
    pub fn eliminate_epsilon(&self) -> Result<Grammar, GrammarError> {
        let nullable = self.nullable_set();

        let mut productions: Vec<Production> = Vec::new();
        for p in &self.productions {
            if p.is_epsilon() {
                continue;
            }

            let idx: Vec<usize> = p
                .right
                .iter()
                .enumerate()
                .filter(|(_, s)| s.non_terminal().map_or(false, |n| nullable.contains(n)))
                .map(|(i, _)| i)
                .collect();
            if idx.len() > MAX_NULLABLE_POSITIONS {
                return Err(GrammarError::TooManyNullablePositions {
                    production: p.to_string(),
                    positions: idx.len(),
                });
            }

            productions.push(p.clone());
            for mask in 1u32..(1u32 << idx.len()) {
                // bit b of the mask drops position idx[b]
                let kept = |i: usize| match idx.iter().position(|&n| n == i) {
                    Some(bit) => mask & (1u32 << bit) == 0,
                    None => true,
                };
                let right: Vec<Symbol> = p
                    .right
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| kept(*i))
                    .map(|(_, s)| s.clone())
                    .collect();
                if !right.is_empty() {
                    productions.push(Production {
                        left: p.left.clone(),
                        right,
                    });
                }
            }
        }

        let mut g = Grammar {
            productions,
            ..self.clone()
        };
        g.dedup_productions();
        Ok(g)
    }

    /// Adds a fresh start symbol `S'` with `S' -> S | ε`.
    pub(super) fn augment_start(&self) -> Grammar {
        let mut g = self.clone();
        let old_start = g.start_symbol.clone();
        let new_start = g.get_symbol_prime_name(old_start.clone());
        g.non_terminals.insert(0, new_start.clone());
        g.productions.insert(
            0,
            Production::new(&new_start, vec![Symbol::NonTerminal(old_start)]),
        );
        g.productions
            .insert(1, Production::new(&new_start, vec![Symbol::Epsilon]));
        g.start_symbol = new_start;
        g
    }
}
