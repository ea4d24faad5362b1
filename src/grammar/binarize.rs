use std::collections::HashMap;

use super::{Grammar, GrammarError, Production, Symbol};

/// Mints the synthesized non-terminals of one normalization: `X1`, `X2`, ...
#[derive(Debug, Clone)]
pub struct SymbolAllocator {
    prefix: String,
    counter: usize,
}

impl SymbolAllocator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: 0,
        }
    }

    /// Registers the next name in `g`, failing if `g` already uses it.
    pub fn fresh(&mut self, g: &mut Grammar) -> Result<Symbol, GrammarError> {
        self.counter += 1;
        let name = format!("{}{}", self.prefix, self.counter);
        if g.contains_symbol(&name) {
            return Err(GrammarError::SymbolNamespaceCollision(name));
        }
        Ok(g.add_non_terminal(&name))
    }
}

impl Grammar {
    /// Brings every body into the `A -> B C` / `A -> a` shape.
    ///
    /// Terminals inside longer bodies get one dedicated non-terminal each,
    /// long bodies are folded from the left into fresh pairs.
    pub fn binarize(&self, allocator: &mut SymbolAllocator) -> Result<Grammar, GrammarError> {
        let mut g = Grammar {
            productions: Vec::new(),
            ..self.clone()
        };
        let mut terminal_vars: HashMap<String, Symbol> = HashMap::new();

        for p in &self.productions {
            if p.right.len() == 1 {
                // `A -> a`, or the `S -> ε` of an augmented start
                g.productions.push(p.clone());
                continue;
            }

            let mut right: Vec<Symbol> = Vec::with_capacity(p.right.len());
            for symbol in &p.right {
                match symbol {
                    Symbol::Terminal(name) => {
                        let var = match terminal_vars.get(name) {
                            Some(var) => var.clone(),
                            None => {
                                let var = allocator.fresh(&mut g)?;
                                g.productions
                                    .push(Production::new(var.name(), vec![symbol.clone()]));
                                terminal_vars.insert(name.clone(), var.clone());
                                var
                            }
                        };
                        right.push(var);
                    }
                    _ => right.push(symbol.clone()),
                }
            }

            while right.len() > 2 {
                let var = allocator.fresh(&mut g)?;
                let pair: Vec<Symbol> = right.drain(..2).collect();
                g.productions.push(Production::new(var.name(), pair));
                right.insert(0, var);
            }
            g.productions.push(Production {
                left: p.left.clone(),
                right,
            });
        }

        Ok(g)
    }
}
