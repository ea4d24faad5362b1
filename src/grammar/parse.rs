use crate::Grammar;

use super::{GrammarError, Symbol, EPSILON};

impl Grammar {
    /// Reads the `A -> x y | z` text form. Left sides are the non-terminals,
    /// the first one is the start symbol, every other token is a terminal.
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let syntax = |line: usize, msg: &str| GrammarError::Syntax(format!("Line {}: {}", line, msg));

        let mut raw_productions: Vec<(&str, &str)> = Vec::new();

        let mut previous_left: Option<&str> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(syntax(i + 1, "too many \"->\""));
            }
            let (left, rights): (&str, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(syntax(i + 1, "empty left side"));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(syntax(i + 1, "left side contains whitespace"));
                } else if left_str == EPSILON {
                    return Err(syntax(i + 1, "epsilon on the left side"));
                }
                (left_str, parts[1].trim())
            } else {
                match (previous_left, parts[0].trim().strip_prefix('|')) {
                    (Some(left), Some(rest)) => (left, rest.trim()),
                    (None, _) => return Err(syntax(i + 1, "cannot find left side")),
                    (Some(_), None) => return Err(syntax(i + 1, "expected \"->\" or \"|\"")),
                }
            };

            previous_left = Some(left);

            raw_productions.push((left, rights));
        }

        let start = match raw_productions.first() {
            Some((left, _)) => *left,
            None => return Err(GrammarError::Syntax("No productions found".to_string())),
        };

        let mut g = Self::new(start);
        for (left, _) in &raw_productions {
            g.add_non_terminal(left);
        }

        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols: Vec<Symbol> = right
                    .split_whitespace()
                    .map(|s| {
                        if s == EPSILON {
                            Symbol::Epsilon
                        } else if g.is_non_terminal(s) {
                            Symbol::NonTerminal(s.to_string())
                        } else {
                            g.add_terminal(s)
                        }
                    })
                    .collect();
                // an empty alternative is an epsilon body
                let symbols = if symbols.is_empty() {
                    vec![Symbol::Epsilon]
                } else {
                    symbols
                };
                g.add_production(left, symbols);
            }
        }

        g.validate()?;
        Ok(g)
    }
}
