use serde::Deserialize;

use super::{binarize::SymbolAllocator, Grammar, GrammarError, Production, Symbol};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Keep ε in the language through a fresh start symbol `S' -> S | ε`.
    pub preserve_empty_string: bool,
    /// Prefix of the synthesized non-terminals.
    pub fresh_prefix: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            preserve_empty_string: false,
            fresh_prefix: "X".to_string(),
        }
    }
}

impl Grammar {
    pub fn normalize(&self) -> Result<Grammar, GrammarError> {
        self.normalize_with(&NormalizeOptions::default())
    }

    /// Epsilon, unit and useless-symbol elimination followed by binarization.
    /// Nothing is returned unless every phase succeeds.
    pub fn normalize_with(&self, options: &NormalizeOptions) -> Result<Grammar, GrammarError> {
        self.validate()?;

        let mut g = self.eliminate_epsilon()?;
        if options.preserve_empty_string && self.nullable_set().contains(&self.start_symbol) {
            g = g.augment_start();
        }
        debug_assert!(g.validate().is_ok());

        let g = g.eliminate_unit();
        debug_assert!(g.validate().is_ok());

        let g = g.remove_useless();
        if !g.is_non_terminal(&g.start_symbol) {
            return Err(GrammarError::EmptyGrammarAfterPruning(g.start_symbol));
        }
        debug_assert!(g.validate().is_ok());

        let mut allocator = SymbolAllocator::new(&options.fresh_prefix);
        let g = g.binarize(&mut allocator)?;
        debug_assert!(g.validate().is_ok());

        Ok(g)
    }

    /// Productions that are neither `A -> B C` nor `A -> a`. `S -> ε` is
    /// accepted for the start symbol when nothing derives the start symbol.
    pub fn cnf_violations(&self) -> Vec<&Production> {
        let start_in_body = self
            .productions
            .iter()
            .any(|p| p.right.iter().any(|s| s.non_terminal() == Some(self.start_symbol.as_str())));

        self.productions
            .iter()
            .filter(|p| match p.right.as_slice() {
                [Symbol::Terminal(_)] => false,
                [Symbol::NonTerminal(_), Symbol::NonTerminal(_)] => false,
                [Symbol::Epsilon] => p.left != self.start_symbol || start_in_body,
                _ => true,
            })
            .collect()
    }

    pub fn is_cnf(&self) -> bool {
        self.cnf_violations().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::NormalizeOptions;
    use crate::Grammar;

    #[test]
    fn options_from_partial_json() {
        let o: NormalizeOptions = serde_json::from_str(r#"{"preserve_empty_string": true}"#).unwrap();
        assert!(o.preserve_empty_string);
        assert_eq!(o.fresh_prefix, "X");
    }

    #[test]
    fn violations_are_listed() {
        let g = Grammar::parse("S -> A | a B | A B\nA -> a\nB -> ε").unwrap();
        let violations: Vec<String> = g.cnf_violations().iter().map(|p| p.to_string()).collect();
        assert_eq!(violations, vec!["S -> A", "S -> a B", "B -> ε"]);
        assert!(!g.is_cnf());
    }
}
