extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{Grammar, GrammarError, NormalizeOptions};

/// The worked example: `D` is unreachable, `C` is nullable, `B -> A` is a unit production.
pub const EXAMPLE_GRAMMAR: &str = "S -> b A | B C
A -> a | a S | b C a C a
B -> A | b S | b C A a
C -> ε | A B
D -> A B";

fn error_to_json(e: &GrammarError) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn normalize_to_json(grammar: &str) -> String {
    match Grammar::load(grammar)
        .and_then(|g| g.normalize())
        .and_then(|g| g.to_json())
    {
        Ok(json) => json,
        Err(e) => error_to_json(&e),
    }
}

#[wasm_bindgen]
pub fn normalize_with_options_to_json(grammar: &str, options: &str) -> String {
    let options: Result<NormalizeOptions, GrammarError> =
        serde_json::from_str(options).map_err(GrammarError::from);
    match options.and_then(|o| Grammar::load(grammar)?.normalize_with(&o)) {
        Ok(g) => g.to_json().unwrap_or_else(|e| error_to_json(&e)),
        Err(e) => error_to_json(&e),
    }
}


#[cfg(test)]
mod normalize_tests {
    use std::collections::{HashMap, HashSet};

    use crate::grammar::{GrammarError, Symbol};
    use crate::{Grammar, NormalizeOptions, EXAMPLE_GRAMMAR};

    /// Every terminal string of at most `n` symbols the start symbol derives.
    fn sentences_up_to(g: &Grammar, n: usize) -> HashSet<Vec<String>> {
        let mut lang: HashMap<String, HashSet<Vec<String>>> = g
            .non_terminals
            .iter()
            .map(|nt| (nt.clone(), HashSet::new()))
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for p in &g.productions {
                let mut partial: HashSet<Vec<String>> = HashSet::from([Vec::new()]);
                for s in &p.right {
                    let options: HashSet<Vec<String>> = match s {
                        Symbol::Epsilon => HashSet::from([Vec::new()]),
                        Symbol::Terminal(t) => HashSet::from([vec![t.clone()]]),
                        Symbol::NonTerminal(a) => lang[a].clone(),
                    };
                    partial = partial
                        .iter()
                        .flat_map(|x| {
                            options
                                .iter()
                                .map(move |y| x.iter().chain(y).cloned().collect::<Vec<_>>())
                        })
                        .filter(|w| w.len() <= n)
                        .collect();
                }
                let entry = lang.get_mut(&p.left).unwrap();
                for w in partial {
                    changed |= entry.insert(w);
                }
            }
        }

        lang.remove(&g.start_symbol).unwrap_or_default()
    }

    fn word(s: &str) -> Vec<String> {
        s.chars().map(|c| c.to_string()).collect()
    }

    fn example() -> Grammar {
        Grammar::parse(EXAMPLE_GRAMMAR).unwrap()
    }

    #[test]
    fn example_is_cnf() {
        let cnf = example().normalize().unwrap();
        assert!(cnf.is_cnf(), "{:?}", cnf.cnf_violations());
        assert!(cnf.productions.iter().all(|p| !p.is_unit()));
        assert!(cnf.productions.iter().all(|p| !p.is_epsilon()));
        assert!(cnf.validate().is_ok());
    }

    #[test]
    fn example_keeps_ba() {
        let cnf = example().normalize().unwrap();
        assert!(sentences_up_to(&cnf, 2).contains(&word("ba")));
    }

    #[test]
    fn example_drops_unreachable_d() {
        let cnf = example().normalize().unwrap();
        assert!(!cnf.is_non_terminal("D"));
        assert!(cnf.productions.iter().all(|p| {
            p.left != "D" && p.right.iter().all(|s| s.non_terminal() != Some("D"))
        }));
        assert_eq!(cnf.terminals, vec!["b", "a"]);
    }

    #[test]
    fn example_language_is_preserved() {
        let g = example();
        let cnf = g.normalize().unwrap();

        let mut expected = sentences_up_to(&g, 7);
        expected.remove(&Vec::new());
        assert!(!expected.is_empty());
        assert_eq!(sentences_up_to(&cnf, 7), expected);
    }

    #[test]
    fn output_has_no_useless_symbols() {
        let cnf = example().normalize().unwrap();
        let all: HashSet<String> = cnf.non_terminals.iter().cloned().collect();
        assert_eq!(cnf.productive_set(), all);
        assert_eq!(cnf.accessible_set(), all);
        assert_eq!(cnf.remove_useless(), cnf);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = example().normalize().unwrap();
        let twice = once.normalize().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn allocator_is_scoped_to_one_call() {
        let g = example();
        assert_eq!(g.normalize().unwrap(), g.normalize().unwrap());
    }

    #[test]
    fn binary_grammar_only_isolates_terminals() {
        let g = Grammar::parse("A -> a B\nB -> b").unwrap();
        let cnf = g.normalize().unwrap();
        let listing: Vec<String> = cnf.productions.iter().map(|p| p.to_string()).collect();
        assert_eq!(listing, vec!["X1 -> a", "A -> X1 B", "B -> b"]);
    }

    #[test]
    fn custom_fresh_prefix() {
        let g = Grammar::parse("A -> a B\nB -> b").unwrap();
        let options = NormalizeOptions {
            fresh_prefix: "N".to_string(),
            ..NormalizeOptions::default()
        };
        let cnf = g.normalize_with(&options).unwrap();
        assert!(cnf.is_non_terminal("N1"));
    }

    #[test]
    fn empty_language_is_reported() {
        let g = Grammar::parse("S -> a S\nA -> a").unwrap();
        assert_eq!(
            g.normalize(),
            Err(GrammarError::EmptyGrammarAfterPruning("S".to_string()))
        );
    }

    #[test]
    fn malformed_grammar_is_rejected_before_normalizing() {
        let g = Grammar {
            non_terminals: vec!["S".to_string()],
            terminals: vec!["a".to_string()],
            productions: vec![crate::grammar::Production::new(
                "T",
                vec![Symbol::Terminal("a".to_string())],
            )],
            start_symbol: "S".to_string(),
        };
        assert!(matches!(
            g.normalize(),
            Err(GrammarError::MalformedGrammar(_))
        ));
    }

    #[test]
    fn collision_with_fresh_names_aborts() {
        let g = Grammar::parse("S -> X1 b\nX1 -> a").unwrap();
        assert_eq!(
            g.normalize(),
            Err(GrammarError::SymbolNamespaceCollision("X1".to_string()))
        );
    }

    #[test]
    fn empty_string_dropped_by_default() {
        let g = Grammar::parse("S -> a S b | ε").unwrap();
        let cnf = g.normalize().unwrap();
        assert!(cnf.productions.iter().all(|p| !p.is_epsilon()));
        assert!(!sentences_up_to(&cnf, 4).contains(&Vec::new()));
        assert!(sentences_up_to(&cnf, 4).contains(&word("aabb")));
    }

    #[test]
    fn empty_string_kept_through_new_start() {
        let g = Grammar::parse("S -> a S b | ε").unwrap();
        let options = NormalizeOptions {
            preserve_empty_string: true,
            ..NormalizeOptions::default()
        };
        let cnf = g.normalize_with(&options).unwrap();

        assert_eq!(cnf.start_symbol, "S'");
        assert!(cnf.is_cnf(), "{:?}", cnf.cnf_violations());
        assert_eq!(sentences_up_to(&cnf, 6), sentences_up_to(&g, 6));
    }

    #[test]
    fn json_entry_point() {
        let out = crate::normalize_to_json(EXAMPLE_GRAMMAR);
        let cnf = Grammar::from_json(&out).unwrap();
        assert!(cnf.is_cnf());

        let out = crate::normalize_to_json("S -> S a");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["error"].as_str().unwrap().contains("empty"));
    }

    #[test]
    fn json_entry_point_with_options() {
        let out = crate::normalize_with_options_to_json(
            "S -> a | ε",
            r#"{"preserve_empty_string": true}"#,
        );
        let cnf = Grammar::from_json(&out).unwrap();
        assert_eq!(cnf.productions_of("S'").count(), 2);
    }
}
