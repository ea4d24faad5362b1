use std::collections::HashSet;
use std::fmt;

use super::{GrammarError, EPSILON};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    NonTerminal(String),
    Terminal(String),
    Epsilon,
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::NonTerminal(name) | Symbol::Terminal(name) => name.as_str(),
            Symbol::Epsilon => EPSILON,
        }
    }

    pub fn non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub left: String,
    pub right: Vec<Symbol>,
}

impl Production {
    pub fn new(left: &str, right: Vec<Symbol>) -> Self {
        Self {
            left: left.to_string(),
            right,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.right == [Symbol::Epsilon]
    }

    /// `A -> B` with B a non-terminal.
    pub fn is_unit(&self) -> bool {
        self.right.len() == 1 && self.right[0].non_terminal().is_some()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let right = self
            .right
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} -> {}", self.left, right)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub non_terminals: Vec<String>,
    pub terminals: Vec<String>,
    pub productions: Vec<Production>,
    pub start_symbol: String,
}

impl Grammar {
    pub fn new(start_symbol: &str) -> Self {
        let mut g = Self {
            non_terminals: Vec::new(),
            terminals: Vec::new(),
            productions: Vec::new(),
            start_symbol: start_symbol.to_string(),
        };
        g.add_non_terminal(start_symbol);
        g
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.terminals.iter()
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.non_terminals.iter()
    }

    pub fn productions_of<'a>(&'a self, left: &'a str) -> impl Iterator<Item = &'a Production> {
        self.productions.iter().filter(move |p| p.left == left)
    }

    pub fn is_non_terminal(&self, name: &str) -> bool {
        self.non_terminals.iter().any(|n| n == name)
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.iter().any(|t| t == name)
    }

    pub fn contains_symbol(&self, name: &str) -> bool {
        self.is_non_terminal(name) || self.is_terminal(name)
    }

    pub fn add_non_terminal(&mut self, name: &str) -> Symbol {
        if !self.is_non_terminal(name) {
            self.non_terminals.push(name.to_string());
        }
        Symbol::NonTerminal(name.to_string())
    }

    pub fn add_terminal(&mut self, name: &str) -> Symbol {
        if !self.is_terminal(name) {
            self.terminals.push(name.to_string());
        }
        Symbol::Terminal(name.to_string())
    }

    pub fn add_production(&mut self, left: &str, right: Vec<Symbol>) {
        self.productions.push(Production::new(left, right));
    }

    /// Appends `'` to `name` until it names no symbol of the grammar.
    pub fn get_symbol_prime_name(&self, mut name: String) -> String {
        while self.contains_symbol(&name) || name == EPSILON {
            name.push('\'');
        }
        name
    }

    /// Drops repeated productions, keeping the first occurrence.
    pub fn dedup_productions(&mut self) {
        let mut seen: HashSet<Production> = HashSet::new();
        self.productions.retain(|p| seen.insert(p.clone()));
    }

    pub fn validate(&self) -> Result<(), GrammarError> {
        let malformed = |msg: String| Err(GrammarError::MalformedGrammar(msg));

        let mut non_terminals: HashSet<&str> = HashSet::new();
        for nt in &self.non_terminals {
            if nt == EPSILON {
                return malformed(format!("\"{}\" cannot be declared as a non-terminal", EPSILON));
            }
            if !non_terminals.insert(nt.as_str()) {
                return malformed(format!("non-terminal \"{}\" is declared twice", nt));
            }
        }

        let mut terminals: HashSet<&str> = HashSet::new();
        for t in &self.terminals {
            if t == EPSILON {
                return malformed(format!("\"{}\" cannot be declared as a terminal", EPSILON));
            }
            if non_terminals.contains(t.as_str()) {
                return malformed(format!("\"{}\" is both a terminal and a non-terminal", t));
            }
            if !terminals.insert(t.as_str()) {
                return malformed(format!("terminal \"{}\" is declared twice", t));
            }
        }

        if !non_terminals.contains(self.start_symbol.as_str()) {
            return malformed(format!(
                "start symbol \"{}\" is not a non-terminal",
                self.start_symbol
            ));
        }

        for p in &self.productions {
            if !non_terminals.contains(p.left.as_str()) {
                return malformed(format!("left side of \"{}\" is not a non-terminal", p));
            }
            if p.right.is_empty() {
                return malformed(format!("\"{}\" has an empty right side", p.left));
            }
            for symbol in &p.right {
                let declared = match symbol {
                    Symbol::NonTerminal(name) => non_terminals.contains(name.as_str()),
                    Symbol::Terminal(name) => terminals.contains(name.as_str()),
                    Symbol::Epsilon => p.right.len() == 1,
                };
                if !declared {
                    return malformed(format!("\"{}\" is not allowed in \"{}\"", symbol, p));
                }
            }
        }

        Ok(())
    }
}
