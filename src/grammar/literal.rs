use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Grammar, GrammarError, Production, Symbol, EPSILON};

/// The grammar as it is exchanged with the outside world: plain names,
/// symbol kinds implied by `VN` / `VT` membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarLiteral {
    #[serde(rename = "VN")]
    pub non_terminals: Vec<String>,
    #[serde(rename = "VT")]
    pub terminals: Vec<String>,
    #[serde(rename = "P")]
    pub productions: Vec<(String, Vec<String>)>,
    #[serde(rename = "S")]
    pub start_symbol: String,
}

impl Grammar {
    pub fn from_literal(literal: &GrammarLiteral) -> Result<Self, GrammarError> {
        let non_terminals: HashSet<&str> =
            literal.non_terminals.iter().map(|s| s.as_str()).collect();
        let terminals: HashSet<&str> = literal.terminals.iter().map(|s| s.as_str()).collect();

        let mut productions = Vec::with_capacity(literal.productions.len());
        for (left, right) in &literal.productions {
            let right = right
                .iter()
                .map(|s| {
                    if s == EPSILON {
                        Ok(Symbol::Epsilon)
                    } else if non_terminals.contains(s.as_str()) {
                        Ok(Symbol::NonTerminal(s.clone()))
                    } else if terminals.contains(s.as_str()) {
                        Ok(Symbol::Terminal(s.clone()))
                    } else {
                        Err(GrammarError::MalformedGrammar(format!(
                            "\"{}\" in a production of \"{}\" is neither a terminal nor a non-terminal",
                            s, left
                        )))
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            productions.push(Production {
                left: left.clone(),
                right,
            });
        }

        let g = Grammar {
            non_terminals: literal.non_terminals.clone(),
            terminals: literal.terminals.clone(),
            productions,
            start_symbol: literal.start_symbol.clone(),
        };
        g.validate()?;
        Ok(g)
    }

    pub fn to_literal(&self) -> GrammarLiteral {
        GrammarLiteral {
            non_terminals: self.non_terminals.clone(),
            terminals: self.terminals.clone(),
            productions: self
                .productions
                .iter()
                .map(|p| {
                    (
                        p.left.clone(),
                        p.right.iter().map(|s| s.name().to_string()).collect(),
                    )
                })
                .collect(),
            start_symbol: self.start_symbol.clone(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let literal: GrammarLiteral = serde_json::from_str(json)?;
        Self::from_literal(&literal)
    }

    pub fn to_json(&self) -> Result<String, GrammarError> {
        Ok(serde_json::to_string_pretty(&self.to_literal())?)
    }

    /// JSON literal if the input starts with `{`, the text form otherwise.
    pub fn load(input: &str) -> Result<Self, GrammarError> {
        if input.trim_start().starts_with('{') {
            Self::from_json(input)
        } else {
            Self::parse(input)
        }
    }
}
