use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    // A production, symbol or start symbol breaks the grammar invariants
    MalformedGrammar(String),
    // A body with too many nullable positions to expand
    TooManyNullablePositions { production: String, positions: usize },
    // A synthesized non-terminal would shadow an existing symbol
    SymbolNamespaceCollision(String),
    // The start symbol derives no terminal string
    EmptyGrammarAfterPruning(String),
    // The text form of a grammar could not be read
    Syntax(String),
    // The JSON form of a grammar could not be read or written
    Json(String),
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::MalformedGrammar(msg) => write!(f, "Malformed grammar: {}", msg),
            GrammarError::TooManyNullablePositions {
                production,
                positions,
            } => write!(
                f,
                "`{}` has {} nullable symbols, at most {} are supported",
                production,
                positions,
                super::eliminate_epsilon::MAX_NULLABLE_POSITIONS
            ),
            GrammarError::SymbolNamespaceCollision(name) => write!(
                f,
                "Cannot introduce non-terminal `{}`: the name is already taken",
                name
            ),
            GrammarError::EmptyGrammarAfterPruning(start) => write!(
                f,
                "Start symbol `{}` derives no terminal string, the language is empty",
                start
            ),
            GrammarError::Syntax(msg) => write!(f, "{}", msg),
            GrammarError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for GrammarError {}

impl From<serde_json::Error> for GrammarError {
    fn from(e: serde_json::Error) -> Self {
        GrammarError::Json(e.to_string())
    }
}
