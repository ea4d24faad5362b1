pub mod binarize;
pub mod eliminate_epsilon;
pub mod eliminate_unit;
pub mod error;
pub mod grammar;
pub mod literal;
pub mod normalize;
pub mod parse;
pub mod pretty_print;
pub mod useless_symbols;

pub use error::GrammarError;
pub use grammar::{Grammar, Production, Symbol};
pub use literal::GrammarLiteral;
pub use normalize::NormalizeOptions;

pub const EPSILON: &str = "ε";
