use crowbook_text_processing::escape;

use super::{Grammar, Symbol};

fn symbol_to_latex(symbol: &Symbol) -> String {
    match symbol {
        Symbol::NonTerminal(name) => escape::tex(name.as_str()).to_string(),
        Symbol::Terminal(name) => format!("\\text{{{}}}", escape::tex(name.as_str())),
        Symbol::Epsilon => "\\epsilon".to_string(),
    }
}

/// All bodies of one left side.
#[derive(Debug, Clone)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<&'a [Symbol]>,
}

impl ProductionOutput<'_> {
    fn right_to_plaintext(right: &[Symbol]) -> String {
        right
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_plaintext(&self, left_width: usize) -> String {
        let pad = " ".repeat(left_width.saturating_sub(self.left.chars().count()));
        self.rights
            .iter()
            .enumerate()
            .map(|(i, right)| {
                let right = Self::right_to_plaintext(right);
                if i == 0 {
                    format!("{}{} -> {}", pad, self.left, right)
                } else {
                    format!("{}  | {}", " ".repeat(left_width), right)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let rights = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(symbol_to_latex)
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");
        format!("{} & \\rightarrow & {}", escape::tex(self.left), rights)
    }
}

pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_width = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|p| p.to_plaintext(left_width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let rows = self
            .productions
            .iter()
            .map(|p| p.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n");
        format!("\\[\\begin{{array}}{{cll}}\n{}\n\\end{{array}}\\]", rows)
    }
}

/// Nullable non-terminals of a grammar, in declaration order.
pub struct NullableOutput<'a> {
    pub names: Vec<&'a str>,
}

impl NullableOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        self.names.join(", ")
    }

    pub fn to_latex(&self) -> String {
        let names = self
            .names
            .iter()
            .map(|n| escape::tex(*n).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("$\\{{{}\\}}$", names)
    }
}

impl Grammar {
    /// Bodies grouped by left side, in non-terminal order.
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .non_terminal_iter()
            .map(|nt| ProductionOutput {
                left: nt.as_str(),
                rights: self.productions_of(nt).map(|p| p.right.as_slice()).collect(),
            })
            .filter(|p| !p.rights.is_empty())
            .collect();
        ProductionOutputVec { productions }
    }

    pub fn to_nullable_output(&self) -> NullableOutput {
        let nullable = self.nullable_set();
        NullableOutput {
            names: self
                .non_terminal_iter()
                .filter(|nt| nullable.contains(*nt))
                .map(|nt| nt.as_str())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Grammar;

    #[test]
    fn plaintext_is_aligned_and_grouped() {
        let g = Grammar::parse("S -> a B | b\nBB -> b").unwrap();
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            " S -> a B\n    | b\nBB -> b"
        );
    }

    #[test]
    fn latex_marks_terminals_and_epsilon() {
        let g = Grammar::parse("S -> a S | ε").unwrap();
        let latex = g.to_production_output_vec().to_latex();
        assert!(latex.contains("S & \\rightarrow & \\text{a} \\ S \\mid \\epsilon"));
        assert!(latex.starts_with("\\[\\begin{array}{cll}\n"));
    }

    #[test]
    fn nullable_listing() {
        let g = Grammar::parse("S -> A B\nA -> ε | a\nB -> A").unwrap();
        let nullable = g.to_nullable_output();
        assert_eq!(nullable.to_plaintext(), "S, A, B");
        assert_eq!(nullable.to_latex(), "$\\{S, A, B\\}$");
    }
}
