use std::fmt::{Display, Formatter};

/// Errors produced while reading a grammar or building its parsing table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrammarError {
    /// A rule line with no `->` separator. `line` is 1-based and counts
    /// every input line, including the skipped ones.
    Syntax { line: usize },
    /// A rule line whose head or body is empty after trimming.
    InvalidRule { line: usize },
    /// Two productions of the same head share a directing terminal, so the
    /// grammar is not LL(1).
    Conflict { nonterminal: String, terminal: String },
    /// The grammar text contained no rules at all.
    EmptyGrammar,
    /// A right-hand side referenced a non-terminal that no rule declares.
    Undeclared { symbol: String },
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::Syntax { line } => {
                write!(f, "Syntax error in grammar at line {}: Missing '->'.", line)
            }
            GrammarError::InvalidRule { line } => write!(
                f,
                "Invalid rule at line {}: Non-terminal or productions missing.",
                line
            ),
            GrammarError::Conflict {
                nonterminal,
                terminal,
            } => write!(
                f,
                "Conflict in parsing table at {}, {}.",
                nonterminal, terminal
            ),
            GrammarError::EmptyGrammar => write!(f, "Grammar is empty."),
            GrammarError::Undeclared { symbol } => {
                write!(f, "No rule declares the non-terminal {}.", symbol)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

pub type Result<T> = std::result::Result<T, GrammarError>;
