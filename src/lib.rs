use std::fmt::Display;
use std::hash::Hash;

pub mod error;
pub mod first;
pub mod follow;
pub mod grammar;
pub mod production;
pub mod table;

mod render;
mod utils;

pub use crate::error::{GrammarError, Result};
pub use crate::first::{FirstItem, FirstSets};
pub use crate::follow::{FollowItem, FollowSets};
pub use crate::grammar::Grammar;
pub use crate::production::{Production, Symbol};
pub use crate::table::ParseTable;

/// The token that marks an epsilon alternative in grammar text, and the
/// rendering of epsilon in FIRST sets.
pub const EPSILON: &str = "ε";

/// The rendering of the end-of-input marker in FOLLOW sets and
/// parsing-table columns.
pub const END_MARK: &str = "$";

/// Everything the pipeline derives from one grammar.
#[derive(Clone, Debug)]
pub struct Analysis<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> {
    pub grammar: Grammar<N, T>,
    pub first: FirstSets<N, T>,
    pub follow: FollowSets<N, T>,
    pub table: ParseTable<N, T>,
}

impl<N, T> Analysis<N, T>
where
    N: Hash + PartialEq + Eq + Clone + Display,
    T: Hash + PartialEq + Eq + Clone + Display,
{
    /// Runs the pipeline on a grammar that is already built: FIRST sets,
    /// then FOLLOW sets, then the parsing table.
    pub fn from_grammar(grammar: Grammar<N, T>) -> Result<Self> {
        let first = FirstSets::new(&grammar);
        let follow = FollowSets::new(&grammar, &first);
        let table = ParseTable::new(&grammar, &first, &follow)?;
        Ok(Analysis {
            grammar,
            first,
            follow,
            table,
        })
    }
}

/// Reads a grammar from text and runs the whole pipeline on it.
///
/// The start symbol is the head of the first rule, and the result bundles
/// the grammar with its FIRST sets, FOLLOW sets, and parsing table.
pub fn analyze(text: &str) -> Result<Analysis<String, String>> {
    Analysis::from_grammar(Grammar::parse(text)?)
}
