use std::borrow::Borrow;
use std::fmt::Display;
use std::hash::Hash;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use crate::error::{GrammarError, Result};
use crate::first::FirstSets;
use crate::follow::{FollowItem, FollowSets};
use crate::grammar::Grammar;
use crate::production::Production;

/// An LL(1) predictive parsing table: one row per non-terminal, keyed by
/// the lookahead that selects a production.
#[derive(Clone, Debug)]
pub struct ParseTable<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> {
    rows: IndexMap<N, IndexMap<FollowItem<T>, Rc<Production<N, T>>>>,
}

impl<N, T> ParseTable<N, T>
where
    N: Hash + PartialEq + Eq + Clone + Display,
    T: Hash + PartialEq + Eq + Clone + Display,
{
    /// Fills the table from the directing set of every production: the
    /// terminals that can begin it, plus the head's FOLLOW set when it can
    /// derive epsilon. Epsilon never becomes a column; a nullable
    /// production is entered under the lookaheads that may follow its head,
    /// so lookup needs no fallback.
    ///
    /// Fails with [`GrammarError::Conflict`] at the first cell two
    /// productions both claim.
    pub fn new(
        grammar: &Grammar<N, T>,
        first: &FirstSets<N, T>,
        follow: &FollowSets<N, T>,
    ) -> Result<Self> {
        let mut rows: IndexMap<N, IndexMap<FollowItem<T>, Rc<Production<N, T>>>> = grammar
            .nonterminals()
            .map(|n| (n.clone(), IndexMap::new()))
            .collect();

        for (head, alternatives) in grammar.rules() {
            for production in alternatives {
                let mut directing: IndexSet<FollowItem<T>> = IndexSet::new();
                let nullable = first.sequence(&production.rhs, |t| {
                    directing.insert(FollowItem::Terminal(t.clone()));
                });
                if nullable {
                    if let Some(set) = follow.get(head) {
                        directing.extend(set.iter().cloned());
                    }
                }

                let row = rows.get_mut(head).unwrap();
                for lookahead in directing {
                    if row.contains_key(&lookahead) {
                        return Err(GrammarError::Conflict {
                            nonterminal: head.to_string(),
                            terminal: lookahead.to_string(),
                        });
                    }
                    row.insert(lookahead, Rc::clone(production));
                }
            }
        }

        Ok(ParseTable { rows })
    }
}

impl<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> ParseTable<N, T> {
    /// The production selected for `nonterminal` on `lookahead`, if any.
    pub fn get<Q: ?Sized>(
        &self,
        nonterminal: &Q,
        lookahead: &FollowItem<T>,
    ) -> Option<&Production<N, T>>
    where
        Q: Hash + Eq,
        N: Borrow<Q>,
    {
        self.rows
            .get(nonterminal)
            .and_then(|row| row.get(lookahead))
            .map(|production| production.as_ref())
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &N> {
        self.rows.keys()
    }

    /// Iterates over the filled cells of `nonterminal`'s row, in the order
    /// they were entered.
    pub fn row<Q: ?Sized>(
        &self,
        nonterminal: &Q,
    ) -> impl Iterator<Item = (&FollowItem<T>, &Production<N, T>)>
    where
        Q: Hash + Eq,
        N: Borrow<Q>,
    {
        self.rows.get(nonterminal).into_iter().flat_map(|row| {
            row.iter()
                .map(|(lookahead, production)| (lookahead, production.as_ref()))
        })
    }
}
