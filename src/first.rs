use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::grammar::Grammar;
use crate::production::Symbol;
use crate::utils::saturate;
use crate::EPSILON;

/// A member of a FIRST set: a terminal that can begin a derivation, or
/// epsilon when the derivation can be empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FirstItem<T> {
    Terminal(T),
    Epsilon,
}

impl<T: Display> Display for FirstItem<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FirstItem::Terminal(t) => write!(f, "{}", t),
            FirstItem::Epsilon => f.write_str(EPSILON),
        }
    }
}

/// FIRST sets for every non-terminal of a grammar.
#[derive(Clone, Debug)]
pub struct FirstSets<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> {
    sets: IndexMap<N, IndexSet<FirstItem<T>>>,
}

impl<N, T> FirstSets<N, T>
where
    N: Hash + PartialEq + Eq + Clone,
    T: Hash + PartialEq + Eq + Clone,
{
    /// Computes FIRST sets by growing them until no production adds a new
    /// member. Each pass walks every production and merges what its
    /// right-hand side can begin with into the head's set, so members found
    /// early in a pass are already visible to later productions of the same
    /// pass.
    pub fn new(grammar: &Grammar<N, T>) -> Self {
        let mut first = FirstSets {
            sets: grammar
                .nonterminals()
                .map(|n| (n.clone(), IndexSet::new()))
                .collect(),
        };

        saturate(|| {
            let mut changed = false;
            for (head, alternatives) in grammar.rules() {
                for production in alternatives {
                    let mut found = IndexSet::new();
                    let nullable = first.sequence(&production.rhs, |t| {
                        found.insert(t.clone());
                    });

                    let entry = first.sets.get_mut(head).unwrap();
                    for t in found {
                        changed |= entry.insert(FirstItem::Terminal(t));
                    }
                    if nullable {
                        changed |= entry.insert(FirstItem::Epsilon);
                    }
                }
            }
            changed
        });

        first
    }
}

impl<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> FirstSets<N, T> {
    /// Walks `symbols` left to right, feeding `emit` every terminal that can
    /// begin the sequence, and returns whether the whole sequence can derive
    /// epsilon. The walk stops at the first symbol that cannot be skipped: a
    /// terminal, or a non-terminal whose set lacks epsilon. A non-terminal
    /// with no computed set also stops the walk.
    pub fn sequence<F: FnMut(&T)>(&self, symbols: &[Symbol<N, T>], mut emit: F) -> bool {
        for symbol in symbols {
            match symbol {
                Symbol::Terminal(t) => {
                    emit(t);
                    return false;
                }
                Symbol::NonTerminal(n) => {
                    let set = match self.sets.get(n) {
                        Some(set) => set,
                        None => return false,
                    };
                    for item in set {
                        if let FirstItem::Terminal(t) = item {
                            emit(t);
                        }
                    }
                    if !set.contains(&FirstItem::Epsilon) {
                        return false;
                    }
                }
            }
        }
        true
    }

    pub fn get<Q: ?Sized>(&self, nonterminal: &Q) -> Option<&IndexSet<FirstItem<T>>>
    where
        Q: Hash + Eq,
        N: Borrow<Q>,
    {
        self.sets.get(nonterminal)
    }

    /// Whether `nonterminal` can derive the empty string.
    pub fn is_nullable<Q: ?Sized>(&self, nonterminal: &Q) -> bool
    where
        Q: Hash + Eq,
        N: Borrow<Q>,
    {
        self.sets
            .get(nonterminal)
            .map_or(false, |set| set.contains(&FirstItem::Epsilon))
    }

    /// Iterates over non-terminals and their sets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &IndexSet<FirstItem<T>>)> {
        self.sets.iter()
    }
}
