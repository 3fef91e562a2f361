use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::first::FirstSets;
use crate::grammar::Grammar;
use crate::production::Symbol;
use crate::utils::saturate;
use crate::END_MARK;

/// A member of a FOLLOW set or a parsing-table column: a terminal, or the
/// end-of-input marker `$`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FollowItem<T> {
    Terminal(T),
    End,
}

impl<T: Display> Display for FollowItem<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FollowItem::Terminal(t) => write!(f, "{}", t),
            FollowItem::End => f.write_str(END_MARK),
        }
    }
}

/// FOLLOW sets for every non-terminal of a grammar.
#[derive(Clone, Debug)]
pub struct FollowSets<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> {
    sets: IndexMap<N, IndexSet<FollowItem<T>>>,
}

impl<N, T> FollowSets<N, T>
where
    N: Hash + PartialEq + Eq + Clone,
    T: Hash + PartialEq + Eq + Clone,
{
    /// Computes FOLLOW sets from the grammar and its FIRST sets. The start
    /// symbol is seeded with the end marker. Each pass scans every
    /// occurrence of a non-terminal on a right-hand side: the terminals
    /// that can begin the rest of that production join its FOLLOW set, and
    /// when the rest can vanish the head's FOLLOW set joins it too. The
    /// head's set may still be growing, so passes repeat until nothing
    /// changes.
    pub fn new(grammar: &Grammar<N, T>, first: &FirstSets<N, T>) -> Self {
        let mut follow = FollowSets {
            sets: grammar
                .nonterminals()
                .map(|n| (n.clone(), IndexSet::new()))
                .collect(),
        };
        follow
            .sets
            .get_mut(grammar.start())
            .unwrap()
            .insert(FollowItem::End);

        saturate(|| {
            let mut changed = false;
            for (head, alternatives) in grammar.rules() {
                for production in alternatives {
                    for (position, symbol) in production.rhs.iter().enumerate() {
                        let subject = match symbol {
                            Symbol::NonTerminal(n) => n,
                            Symbol::Terminal(_) => continue,
                        };

                        let mut found = IndexSet::new();
                        let rest_nullable =
                            first.sequence(&production.rhs[position + 1..], |t| {
                                found.insert(t.clone());
                            });

                        let mut inherited = Vec::new();
                        if rest_nullable {
                            inherited.extend(follow.sets[head].iter().cloned());
                        }

                        let entry = follow.sets.get_mut(subject).unwrap();
                        for t in found {
                            changed |= entry.insert(FollowItem::Terminal(t));
                        }
                        for item in inherited {
                            changed |= entry.insert(item);
                        }
                    }
                }
            }
            changed
        });

        follow
    }
}

impl<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> FollowSets<N, T> {
    pub fn get<Q: ?Sized>(&self, nonterminal: &Q) -> Option<&IndexSet<FollowItem<T>>>
    where
        Q: Hash + Eq,
        N: Borrow<Q>,
    {
        self.sets.get(nonterminal)
    }

    /// Iterates over non-terminals and their sets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &IndexSet<FollowItem<T>>)> {
        self.sets.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build(text: &str) -> (Grammar<String, String>, FirstSets<String, String>) {
        let grammar = Grammar::parse(text).unwrap();
        let first = FirstSets::new(&grammar);
        (grammar, first)
    }

    fn items(follow: &FollowSets<String, String>, head: &str) -> Vec<String> {
        follow
            .get(head)
            .unwrap()
            .iter()
            .map(|item| item.to_string())
            .collect()
    }

    #[test]
    fn test_start_symbol_is_seeded_with_end() {
        let (grammar, first) = build("S -> a");
        let follow = FollowSets::new(&grammar, &first);
        assert_eq!(items(&follow, "S"), ["$"]);
    }

    #[test]
    fn test_terminal_after_occurrence() {
        let (grammar, first) = build("S -> A b\nA -> a");
        let follow = FollowSets::new(&grammar, &first);
        assert_eq!(items(&follow, "A"), ["b"]);
    }

    #[test]
    fn test_nullable_rest_inherits_head_follow() {
        let (grammar, first) = build("S -> A B\nA -> a\nB -> b | ε");
        let follow = FollowSets::new(&grammar, &first);
        assert_eq!(items(&follow, "A"), ["b", "$"]);
        assert_eq!(items(&follow, "B"), ["$"]);
    }

    #[test]
    fn test_end_reaches_trailing_nonterminals() {
        let (grammar, first) = build("E -> T E'\nE' -> + T E' | ε\nT -> id");
        let follow = FollowSets::new(&grammar, &first);
        assert_eq!(items(&follow, "E"), ["$"]);
        assert_eq!(items(&follow, "E'"), ["$"]);
        assert_eq!(items(&follow, "T"), ["+", "$"]);
    }

    #[test]
    fn test_inner_occurrence_collects_first_of_rest() {
        let (grammar, first) = build("S -> a A c\nA -> b");
        let follow = FollowSets::new(&grammar, &first);
        assert_eq!(items(&follow, "A"), ["c"]);
    }
}
