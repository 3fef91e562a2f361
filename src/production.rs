use std::fmt::{Display, Formatter};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::EPSILON;

/// A grammar symbol, tagged once at load time: a name that heads some rule
/// is a [`Symbol::NonTerminal`], everything else is a [`Symbol::Terminal`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol<N, T> {
    NonTerminal(N),
    Terminal(T),
}

impl<N, T> Symbol<N, T> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

impl<N: Display, T: Display> Display for Symbol<N, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::NonTerminal(n) => write!(f, "{}", n),
            Symbol::Terminal(t) => write!(f, "{}", t),
        }
    }
}

/// A single rewriting rule: a head and the sequence of symbols it expands
/// to. An empty right-hand side is the epsilon production.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Production<N, T> {
    pub lhs: N,
    pub rhs: SmallVec<[Symbol<N, T>; 6]>,
}

impl<N, T> Production<N, T> {
    pub fn new(lhs: N, rhs: Vec<Symbol<N, T>>) -> Self {
        Production {
            lhs,
            rhs: SmallVec::from_vec(rhs),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl<N: Display, T: Display> Display for Production<N, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.rhs.is_empty() {
            write!(f, "{} -> {}", self.lhs, EPSILON)
        } else {
            write!(
                f,
                "{} -> {}",
                self.lhs,
                self.rhs.iter().map(|s| s.to_string()).join(" ")
            )
        }
    }
}
