use std::borrow::Borrow;
use std::fmt::Display;
use std::hash::Hash;
use std::rc::Rc;
use std::str::FromStr;

use fnv::FnvHashSet;
use indexmap::{IndexMap, IndexSet};

use crate::error::{GrammarError, Result};
use crate::production::{Production, Symbol};
use crate::EPSILON;

/// A context-free grammar with rules grouped by head, in declaration order.
///
/// The start symbol is the head of the first rule. Symbols are tagged when
/// the grammar is built: a name that heads some rule is a non-terminal,
/// every other name is a terminal.
#[derive(Clone, Debug)]
pub struct Grammar<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> {
    start: N,
    rules: IndexMap<N, Vec<Rc<Production<N, T>>>>,
}

impl<N: Hash + PartialEq + Eq + Clone + Display, T: Hash + PartialEq + Eq + Clone> Grammar<N, T> {
    /// Builds a grammar from `productions` with `start` as the start symbol.
    /// Alternatives keep their order within each head, and heads keep the
    /// order in which they first appear.
    ///
    /// Fails with [`GrammarError::EmptyGrammar`] when `productions` is empty,
    /// and with [`GrammarError::Undeclared`] when `start` or a non-terminal
    /// on some right-hand side has no rule of its own.
    pub fn new(start: N, productions: Vec<Production<N, T>>) -> Result<Self> {
        if productions.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        let mut rules: IndexMap<N, Vec<Rc<Production<N, T>>>> = IndexMap::new();
        for production in productions {
            rules
                .entry(production.lhs.clone())
                .or_insert_with(Vec::new)
                .push(Rc::new(production));
        }

        if !rules.contains_key(&start) {
            return Err(GrammarError::Undeclared {
                symbol: start.to_string(),
            });
        }

        for alternatives in rules.values() {
            for production in alternatives {
                for symbol in &production.rhs {
                    if let Symbol::NonTerminal(n) = symbol {
                        if !rules.contains_key(n) {
                            return Err(GrammarError::Undeclared {
                                symbol: n.to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(Grammar { start, rules })
    }
}

impl<N: Hash + PartialEq + Eq, T: Hash + PartialEq + Eq> Grammar<N, T> {
    pub fn start(&self) -> &N {
        &self.start
    }

    /// Iterates over heads and their alternatives in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = (&N, &[Rc<Production<N, T>>])> {
        self.rules
            .iter()
            .map(|(head, alternatives)| (head, alternatives.as_slice()))
    }

    /// The alternatives of `head`, empty if `head` is not a non-terminal of
    /// this grammar.
    pub fn alternatives<Q: ?Sized>(&self, head: &Q) -> &[Rc<Production<N, T>>]
    where
        Q: Hash + Eq,
        N: Borrow<Q>,
    {
        self.rules.get(head).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &N> {
        self.rules.keys()
    }

    /// The terminal vocabulary, in order of first appearance.
    pub fn terminals(&self) -> IndexSet<&T> {
        let mut terminals = IndexSet::new();
        for alternatives in self.rules.values() {
            for production in alternatives {
                for symbol in &production.rhs {
                    if let Symbol::Terminal(t) = symbol {
                        terminals.insert(t);
                    }
                }
            }
        }
        terminals
    }
}

impl Grammar<String, String> {
    /// Reads a grammar from text, one rule per line:
    ///
    /// ```text
    /// E  -> T E'
    /// E' -> + T E' | ε
    /// T  -> id
    /// ```
    ///
    /// Blank lines and lines starting with `#` are skipped. Alternatives are
    /// separated by `|` and symbols by whitespace. An empty alternative, or
    /// one written as `ε`, is the epsilon production. Redeclaring a head
    /// replaces its earlier alternatives.
    pub fn parse(text: &str) -> Result<Self> {
        let mut bodies: IndexMap<String, Vec<Vec<String>>> = IndexMap::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (head, body) = line
                .split_once("->")
                .ok_or(GrammarError::Syntax { line: index + 1 })?;
            let (head, body) = (head.trim(), body.trim());
            if head.is_empty() || body.is_empty() {
                return Err(GrammarError::InvalidRule { line: index + 1 });
            }
            let alternatives = body
                .split('|')
                .map(|alternative| {
                    alternative
                        .split_whitespace()
                        .filter(|token| *token != EPSILON)
                        .map(str::to_string)
                        .collect()
                })
                .collect();
            bodies.insert(head.to_string(), alternatives);
        }

        if bodies.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        let heads: FnvHashSet<&str> = bodies.keys().map(String::as_str).collect();
        let mut productions = Vec::new();
        for (head, alternatives) in &bodies {
            for alternative in alternatives {
                let rhs = alternative
                    .iter()
                    .map(|token| {
                        if heads.contains(token.as_str()) {
                            Symbol::NonTerminal(token.clone())
                        } else {
                            Symbol::Terminal(token.clone())
                        }
                    })
                    .collect();
                productions.push(Production::new(head.clone(), rhs));
            }
        }

        let start = productions[0].lhs.clone();
        Grammar::new(start, productions)
    }
}

impl FromStr for Grammar<String, String> {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self> {
        Grammar::parse(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn nt(s: &str) -> Symbol<String, String> {
        Symbol::NonTerminal(s.to_string())
    }

    fn term(s: &str) -> Symbol<String, String> {
        Symbol::Terminal(s.to_string())
    }

    #[test]
    fn test_reads_rules() {
        let grammar = Grammar::parse("E -> T E'\nE' -> + T E' | ε\nT -> id").unwrap();
        assert_eq!(grammar.start(), "E");
        let heads: Vec<_> = grammar.nonterminals().cloned().collect();
        assert_eq!(heads, ["E", "E'", "T"]);

        let e = grammar.alternatives("E");
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].rhs[..], [nt("T"), nt("E'")][..]);

        let e_prime = grammar.alternatives("E'");
        assert_eq!(e_prime.len(), 2);
        assert_eq!(e_prime[0].rhs[..], [term("+"), nt("T"), nt("E'")][..]);
        assert!(e_prime[1].is_epsilon());
    }

    #[test]
    fn test_forward_reference_is_nonterminal() {
        let grammar = Grammar::parse("S -> A b\nA -> a").unwrap();
        let rhs = &grammar.alternatives("S")[0].rhs;
        assert_eq!(rhs[..], [nt("A"), term("b")][..]);
        assert!(rhs[0].is_nonterminal());
        assert!(rhs[1].is_terminal());
    }

    #[test]
    fn test_epsilon_alternative_forms() {
        for text in ["S -> a | ε", "S -> a |", "S -> a |   "] {
            let grammar = Grammar::parse(text).unwrap();
            let s = grammar.alternatives("S");
            assert_eq!(s.len(), 2, "{:?}", text);
            assert!(s[1].is_epsilon(), "{:?}", text);
        }
    }

    #[test]
    fn test_epsilon_token_dropped_anywhere() {
        let grammar = Grammar::parse("S -> a ε b").unwrap();
        assert_eq!(grammar.alternatives("S")[0].rhs[..], [term("a"), term("b")][..]);

        let grammar = Grammar::parse("S -> ε ε").unwrap();
        assert!(grammar.alternatives("S")[0].is_epsilon());
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let grammar = Grammar::parse("\n# expression grammar\n\nE -> id\n").unwrap();
        assert_eq!(grammar.start(), "E");
    }

    #[test]
    fn test_missing_arrow_reports_input_line() {
        let err = Grammar::parse("E -> id\n\n# comment\nA B").unwrap_err();
        assert_eq!(err, GrammarError::Syntax { line: 4 });
        assert_eq!(
            err.to_string(),
            "Syntax error in grammar at line 4: Missing '->'."
        );
    }

    #[test]
    fn test_missing_head_or_body() {
        let err = Grammar::parse("-> a b").unwrap_err();
        assert_eq!(err, GrammarError::InvalidRule { line: 1 });

        let err = Grammar::parse("E -> id\nA ->   ").unwrap_err();
        assert_eq!(err, GrammarError::InvalidRule { line: 2 });
    }

    #[test]
    fn test_empty_grammar() {
        assert_eq!(Grammar::parse("").unwrap_err(), GrammarError::EmptyGrammar);
        assert_eq!(
            Grammar::parse("\n  \n# nothing here\n").unwrap_err(),
            GrammarError::EmptyGrammar
        );
    }

    #[test]
    fn test_redeclared_head_replaces_alternatives() {
        let grammar = Grammar::parse("A -> x\nB -> y\nA -> z").unwrap();
        assert_eq!(grammar.start(), "A");
        let heads: Vec<_> = grammar.nonterminals().cloned().collect();
        assert_eq!(heads, ["A", "B"]);
        let a = grammar.alternatives("A");
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].rhs[..], [term("z")][..]);
    }

    #[test]
    fn test_new_rejects_undeclared_nonterminal() {
        let production = Production::new("S".to_string(), vec![nt("X")]);
        let err = Grammar::new("S".to_string(), vec![production]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::Undeclared {
                symbol: "X".to_string()
            }
        );

        let production = Production::new("S".to_string(), vec![term("a")]);
        let err = Grammar::new("R".to_string(), vec![production]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::Undeclared {
                symbol: "R".to_string()
            }
        );
    }

    #[test]
    fn test_terminal_vocabulary_order() {
        let grammar = Grammar::parse("S -> a B c\nB -> b | a").unwrap();
        let terminals: Vec<_> = grammar.terminals().into_iter().cloned().collect();
        assert_eq!(terminals, ["a", "c", "b"]);
    }

    #[test]
    fn test_from_str() {
        let grammar: Grammar<String, String> = "E -> id".parse().unwrap();
        assert_eq!(grammar.start(), "E");
    }
}
