use std::fmt::Display;

use indexmap::IndexSet;
use lltable::{Analysis, FollowItem, Symbol, END_MARK};

/// Helper: create a non-terminal symbol.
pub fn nt(name: &str) -> Symbol<String, String> {
    Symbol::NonTerminal(name.to_string())
}

/// Helper: create a terminal symbol.
pub fn t(name: &str) -> Symbol<String, String> {
    Symbol::Terminal(name.to_string())
}

/// Helper: render a set's members to text, in insertion order.
pub fn members<I: Display>(set: &IndexSet<I>) -> Vec<String> {
    set.iter().map(|item| item.to_string()).collect()
}

/// Helper: the FIRST set of `head`, rendered in order.
pub fn first_of(analysis: &Analysis<String, String>, head: &str) -> Vec<String> {
    members(analysis.first.get(head).unwrap())
}

/// Helper: the FOLLOW set of `head`, rendered in order.
pub fn follow_of(analysis: &Analysis<String, String>, head: &str) -> Vec<String> {
    members(analysis.follow.get(head).unwrap())
}

/// Helper: the table entry for `head` on `lookahead`, where `"$"` means the
/// end marker.
pub fn cell(analysis: &Analysis<String, String>, head: &str, lookahead: &str) -> Option<String> {
    let lookahead = if lookahead == END_MARK {
        FollowItem::End
    } else {
        FollowItem::Terminal(lookahead.to_string())
    };
    analysis
        .table
        .get(head, &lookahead)
        .map(|production| production.to_string())
}
