use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexSet;
use itertools::Itertools;
use unicode_width::UnicodeWidthStr;

use crate::first::{FirstItem, FirstSets};
use crate::follow::{FollowItem, FollowSets};
use crate::production::Production;
use crate::table::ParseTable;
use crate::utils::pad;
use crate::{Analysis, EPSILON};

/// Lays out one text table: a header row, a rule, and the body rows, with
/// every column padded to its widest cell.
fn format_table(header: &[String], body: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.width()).collect();
    for row in body {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let format_row = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .join(" | ")
    };

    let rule = widths.iter().map(|width| "-".repeat(*width)).join("-+-");

    let mut lines = vec![format_row(header), rule];
    lines.extend(body.iter().map(|row| format_row(row)));
    lines.join("\n")
}

fn rhs_text<N: Display, T: Display>(production: &Production<N, T>) -> String {
    if production.is_epsilon() {
        EPSILON.to_string()
    } else {
        production.rhs.iter().join(" ")
    }
}

impl<N, T> FirstSets<N, T>
where
    N: Hash + PartialEq + Eq + Display,
    T: Hash + PartialEq + Eq + Display,
{
    /// Renders one row per non-terminal, members in the order they were
    /// found.
    pub fn pretty_format(&self) -> String {
        let header = vec!["Non-Terminal".to_string(), "FIRST Set".to_string()];
        let body: Vec<Vec<String>> = self
            .iter()
            .map(|(head, set)| vec![head.to_string(), set.iter().join(", ")])
            .collect();
        format_table(&header, &body)
    }
}

impl<N, T> FollowSets<N, T>
where
    N: Hash + PartialEq + Eq + Display,
    T: Hash + PartialEq + Eq + Display,
{
    /// Renders one row per non-terminal, members in the order they were
    /// found.
    pub fn pretty_format(&self) -> String {
        let header = vec!["Non-Terminal".to_string(), "FOLLOW Set".to_string()];
        let body: Vec<Vec<String>> = self
            .iter()
            .map(|(head, set)| vec![head.to_string(), set.iter().join(", ")])
            .collect();
        format_table(&header, &body)
    }
}

impl<N, T> ParseTable<N, T>
where
    N: Hash + PartialEq + Eq + Display,
    T: Hash + PartialEq + Eq + Clone + Display,
{
    /// Renders the table as a grid: one row per non-terminal and one column
    /// per terminal the FIRST and FOLLOW sets mention, plus the end marker.
    /// Cells show the selected production's right-hand side, with `ε` for
    /// the epsilon production.
    pub fn pretty_format(&self, first: &FirstSets<N, T>, follow: &FollowSets<N, T>) -> String {
        let mut columns: IndexSet<FollowItem<T>> = IndexSet::new();
        for (_, set) in first.iter() {
            for item in set {
                if let FirstItem::Terminal(t) = item {
                    columns.insert(FollowItem::Terminal(t.clone()));
                }
            }
        }
        for (_, set) in follow.iter() {
            for item in set {
                columns.insert(item.clone());
            }
        }

        let mut header = vec!["Non-Terminal".to_string()];
        header.extend(columns.iter().map(|column| column.to_string()));

        let body: Vec<Vec<String>> = self
            .nonterminals()
            .map(|head| {
                let mut row = vec![head.to_string()];
                row.extend(columns.iter().map(|column| {
                    self.get(head, column).map(rhs_text).unwrap_or_default()
                }));
                row
            })
            .collect();

        format_table(&header, &body)
    }
}

impl<N, T> Analysis<N, T>
where
    N: Hash + PartialEq + Eq + Display,
    T: Hash + PartialEq + Eq + Clone + Display,
{
    /// Renders the FIRST sets, the FOLLOW sets, and the parsing table as
    /// aligned text tables.
    pub fn summary(&self) -> String {
        format!(
            "FIRST Sets\n{}\n\nFOLLOW Sets\n{}\n\nParsing Table\n{}",
            self.first.pretty_format(),
            self.follow.pretty_format(),
            self.table.pretty_format(&self.first, &self.follow)
        )
    }
}
