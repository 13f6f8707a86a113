//! Grammar store for context-free grammars.
//!
//! This module provides [`Production`] and [`Grammar`], the data structures
//! all other components build on: productions, lookup by left-hand side,
//! and enumeration of terminals/non-terminals.

use crate::error::{GrammarError, Result};
use crate::symbol::{NonTerminal, Symbol, Terminal};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A production rule `lhs -> rhs`.
///
/// Hash and equality respect both `lhs` and `rhs`, and `rhs` order matters
/// (two productions with the same symbols in a different order are
/// distinct).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: NonTerminal, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rhs_str = if self.rhs == [Symbol::Epsilon] {
            "ε".to_string()
        } else {
            self.rhs
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        write!(f, "{} → {}", self.lhs, rhs_str)
    }
}

/// A context-free grammar: a start symbol plus an ordered list of
/// productions.
///
/// Productions are kept in insertion order because predictive-parse
/// descent and conflict reporting depend on a stable ordering of
/// alternatives (see [`Grammar::productions_from`]).
#[derive(Debug, Clone)]
pub struct Grammar {
    start: NonTerminal,
    productions: Vec<Production>,
    non_terminals: Vec<NonTerminal>,
    non_terminal_set: HashSet<NonTerminal>,
    terminals: Vec<Terminal>,
    terminal_set: HashSet<Terminal>,
    production_map: HashMap<NonTerminal, Vec<Production>>,
}

impl Grammar {
    /// Builds a grammar from a start symbol and a list of productions,
    /// failing if any two productions are structurally equal.
    pub fn build(start: NonTerminal, productions: Vec<Production>) -> Result<Self> {
        let mut grammar = Grammar {
            start,
            productions: Vec::new(),
            non_terminals: Vec::new(),
            non_terminal_set: HashSet::new(),
            terminals: Vec::new(),
            terminal_set: HashSet::new(),
            production_map: HashMap::new(),
        };
        for production in productions {
            grammar.add_production(production.lhs, production.rhs)?;
        }
        Ok(grammar)
    }

    /// An empty grammar with the given start symbol; productions are added
    /// afterward with [`Grammar::add_production`].
    pub fn new(start: NonTerminal) -> Self {
        Grammar {
            start,
            productions: Vec::new(),
            non_terminals: Vec::new(),
            non_terminal_set: HashSet::new(),
            terminals: Vec::new(),
            terminal_set: HashSet::new(),
            production_map: HashMap::new(),
        }
    }

    /// Appends a production, failing when an identical one already exists.
    pub fn add_production(&mut self, lhs: NonTerminal, rhs: Vec<Symbol>) -> Result<()> {
        let production = Production::new(lhs.clone(), rhs);
        if self.production_map.get(&lhs).is_some_and(|ps| ps.contains(&production)) {
            return Err(GrammarError::DuplicateProduction(production.to_string()));
        }

        self.observe_non_terminal(lhs.clone());
        for symbol in &production.rhs {
            match symbol {
                Symbol::NonTerminal(n) => self.observe_non_terminal(n.clone()),
                Symbol::Terminal(t) => self.observe_terminal(t.clone()),
                Symbol::Epsilon | Symbol::Dot => {}
            }
        }

        self.production_map
            .entry(lhs)
            .or_default()
            .push(production.clone());
        self.productions.push(production);
        Ok(())
    }

    fn observe_non_terminal(&mut self, nt: NonTerminal) {
        if self.non_terminal_set.insert(nt.clone()) {
            self.non_terminals.push(nt);
        }
    }

    fn observe_terminal(&mut self, t: Terminal) {
        if self.terminal_set.insert(t.clone()) {
            self.terminals.push(t);
        }
    }

    /// Returns the productions whose lhs is `lhs`, in insertion order.
    pub fn productions_from(&self, lhs: &NonTerminal) -> &[Production] {
        self.production_map
            .get(lhs)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns all productions in the grammar, in insertion order.
    pub fn all_productions(&self) -> &[Production] {
        &self.productions
    }

    /// Returns all non-terminals appearing in the grammar (as lhs or
    /// within some rhs), unordered.
    pub fn non_terminals(&self) -> &HashSet<NonTerminal> {
        &self.non_terminal_set
    }

    /// Non-terminals in discovery order: first appearance as an lhs or
    /// within an rhs. Used where deterministic iteration is required.
    pub fn non_terminals_ordered(&self) -> &[NonTerminal] {
        &self.non_terminals
    }

    /// Returns all terminals appearing in some rhs, unordered. Excludes
    /// `Dot` and `Epsilon`.
    pub fn terminals(&self) -> &HashSet<Terminal> {
        &self.terminal_set
    }

    /// Terminals sorted by name, for deterministic table construction.
    pub fn terminals_sorted(&self) -> Vec<Terminal> {
        let mut t: Vec<Terminal> = self.terminals.clone();
        t.sort();
        t
    }

    /// Non-terminals sorted by `(name, id)`, for deterministic table
    /// construction.
    pub fn non_terminals_sorted(&self) -> Vec<NonTerminal> {
        let mut n: Vec<NonTerminal> = self.non_terminals.clone();
        n.sort();
        n
    }

    pub fn start_symbol(&self) -> &NonTerminal {
        &self.start
    }

    pub fn set_start_symbol(&mut self, start: NonTerminal) {
        self.start = start;
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for production in &self.productions {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}

/// Builds a grammar from a start symbol and a list of productions. The
/// library-surface entry point named in the external interfaces.
pub fn build_grammar(start: NonTerminal, productions: Vec<Production>) -> Result<Grammar> {
    Grammar::build(start, productions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nt(name: &str) -> NonTerminal {
        NonTerminal::new(name)
    }

    fn t(name: &str) -> Symbol {
        Symbol::Terminal(Terminal::new(name))
    }

    fn n(name: &str) -> Symbol {
        Symbol::NonTerminal(nt(name))
    }

    #[test]
    fn build_collects_terminals_and_non_terminals() {
        let grammar = Grammar::build(
            nt("S"),
            vec![
                Production::new(nt("S"), vec![n("A"), n("B")]),
                Production::new(nt("A"), vec![t("a")]),
            ],
        )
        .unwrap();

        assert_eq!(grammar.all_productions().len(), 2);
        assert!(grammar.non_terminals().contains(&nt("S")));
        assert!(grammar.non_terminals().contains(&nt("B")));
        assert!(grammar.terminals().contains(&Terminal::new("a")));
    }

    #[test]
    fn duplicate_production_is_rejected() {
        let mut grammar = Grammar::new(nt("S"));
        grammar.add_production(nt("S"), vec![t("a")]).unwrap();
        let err = grammar.add_production(nt("S"), vec![t("a")]);
        assert!(err.is_err());
    }

    #[test]
    fn productions_from_preserves_insertion_order() {
        let grammar = Grammar::build(
            nt("S"),
            vec![
                Production::new(nt("S"), vec![t("a")]),
                Production::new(nt("S"), vec![t("b")]),
                Production::new(nt("A"), vec![t("c")]),
            ],
        )
        .unwrap();

        let s_productions = grammar.productions_from(&nt("S"));
        assert_eq!(s_productions.len(), 2);
        assert_eq!(s_productions[0].rhs, vec![t("a")]);
        assert_eq!(s_productions[1].rhs, vec![t("b")]);
    }

    #[test]
    fn epsilon_production_round_trips() {
        let grammar = Grammar::build(
            nt("S"),
            vec![Production::new(nt("S"), vec![Symbol::Epsilon])],
        )
        .unwrap();
        let prods = grammar.productions_from(&nt("S"));
        assert_eq!(prods[0].rhs, vec![Symbol::Epsilon]);
    }
}
