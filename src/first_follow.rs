//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! This module implements the classical fixed-point algorithms from Aho et
//! al., "Compilers: Principles, Techniques, and Tools" (2nd Edition),
//! section 4.4, following the teacher crate's "initialize, then iterate to
//! a fixed point" shape.

use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::symbol::{NonTerminal, Symbol, Terminal};
use std::collections::{HashMap, HashSet};

/// Maps every terminal, non-terminal, and `Epsilon` to its FIRST set.
pub type FirstSets = HashMap<Symbol, HashSet<Symbol>>;

/// Maps every non-terminal to its FOLLOW set.
pub type FollowSets = HashMap<NonTerminal, HashSet<Symbol>>;

/// Computes the FIRST sets for every terminal, non-terminal, and `Epsilon`
/// in the grammar by fixed-point iteration.
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = HashMap::new();

    for terminal in grammar.terminals() {
        first_sets.insert(
            Symbol::Terminal(terminal.clone()),
            HashSet::from([Symbol::Terminal(terminal.clone())]),
        );
    }
    first_sets.insert(Symbol::Epsilon, HashSet::from([Symbol::Epsilon]));
    for non_terminal in grammar.non_terminals() {
        first_sets.insert(Symbol::NonTerminal(non_terminal.clone()), HashSet::new());
    }

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.all_productions() {
            let lhs = Symbol::NonTerminal(production.lhs.clone());
            let current = first_sets.get(&lhs).cloned().unwrap_or_default();

            let rhs_first = first_of_sequence_internal(&first_sets, &production.rhs);

            let merged: HashSet<Symbol> = current.union(&rhs_first).cloned().collect();
            if merged.len() != current.len() {
                first_sets.insert(lhs, merged);
                changed = true;
            }
        }
    }

    first_sets
}

/// FIRST of a symbol sequence given precomputed per-symbol FIRST sets.
pub(crate) fn first_of_sequence_internal(first_sets: &FirstSets, symbols: &[Symbol]) -> HashSet<Symbol> {
    let mut result = HashSet::new();
    let mut nullable_so_far = true;

    for symbol in symbols {
        if !nullable_so_far {
            break;
        }

        let first_of_symbol = first_sets.get(symbol).cloned().unwrap_or_default();
        for s in &first_of_symbol {
            if !s.is_epsilon() {
                result.insert(s.clone());
            }
        }

        nullable_so_far = first_of_symbol.contains(&Symbol::Epsilon);
    }

    if nullable_so_far {
        result.insert(Symbol::Epsilon);
    }

    result
}

/// FIRST of a symbol sequence (the `FIRST(X1 X2 ... Xn)` form of the
/// library-surface `first(symbol_or_sequence, G)`), recomputing the
/// per-symbol FIRST sets from scratch.
pub fn first_of_sequence(seq: &[Symbol], grammar: &Grammar) -> HashSet<Symbol> {
    let first_sets = compute_first_sets(grammar);
    first_of_sequence_internal(&first_sets, seq)
}

/// FIRST of a single symbol (the library-surface `first(symbol, G)`).
///
/// Errors with [`GrammarError::WrongSymbolKind`] if `symbol` is `Dot`,
/// which never participates in FIRST/FOLLOW — it only appears inside LR
/// item right-hand sides.
pub fn first(symbol: &Symbol, grammar: &Grammar) -> Result<HashSet<Symbol>> {
    if symbol.is_dot() {
        return Err(GrammarError::WrongSymbolKind(
            "FIRST is undefined for the dot marker".to_string(),
        ));
    }
    Ok(first_of_sequence(std::slice::from_ref(symbol), grammar))
}

/// Computes the FOLLOW sets for every non-terminal in the grammar by
/// fixed-point iteration.
pub fn compute_follow_sets(grammar: &Grammar, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = HashMap::new();

    for non_terminal in grammar.non_terminals() {
        follow_sets.insert(non_terminal.clone(), HashSet::new());
    }
    follow_sets
        .get_mut(grammar.start_symbol())
        .expect("start symbol is always a non-terminal of the grammar")
        .insert(Symbol::Terminal(Terminal::end()));

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.all_productions() {
            let lhs = &production.lhs;
            let rhs = &production.rhs;

            for (i, symbol) in rhs.iter().enumerate() {
                let Symbol::NonTerminal(b) = symbol else {
                    continue;
                };

                let current = follow_sets.get(b).cloned().unwrap_or_default();
                let mut updated = current.clone();

                let beta = &rhs[i + 1..];
                let first_beta = first_of_sequence_internal(first_sets, beta);

                for s in &first_beta {
                    if !s.is_epsilon() {
                        updated.insert(s.clone());
                    }
                }

                if beta.is_empty() || first_beta.contains(&Symbol::Epsilon) {
                    let follow_lhs = follow_sets.get(lhs).cloned().unwrap_or_default();
                    updated.extend(follow_lhs);
                }

                if updated.len() != current.len() {
                    follow_sets.insert(b.clone(), updated);
                    changed = true;
                }
            }
        }
    }

    follow_sets
}

/// FOLLOW of a single non-terminal (the library-surface `follow(A, G)`).
///
/// Typed over `&NonTerminal`, so the "wrong symbol kind" structural
/// precondition from spec.md §7 is unrepresentable here and needs no
/// runtime check.
pub fn follow(nt: &NonTerminal, grammar: &Grammar) -> HashSet<Symbol> {
    let first_sets = compute_first_sets(grammar);
    let follow_sets = compute_follow_sets(grammar, &first_sets);
    follow_sets.get(nt).cloned().unwrap_or_default()
}
