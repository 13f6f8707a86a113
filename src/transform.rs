//! Grammar-rewriting transforms: left-recursion elimination and
//! left-factoring.
//!
//! Both functions return a new [`Grammar`] and leave the input untouched,
//! following the source's `Grammar.__copy__`-then-mutate style.

use crate::grammar::{Grammar, Production};
use crate::symbol::{NonTerminal, Symbol};
use std::collections::{HashSet, VecDeque};

/// Eliminates left recursion (direct and indirect) from `grammar`,
/// following the non-terminal order from
/// [`Grammar::non_terminals_ordered`].
///
/// Indirect left recursion is first converted to direct left recursion by
/// substituting, for each pair `i > j` in the ordering, any production
/// `A_i -> A_j γ` with `A_i -> δ γ` for every alternative `A_j -> δ`. Unlike
/// the reference implementation this loop runs `j` over the full `0..i`
/// range rather than `0..i-1`, so a recursion introduced by the very last
/// predecessor in the ordering is not missed.
///
/// Direct left recursion is then eliminated per non-terminal in the usual
/// way: `A -> A α1 | ... | A αn | β1 | ... | βm` becomes
/// `A -> β1 A' | ... | βm A'` and `A' -> α1 A' | ... | αn A' | ε`.
pub fn eliminate_left_recursion(grammar: &Grammar) -> Grammar {
    let order = grammar.non_terminals_ordered().to_vec();
    let mut productions = grammar.all_productions().to_vec();

    for i in 0..order.len() {
        for j in 0..i {
            if starts_with(&productions, &order[i], &order[j]) {
                productions = expand_production(&order[i], &order[j], &productions);
            }
        }
    }

    let mut fresh_names: HashSet<NonTerminal> = grammar.non_terminals().clone();
    let mut result = Vec::with_capacity(productions.len());

    for nt in &order {
        let (recursive, non_recursive): (Vec<Production>, Vec<Production>) = productions
            .iter()
            .filter(|p| &p.lhs == nt)
            .cloned()
            .partition(|p| starts_with_symbol(p, nt));

        if recursive.is_empty() {
            result.extend(non_recursive);
            continue;
        }

        let tail = nt.fresh_avoiding(&fresh_names);
        fresh_names.insert(tail.clone());

        for beta in &non_recursive {
            let mut rhs = strip_epsilon(&beta.rhs);
            rhs.push(Symbol::NonTerminal(tail.clone()));
            result.push(Production::new(nt.clone(), rhs));
        }
        for alpha in &recursive {
            let mut rhs = alpha.rhs[1..].to_vec();
            rhs.push(Symbol::NonTerminal(tail.clone()));
            result.push(Production::new(tail.clone(), rhs));
        }
        result.push(Production::new(tail, vec![Symbol::Epsilon]));
    }

    let deduped = dedup_preserve_order(result);
    Grammar::build(grammar.start_symbol().clone(), deduped)
        .expect("left-recursion elimination never reintroduces a duplicate production")
}

fn starts_with(productions: &[Production], lhs: &NonTerminal, target: &NonTerminal) -> bool {
    productions
        .iter()
        .any(|p| &p.lhs == lhs && p.rhs.first() == Some(&Symbol::NonTerminal(target.clone())))
}

fn starts_with_symbol(p: &Production, nt: &NonTerminal) -> bool {
    p.rhs.first() == Some(&Symbol::NonTerminal(nt.clone()))
}

/// Rewrites every production of `lhs` whose rhs begins with `target` by
/// substituting in each alternative of `target`, leaving every other
/// production untouched.
fn expand_production(
    lhs: &NonTerminal,
    target: &NonTerminal,
    productions: &[Production],
) -> Vec<Production> {
    let target_alternatives: Vec<Production> = productions
        .iter()
        .filter(|p| &p.lhs == target)
        .cloned()
        .collect();

    let mut result = Vec::with_capacity(productions.len());
    for p in productions {
        if &p.lhs == lhs && starts_with_symbol(p, target) {
            for alt in &target_alternatives {
                let mut rhs = strip_epsilon(&alt.rhs);
                rhs.extend(p.rhs[1..].iter().cloned());
                if rhs.is_empty() {
                    rhs.push(Symbol::Epsilon);
                }
                result.push(Production::new(lhs.clone(), rhs));
            }
        } else {
            result.push(p.clone());
        }
    }
    result
}

fn strip_epsilon(rhs: &[Symbol]) -> Vec<Symbol> {
    if rhs == [Symbol::Epsilon] {
        Vec::new()
    } else {
        rhs.to_vec()
    }
}

fn dedup_preserve_order(productions: Vec<Production>) -> Vec<Production> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(productions.len());
    for p in productions {
        if seen.insert(p.clone()) {
            result.push(p);
        }
    }
    result
}

/// Left-factors `grammar`: whenever two or more alternatives of the same
/// non-terminal share a common prefix, that prefix is factored out into a
/// fresh non-terminal. Runs to a fixed point, since factoring one
/// non-terminal's alternatives can expose a further common prefix in the
/// fresh non-terminal it introduces.
pub fn left_factor(grammar: &Grammar) -> Grammar {
    let mut productions = grammar.all_productions().to_vec();
    let mut fresh_names: HashSet<NonTerminal> = grammar.non_terminals().clone();

    let mut worklist: VecDeque<NonTerminal> =
        grammar.non_terminals_ordered().iter().cloned().collect();
    let mut queued: HashSet<NonTerminal> = worklist.iter().cloned().collect();

    while let Some(nt) = worklist.pop_front() {
        queued.remove(&nt);
        if let Some(new_nt) = left_factor_one_symbol(&nt, &mut productions, &fresh_names) {
            fresh_names.insert(new_nt.clone());
            if queued.insert(nt.clone()) {
                worklist.push_back(nt);
            }
            if queued.insert(new_nt.clone()) {
                worklist.push_back(new_nt);
            }
        }
    }

    Grammar::build(grammar.start_symbol().clone(), productions)
        .expect("left-factoring never reintroduces a duplicate production")
}

/// Factors at most one group of alternatives of `n`, returning the fresh
/// non-terminal introduced if a group was found.
fn left_factor_one_symbol(
    n: &NonTerminal,
    productions: &mut Vec<Production>,
    fresh_names: &HashSet<NonTerminal>,
) -> Option<NonTerminal> {
    let alternatives: Vec<Production> = productions
        .iter()
        .filter(|p| &p.lhs == n)
        .cloned()
        .collect();

    for i in 0..alternatives.len() {
        let key = &alternatives[i].rhs;
        let mut groups = vec![i];
        let mut min_prefix = key.len();

        for (j, alt) in alternatives.iter().enumerate().skip(i + 1) {
            let prefix = longest_common_prefix(key, &alt.rhs);
            if !prefix.is_empty() {
                min_prefix = min_prefix.min(prefix.len());
                groups.push(j);
            }
        }

        if groups.len() <= 1 {
            continue;
        }

        let new_lhs = n.fresh_avoiding(fresh_names);
        let prefix = key[..min_prefix].to_vec();

        for &k in &groups {
            if let Some(pos) = productions.iter().position(|p| p == &alternatives[k]) {
                productions.remove(pos);
            }
        }

        let mut factored_rhs = prefix;
        factored_rhs.push(Symbol::NonTerminal(new_lhs.clone()));
        productions.push(Production::new(n.clone(), factored_rhs));

        for &k in &groups {
            let mut suffix = alternatives[k].rhs[min_prefix..].to_vec();
            if suffix.is_empty() {
                suffix.push(Symbol::Epsilon);
            }
            productions.push(Production::new(new_lhs.clone(), suffix));
        }

        return Some(new_lhs);
    }

    None
}

fn longest_common_prefix(a: &[Symbol], b: &[Symbol]) -> Vec<Symbol> {
    a.iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.clone())
        .collect()
}
