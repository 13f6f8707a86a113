//! LR item model: items with an inline dot, item sets, canonical
//! collections, and grammar augmentation.

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Production};
use crate::symbol::{NonTerminal, Symbol, Terminal};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// The lookahead carried by an item: none for LR(0), a single terminal for
/// LR(1), or a merged set of terminals for LALR(1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lookahead {
    None,
    One(Terminal),
    Set(BTreeSet<Terminal>),
}

impl Lookahead {
    pub fn contains(&self, terminal: &Terminal) -> bool {
        match self {
            Lookahead::None => false,
            Lookahead::One(t) => t == terminal,
            Lookahead::Set(set) => set.contains(terminal),
        }
    }

    /// Iterates the terminals carried by this lookahead (empty for `None`).
    pub fn terminals(&self) -> Vec<Terminal> {
        match self {
            Lookahead::None => Vec::new(),
            Lookahead::One(t) => vec![t.clone()],
            Lookahead::Set(set) => set.iter().cloned().collect(),
        }
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::None => Ok(()),
            Lookahead::One(t) => write!(f, ", {t}"),
            Lookahead::Set(set) => {
                let joined = set.iter().map(|t| t.to_string()).collect::<Vec<_>>().join("/");
                write!(f, ", {{{joined}}}")
            }
        }
    }
}

/// An LR item: a production with a dot embedded inline in its rhs, plus a
/// lookahead. `rhs` always contains exactly one [`Symbol::Dot`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub lhs: NonTerminal,
    pub rhs: Vec<Symbol>,
    pub lookahead: Lookahead,
}

impl Item {
    /// Builds the initial item `[lhs -> . rhs, lookahead]` for one
    /// alternative of a production.
    ///
    /// An ε-production (`rhs == [Epsilon]`) has nothing to shift the dot
    /// over, so its item is built already complete: `rhs` becomes just
    /// `[Dot]`, with `Epsilon` dropped rather than placed after the dot.
    /// This keeps `Epsilon` out of every item's `rhs` entirely, so
    /// `after_dot`/`is_reduce` see it as a reduce item from the start and
    /// no GOTO transition over `Epsilon` is ever needed.
    pub fn initial(lhs: NonTerminal, rhs: Vec<Symbol>, lookahead: Lookahead) -> Self {
        let mut dotted = Vec::with_capacity(rhs.len() + 1);
        dotted.push(Symbol::Dot);
        if rhs != [Symbol::Epsilon] {
            dotted.extend(rhs);
        }
        Item {
            lhs,
            rhs: dotted,
            lookahead,
        }
    }

    /// Position of the dot within `rhs`.
    pub fn dot_position(&self) -> Result<usize> {
        self.rhs
            .iter()
            .position(Symbol::is_dot)
            .ok_or(GrammarError::MissingDot)
    }

    /// The symbol immediately to the right of the dot, or `None` when the
    /// dot is final.
    pub fn after_dot(&self) -> Result<Option<&Symbol>> {
        let pos = self.dot_position()?;
        Ok(self.rhs.get(pos + 1))
    }

    /// True when the dot is in final position (a reduce item).
    pub fn is_reduce(&self) -> Result<bool> {
        Ok(self.after_dot()?.is_none())
    }

    /// The dot-free production this item tracks a parse position in.
    pub fn production(&self) -> Result<Production> {
        self.dot_position()?;
        let rhs = self
            .rhs
            .iter()
            .filter(|s| !s.is_dot())
            .cloned()
            .collect::<Vec<_>>();
        let rhs = if rhs.is_empty() { vec![Symbol::Epsilon] } else { rhs };
        Ok(Production::new(self.lhs.clone(), rhs))
    }

    /// Returns a new item with the dot shifted one position to the right
    /// over the symbol it currently precedes, or `None` if the dot is
    /// already final or does not precede `symbol`.
    pub fn shift_dot(&self, symbol: &Symbol) -> Result<Option<Item>> {
        let pos = self.dot_position()?;
        if pos + 1 >= self.rhs.len() || &self.rhs[pos + 1] != symbol {
            return Ok(None);
        }
        let mut rhs = self.rhs.clone();
        rhs.swap(pos, pos + 1);
        Ok(Some(Item {
            lhs: self.lhs.clone(),
            rhs,
            lookahead: self.lookahead.clone(),
        }))
    }

    /// The symbols strictly after the dot (the "beta" in `[A -> alpha . B beta, a]`).
    pub fn beta(&self) -> Result<&[Symbol]> {
        let pos = self.dot_position()?;
        Ok(&self.rhs[pos + 1..])
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rhs = self.rhs.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ");
        write!(f, "[{} -> {}{}]", self.lhs, rhs, self.lookahead)
    }
}

/// The open, mutable builder form of an LR automaton state.
pub type ItemSet = HashSet<Item>;

/// The frozen, hashable/orderable key form of an LR automaton state, used
/// once a set of items is inserted into a canonical collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrozenItemSet(BTreeSet<Item>);

impl FrozenItemSet {
    pub fn from_btree_set(items: BTreeSet<Item>) -> Self {
        FrozenItemSet(items)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.0.contains(item)
    }
}

impl From<&ItemSet> for FrozenItemSet {
    fn from(items: &ItemSet) -> Self {
        FrozenItemSet(items.iter().cloned().collect())
    }
}

impl From<ItemSet> for FrozenItemSet {
    fn from(items: ItemSet) -> Self {
        FrozenItemSet(items.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FrozenItemSet {
    type Item = &'a Item;
    type IntoIter = std::collections::btree_set::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The reachable set of frozen item sets (LR automaton states before
/// numbering).
pub type CanonicalSet = HashSet<FrozenItemSet>;

/// Builds the augmented grammar `G'`: a fresh start symbol `S'` plus the
/// added production `S' -> S`, with every other production of `G`
/// unchanged.
pub fn augmented(grammar: &Grammar) -> Grammar {
    let fresh_start = grammar.start_symbol().fresh(grammar);
    let mut productions = vec![Production::new(
        fresh_start.clone(),
        vec![Symbol::NonTerminal(grammar.start_symbol().clone())],
    )];
    productions.extend(grammar.all_productions().iter().cloned());

    let mut augmented = Grammar::build(fresh_start.clone(), productions)
        .expect("augmentation never introduces a duplicate production");
    augmented.set_start_symbol(fresh_start);
    augmented
}
