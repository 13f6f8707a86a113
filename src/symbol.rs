//! Symbol types and utilities for context-free grammars.
//!
//! This module defines the core [`Symbol`] type — terminals, non-terminals,
//! epsilon, and the dot marker used inside LR items — along with the
//! fresh-name generation used by augmentation and the grammar transforms.

use crate::grammar::Grammar;
use std::cmp::Ordering;
use std::fmt;

/// A terminal symbol: a name plus whether it is the distinguished
/// end-of-input sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal {
    pub name: String,
    pub is_end: bool,
}

impl Terminal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_end: false,
        }
    }

    /// The distinguished end-of-input terminal, name `"$"`.
    pub fn end() -> Self {
        Self {
            name: "$".to_string(),
            is_end: true,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A non-terminal symbol: a base name plus an id used to disambiguate
/// freshly generated non-terminals from user-declared ones.
///
/// `id == 0` denotes a user-declared non-terminal; `id > 0` denotes one
/// produced by [`NonTerminal::fresh`] during augmentation, left-recursion
/// elimination, or left-factoring, rendered with a tick suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal {
    pub name: String,
    pub id: u32,
}

impl NonTerminal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: 0,
        }
    }

    pub fn with_id(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }

    /// Returns a `NonTerminal` with the same base name and the smallest id
    /// `>= self.id` that does not already appear among `grammar`'s
    /// non-terminals.
    pub fn fresh(&self, grammar: &Grammar) -> NonTerminal {
        self.fresh_avoiding(grammar.non_terminals())
    }

    /// Same as [`NonTerminal::fresh`] but checked against an explicit set
    /// of already-used non-terminals, for transforms that introduce
    /// several fresh non-terminals in a row and must avoid colliding with
    /// ones they themselves just introduced.
    pub fn fresh_avoiding(&self, existing: &std::collections::HashSet<NonTerminal>) -> NonTerminal {
        let mut id = self.id;
        loop {
            let candidate = NonTerminal::with_id(self.name.clone(), id);
            if !existing.contains(&candidate) {
                return candidate;
            }
            id += 1;
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}'", self.name, self.id)
        }
    }
}

/// A symbol appearing in a grammar or in an LR item's right-hand side.
///
/// `Dot` is only ever valid inside an [`crate::item::Item`]'s `rhs`; it is
/// treated as an ordinary symbol for storage purposes but never appears in
/// a grammar's terminal set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    Epsilon,
    Dot,
}

impl Symbol {
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    #[inline]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    #[inline]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    #[inline]
    pub const fn is_dot(&self) -> bool {
        matches!(self, Symbol::Dot)
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_nonterminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(n) => Some(n),
            _ => None,
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(n: NonTerminal) -> Self {
        Symbol::NonTerminal(n)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::NonTerminal(n) => write!(f, "{}", n),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Dot => write!(f, "•"),
        }
    }
}

/// Total order over symbols: `Terminal < NonTerminal < Dot < Epsilon`,
/// matching the source's convention of sorting Epsilon greater than
/// everything else (the opposite of the teacher's Epsilon-sorts-least
/// order). `Dot` never takes part in grammar-level comparisons, so its
/// placement between `NonTerminal` and `Epsilon` is arbitrary.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(s: &Symbol) -> u8 {
            match s {
                Symbol::Terminal(_) => 0,
                Symbol::NonTerminal(_) => 1,
                Symbol::Dot => 2,
                Symbol::Epsilon => 3,
            }
        }

        match (self, other) {
            (Symbol::Terminal(a), Symbol::Terminal(b)) => a.cmp(b),
            (Symbol::NonTerminal(a), Symbol::NonTerminal(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
