//! Context-Free Grammar Table-Construction Engine
//!
//! A library for computing FIRST/FOLLOW sets, normalizing grammars
//! (left-recursion elimination, left-factoring), and building parsing
//! tables for LL(1), SLR(1), canonical LR(1), and LALR(1) parsers.

pub mod driver;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod item;
pub mod lalr;
pub mod ll1;
pub mod lr0;
pub mod lr1;
pub mod lr1_table;
pub mod slr1;
pub mod symbol;
pub mod table;
pub mod transform;

pub use driver::{Ll1Driver, ShiftReduceDriver};
pub use error::{GrammarError, Result};
pub use first_follow::{first, first_of_sequence, follow, FirstSets, FollowSets};
pub use grammar::{build_grammar, Grammar, Production};
pub use item::{augmented, CanonicalSet, FrozenItemSet, Item, ItemSet, Lookahead};
pub use lalr::build_lalr_table;
pub use ll1::{build_ll1_table, Ll1Table};
pub use lr1_table::build_lr1_table;
pub use slr1::build_slr_table;
pub use symbol::{NonTerminal, Symbol, Terminal};
pub use table::{Action, ParsingTable};
pub use transform::{eliminate_left_recursion, left_factor};
