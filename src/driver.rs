//! Generic consumer-side parsing drivers: a predictive LL(1) driver over
//! an [`Ll1Table`] and a shift-reduce driver over any [`ParsingTable`]
//! (serves SLR(1), canonical LR(1), and LALR(1) alike).

use crate::error::{GrammarError, Result};
use crate::grammar::Production;
use crate::ll1::Ll1Table;
use crate::symbol::{NonTerminal, Symbol, Terminal};
use crate::table::{Action, ParsingTable};

/// Drives a predictive parse of `tokens` against an LL(1) table, starting
/// from `start`. Returns the leftmost sequence of productions applied.
///
/// Per the LL(1) driver contract, a table cell with cardinality other
/// than one (including zero) is a fatal parse-time error; the caller is
/// responsible for having built a table with singleton cells if it wants
/// parses to always succeed on valid input.
pub struct Ll1Driver<'a> {
    table: &'a Ll1Table,
    start: &'a NonTerminal,
}

impl<'a> Ll1Driver<'a> {
    pub fn new(table: &'a Ll1Table, start: &'a NonTerminal) -> Self {
        Self { table, start }
    }

    /// Parses `tokens`, a stream of terminals not including the
    /// end-of-input sentinel (it is appended automatically).
    pub fn parse(&self, tokens: &[Terminal]) -> Result<Vec<Production>> {
        let mut input: Vec<Terminal> = tokens.to_vec();
        input.push(Terminal::end());

        let mut stack: Vec<Symbol> = vec![Symbol::Terminal(Terminal::end()), Symbol::NonTerminal(self.start.clone())];
        let mut derivation = Vec::new();
        let mut pos = 0;

        while let Some(top) = stack.pop() {
            let Some(current) = input.get(pos) else {
                return Err(GrammarError::ParseRejected {
                    reason: "input exhausted with symbols remaining on the stack".to_string(),
                });
            };

            match top {
                Symbol::Terminal(t) => {
                    if &t == current {
                        pos += 1;
                    } else {
                        return Err(GrammarError::ParseRejected {
                            reason: format!("expected terminal {t}, found {current}"),
                        });
                    }
                }
                Symbol::NonTerminal(nt) => {
                    let cell = self.table.get(&(nt.clone(), current.clone()));
                    let production = match cell {
                        Some(set) if set.len() == 1 => set.iter().next().unwrap(),
                        Some(set) => {
                            return Err(GrammarError::ParseRejected {
                                reason: format!(
                                    "ambiguous table cell for ({nt}, {current}): {} candidates",
                                    set.len()
                                ),
                            })
                        }
                        None => {
                            return Err(GrammarError::ParseRejected {
                                reason: format!("no production for ({nt}, {current})"),
                            })
                        }
                    };

                    if production.rhs != [Symbol::Epsilon] {
                        for symbol in production.rhs.iter().rev() {
                            stack.push(symbol.clone());
                        }
                    }
                    derivation.push(production.clone());
                }
                Symbol::Epsilon | Symbol::Dot => {
                    return Err(GrammarError::ParseRejected {
                        reason: "epsilon or dot on the parse stack".to_string(),
                    });
                }
            }
        }

        if pos == input.len() {
            Ok(derivation)
        } else {
            Err(GrammarError::ParseRejected {
                reason: "input remained after the stack emptied".to_string(),
            })
        }
    }
}

/// Drives a shift-reduce parse of `tokens` against any [`ParsingTable`]
/// (SLR(1), canonical LR(1), or LALR(1) share this shape identically).
pub struct ShiftReduceDriver<'a> {
    table: &'a ParsingTable,
}

impl<'a> ShiftReduceDriver<'a> {
    pub fn new(table: &'a ParsingTable) -> Self {
        Self { table }
    }

    /// Parses `tokens`, appending the end-of-input sentinel automatically.
    /// Returns `Ok(())` on accept.
    pub fn parse(&self, tokens: &[Terminal]) -> Result<()> {
        let mut input: Vec<Terminal> = tokens.to_vec();
        input.push(Terminal::end());

        let mut states: Vec<usize> = vec![0];
        let mut symbols: Vec<Symbol> = Vec::new();
        let mut pos = 0;

        loop {
            let state = *states.last().expect("state stack is never empty");
            let current = input.get(pos).cloned().unwrap_or_else(Terminal::end);
            let key = (state, Symbol::Terminal(current.clone()));

            match self.table.action.get(&key) {
                Some(Action::Accept) => return Ok(()),
                Some(Action::Shift(next)) => {
                    states.push(*next);
                    symbols.push(Symbol::Terminal(current));
                    pos += 1;
                }
                Some(Action::Reduce(production)) => {
                    let arity = if production.rhs == [Symbol::Epsilon] {
                        0
                    } else {
                        production.rhs.len()
                    };
                    for _ in 0..arity {
                        states.pop();
                        symbols.pop();
                    }

                    let state_after_pop = *states.last().expect("state stack is never empty");
                    let goto_key = (state_after_pop, Symbol::NonTerminal(production.lhs.clone()));
                    match self.table.goto.get(&goto_key) {
                        Some(&next) => {
                            states.push(next);
                            symbols.push(Symbol::NonTerminal(production.lhs.clone()));
                        }
                        None => {
                            return Err(GrammarError::ParseRejected {
                                reason: format!("no GOTO entry for ({state_after_pop}, {})", production.lhs),
                            })
                        }
                    }
                }
                None => {
                    return Err(GrammarError::ParseRejected {
                        reason: format!("no ACTION entry for (state {state}, {current})"),
                    })
                }
            }
        }
    }
}
