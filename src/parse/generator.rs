// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use std::str::FromStr;
use fixedbitset::FixedBitSet as BitSet;
use itertools::Itertools;
use tracing::trace;

use crate::ast::*;
use crate::number::NumberFormat;
use super::error::ParseErrorKind;
use super::keyword::{Additive, Keyword, KeywordClass, StatementKw, Symbol, Unary};
use super::level::Level;
use super::reduce;
use super::{Command, Macro, NcWords};

type GenResult<T> = Result<T, ParseErrorKind>;

/// Turns the runs of a block into operator trees, one level per bracket.
pub(super) struct Generator {
    levels: Vec<Level>,
    depth: usize,
    /// Single-letter address whose value is still expected.
    nc_address: Option<char>,
    addresses: BitSet,
}

impl Generator {
    pub fn new(max_depth: usize) -> Self {
        Generator {
            levels: (0..=max_depth).map(|_| Level::default()).collect(),
            depth: 0,
            nc_address: None,
            addresses: BitSet::with_capacity(26),
        }
    }

    pub fn reset(&mut self) {
        for level in &mut self.levels {
            level.reset();
        }
        self.depth = 0;
        self.nc_address = None;
        self.addresses.clear();
    }

    fn max_depth(&self) -> usize {
        self.levels.len() - 1
    }

    fn current(&mut self) -> &mut Level {
        &mut self.levels[self.depth]
    }

    /// Whether numbers belong to a macro expression rather than to an NC
    /// word.
    fn macro_mode(&self) -> bool {
        let base = &self.levels[0];
        self.depth != 0
            || base.unary.last().map_or(false, |u| *u != Unary::Neg)
            || !base.additive.is_empty()
            || !base.statements.is_empty()
    }

    /// An NC address followed by a macro value: the value is dropped.
    fn discard_nc_value(&mut self) {
        let base = &mut self.levels[0];
        if self.nc_address.is_some() && base.operands.front().map_or(false, Operand::is_arith) {
            base.operands.pop_front();
            self.nc_address = None;
        }
    }

    pub fn number(&mut self, text: &str, format: &NumberFormat) -> GenResult<()> {
        let mut literal = String::with_capacity(text.len() + 1);
        if self.current().unary.last() == Some(&Unary::Neg) {
            self.current().unary.pop();
            literal.push('-');
        }
        literal.push_str(text);

        if !self.macro_mode() && self.nc_address.is_some() {
            trace!(address = ?self.nc_address, value = %literal, "NC word");
            self.nc_address = None;
            return Ok(());
        }
        let value = format.parse(&literal).ok_or(ParseErrorKind::InvalidNumber(literal))?;
        let level = self.current();
        level.push_operand(Arith::Const(value).into());
        level.apply_unary()
    }

    pub fn word(&mut self, text: &str) -> GenResult<()> {
        if !self.macro_mode() {
            self.discard_nc_value();
        }
        let mut chars = text.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            self.nc_address = Some(letter);
            self.addresses.insert((letter as u8 - b'A') as usize);
            return Ok(());
        }
        let keyword = Keyword::from_str(text)
            .map_err(|_| ParseErrorKind::UnknownKeyword(text.into()))?;
        self.keyword(keyword)
    }

    fn keyword(&mut self, keyword: Keyword) -> GenResult<()> {
        let depth = self.depth;
        let level = self.current();
        match keyword.class() {
            KeywordClass::Function(func) => level.functions.push(func),
            KeywordClass::Atan => level.atan += 1,
            KeywordClass::Pow => level.pow += 1,
            KeywordClass::Unsupported => return Err(ParseErrorKind::Unsupported(keyword)),
            KeywordClass::Relational(op) => {
                level.seal(true, "comparison")?;
                level.relational.push_back(op);
            }
            KeywordClass::Logical(op) => level.logical(op)?,
            KeywordClass::And => level.and()?,
            KeywordClass::Statement(kw) => {
                if depth != 0 {
                    return Err(ParseErrorKind::StatementNotAtTopLevel(keyword));
                }
                if matches!(kw, StatementKw::Then | StatementKw::Goto | StatementKw::Do) {
                    level.reduce_and()?;
                    level.reduce_logical()?;
                    if level.unsealed() == 1 && level.operands.back().map_or(false, |op| !op.is_arith()) {
                        level.sealed = level.operands.len();
                    }
                }
                level.statements.push(kw);
            }
        }
        Ok(())
    }

    pub fn symbol(&mut self, symbol: Symbol) -> GenResult<()> {
        match symbol {
            Symbol::Hash => self.current().unary.push(Unary::Var),
            Symbol::Minus => {
                let level = self.current();
                if level.minus_is_unary() {
                    level.unary.push(Unary::Neg);
                } else {
                    level.additive(Additive::Arith(Op::Sub))?;
                }
            }
            Symbol::Plus => self.current().additive(Additive::Arith(Op::Add))?,
            Symbol::Equals => self.current().additive(Additive::Assign)?,
            Symbol::Star => self.current().multiplicative(Op::Mul)?,
            Symbol::Slash => {
                let level = self.current();
                let is_operator = if level.in_mul {
                    !level.priority.is_empty()
                } else {
                    !level.operands.is_empty()
                };
                // otherwise a block delete slash
                if is_operator {
                    level.multiplicative(Op::Div)?;
                }
            }
            Symbol::Comma => {
                let level = self.current();
                if level.two_args {
                    return Err(ParseErrorKind::DuplicateSeparator);
                }
                level.seal(false, ",")?;
                level.two_args = true;
            }
            Symbol::Open => {
                if self.depth == self.max_depth() {
                    return Err(ParseErrorKind::NestingTooDeep(self.max_depth()));
                }
                self.depth += 1;
                self.current().reset();
            }
            Symbol::Close => self.close()?,
        }
        Ok(())
    }

    /// Reduce the current level and hand its result to the parent.
    fn close(&mut self) -> GenResult<()> {
        if self.depth == 0 {
            return Err(ParseErrorKind::UnmatchedClose);
        }
        let level = self.current();
        level.check_complete()?;
        level.reduce()?;
        let two_args = level.two_args;
        let operands = std::mem::take(&mut level.operands);
        level.reset();
        self.depth -= 1;

        let parent = self.current();
        match (operands.len(), two_args) {
            (0, _) => Err(ParseErrorKind::EmptyBrackets),
            (1, false) => {
                let (operand,) = operands.into_iter().collect_tuple()
                                         .ok_or(ParseErrorKind::BracketOperands)?;
                parent.take_single(operand)
            }
            (2, true) => {
                let (first, second) = operands.into_iter().collect_tuple()
                                              .ok_or(ParseErrorKind::BracketOperands)?;
                match (first, second) {
                    (Operand::Arith(first), Operand::Arith(second)) => parent.take_pair(first, second),
                    _ => Err(ParseErrorKind::NotArithmetic("function")),
                }
            }
            _ => Err(ParseErrorKind::BracketOperands),
        }
    }

    /// Reduce the outermost level at the end of the block.
    pub fn finish(&mut self) -> GenResult<Command> {
        if self.depth != 0 {
            return Err(ParseErrorKind::UnmatchedOpen);
        }
        let base = &mut self.levels[0];
        base.check_complete()?;
        base.reduce()?;
        if base.two_args {
            return Err(ParseErrorKind::NoTwoArgumentFunction);
        }
        self.discard_nc_value();

        let base = &mut self.levels[0];
        let operands: Vec<Operand> = base.operands.drain(..).collect();
        if !base.statements.is_empty() {
            let statement = reduce::statement(&base.statements, operands)?;
            return Ok(Command::Macro(Macro::Statement(statement)));
        }
        match operands.len() {
            0 => Ok(Command::Nc(NcWords { addresses: self.addresses.clone() })),
            1 => {
                let (operand,) = operands.into_iter().collect_tuple()
                                         .ok_or(ParseErrorKind::TooManyOperands(1))?;
                Ok(Command::Macro(Macro::Expression(operand)))
            }
            n => Err(ParseErrorKind::TooManyOperands(n)),
        }
    }
}
