// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use std::collections::VecDeque;
use std::mem;
use std::rc::Rc;
use tracing::trace;

use crate::ast::*;
use super::error::ParseErrorKind;
use super::keyword::{Additive, StatementKw, Unary};
use super::reduce;

type LevelResult<T> = Result<T, ParseErrorKind>;

/// Pending state of one bracket nesting level.
#[derive(Debug, Default)]
pub(super) struct Level {
    pub unary: Vec<Unary>,
    pub additive: VecDeque<Additive>,
    pub multiplicative: VecDeque<Op>,
    /// Function keyword slots: one argument only, ATAN, POW.
    pub functions: Vec<Func>,
    pub atan: usize,
    pub pow: usize,
    pub relational: VecDeque<RelOp>,
    /// OR and XOR.
    pub logical: VecDeque<LogicOp>,
    pub and: usize,
    pub statements: Vec<StatementKw>,
    pub operands: VecDeque<Operand>,
    /// Operands of the multiplicative or AND group.
    pub priority: VecDeque<Operand>,
    pub in_mul: bool,
    pub in_and: bool,
    pub two_args: bool,
    /// Number of leading operands that are complete and no longer take part
    /// in the reductions of this level: a condition, a first argument or the
    /// left side of a comparison.
    pub sealed: usize,
}

impl Level {
    pub fn reset(&mut self) {
        *self = Level::default();
    }

    pub fn unsealed(&self) -> usize {
        self.operands.len().saturating_sub(self.sealed)
    }

    /// Queue an operand where its group collects them.
    pub fn push_operand(&mut self, operand: Operand) {
        if self.in_mul || self.in_and {
            self.priority.push_back(operand);
        } else {
            self.operands.push_back(operand);
        }
    }

    /// Apply pending `#` and `-` to the most recent operand.
    pub fn apply_unary(&mut self) -> LevelResult<()> {
        if self.unary.is_empty() {
            return Ok(());
        }
        let queue = if self.in_mul || self.in_and { &mut self.priority } else { &mut self.operands };
        let mut expr = match queue.pop_back() {
            Some(Operand::Arith(expr)) => expr,
            Some(_) => return Err(ParseErrorKind::NotArithmetic("# or -")),
            None => return Err(ParseErrorKind::DanglingOperator("# or -")),
        };
        while let Some(unary) = self.unary.pop() {
            expr = Rc::new(match unary {
                Unary::Var => Arith::Var(expr),
                Unary::Neg => Arith::Neg(expr),
            });
        }
        queue.push_back(Operand::Arith(expr));
        Ok(())
    }

    /// Decide whether a `-` is a sign rather than a subtraction.
    pub fn minus_is_unary(&self) -> bool {
        if !self.relational.is_empty() && self.unsealed() == 0 {
            true
        } else if self.in_mul {
            self.priority.len() == self.multiplicative.len()
        } else if self.in_and {
            self.priority.len() == self.and
        } else {
            self.unsealed() == self.additive.len() + self.logical.len()
        }
    }

    /// Move the most recent operand into the priority queue.
    fn spill(&mut self, what: &'static str) -> LevelResult<()> {
        if self.unsealed() == 0 {
            return Err(ParseErrorKind::MissingOperand(what));
        }
        if let Some(last) = self.operands.pop_back() {
            self.priority.push_back(last);
        }
        Ok(())
    }

    pub fn multiplicative(&mut self, op: Op) -> LevelResult<()> {
        if self.in_and {
            return Err(ParseErrorKind::MixedGroups("AND", "* and /"));
        }
        if !self.in_mul {
            self.spill("* or /")?;
            self.in_mul = true;
        }
        self.multiplicative.push_back(op);
        Ok(())
    }

    pub fn and(&mut self) -> LevelResult<()> {
        self.reduce_multiplicative()?;
        if !self.in_and {
            self.spill("AND")?;
            self.in_and = true;
        }
        self.and += 1;
        Ok(())
    }

    pub fn logical(&mut self, op: LogicOp) -> LevelResult<()> {
        if self.additive.iter().any(|a| matches!(a, Additive::Arith(_))) {
            return Err(ParseErrorKind::MixedGroups("logical operators", "+ and -"));
        }
        self.reduce_multiplicative()?;
        self.reduce_and()?;
        self.logical.push_back(op);
        Ok(())
    }

    pub fn additive(&mut self, op: Additive) -> LevelResult<()> {
        if matches!(op, Additive::Arith(_)) && !self.logical.is_empty() {
            return Err(ParseErrorKind::MixedGroups("logical operators", "+ and -"));
        }
        self.reduce_multiplicative()?;
        self.additive.push_back(op);
        Ok(())
    }

    fn segment(&mut self) -> Vec<Operand> {
        let sealed = self.sealed.min(self.operands.len());
        self.operands.drain(sealed..).collect()
    }

    pub fn reduce_and(&mut self) -> LevelResult<()> {
        if !self.in_and {
            return Ok(());
        }
        let operands = mem::take(&mut self.priority).into_iter().collect();
        let result = reduce::fold_logical(operands, vec![LogicOp::And; self.and])?;
        trace!(%result, "reduced AND group");
        self.in_and = false;
        self.and = 0;
        self.operands.push_back(result);
        Ok(())
    }

    /// Reduce OR/XOR.  A leading `#i=` assigns the result.
    pub fn reduce_logical(&mut self) -> LevelResult<()> {
        if self.logical.is_empty() {
            return Ok(());
        }
        let mut segment = self.segment();
        let target = if self.additive.front() == Some(&Additive::Assign)
            && segment.first().map_or(false, Operand::is_arith)
        {
            self.additive.pop_front();
            Some(segment.remove(0))
        } else {
            None
        };
        let ops = self.logical.drain(..).collect();
        let mut result = reduce::fold_logical(segment, ops)?;
        if let Some(target) = target {
            result = Operand::Arith(reduce::assign(target, result)?);
        }
        trace!(%result, "reduced logical group");
        self.operands.push_back(result);
        Ok(())
    }

    pub fn reduce_multiplicative(&mut self) -> LevelResult<()> {
        if !self.in_mul {
            return Ok(());
        }
        let operands = mem::take(&mut self.priority).into_iter().collect();
        let ops = self.multiplicative.drain(..).collect();
        let result = reduce::fold_multiplicative(operands, ops)?;
        trace!(%result, "reduced multiplicative group");
        self.in_mul = false;
        self.operands.push_back(result);
        Ok(())
    }

    pub fn reduce_additive(&mut self) -> LevelResult<()> {
        if self.additive.is_empty() {
            return Ok(());
        }
        let segment = self.segment();
        let ops = self.additive.drain(..).collect();
        let result = reduce::fold_additive(segment, ops)?;
        trace!(%result, "reduced additive group");
        self.operands.push_back(result);
        Ok(())
    }

    pub fn reduce_relational(&mut self) -> LevelResult<()> {
        let op = match self.relational.pop_front() {
            Some(op) => op,
            None => return Ok(()),
        };
        if !self.relational.is_empty() || self.operands.len() != 2 {
            return Err(ParseErrorKind::OperandMismatch("comparison"));
        }
        let mut operands = mem::take(&mut self.operands);
        let (lhs, rhs) = match (operands.pop_front(), operands.pop_front()) {
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            _ => return Err(ParseErrorKind::OperandMismatch("comparison")),
        };
        let result = reduce::relational(op, lhs, rhs)?;
        trace!(%result, "reduced comparison");
        self.operands.push_back(result);
        self.sealed = 0;
        Ok(())
    }

    /// Run the reductions of a closing level in precedence order.
    pub fn reduce(&mut self) -> LevelResult<()> {
        self.reduce_and()?;
        self.reduce_logical()?;
        self.reduce_multiplicative()?;
        self.reduce_additive()?;
        self.reduce_relational()
    }

    /// Reduce the current segment to one operand and exclude it from further
    /// reductions, before `,` or a comparison keyword.
    pub fn seal(&mut self, arithmetic_only: bool, what: &'static str) -> LevelResult<()> {
        if arithmetic_only && (self.in_and || !self.logical.is_empty()) {
            return Err(ParseErrorKind::MixedGroups("logical operators", what));
        }
        self.reduce_and()?;
        self.reduce_logical()?;
        self.reduce_multiplicative()?;
        self.reduce_additive()?;
        match self.unsealed() {
            1 => {
                self.sealed = self.operands.len();
                Ok(())
            }
            0 => Err(ParseErrorKind::MissingOperand(what)),
            _ => Err(ParseErrorKind::OperandMismatch(what)),
        }
    }

    /// Check that nothing is left waiting for an operand.
    pub fn check_complete(&self) -> LevelResult<()> {
        if !self.unary.is_empty() {
            Err(ParseErrorKind::DanglingOperator("# or -"))
        } else if !self.functions.is_empty() || self.atan > 0 {
            Err(ParseErrorKind::DanglingOperator("function"))
        } else if self.pow > 0 {
            Err(ParseErrorKind::MissingArgument)
        } else {
            Ok(())
        }
    }

    /// Accept the single result of a closed child level.
    pub fn take_single(&mut self, operand: Operand) -> LevelResult<()> {
        let operand = match operand {
            Operand::Arith(arg) => {
                if let Some(func) = self.functions.pop() {
                    Arith::Call(Call::Unary(func, arg)).into()
                } else if self.atan > 0 {
                    self.atan -= 1;
                    Arith::Call(Call::Unary(Func::Atan, arg)).into()
                } else if self.pow > 0 {
                    return Err(ParseErrorKind::MissingArgument);
                } else {
                    Operand::Arith(arg)
                }
            }
            other => {
                if !self.functions.is_empty() || self.atan > 0 || self.pow > 0 {
                    return Err(ParseErrorKind::NotArithmetic("function"));
                }
                other
            }
        };
        self.push_operand(operand);
        self.apply_unary()
    }

    /// Accept the two arguments of a closed child level.
    pub fn take_pair(&mut self, first: Rc<Arith>, second: Rc<Arith>) -> LevelResult<()> {
        let call = if self.pow > 0 {
            self.pow -= 1;
            Call::Pow(first, second)
        } else if self.atan > 0 {
            self.atan -= 1;
            Call::Atan2(first, second)
        } else {
            return Err(ParseErrorKind::NoTwoArgumentFunction);
        };
        self.push_operand(Arith::Call(call).into());
        self.apply_unary()
    }
}
