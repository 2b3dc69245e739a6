// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


//! Reductions of one precedence tier each.  They consume the queued operands
//! and operators of the tier and return the combined operand.

use std::rc::Rc;
use itertools::Itertools;

use crate::ast::*;
use super::error::ParseErrorKind;
use super::keyword::{Additive, StatementKw};

type ReduceResult<T> = Result<T, ParseErrorKind>;

fn arith(operand: Operand, what: &'static str) -> ReduceResult<Rc<Arith>> {
    match operand {
        Operand::Arith(expr) => Ok(expr),
        _ => Err(ParseErrorKind::NotArithmetic(what)),
    }
}

fn check_count<T, U>(operands: &[T], ops: &[U], what: &'static str) -> ReduceResult<()> {
    if operands.len() == ops.len() + 1 {
        Ok(())
    } else {
        Err(ParseErrorKind::OperandMismatch(what))
    }
}

/// Left fold of a `*`/`/` group.
pub(super) fn fold_multiplicative(operands: Vec<Operand>, ops: Vec<Op>) -> ReduceResult<Operand> {
    check_count(&operands, &ops, "*/")?;
    let mut operands = operands.into_iter();
    let mut acc = match operands.next() {
        Some(first) => arith(first, "*")?,
        None => return Err(ParseErrorKind::OperandMismatch("*/")),
    };
    for (op, rhs) in ops.into_iter().zip(operands) {
        acc = Rc::new(Arith::BinOp(op, acc, arith(rhs, "*")?));
    }
    Ok(Operand::Arith(acc))
}

/// Left fold of a logical group; operands may be of any kind.
pub(super) fn fold_logical(operands: Vec<Operand>, ops: Vec<LogicOp>) -> ReduceResult<Operand> {
    check_count(&operands, &ops, "logical")?;
    let mut operands = operands.into_iter();
    let mut acc = operands.next().ok_or(ParseErrorKind::OperandMismatch("logical"))?;
    for (op, rhs) in ops.into_iter().zip(operands) {
        acc = Logical { op, lhs: acc, rhs }.into();
    }
    Ok(acc)
}

pub(super) fn assign(target: Operand, value: Operand) -> ReduceResult<Rc<Arith>> {
    let target = match target {
        Operand::Arith(target) if matches!(*target, Arith::Var(_)) => target,
        _ => return Err(ParseErrorKind::AssignToNonVariable),
    };
    if let Operand::Rel(_) = value {
        return Err(ParseErrorKind::NotArithmetic("="));
    }
    Ok(Rc::new(Arith::Assign(target, value)))
}

/// Left fold of a `+`/`-`/`=` group.  An `=` defers its target until the
/// rest of the chain is reduced, so `#1=#2+3` assigns the sum.
pub(super) fn fold_additive(operands: Vec<Operand>, ops: Vec<Additive>) -> ReduceResult<Operand> {
    check_count(&operands, &ops, "+-=")?;
    let mut operands = operands.into_iter();
    let mut acc = operands.next().ok_or(ParseErrorKind::OperandMismatch("+-="))?;
    let mut targets = Vec::new();
    // no + or - applied since the chain started or the last =
    let mut bare = true;
    for (op, rhs) in ops.into_iter().zip(operands) {
        match op {
            Additive::Assign => {
                if !bare {
                    return Err(ParseErrorKind::MisplacedAssign);
                }
                targets.push(acc);
                acc = rhs;
            }
            Additive::Arith(op) => {
                let lhs = arith(acc, "+/-")?;
                acc = Arith::BinOp(op, lhs, arith(rhs, "+/-")?).into();
                bare = false;
            }
        }
    }
    while let Some(target) = targets.pop() {
        acc = Operand::Arith(assign(target, acc)?);
    }
    Ok(acc)
}

pub(super) fn relational(op: RelOp, lhs: Operand, rhs: Operand) -> ReduceResult<Operand> {
    Ok(Relational { op, lhs: arith(lhs, "comparison")?, rhs: arith(rhs, "comparison")? }.into())
}

/// Combine the statement keywords of a block with its operands.
pub(super) fn statement(keywords: &[StatementKw], operands: Vec<Operand>) -> ReduceResult<Statement> {
    use StatementKw::*;

    match operands.last() {
        Some(last) if last.is_arith() => (),
        _ => return Err(ParseErrorKind::NotArithmetic("statement")),
    }
    let conditional = |operands: Vec<Operand>| -> ReduceResult<(Condition, Rc<Arith>)> {
        let (cond, operand) = operands.into_iter().collect_tuple()
                                      .ok_or(ParseErrorKind::InvalidStatement)?;
        let cond = cond.into_condition().ok_or(ParseErrorKind::InvalidCondition)?;
        Ok((cond, arith(operand, "statement")?))
    };
    let single = |operands: Vec<Operand>| -> ReduceResult<Rc<Arith>> {
        let (operand,) = operands.into_iter().collect_tuple()
                                 .ok_or(ParseErrorKind::InvalidStatement)?;
        arith(operand, "statement")
    };

    Ok(match keywords {
        [If, Then] => {
            let (cond, operand) = conditional(operands)?;
            Statement::Arithmetic(ConditionalArithmetic::new(cond, operand))
        }
        [If, Goto] => {
            let (cond, operand) = conditional(operands)?;
            Statement::Branch(ConditionalBranch::new(Some(cond), operand))
        }
        [Goto] => Statement::Branch(ConditionalBranch::new(None, single(operands)?)),
        [While, Do] => {
            let (cond, operand) = conditional(operands)?;
            Statement::Loop(ConditionalLoop::new(Some(cond), operand))
        }
        [Do] => Statement::Loop(ConditionalLoop::new(None, single(operands)?)),
        [End] => Statement::LoopEnd(LoopEnd::new(single(operands)?)),
        _ => return Err(ParseErrorKind::InvalidStatement),
    })
}
