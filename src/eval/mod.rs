// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


//! Evaluation of operator trees against a variable store.

mod error;

use tracing::trace;

use crate::ast::*;
use crate::util::{deg_to_rad, num_to_id, rad_to_deg, truthy};
use crate::vars::Variables;

pub use self::error::*;

type EvalResult<T> = Result<T, EvalError>;

/// Evaluates expressions, reading and writing variables through `vars`.
pub struct Evaluator<'a> {
    vars: &'a mut dyn Variables,
}

impl<'a> Evaluator<'a> {
    pub fn new(vars: &'a mut dyn Variables) -> Self {
        Evaluator { vars }
    }

    fn var_id(&mut self, id: &Arith) -> EvalResult<u16> {
        let value = self.eval_arith(id)?;
        num_to_id(value, EvalError::InvalidVariableNumber)
    }

    fn read_var(&self, id: u16) -> EvalResult<f64> {
        self.vars.read(id).ok_or(EvalError::UnknownVariable(id))
    }

    pub fn eval_arith(&mut self, expr: &Arith) -> EvalResult<f64> {
        Ok(match expr {
            Arith::Const(value) => *value,
            Arith::Neg(arg) => -self.eval_arith(arg)?,
            Arith::Var(id) => {
                let id = self.var_id(id)?;
                self.read_var(id)?
            }
            Arith::BinOp(op, left, right) => {
                let left = self.eval_arith(left)?;
                let right = self.eval_arith(right)?;
                match op {
                    Op::Add => left + right,
                    Op::Sub => left - right,
                    Op::Mul => left * right,
                    Op::Div => left / right,
                }
            }
            Arith::Call(call) => match call {
                Call::Pow(base, exp) => {
                    let base = self.eval_arith(base)?;
                    base.powf(self.eval_arith(exp)?)
                }
                Call::Atan2(y, x) => {
                    let y = self.eval_arith(y)?;
                    rad_to_deg(y.atan2(self.eval_arith(x)?))
                }
                Call::Unary(func, arg) => {
                    let arg = self.eval_arith(arg)?;
                    match func {
                        Func::Sin   => deg_to_rad(arg).sin(),
                        Func::Cos   => deg_to_rad(arg).cos(),
                        Func::Tan   => deg_to_rad(arg).tan(),
                        Func::Asin  => rad_to_deg(arg.asin()),
                        Func::Acos  => rad_to_deg(arg.acos()),
                        Func::Atan  => rad_to_deg(arg.atan()),
                        Func::Sqrt  => arg.sqrt(),
                        Func::Abs   => arg.abs(),
                        Func::Round => arg.round(),
                        Func::Fix   => if arg < 0. { arg.ceil() } else { arg.floor() },
                        Func::Fup   => if arg < 0. { arg.floor() } else { arg.ceil() },
                        Func::Ln    => arg.ln(),
                        Func::Exp   => arg.exp(),
                    }
                }
            },
            Arith::Assign(target, value) => {
                let value = self.eval_operand(value)?;
                // the target number sees the writes of the value
                let id = match &**target {
                    Arith::Var(id) => self.var_id(id)?,
                    other => return Err(EvalError::NotAssignable(other.to_string())),
                };
                trace!(id, value, "assignment");
                self.vars.write(id, value)?;
                self.read_var(id)?
            }
        })
    }

    pub fn eval_relational(&mut self, rel: &Relational) -> EvalResult<bool> {
        let left = self.eval_arith(&rel.lhs)?;
        let right = self.eval_arith(&rel.rhs)?;
        Ok(match rel.op {
            RelOp::Eq => left == right,
            RelOp::Ne => left != right,
            RelOp::Gt => left > right,
            RelOp::Ge => left >= right,
            RelOp::Lt => left < right,
            RelOp::Le => left <= right,
        })
    }

    /// Evaluate to 0 or 1.
    pub fn eval_logical(&mut self, logic: &Logical) -> EvalResult<u32> {
        let left = self.eval_truth(&logic.lhs)?;
        let right = self.eval_truth(&logic.rhs)?;
        Ok(match logic.op {
            LogicOp::And => left & right,
            LogicOp::Or  => left | right,
            LogicOp::Xor => left ^ right,
        })
    }

    fn eval_truth(&mut self, operand: &Operand) -> EvalResult<u32> {
        Ok(match operand {
            Operand::Arith(expr) => truthy(self.eval_arith(expr)?) as u32,
            Operand::Rel(rel) => self.eval_relational(rel)? as u32,
            Operand::Logic(logic) => self.eval_logical(logic)?,
        })
    }

    /// Evaluate any operand to a number; truth values become 0 or 1.
    pub fn eval_operand(&mut self, operand: &Operand) -> EvalResult<f64> {
        Ok(match operand {
            Operand::Arith(expr) => self.eval_arith(expr)?,
            Operand::Rel(rel) => if self.eval_relational(rel)? { 1. } else { 0. },
            Operand::Logic(logic) => self.eval_logical(logic)? as f64,
        })
    }

    pub fn eval_condition(&mut self, cond: &Condition) -> EvalResult<bool> {
        Ok(match cond {
            Condition::Rel(rel) => self.eval_relational(rel)?,
            Condition::Logic(logic) => self.eval_logical(logic)? != 0,
        })
    }

    fn eval_optional(&mut self, cond: &Option<Condition>) -> EvalResult<bool> {
        match cond {
            Some(cond) => self.eval_condition(cond),
            None => Ok(true),
        }
    }
}

// Statement accessors: an empty statement yields zero or false.

impl ConditionalArithmetic {
    /// Evaluate the condition, and the operand if it holds.
    pub fn evaluate(&self, vars: &mut dyn Variables) -> EvalResult<bool> {
        let (cond, operand) = match (&self.condition, &self.operand) {
            (Some(cond), Some(operand)) => (cond, operand),
            _ => return Ok(false),
        };
        let mut eval = Evaluator::new(vars);
        if eval.eval_condition(cond)? {
            eval.eval_arith(operand)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn arithmetic_value(&self, vars: &mut dyn Variables) -> EvalResult<f64> {
        match &self.operand {
            Some(operand) if !self.is_empty() => Evaluator::new(vars).eval_arith(operand),
            _ => Ok(0.),
        }
    }
}

impl ConditionalBranch {
    pub fn evaluate(&self, vars: &mut dyn Variables) -> EvalResult<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        Evaluator::new(vars).eval_optional(&self.condition)
    }

    /// The sequence number to jump to.
    pub fn branch_number(&self, vars: &mut dyn Variables) -> EvalResult<i32> {
        match &self.operand {
            Some(operand) => Ok(Evaluator::new(vars).eval_arith(operand)? as i32),
            None => Ok(0),
        }
    }
}

impl ConditionalLoop {
    pub fn evaluate(&self, vars: &mut dyn Variables) -> EvalResult<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        Evaluator::new(vars).eval_optional(&self.condition)
    }

    /// The identifier shared by `DO` and the matching `END`.
    pub fn loop_number(&self, vars: &mut dyn Variables) -> EvalResult<u16> {
        match &self.operand {
            Some(operand) => Ok(Evaluator::new(vars).eval_arith(operand)? as u16),
            None => Ok(0),
        }
    }
}

impl LoopEnd {
    pub fn evaluate(&self, vars: &mut dyn Variables) -> EvalResult<u16> {
        match &self.operand {
            Some(operand) => Ok(Evaluator::new(vars).eval_arith(operand)? as u16),
            None => Ok(0),
        }
    }
}
