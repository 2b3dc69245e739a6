// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use std::fmt::{self, Formatter};
use std::rc::Rc;
use strum_macros::Display;

/// An arithmetic expression, evaluating to a number.
#[derive(Debug, Clone, PartialEq)]
pub enum Arith {
    Const(f64),
    Neg(Rc<Arith>),
    /// Variable whose number is given by the expression.
    Var(Rc<Arith>),
    Call(Call),
    BinOp(Op, Rc<Arith>, Rc<Arith>),
    /// Assignment to a `Var` target, evaluating to the stored value.
    Assign(Rc<Arith>, Operand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Unary(Func, Rc<Arith>),
    Pow(Rc<Arith>, Rc<Arith>),
    Atan2(Rc<Arith>, Rc<Arith>),
}

/// Functions with a single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Abs,
    Round,
    Fix,
    Fup,
    Ln,
    Exp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RelOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicOp {
    And,
    Or,
    Xor,
}

/// A comparison of two arithmetic expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Relational {
    pub op: RelOp,
    pub lhs: Rc<Arith>,
    pub rhs: Rc<Arith>,
}

/// A logical combination; either side may be of any kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    pub op: LogicOp,
    pub lhs: Operand,
    pub rhs: Operand,
}

/// Any complete expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Arith(Rc<Arith>),
    Rel(Rc<Relational>),
    Logic(Rc<Logical>),
}

impl Operand {
    pub fn is_arith(&self) -> bool {
        matches!(self, Operand::Arith(_))
    }

    /// Convert into a condition, which must not be arithmetic.
    pub fn into_condition(self) -> Option<Condition> {
        match self {
            Operand::Rel(rel) => Some(Condition::Rel(rel)),
            Operand::Logic(logic) => Some(Condition::Logic(logic)),
            Operand::Arith(_) => None,
        }
    }
}

impl From<Arith> for Operand {
    fn from(expr: Arith) -> Self {
        Operand::Arith(Rc::new(expr))
    }
}

impl From<Relational> for Operand {
    fn from(rel: Relational) -> Self {
        Operand::Rel(Rc::new(rel))
    }
}

impl From<Logical> for Operand {
    fn from(logic: Logical) -> Self {
        Operand::Logic(Rc::new(logic))
    }
}

/// The condition of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Rel(Rc<Relational>),
    Logic(Rc<Logical>),
}

/// `IF [cond] THEN expr`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalArithmetic {
    pub condition: Option<Condition>,
    pub operand: Option<Rc<Arith>>,
}

/// `IF [cond] GOTO n` or `GOTO n`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalBranch {
    pub condition: Option<Condition>,
    pub operand: Option<Rc<Arith>>,
}

/// `WHILE [cond] DO n` or `DO n`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalLoop {
    pub condition: Option<Condition>,
    pub operand: Option<Rc<Arith>>,
}

/// `END n`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopEnd {
    pub operand: Option<Rc<Arith>>,
}

impl ConditionalArithmetic {
    pub fn new(condition: Condition, operand: Rc<Arith>) -> Self {
        ConditionalArithmetic { condition: Some(condition), operand: Some(operand) }
    }

    pub fn is_empty(&self) -> bool {
        self.condition.is_none() || self.operand.is_none()
    }
}

impl ConditionalBranch {
    pub fn new(condition: Option<Condition>, operand: Rc<Arith>) -> Self {
        ConditionalBranch { condition, operand: Some(operand) }
    }

    pub fn is_empty(&self) -> bool {
        self.operand.is_none()
    }
}

impl ConditionalLoop {
    pub fn new(condition: Option<Condition>, operand: Rc<Arith>) -> Self {
        ConditionalLoop { condition, operand: Some(operand) }
    }

    pub fn is_empty(&self) -> bool {
        self.operand.is_none()
    }
}

impl LoopEnd {
    pub fn new(operand: Rc<Arith>) -> Self {
        LoopEnd { operand: Some(operand) }
    }

    pub fn is_empty(&self) -> bool {
        self.operand.is_none()
    }
}

/// A control statement of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Arithmetic(ConditionalArithmetic),
    Branch(ConditionalBranch),
    Loop(ConditionalLoop),
    LoopEnd(LoopEnd),
}

impl Statement {
    pub fn is_empty(&self) -> bool {
        match self {
            Statement::Arithmetic(s) => s.is_empty(),
            Statement::Branch(s) => s.is_empty(),
            Statement::Loop(s) => s.is_empty(),
            Statement::LoopEnd(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Arith {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Arith::Const(n) => write!(f, "{}", n),
            Arith::Neg(expr) => write!(f, "-{}", expr),
            Arith::Var(id) => match **id {
                Arith::Assign(..) => write!(f, "#[{}]", id),
                _ => write!(f, "#{}", id),
            },
            Arith::Call(call) => write!(f, "{}", call),
            Arith::BinOp(op, lhs, rhs) => write!(f, "[{} {} {}]", lhs, op, rhs),
            Arith::Assign(target, value) => write!(f, "{}={}", target, value),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Call::Unary(func, arg) => write!(f, "{}[{}]", func, arg),
            Call::Pow(base, exp) => write!(f, "POW[{}, {}]", base, exp),
            Call::Atan2(y, x) => write!(f, "ATAN[{}, {}]", y, x),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
        })
    }
}

impl fmt::Display for Relational {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{} {} {}]", self.lhs, self.op, self.rhs)
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{} {} {}]", self.lhs, self.op, self.rhs)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Operand::Arith(expr) => write!(f, "{}", expr),
            Operand::Rel(rel) => write!(f, "{}", rel),
            Operand::Logic(logic) => write!(f, "{}", logic),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Condition::Rel(rel) => write!(f, "{}", rel),
            Condition::Logic(logic) => write!(f, "{}", logic),
        }
    }
}

/// Writes `prefix` with the condition, if any, then `keyword` and the operand.
fn write_statement(f: &mut Formatter, prefix: &str, condition: &Option<Condition>,
                   keyword: &str, operand: &Option<Rc<Arith>>) -> fmt::Result {
    let operand = match operand {
        Some(operand) => operand,
        None => return Ok(()),
    };
    if let Some(cond) = condition {
        write!(f, "{}{} ", prefix, cond)?;
    }
    write!(f, "{} {}", keyword, operand)
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Statement::Arithmetic(s) if s.is_empty() => Ok(()),
            Statement::Arithmetic(s) => write_statement(f, "IF", &s.condition, "THEN", &s.operand),
            Statement::Branch(s) => write_statement(f, "IF", &s.condition, "GOTO", &s.operand),
            Statement::Loop(s) => write_statement(f, "WHILE", &s.condition, "DO", &s.operand),
            Statement::LoopEnd(s) => write_statement(f, "", &None, "END", &s.operand),
        }
    }
}
