// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use strum_macros::{Display, EnumString};

use crate::ast::{Func, LogicOp, Op, RelOp};

/// All words of more than one letter that a block may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Keyword {
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
    Bin,
    Bcd,
    Adp,
    Pow,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    And,
    Or,
    Xor,
    If,
    While,
    Goto,
    Then,
    Do,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeywordClass {
    Function(Func),
    /// ATAN takes one or two arguments.
    Atan,
    Pow,
    Unsupported,
    Relational(RelOp),
    /// OR and XOR.
    Logical(LogicOp),
    And,
    Statement(StatementKw),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatementKw {
    If,
    While,
    Goto,
    Then,
    Do,
    End,
}

impl Keyword {
    pub(crate) fn class(self) -> KeywordClass {
        use KeywordClass::*;
        match self {
            Keyword::Sin   => Function(Func::Sin),
            Keyword::Cos   => Function(Func::Cos),
            Keyword::Tan   => Function(Func::Tan),
            Keyword::Asin  => Function(Func::Asin),
            Keyword::Acos  => Function(Func::Acos),
            Keyword::Sqrt  => Function(Func::Sqrt),
            Keyword::Abs   => Function(Func::Abs),
            Keyword::Round => Function(Func::Round),
            Keyword::Fix   => Function(Func::Fix),
            Keyword::Fup   => Function(Func::Fup),
            Keyword::Ln    => Function(Func::Ln),
            Keyword::Exp   => Function(Func::Exp),
            Keyword::Atan  => Atan,
            Keyword::Pow   => Pow,
            Keyword::Bin | Keyword::Bcd | Keyword::Adp => Unsupported,
            Keyword::Eq    => Relational(RelOp::Eq),
            Keyword::Ne    => Relational(RelOp::Ne),
            Keyword::Gt    => Relational(RelOp::Gt),
            Keyword::Ge    => Relational(RelOp::Ge),
            Keyword::Lt    => Relational(RelOp::Lt),
            Keyword::Le    => Relational(RelOp::Le),
            Keyword::Or    => Logical(LogicOp::Or),
            Keyword::Xor   => Logical(LogicOp::Xor),
            Keyword::And   => And,
            Keyword::If    => Statement(StatementKw::If),
            Keyword::While => Statement(StatementKw::While),
            Keyword::Goto  => Statement(StatementKw::Goto),
            Keyword::Then  => Statement(StatementKw::Then),
            Keyword::Do    => Statement(StatementKw::Do),
            Keyword::End   => Statement(StatementKw::End),
        }
    }
}

/// Operator characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Symbol {
    Hash,
    Minus,
    Plus,
    Star,
    Slash,
    Equals,
    Open,
    Close,
    Comma,
}

impl Symbol {
    pub(crate) fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '#' => Symbol::Hash,
            '-' => Symbol::Minus,
            '+' => Symbol::Plus,
            '*' => Symbol::Star,
            '/' => Symbol::Slash,
            '=' => Symbol::Equals,
            '[' => Symbol::Open,
            ']' => Symbol::Close,
            ',' => Symbol::Comma,
            _ => return None
        })
    }
}

/// A pending prefix operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Unary {
    Var,
    Neg,
}

/// A pending operator of the additive group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Additive {
    Arith(Op),
    Assign,
}
