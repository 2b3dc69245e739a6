// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use thiserror::Error;

use super::keyword::Keyword;

/// A block that could not be turned into a command.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("column {column}: {kind}")]
pub struct ParseError {
    /// 1-based position of the offending text in the block.
    pub column: usize,
    pub kind: ParseErrorKind,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("unknown keyword {0}")]
    UnknownKeyword(String),
    #[error("{0} is not supported")]
    Unsupported(Keyword),
    #[error("{0} needs an operand on its left")]
    MissingOperand(&'static str),
    #[error("operands do not match the pending {0} operators")]
    OperandMismatch(&'static str),
    #[error("{0} needs an arithmetic operand")]
    NotArithmetic(&'static str),
    #[error("the left side of = must be a variable")]
    AssignToNonVariable,
    #[error("= must directly follow a single operand")]
    MisplacedAssign,
    #[error("{0} and {1} must be separated by brackets")]
    MixedGroups(&'static str, &'static str),
    #[error("brackets nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("unclosed bracket")]
    UnmatchedOpen,
    #[error("closing bracket without opening bracket")]
    UnmatchedClose,
    #[error("empty brackets")]
    EmptyBrackets,
    #[error("wrong number of expressions in brackets")]
    BracketOperands,
    #[error("more than one , in brackets")]
    DuplicateSeparator,
    #[error("two arguments given, but no function takes them")]
    NoTwoArgumentFunction,
    #[error("POW needs two arguments")]
    MissingArgument,
    #[error("{0} is not followed by its operand")]
    DanglingOperator(&'static str),
    #[error("{0} is only allowed outside brackets")]
    StatementNotAtTopLevel(Keyword),
    #[error("invalid combination of statement keywords")]
    InvalidStatement,
    #[error("a condition must be a comparison or logical expression")]
    InvalidCondition,
    #[error("{0} separate expressions in one block")]
    TooManyOperands(usize),
    #[error("{0}")]
    Syntax(String),
}

impl ParseError {
    /// Whether the block uses a feature that is known but not implemented.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Unsupported(_))
    }
}
