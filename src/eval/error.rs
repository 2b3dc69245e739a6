// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use thiserror::Error;

use crate::vars::VariableError;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("the variable #{0} does not exist")]
    UnknownVariable(u16),
    #[error("variable number {0} is out of range")]
    InvalidVariableNumber(f64),
    #[error("cannot assign to {0}, only to a variable")]
    NotAssignable(String),
    #[error(transparent)]
    Variable(#[from] VariableError),
}
