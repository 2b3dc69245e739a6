// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error("variable #{0} is read only")]
    ReadOnly(u16),
    #[error("the variable #{0} does not exist")]
    UnknownVariable(u16),
    #[error("#{0} cannot be passed as a local argument")]
    InvalidArgument(u16),
    #[error("at most {0} nested variable levels are allowed")]
    ScopeOverflow(usize),
    #[error("no local variable level to leave")]
    ScopeUnderflow,
    #[error("a modal variable level is still entered")]
    ScopeMismatch,
    #[error("no modal variable level has been created")]
    NoModalLevel,
}
