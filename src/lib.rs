// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A parsing and evaluation library for the custom macro language of
//! [Fanuc] style CNC controllers ("Macro B").
//!
//! Blocks are parsed one at a time.  A block either contains a macro
//! expression or statement, such as `#1=#2+SIN[30]` or
//! `IF [#1 GT 10] GOTO 20`, or plain NC words like `G01 X#1`, which are
//! only classified.
//!
//! [Fanuc]: https://www.fanuc.co.jp/
//!
//! ## Basic usage
//!
//! Use `macro_b::parse::MacroParser` to turn a block into a `Command`, then
//! evaluate the operator tree from `macro_b::ast` with an
//! `macro_b::eval::Evaluator` over a `macro_b::vars::VariableStore`.
//!
//! ```rust
//! use macro_b::eval::Evaluator;
//! use macro_b::parse::{Command, Macro, MacroParser};
//! use macro_b::vars::{VariableStore, Variables};
//!
//! let mut parser = MacroParser::default();
//! let mut vars = VariableStore::default();
//!
//! if let Ok(Command::Macro(Macro::Expression(expr))) = parser.parse_block("#1=POW[2,8]") {
//!     let value = Evaluator::new(&mut vars).eval_operand(&expr).unwrap();
//!     assert_eq!(value, 256.0);
//! }
//! assert_eq!(vars.read(1), Some(256.0));
//! ```
//!
//! ## Unsupported features
//!
//! Branches and loops are parsed and their conditions evaluated, but
//! executing them across blocks is up to the caller.  The BCD conversion
//! functions `BIN`, `BCD` and `ADP` are recognized but rejected.

pub mod ast;
pub mod eval;
pub mod number;
pub mod parse;
pub mod vars;

// internal helpers
pub(crate) mod util;
