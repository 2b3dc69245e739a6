// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


//! Scanning and reduction of single blocks.

mod error;
mod generator;
mod keyword;
mod level;
mod reduce;

use std::fmt;
use fixedbitset::FixedBitSet as BitSet;
use pest::Parser;
use pest_derive::Parser;
use strum_macros::Display;
use tracing::{debug, trace};

use crate::ast::{Operand, Statement};
use crate::number::NumberFormat;
use self::generator::Generator;
use self::keyword::Symbol;

pub use self::error::*;
pub use self::keyword::Keyword;

#[derive(Parser)]
#[grammar = "block.pest"]
struct BlockParser;

#[derive(Clone, Debug, PartialEq)]
pub struct ParserConfig {
    /// Deepest allowed bracket nesting.
    pub max_depth: usize,
    pub number: NumberFormat,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig { max_depth: 5, number: NumberFormat::default() }
    }
}

/// The result of a block with macro content.
#[derive(Clone, Debug, PartialEq)]
pub enum Macro {
    Expression(Operand),
    Statement(Statement),
}

/// Addresses of the NC words of a block without macro content.
#[derive(Clone, Debug, PartialEq)]
pub struct NcWords {
    addresses: BitSet,
}

impl NcWords {
    pub fn is_empty(&self) -> bool {
        self.addresses.ones().next().is_none()
    }

    pub fn contains(&self, address: char) -> bool {
        address.is_ascii_uppercase() && self.addresses.contains((address as u8 - b'A') as usize)
    }

    pub fn addresses(&self) -> impl Iterator<Item = char> + '_ {
        self.addresses.ones().map(|i| (b'A' + i as u8) as char)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Macro(Macro),
    Nc(NcWords),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum CommandType {
    Invalid,
    Unknown,
    Nc,
    Macro,
}

impl CommandType {
    pub fn of(result: &Result<Command, ParseError>) -> Self {
        match result {
            Ok(Command::Macro(_)) => CommandType::Macro,
            Ok(Command::Nc(_)) => CommandType::Nc,
            Err(e) if e.is_unsupported() => CommandType::Unknown,
            Err(_) => CommandType::Invalid,
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Macro::Expression(operand) => write!(f, "{}", operand),
            Macro::Statement(statement) => write!(f, "{}", statement),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Macro(m) => write!(f, "{}", m),
            Command::Nc(words) => write!(f, "NC {}", words.addresses().collect::<String>()),
        }
    }
}

/// Parser for single blocks, reusing its state between blocks.
pub struct MacroParser {
    config: ParserConfig,
    generator: Generator,
}

impl Default for MacroParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl MacroParser {
    pub fn new(config: ParserConfig) -> Self {
        let generator = Generator::new(config.max_depth);
        MacroParser { config, generator }
    }

    pub fn parse_block(&mut self, block: &str) -> Result<Command, ParseError> {
        self.generator.reset();
        let result = self.scan(block);
        match &result {
            Ok(command) => trace!(block, %command, "parsed block"),
            Err(e) => debug!(block, error = %e, "rejected block"),
        }
        result
    }

    fn scan(&mut self, block: &str) -> Result<Command, ParseError> {
        let mut pairs = BlockParser::parse(Rule::block, block)
            .map_err(|e| ParseError { column: 1, kind: ParseErrorKind::Syntax(e.to_string()) })?;
        let tokens = match pairs.next() {
            Some(pair) => pair.into_inner(),
            None => return Err(ParseError { column: 1, kind: ParseErrorKind::Syntax(block.into()) }),
        };
        for pair in tokens {
            let column = block[..pair.as_span().start()].chars().count() + 1;
            let text = pair.as_str();
            let result = match pair.as_rule() {
                Rule::number => self.generator.number(text, &self.config.number),
                Rule::word => self.generator.word(text),
                Rule::symbol => match text.chars().next().and_then(Symbol::from_char) {
                    Some(symbol) => self.generator.symbol(symbol),
                    None => Ok(()),
                },
                _ => Ok(()),
            };
            result.map_err(|kind| ParseError { column, kind })?;
        }
        self.generator.finish().map_err(|kind| ParseError { column: block.chars().count() + 1, kind })
    }
}

/// Parse a single block with the default configuration.
pub fn parse(block: &str) -> Result<Command, ParseError> {
    MacroParser::default().parse_block(block)
}
