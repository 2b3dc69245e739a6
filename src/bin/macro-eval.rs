// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use std::io::{self, BufRead, BufReader};
use std::{env, fs};
use tracing_subscriber::EnvFilter;

use macro_b::ast::Statement;
use macro_b::eval::{EvalError, Evaluator};
use macro_b::parse::{Command, CommandType, Macro, MacroParser};
use macro_b::vars::VariableStore;

fn evaluate(m: &Macro, vars: &mut VariableStore) -> Result<String, EvalError> {
    Ok(match m {
        Macro::Statement(s) if s.is_empty() => "empty statement".into(),
        Macro::Expression(operand) => Evaluator::new(vars).eval_operand(operand)?.to_string(),
        Macro::Statement(Statement::Arithmetic(s)) => s.evaluate(vars)?.to_string(),
        Macro::Statement(Statement::Branch(s)) => if s.evaluate(vars)? {
            format!("branch to N{}", s.branch_number(vars)?)
        } else {
            "no branch".into()
        },
        Macro::Statement(Statement::Loop(s)) => if s.evaluate(vars)? {
            format!("run loop {}", s.loop_number(vars)?)
        } else {
            format!("leave loop {}", s.loop_number(vars)?)
        },
        Macro::Statement(Statement::LoopEnd(s)) => format!("end of loop {}", s.evaluate(vars)?),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let input: Box<dyn BufRead> = match env::args().nth(1) {
        Some(filename) => Box::new(BufReader::new(fs::File::open(filename)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut parser = MacroParser::default();
    let mut vars = VariableStore::default();

    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let result = parser.parse_block(&line);
        let kind = CommandType::of(&result);
        match result {
            Err(e) => println!("{:>4} {:<7} {}", lineno + 1, kind, e),
            Ok(Command::Nc(words)) =>
                println!("{:>4} {:<7} {}", lineno + 1, kind, words.addresses().collect::<String>()),
            Ok(Command::Macro(m)) => match evaluate(&m, &mut vars) {
                Ok(value) => println!("{:>4} {:<7} {} => {}", lineno + 1, kind, m, value),
                Err(e) => println!("{:>4} {:<7} {} => error: {}", lineno + 1, kind, m, e),
            },
        }
    }
    Ok(())
}
