// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use std::f64::consts::PI;
use macro_b::ast::Statement;
use macro_b::eval::{EvalError, Evaluator};
use macro_b::parse::{self, Command, Macro};
use macro_b::vars::{VariableError, VariableStore, Variables, NULL_VALUE};

fn parse_macro(block: &str) -> Macro {
    match parse::parse(block) {
        Ok(Command::Macro(m)) => m,
        other => panic!("{:?} did not parse as macro: {:?}", block, other),
    }
}

fn eval_in(vars: &mut VariableStore, block: &str) -> Result<f64, EvalError> {
    match parse_macro(block) {
        Macro::Expression(expr) => Evaluator::new(vars).eval_operand(&expr),
        Macro::Statement(s) => panic!("{:?} is a statement: {}", block, s),
    }
}

fn eval(block: &str) -> f64 {
    eval_in(&mut VariableStore::default(), block).unwrap()
}

fn statement(block: &str) -> Statement {
    match parse_macro(block) {
        Macro::Statement(s) => s,
        Macro::Expression(e) => panic!("{:?} is an expression: {}", block, e),
    }
}

#[test]
fn test_literals() {
    assert_eq!(eval("-3.14"), -3.14);
    assert_eq!(eval("3.0+5.0"), 8.0);
    assert_eq!(eval("3.0-5.0"), -2.0);
    assert_eq!(eval("3.0*5.0"), 15.0);
    assert_eq!(eval("3.0/5.0"), 3.0 / 5.0);
    assert_eq!(eval("1+2*3-4"), 3.0);
    assert_eq!(eval("[1+2]*3"), 9.0);
    assert_eq!(eval("10/4/5"), 0.5);
    assert_eq!(eval("2*-3"), -6.0);
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval("1/0"), f64::INFINITY);
    assert_eq!(eval("-1/0"), f64::NEG_INFINITY);
    assert!(eval("0/0").is_nan());
}

#[test]
fn test_functions() {
    assert_eq!(eval("SIN[30]"), (30. * PI / 180.).sin());
    assert_eq!(eval("COS[30]"), (30. * PI / 180.).cos());
    assert_eq!(eval("TAN[30]"), (30. * PI / 180.).tan());
    assert_eq!(eval("ASIN[0.5]"), 0.5f64.asin() * 180. / PI);
    assert_eq!(eval("ACOS[0.5]"), 0.5f64.acos() * 180. / PI);
    assert_eq!(eval("ATAN[0.5]"), 0.5f64.atan() * 180. / PI);
    assert_eq!(eval("SQRT[3]"), 3f64.sqrt());
    assert_eq!(eval("ABS[-3]"), 3.0);
    assert_eq!(eval("LN[3]"), 3f64.ln());
    assert_eq!(eval("EXP[1]"), 1f64.exp());
    assert_eq!(eval("POW[2,8]"), 256.0);
    assert_eq!(eval("ATAN[1.0,1.0]"), 45.0);
    assert_eq!(eval("-SIN[90]"), -1.0);
}

#[test]
fn test_rounding() {
    assert_eq!(eval("ROUND[6.5]"), 7.0);
    assert_eq!(eval("ROUND[-6.5]"), -7.0);
    assert_eq!(eval("FIX[7.9]"), 7.0);
    assert_eq!(eval("FIX[-7.9]"), -7.0);
    assert_eq!(eval("FUP[7.4]"), 8.0);
    assert_eq!(eval("FUP[-7.4]"), -8.0);
}

#[test]
fn test_variables() {
    let mut vars = VariableStore::default();
    assert_eq!(eval_in(&mut vars, "#1"), Ok(NULL_VALUE));
    assert_eq!(eval_in(&mut vars, "#33"), Ok(NULL_VALUE));
    assert_eq!(eval_in(&mut vars, "-#1"), Ok(-NULL_VALUE));
    assert_eq!(eval_in(&mut vars, "#1=5.0"), Ok(5.0));
    assert_eq!(vars.read(1), Some(5.0));
    assert_eq!(eval_in(&mut vars, "#[#1-3]=#1*2"), Ok(10.0));
    assert_eq!(vars.read(2), Some(10.0));
    assert_eq!(eval_in(&mut vars, "#1=#2=3"), Ok(3.0));
    assert_eq!((vars.read(1), vars.read(2)), (Some(3.0), Some(3.0)));
    // the value is evaluated before the target number
    let mut fresh = VariableStore::default();
    assert_eq!(eval_in(&mut fresh, "#[#2]=#2=3"), Ok(3.0));
    assert_eq!((fresh.read(2), fresh.read(3)), (Some(3.0), Some(3.0)));
    assert_eq!(eval_in(&mut vars, "#100=#1+1"), Ok(4.0));
    assert_eq!(eval_in(&mut vars, "#[99+#1/3]"), Ok(4.0));
}

#[test]
fn test_variable_errors() {
    let mut vars = VariableStore::default();
    assert_eq!(eval_in(&mut vars, "#0=1"), Err(EvalError::Variable(VariableError::ReadOnly(0))));
    assert_eq!(eval_in(&mut vars, "#0"), Ok(NULL_VALUE));
    assert_eq!(eval_in(&mut vars, "#400"), Err(EvalError::UnknownVariable(400)));
    assert_eq!(eval_in(&mut vars, "#400=1"),
               Err(EvalError::Variable(VariableError::UnknownVariable(400))));
    assert_eq!(eval_in(&mut vars, "#[-1]"), Err(EvalError::InvalidVariableNumber(-1.0)));
    // the number of an unset variable is the sentinel
    assert_eq!(eval_in(&mut vars, "##1"), Err(EvalError::InvalidVariableNumber(NULL_VALUE)));
}

#[test]
fn test_system_variables() {
    let mut vars = VariableStore::default();
    assert_eq!(eval_in(&mut vars, "#4201"), Ok(0.0));
    assert_eq!(eval_in(&mut vars, "#4203"), Ok(90.0));
    assert_eq!(eval_in(&mut vars, "#5114"), Ok(3.0));
    assert_eq!(eval_in(&mut vars, "#5001"), Ok(f64::MAX));
    // integer fields truncate, and the assignment yields the stored value
    assert_eq!(eval_in(&mut vars, "#4309=120.5"), Ok(120.0));
    assert_eq!(vars.system().preview_modal.f_code, 120);
    vars.system_mut().preview_position.z = -5.0;
    assert_eq!(eval_in(&mut vars, "#5003"), Ok(-5.0));
}

#[test]
fn test_relational() {
    let mut vars = VariableStore::default();
    assert_eq!(eval_in(&mut vars, "[#1 EQ #2]"), Ok(1.0));
    assert_eq!(eval_in(&mut vars, "[#1 NE 0]"), Ok(1.0));
    eval_in(&mut vars, "#1=1").unwrap();
    eval_in(&mut vars, "#2=2").unwrap();
    assert_eq!(eval_in(&mut vars, "[#1 GT 0]"), Ok(1.0));
    assert_eq!(eval_in(&mut vars, "[#1 GE #2]"), Ok(0.0));
    assert_eq!(eval_in(&mut vars, "[#1 LT #2]"), Ok(1.0));
    assert_eq!(eval_in(&mut vars, "[#2 LT #1]"), Ok(0.0));
    assert_eq!(eval_in(&mut vars, "[#1 LE #2]"), Ok(1.0));
    assert_eq!(eval_in(&mut vars, "[#1+1 EQ #2]"), Ok(1.0));
    // no tolerance
    assert_eq!(eval_in(&mut vars, "[0.1+0.2 EQ 0.3]"), Ok(0.0));
}

#[test]
fn test_logical() {
    assert_eq!(eval("[1 AND 1]"), 1.0);
    assert_eq!(eval("[1 AND 0]"), 0.0);
    assert_eq!(eval("[1 OR 0]"), 1.0);
    assert_eq!(eval("[1 XOR 0]"), 1.0);
    assert_eq!(eval("[1 XOR 1]"), 0.0);
    assert_eq!(eval("[2 AND 1]"), 1.0);
    assert_eq!(eval("[0.5 OR 0]"), 0.0);
    // AND before OR
    assert_eq!(eval("[1 OR 0 AND 0]"), 1.0);
    assert_eq!(eval("[0 AND 0 OR 1]"), 1.0);
    assert_eq!(eval("[[1 EQ 1] AND [2 GT 3]]"), 0.0);
    assert_eq!(eval("[[1 EQ 1] XOR [2 GT 3]]"), 1.0);
    let mut vars = VariableStore::default();
    assert_eq!(eval_in(&mut vars, "#3=[1 EQ 1] OR 0"), Ok(1.0));
    assert_eq!(vars.read(3), Some(1.0));
}

#[test]
fn test_conditional_arithmetic() {
    let mut vars = VariableStore::default();
    let s = match statement("IF[#1 EQ #2] THEN #1=1") {
        Statement::Arithmetic(s) => s,
        other => panic!("unexpected {}", other),
    };
    assert!(!s.is_empty());
    // both are unset, so they are equal
    assert_eq!(s.evaluate(&mut vars), Ok(true));
    assert_eq!(s.arithmetic_value(&mut vars), Ok(1.0));
    assert_eq!(vars.read(1), Some(1.0));

    vars.write(2, 2.0).unwrap();
    assert_eq!(s.evaluate(&mut vars), Ok(false));
    assert_eq!(vars.read(1), Some(1.0));
}

#[test]
fn test_branch() {
    let mut vars = VariableStore::default();
    let s = match statement("IF[#1 EQ #2] GOTO 13") {
        Statement::Branch(s) => s,
        other => panic!("unexpected {}", other),
    };
    assert_eq!(s.evaluate(&mut vars), Ok(true));
    assert_eq!(s.branch_number(&mut vars), Ok(13));
    vars.write(1, 1.0).unwrap();
    assert_eq!(s.evaluate(&mut vars), Ok(false));

    let s = match statement("GOTO #10") {
        Statement::Branch(s) => s,
        other => panic!("unexpected {}", other),
    };
    vars.write(10, 25.0).unwrap();
    assert_eq!(s.evaluate(&mut vars), Ok(true));
    assert_eq!(s.branch_number(&mut vars), Ok(25));
}

#[test]
fn test_loop() {
    let mut vars = VariableStore::default();
    let s = match statement("WHILE[#1 EQ #2] DO 3") {
        Statement::Loop(s) => s,
        other => panic!("unexpected {}", other),
    };
    assert_eq!(s.evaluate(&mut vars), Ok(true));
    assert_eq!(s.loop_number(&mut vars), Ok(3));
    vars.write(2, 0.0).unwrap();
    assert_eq!(s.evaluate(&mut vars), Ok(false));

    match statement("END 3") {
        Statement::LoopEnd(end) => assert_eq!(end.evaluate(&mut vars), Ok(3)),
        other => panic!("unexpected {}", other),
    }
}

#[test]
fn test_empty_statements() {
    use macro_b::ast::{ConditionalArithmetic, ConditionalBranch, ConditionalLoop, LoopEnd};

    let mut vars = VariableStore::default();
    let arith = ConditionalArithmetic::default();
    assert!(arith.is_empty());
    assert!(Statement::Arithmetic(arith.clone()).is_empty());
    assert!(!statement("END 1").is_empty());
    assert_eq!(arith.evaluate(&mut vars), Ok(false));
    assert_eq!(arith.arithmetic_value(&mut vars), Ok(0.0));
    let branch = ConditionalBranch::default();
    assert_eq!(branch.evaluate(&mut vars), Ok(false));
    assert_eq!(branch.branch_number(&mut vars), Ok(0));
    let lp = ConditionalLoop::default();
    assert_eq!(lp.evaluate(&mut vars), Ok(false));
    assert_eq!(lp.loop_number(&mut vars), Ok(0));
    assert_eq!(LoopEnd::default().evaluate(&mut vars), Ok(0));
}
