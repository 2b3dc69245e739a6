// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


use pretty_assertions::assert_eq;
use macro_b::parse::{self, Command, CommandType, Keyword, MacroParser, ParseErrorKind};

fn display(block: &str) -> String {
    match parse::parse(block) {
        Ok(Command::Macro(m)) => m.to_string(),
        other => panic!("{:?} did not parse as macro: {:?}", block, other),
    }
}

fn error(block: &str) -> ParseErrorKind {
    match parse::parse(block) {
        Err(e) => e.kind,
        Ok(cmd) => panic!("{:?} should be rejected, got {}", block, cmd),
    }
}

#[test]
fn test_parse() {
    let cases = [
        ("#1=5.0", "#1=5"),
        ("-3.14", "-3.14"),
        ("-#1", "-#1"),
        ("#1 = #2 + 3 * 4", "#1=[#2 + [3 * 4]]"),
        ("#[#1+1]=SIN[30]*2", "#[#1 + 1]=[SIN[30] * 2]"),
        ("1+2*3-4", "[[1 + [2 * 3]] - 4]"),
        ("-[1+2]", "-[1 + 2]"),
        ("2*-3", "[2 * -3]"),
        ("#1=#1*-#2", "#1=[#1 * -#2]"),
        ("#1=#2-1", "#1=[#2 - 1]"),
        ("#1=-5", "#1=-5"),
        ("ATAN[#1,-2]", "ATAN[#1, -2]"),
        ("POW[2+1,3]", "POW[[2 + 1], 3]"),
        ("#3=ATAN[1]+ABS[-1]", "#3=[ATAN[1] + ABS[-1]]"),
        ("FUP[#1/2]", "FUP[[#1 / 2]]"),
        ("#SIN[0]", "#SIN[0]"),
        ("#1=#2=3", "#1=#2=3"),
        ("[1 OR 0 AND 0]", "[1 OR [0 AND 0]]"),
        ("[#1 AND #2 XOR #3 AND #4]", "[[#1 AND #2] XOR [#3 AND #4]]"),
        ("[#1*2 AND 1]", "[[#1 * 2] AND 1]"),
        ("[#1 EQ -1]", "[#1 EQ -1]"),
        ("[#1+1 GE #2*2]", "[[#1 + 1] GE [#2 * 2]]"),
        ("#1=1 OR 0", "#1=[1 OR 0]"),
        ("#1=[#2 EQ 1] XOR [#3 NE 1]", "#1=[[#2 EQ 1] XOR [#3 NE 1]]"),
        ("/#1=2 (set counter)", "#1=2"),
        ("#1=[[[[[1]]]]]", "#1=1"),
        ("IF[#1 EQ #2] THEN #1=1", "IF[#1 EQ #2] THEN #1=1"),
        ("IF [#1 LT 10] GOTO 13", "IF[#1 LT 10] GOTO 13"),
        ("IF [#1 GT 0] AND [#2 GT 0] THEN #3=-1",
         "IF[[#1 GT 0] AND [#2 GT 0]] THEN #3=-1"),
        ("IF [#1 EQ 1] OR [#2 EQ 2] GOTO 5", "IF[[#1 EQ 1] OR [#2 EQ 2]] GOTO 5"),
        ("WHILE [#1 LE #2] DO 3", "WHILE[#1 LE #2] DO 3"),
        ("GOTO #10", "GOTO #10"),
        ("DO 1", "DO 1"),
        ("END 3", "END 3"),
    ];
    for (block, expected) in &cases {
        assert_eq!(display(block), *expected, "block {:?}", block);
    }
}

#[test]
fn test_invalid() {
    let cases = [
        ("[1+2", ParseErrorKind::UnmatchedOpen),
        ("1+2]", ParseErrorKind::UnmatchedClose),
        ("[[[[[[1]]]]]]", ParseErrorKind::NestingTooDeep(5)),
        ("[1 EQ 2 EQ 3]", ParseErrorKind::OperandMismatch("comparison")),
        ("1=2", ParseErrorKind::AssignToNonVariable),
        ("#1+#2=3", ParseErrorKind::MisplacedAssign),
        ("[IF [1 EQ 1] GOTO 1]", ParseErrorKind::StatementNotAtTopLevel(Keyword::If)),
        ("POW[1,2,3]", ParseErrorKind::DuplicateSeparator),
        ("GX10", ParseErrorKind::UnknownKeyword("GX".into())),
        ("SIN[1,2]", ParseErrorKind::NoTwoArgumentFunction),
        ("[1,2]", ParseErrorKind::NoTwoArgumentFunction),
        ("POW[2]", ParseErrorKind::MissingArgument),
        ("#1=1.2.3", ParseErrorKind::InvalidNumber("1.2.3".into())),
        ("#1=0.0001", ParseErrorKind::InvalidNumber("0.0001".into())),
        ("*2", ParseErrorKind::MissingOperand("* or /")),
        ("AND 1", ParseErrorKind::MissingOperand("AND")),
        ("[]", ParseErrorKind::EmptyBrackets),
        ("SIN", ParseErrorKind::DanglingOperator("function")),
        ("#1=#", ParseErrorKind::DanglingOperator("# or -")),
        ("IF [1] GOTO 5", ParseErrorKind::InvalidCondition),
        ("THEN IF [1 EQ 1] GOTO 2", ParseErrorKind::InvalidStatement),
        ("1 2", ParseErrorKind::TooManyOperands(2)),
        ("#1=[1 EQ 1]", ParseErrorKind::NotArithmetic("=")),
        ("-[1 EQ 1]", ParseErrorKind::NotArithmetic("# or -")),
        ("[1 AND 2*3]", ParseErrorKind::MixedGroups("AND", "* and /")),
        ("[1+2 OR 0]", ParseErrorKind::MixedGroups("logical operators", "+ and -")),
        ("[0 OR 1+2]", ParseErrorKind::MixedGroups("logical operators", "+ and -")),
        ("#1=1 XOR #2-1", ParseErrorKind::MixedGroups("logical operators", "+ and -")),
        ("#1=BIN[5]", ParseErrorKind::Unsupported(Keyword::Bin)),
    ];
    for (block, expected) in &cases {
        assert_eq!(error(block), *expected, "block {:?}", block);
    }
}

#[test]
fn test_error_column() {
    let err = parse::parse("#1=2 GX10").unwrap_err();
    assert_eq!(err.column, 6);
    let err = parse::parse("#1=[2").unwrap_err();
    assert_eq!(err.column, 6);
    assert_eq!(err.to_string(), "column 6: unclosed bracket");
    // columns count characters, not bytes
    let err = parse::parse("(é)GX").unwrap_err();
    assert_eq!(err.column, 4);
    let err = parse::parse("(°)#1=[2").unwrap_err();
    assert_eq!(err.column, 9);
}

#[test]
fn test_classify() {
    let cases = [
        ("#1=1", CommandType::Macro),
        ("IF [#1 EQ 0] GOTO 10", CommandType::Macro),
        ("G01 X10. Y-2.5 F100", CommandType::Nc),
        ("G01 X#1 Y[1+2]", CommandType::Nc),
        ("(only a comment)", CommandType::Nc),
        ("", CommandType::Nc),
        ("#1=BCD[#2]", CommandType::Unknown),
        ("#1=[1", CommandType::Invalid),
        ("GOX", CommandType::Invalid),
    ];
    for (block, expected) in &cases {
        assert_eq!(CommandType::of(&parse::parse(block)), *expected, "block {:?}", block);
    }
}

#[test]
fn test_nc_words() {
    match parse::parse("G01 X#1 Y[1+2] (Z is commented)") {
        Ok(Command::Nc(words)) => {
            assert_eq!(words.addresses().collect::<String>(), "GXY");
            assert!(words.contains('X'));
            assert!(!words.contains('Z'));
        }
        other => panic!("expected NC words, got {:?}", other),
    }
    match parse::parse("") {
        Ok(Command::Nc(words)) => assert!(words.is_empty()),
        other => panic!("expected NC words, got {:?}", other),
    }
}

#[test]
fn test_state_reset() {
    let mut parser = MacroParser::default();
    for bad in &["[[1+", "1 AND", "IF [#1 EQ", "POW[1,"] {
        assert!(parser.parse_block(bad).is_err(), "{:?} should fail", bad);
        let good = parser.parse_block("#1=1+1").unwrap();
        assert_eq!(good.to_string(), "#1=[1 + 1]");
    }
}
