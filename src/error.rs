//! Everything that can stop a parse, and how each failure is reported at the process boundary.

//--> Imports <--

use std::fmt;

use thiserror::Error;

use crate::{
	instructions::Category,
	lex::LexError,
};

//--> Enums <--

/// The first failure of a parse. Nothing is recovered from; the instructions read so far are dropped.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	#[error("{line}: {source}")]
	Lex { line: usize, source: LexError },

	#[error("the source has to start with a '.IPPcode24' header, alone on its line")]
	MissingHead,

	#[error("{line}: unknown opcode '{opcode}'")]
	Opcode { line: usize, opcode: String },

	#[error("{line}: {opcode} takes {expected} operand(s), found {found}")]
	Arity { line: usize, opcode: String, expected: usize, found: usize },

	#[error("{line}: operand {position} of {opcode} has to be {expected}, found '{operand}'")]
	Operand { line: usize, opcode: String, position: usize, expected: Category, operand: String },

	#[error("{line}: the header may only appear once, on the first line")]
	MisplacedHeader { line: usize },

	#[error("{line}: couldn't read the input: {message}")]
	Input { line: usize, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
	Lex,
	MissingHead,
	Opcode,
	Syntax,
	Input,
}

//--> Functions <--

impl ParseError {
	pub fn class(&self) -> ErrorClass {
		match self {
			ParseError::Lex { .. } => ErrorClass::Lex,
			ParseError::MissingHead => ErrorClass::MissingHead,
			ParseError::Opcode { .. } => ErrorClass::Opcode,
			ParseError::Arity { .. } | ParseError::Operand { .. } | ParseError::MisplacedHeader { .. } => ErrorClass::Syntax,
			ParseError::Input { .. } => ErrorClass::Input,
		}
	}

	/// Bad operands of a known opcode share the opcode code; every other syntax error is generic.
	pub fn exit_code(&self) -> i32 {
		match self {
			ParseError::MissingHead => 21,
			ParseError::Opcode { .. } | ParseError::Arity { .. } | ParseError::Operand { .. } => 22,
			ParseError::Lex { .. } | ParseError::MisplacedHeader { .. } => 23,
			ParseError::Input { .. } => 11,
		}
	}
}

impl fmt::Display for ErrorClass {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			ErrorClass::Lex => write!(f, "LexError"),
			ErrorClass::MissingHead => write!(f, "MissingHeadError"),
			ErrorClass::Opcode => write!(f, "OpcodeError"),
			ErrorClass::Syntax => write!(f, "SyntaxError"),
			ErrorClass::Input => write!(f, "InputError"),
		}
	}
}

//--> Tests <--

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(ParseError::MissingHead, ErrorClass::MissingHead, 21)]
	#[case(ParseError::Opcode { line: 2, opcode: String::from("FOO") }, ErrorClass::Opcode, 22)]
	#[case(ParseError::Arity { line: 2, opcode: String::from("ADD"), expected: 3, found: 2 }, ErrorClass::Syntax, 22)]
	#[case(
		ParseError::Operand { line: 2, opcode: String::from("DEFVAR"), position: 1, expected: Category::Var, operand: String::from("int@1") },
		ErrorClass::Syntax,
		22
	)]
	#[case(ParseError::MisplacedHeader { line: 3 }, ErrorClass::Syntax, 23)]
	#[case(ParseError::Lex { line: 2, source: LexError::new("int@x") }, ErrorClass::Lex, 23)]
	#[case(ParseError::Input { line: 1, message: String::from("stream did not contain valid UTF-8") }, ErrorClass::Input, 11)]
	fn taxonomy(#[case] err: ParseError, #[case] class: ErrorClass, #[case] code: i32) {
		assert_eq!(err.class(), class);
		assert_eq!(err.exit_code(), code);
	}

	#[test]
	fn messages() {
		let err = ParseError::Arity { line: 4, opcode: String::from("ADD"), expected: 3, found: 2 };
		assert_eq!(err.to_string(), "4: ADD takes 3 operand(s), found 2");

		let err = ParseError::Lex { line: 7, source: LexError::new("int@x") };
		assert_eq!(err.to_string(), "7: couldn't lex this text: int@x");

		assert_eq!(ErrorClass::MissingHead.to_string(), "MissingHeadError");
	}
}
