//--> Imports <--

use std::fmt;

use crate::lex::{
	Literal,
	Token,
	TokenKind,
};

//--> Constants <--

use Category::*;

const NONE: OperandReference = OperandReference::new(&[], &[]);
const VAR: OperandReference = OperandReference::new(&[Var], &[Var]);
const SYM: OperandReference = OperandReference::new(&[Sym], &[Sym]);
const VAR_SYM: OperandReference = OperandReference::new(&[Var, Sym], &[Var, Sym]);
const VAR_SYM_SYM: OperandReference = OperandReference::new(&[Var, Sym, Sym], &[Var, Sym, Sym]);
const VAR_TYPE: OperandReference = OperandReference::new(&[Var, Type], &[Var, Type]);
const LABEL: OperandReference = OperandReference::new(&[Label], &[Label]);
const LABEL_SYM_SYM: OperandReference = OperandReference::new(&[Label, Sym, Sym], &[Label, Sym, Sym]);

/// Every opcode of the language and the operands it takes, keyed by the uppercase mnemonic.
pub const INSTRUCTIONS: &[(&str, OperandReference)] = &[
	// frames and calls
	("MOVE", VAR_SYM),
	("CREATEFRAME", NONE),
	("PUSHFRAME", NONE),
	("POPFRAME", NONE),
	("DEFVAR", VAR),
	("CALL", LABEL),
	("RETURN", NONE),
	// data stack
	("PUSHS", SYM),
	("POPS", VAR),
	// arithmetic, relational, boolean and conversion
	("ADD", VAR_SYM_SYM),
	("SUB", VAR_SYM_SYM),
	("MUL", VAR_SYM_SYM),
	("IDIV", VAR_SYM_SYM),
	("LT", VAR_SYM_SYM),
	("GT", VAR_SYM_SYM),
	("EQ", VAR_SYM_SYM),
	("AND", VAR_SYM_SYM),
	("OR", VAR_SYM_SYM),
	("NOT", VAR_SYM),
	("INT2CHAR", VAR_SYM),
	("STR2INT", VAR_SYM_SYM),
	// input and output
	("READ", VAR_TYPE),
	("WRITE", SYM),
	// strings
	("CONCAT", VAR_SYM_SYM),
	("STRLEN", VAR_SYM),
	("GETCHAR", VAR_SYM_SYM),
	("SETCHAR", VAR_SYM_SYM),
	// types
	("TYPE", VAR_SYM),
	// control flow
	("LABEL", LABEL),
	("JUMP", LABEL),
	("JUMPIFEQ", LABEL_SYM_SYM),
	("JUMPIFNEQ", LABEL_SYM_SYM),
	("EXIT", SYM),
];

//--> Structs <--

/// The operands an opcode expects, and what each one is called in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandReference {
	pub expected: &'static [Category],
	pub output: &'static [Category],
}

//--> Enums <--

/// What an operand position accepts. `Sym` takes any variable or constant and keeps its own category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
	Var,
	Sym,
	Label,
	Type,
}

/// The concrete category of an operand once it has been checked against its opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgType {
	Var,
	Label,
	Type,
	Str,
	Int,
	Nil,
	Bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mismatch {
	/// Wrong number of operands.
	Arity { expected: usize, found: usize },
	/// The operand at this (0-based) position doesn't fit.
	Operand { position: usize, expected: Category },
}

//--> Functions <--

/// Finds the operand reference of an opcode, ignoring case.
pub fn lookup(opcode: &str) -> Option<&'static OperandReference> {
	let opcode = opcode.to_uppercase();

	INSTRUCTIONS.iter().find(|(name, _)| *name == opcode).map(|(_, reference)| reference)
}

/// Checks operands against a reference, returning the resolved category of each one.
pub fn compare(reference: &OperandReference, operands: &[Token]) -> Result<Vec<ArgType>, Mismatch> {
	if operands.len() != reference.expected.len() {
		return Err(Mismatch::Arity { expected: reference.expected.len(), found: operands.len() });
	}

	reference.expected.iter()
		.zip(reference.output)
		.zip(operands)
		.enumerate()
		.map(|(position, ((&expected, &output), operand))| {
			if !expected.accepts(operand) {
				return Err(Mismatch::Operand { position, expected });
			}

			let resolved = match expected {
				Sym => ArgType::resolve(operand),
				_ => output.concrete(),
			};

			resolved.ok_or(Mismatch::Operand { position, expected })
		})
		.collect()
}

impl OperandReference {
	pub const fn new(expected: &'static [Category], output: &'static [Category]) -> OperandReference {
		OperandReference { expected, output }
	}
}

impl Category {
	pub fn accepts(&self, token: &Token) -> bool {
		match (self, token.kind) {
			(Var, TokenKind::Literal(Literal::Var)) => true,
			(Sym, TokenKind::Literal(_)) => true,
			(Label, TokenKind::Identifier(_)) => true,
			(Type, TokenKind::Identifier(Some(_))) => true,
			_ => false
		}
	}

	/// The output category this stands for, if it doesn't depend on the operand.
	pub fn concrete(&self) -> Option<ArgType> {
		match self {
			Var => Some(ArgType::Var),
			Label => Some(ArgType::Label),
			Type => Some(ArgType::Type),
			Sym => None,
		}
	}
}

impl ArgType {
	/// The category a variable or constant keeps when it fills a `Sym` position.
	pub fn resolve(token: &Token) -> Option<ArgType> {
		match token.kind {
			TokenKind::Literal(lit) => Some(match lit {
				Literal::Var => ArgType::Var,
				Literal::Str => ArgType::Str,
				Literal::Int => ArgType::Int,
				Literal::Nil => ArgType::Nil,
				Literal::Bool => ArgType::Bool,
			}),
			_ => None
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			ArgType::Var => "var",
			ArgType::Label => "label",
			ArgType::Type => "type",
			ArgType::Str => "string",
			ArgType::Int => "int",
			ArgType::Nil => "nil",
			ArgType::Bool => "bool",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Var => write!(f, "a variable"),
			Sym => write!(f, "a variable or constant"),
			Label => write!(f, "a label"),
			Type => write!(f, "a type name (int, bool or string)"),
		}
	}
}

impl fmt::Display for ArgType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.name()) }
}

//--> Tests <--

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lex::tokenize;
	use rstest::rstest;
	use std::collections::HashSet;

	fn operands(line: &str) -> Vec<Token> { tokenize(line).unwrap() }

	#[test]
	fn table_has_no_duplicates() {
		let mut seen = HashSet::new();

		for (name, _) in INSTRUCTIONS {
			assert!(seen.insert(*name), "{} is listed twice", name);
		}

		assert_eq!(seen.len(), 33);
	}

	#[test]
	fn table_is_consistent() {
		for (name, reference) in INSTRUCTIONS {
			assert_eq!(reference.expected.len(), reference.output.len(), "{}", name);
			assert_eq!(*name, name.to_uppercase());
		}
	}

	#[rstest]
	#[case("move", VAR_SYM)]
	#[case("Read", VAR_TYPE)]
	#[case("JUMPIFNEQ", LABEL_SYM_SYM)]
	#[case("createframe", NONE)]
	fn lookup_ignores_case(#[case] opcode: &str, #[case] reference: OperandReference) {
		assert_eq!(lookup(opcode), Some(&reference));
	}

	#[rstest]
	#[case("FOO")]
	#[case("MOVES")]
	#[case("REA")]
	#[case("")]
	fn lookup_unknown(#[case] opcode: &str) {
		assert_eq!(lookup(opcode), None);
	}

	#[rstest]
	#[case(VAR_SYM, "GF@x int@42", vec![ArgType::Var, ArgType::Int])]
	#[case(VAR_SYM, "GF@x LF@y", vec![ArgType::Var, ArgType::Var])]
	#[case(VAR_SYM_SYM, "TF@x string@a nil@nil", vec![ArgType::Var, ArgType::Str, ArgType::Nil])]
	#[case(SYM, "bool@true", vec![ArgType::Bool])]
	#[case(VAR_TYPE, "GF@x string", vec![ArgType::Var, ArgType::Type])]
	#[case(LABEL, "loop", vec![ArgType::Label])]
	#[case(LABEL, "int", vec![ArgType::Label])]
	#[case(LABEL_SYM_SYM, "end GF@a int@0", vec![ArgType::Label, ArgType::Var, ArgType::Int])]
	#[case(NONE, "", vec![])]
	fn compare_accepts(#[case] reference: OperandReference, #[case] line: &str, #[case] types: Vec<ArgType>) {
		assert_eq!(compare(&reference, &operands(line)), Ok(types));
	}

	#[rstest]
	#[case(VAR_SYM_SYM, "GF@x GF@x", Mismatch::Arity { expected: 3, found: 2 })]
	#[case(NONE, "GF@x", Mismatch::Arity { expected: 0, found: 1 })]
	#[case(VAR, "int@1", Mismatch::Operand { position: 0, expected: Var })]
	#[case(VAR_SYM, "GF@x label", Mismatch::Operand { position: 1, expected: Sym })]
	#[case(VAR_TYPE, "GF@x nil", Mismatch::Operand { position: 1, expected: Type })]
	#[case(LABEL, "GF@x", Mismatch::Operand { position: 0, expected: Label })]
	#[case(LABEL_SYM_SYM, "end GF@a int", Mismatch::Operand { position: 2, expected: Sym })]
	fn compare_rejects(#[case] reference: OperandReference, #[case] line: &str, #[case] mismatch: Mismatch) {
		assert_eq!(compare(&reference, &operands(line)), Err(mismatch));
	}

	#[test]
	fn output_names() {
		let names = [ArgType::Var, ArgType::Label, ArgType::Type, ArgType::Str, ArgType::Int, ArgType::Nil, ArgType::Bool]
			.iter()
			.map(|t| t.to_string())
			.collect::<Vec<String>>();

		assert_eq!(names, vec!["var", "label", "type", "string", "int", "nil", "bool"]);
	}
}
