//! Lexical and syntactic analysis of IPPcode24 source, producing a typed instruction stream.

// Renders a finished program as XML.
pub mod emit;

// The error taxonomy and its exit codes.
pub mod error;

// Opcodes and the operands each one takes.
pub mod instructions;

// Splits lines into words and classifies them.
pub mod lex;

// The state machine walking the source line by line.
pub mod parse;

// Where the source lines come from.
pub mod source;

// Handles text going into the XML output.
pub mod text;

pub use emit::{
	Emitter,
	XmlEmitter,
};
pub use error::{
	ErrorClass,
	ParseError,
};
pub use parse::{
	Instruction,
	Operand,
	Parser,
	Program,
};
pub use source::{
	LineSource,
	Reader,
};
