//--> Imports <--

use crate::{
	emit::Emitter,
	error::ParseError,
	instructions::{
		self,
		ArgType,
		Mismatch,
	},
	lex::{
		self,
		Token,
		TokenKind,
	},
	source::LineSource,
};

//--> Type Aliases <--

pub type Result<T> = std::result::Result<T, ParseError>;

//--> Structs <--

/// The validated program: every instruction in source order, plus the dialect it was written in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
	pub language: &'static str,
	pub instructions: Vec<Instruction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
	/// 1-based, contiguous.
	pub order: usize,
	/// Always uppercase.
	pub opcode: String,
	pub operands: Vec<Operand>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operand {
	pub kind: ArgType,
	/// The text after `prefix@` for constants, the whole word for variables, labels and types.
	pub value: String,
}

/// Walks the source line by line, one line of lookahead, and stops at the first error.
pub struct Parser<S: LineSource> {
	source: S,
	line: usize,
	instructions: Vec<Instruction>,
}

//--> Enums <--

enum State {
	Header,
	SetContext,
	InstrBuild { opcode: String, operands: Vec<Operand> },
	Finish,
}

//--> Functions <--

impl<S: LineSource> Parser<S> {
	pub fn new(source: S) -> Parser<S> {
		Parser { source, line: 0, instructions: Vec::new() }
	}

	/// Runs the whole source through the state machine.
	pub fn parse(mut self) -> Result<Program> {
		let mut state = State::Header;

		loop {
			state = self.step(state)?;

			if let State::Finish = state { break; }
		}

		tracing::debug!("finished with {} instructions", self.instructions.len());

		Ok(Program::new(self.instructions))
	}

	/// Parses the source and, only if that succeeds, hands the program to the emitter.
	pub fn run<E: Emitter>(self, emitter: E) -> Result<E::Output> {
		let program = self.parse()?;

		Ok(emitter.emit(program))
	}

	fn step(&mut self, state: State) -> Result<State> {
		match state {
			State::Header => self.header(),
			State::SetContext => self.set_context(),
			State::InstrBuild { opcode, operands } => Ok(self.build(opcode, operands)),
			State::Finish => Ok(State::Finish),
		}
	}

	fn header(&mut self) -> Result<State> {
		match self.next_tokens()? {
			Some(Ok(tokens)) if tokens.len() == 1 && tokens[0].kind == TokenKind::Header => {
				tracing::debug!("{}: found the header", self.line);
				Ok(State::SetContext)
			},
			// an unlexable first line can't have been the header either
			_ => Err(ParseError::MissingHead)
		}
	}

	fn set_context(&mut self) -> Result<State> {
		let tokens = match self.next_tokens()? {
			Some(tokens) => tokens.map_err(|source| ParseError::Lex { line: self.line, source })?,
			None => return Ok(State::Finish)
		};

		let (first, operands) = match tokens.split_first() {
			Some(split) => split,
			None => return Ok(State::SetContext)
		};

		if let TokenKind::Header = first.kind {
			return Err(ParseError::MisplacedHeader { line: self.line });
		}

		let opcode = first.source.to_uppercase();

		let reference = match instructions::lookup(&opcode) {
			Some(reference) => reference,
			None => return Err(ParseError::Opcode { line: self.line, opcode })
		};

		let types = instructions::compare(reference, operands).map_err(|mismatch| match mismatch {
			Mismatch::Arity { expected, found } => ParseError::Arity { line: self.line, opcode: opcode.clone(), expected, found },
			Mismatch::Operand { position, expected } => ParseError::Operand {
				line: self.line,
				opcode: opcode.clone(),
				position: position + 1,
				expected,
				operand: operands[position].source.clone(),
			},
		})?;

		let operands = types.into_iter()
			.zip(operands)
			.map(|(kind, token)| Operand::new(kind, token))
			.collect();

		Ok(State::InstrBuild { opcode, operands })
	}

	fn build(&mut self, opcode: String, operands: Vec<Operand>) -> State {
		let instruction = Instruction { order: self.instructions.len() + 1, opcode, operands };

		tracing::debug!("{}: accepted instruction {} {}", self.line, instruction.order, instruction.opcode);
		self.instructions.push(instruction);

		State::SetContext
	}

	/// The tokens of the next line that has any, skipping blank and comment-only lines.
	fn next_tokens(&mut self) -> Result<Option<lex::Result>> {
		loop {
			let line = match self.source.next_line() {
				Ok(Some(line)) => line,
				Ok(None) => return Ok(None),
				Err(err) => return Err(ParseError::Input { line: self.line + 1, message: err.to_string() })
			};

			self.line += 1;

			match lex::tokenize(&line) {
				Ok(tokens) if tokens.is_empty() => continue,
				result => return Ok(Some(result))
			}
		}
	}
}

impl Program {
	pub fn new(instructions: Vec<Instruction>) -> Program {
		Program { language: lex::DIALECT, instructions }
	}
}

impl Operand {
	pub fn new(kind: ArgType, token: &Token) -> Operand {
		Operand { kind, value: String::from(token.value()) }
	}
}

//--> Tests <--
