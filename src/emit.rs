//! Turns a validated [`Program`] into its XML representation.

//--> Imports <--

use std::io::{
	self,
	Write,
};

use crate::{
	parse::{
		Instruction,
		Program,
	},
	text,
};

//--> Traits <--

/// Consumes a finished program. Taking `self` means a program is handed over exactly once.
pub trait Emitter {
	type Output;

	fn emit(self, program: Program) -> Self::Output;
}

//--> Structs <--

pub struct XmlEmitter<W: Write> {
	writer: W,
}

//--> Functions <--

impl<W: Write> XmlEmitter<W> {
	pub fn new(writer: W) -> XmlEmitter<W> { XmlEmitter { writer } }

	fn instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
		write!(self.writer, "\t<instruction order=\"{}\" opcode=\"{}\"", instruction.order, text::escape_attribute(&instruction.opcode))?;

		if instruction.operands.is_empty() { return writeln!(self.writer, "/>") }

		writeln!(self.writer, ">")?;

		for (idx, operand) in instruction.operands.iter().enumerate() {
			let tag = format!("arg{}", idx + 1);

			if operand.value.is_empty() {
				writeln!(self.writer, "\t\t<{} type=\"{}\"/>", tag, operand.kind)?;
			} else {
				writeln!(self.writer, "\t\t<{} type=\"{}\">{}</{}>", tag, operand.kind, text::escape_markup(&operand.value), tag)?;
			}
		}

		writeln!(self.writer, "\t</instruction>")
	}
}

impl<W: Write> Emitter for XmlEmitter<W> {
	type Output = io::Result<W>;

	fn emit(mut self, program: Program) -> io::Result<W> {
		writeln!(self.writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;

		let language = text::escape_attribute(program.language);

		if program.instructions.is_empty() {
			writeln!(self.writer, "<program language=\"{}\"/>", language)?;
		} else {
			writeln!(self.writer, "<program language=\"{}\">", language)?;

			for instruction in &program.instructions {
				self.instruction(instruction)?;
			}

			writeln!(self.writer, "</program>")?;
		}

		self.writer.flush()?;

		Ok(self.writer)
	}
}

//--> Tests <--
