//--> Imports <--

use std::io::{
	self,
	BufRead,
};

//--> Traits <--

/// Hands out the source text one line at a time, forward only.
pub trait LineSource {
	/// The next line without its terminator, or `None` once the input is exhausted.
	fn next_line(&mut self) -> io::Result<Option<String>>;
}

//--> Structs <--

pub struct Reader<R: BufRead> {
	inner: R,
}

//--> Functions <--

impl<R: BufRead> Reader<R> {
	pub fn new(inner: R) -> Reader<R> { Reader { inner } }
}

impl<R: BufRead> LineSource for Reader<R> {
	fn next_line(&mut self) -> io::Result<Option<String>> {
		let mut line = String::new();

		if self.inner.read_line(&mut line)? == 0 { return Ok(None) }

		if line.ends_with('\n') {
			line.pop();
			if line.ends_with('\r') { line.pop(); }
		}

		Ok(Some(line))
	}
}

//--> Tests <--
