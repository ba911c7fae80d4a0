//--> Imports <--

use std::fmt;

use logos::Logos;
use thiserror::Error;

//--> Type Aliases <--

pub type TokenStream = Vec<Token>;

pub type Result = std::result::Result<TokenStream, LexError>;

type Matcher = fn(&str) -> Option<TokenKind>;

//--> Constants <--

/// The dialect tag following the (unconstrained) first character of the header line.
pub const DIALECT: &str = "IPPcode24";

/// Word classifiers, tried in this order. The first one to claim a word decides what it is.
const MATCHERS: [Matcher; 3] = [
	header,
	identifier,
	symbolic,
];

//--> Structs <--

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
	pub kind: TokenKind,
	pub source: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("couldn't lex this text: {word}")]
pub struct LexError {
	pub word: String,
}

//--> Enums <--

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
	Header,
	/// Opcodes, labels and type names. Carries the type name when the text is exactly one.
	Identifier(Option<TypeName>),
	/// A `prefix@value` word, always resolved.
	Literal(Literal),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeName {
	Int,
	Bool,
	String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Literal {
	Var,
	Str,
	Int,
	Nil,
	Bool,
}

// Splits a line into words, dropping whitespace and the trailing comment.
#[derive(Logos)]
enum Chunk {
	#[regex(r"[^\s#]+")]
	Word,

	#[error]
	#[regex(r"\s+", logos::skip)]
	#[regex(r"#[^\n]*", logos::skip)]
	Error,
}

// Shapes a `prefix@value` word may take. Only a single match spanning the whole word counts.
#[derive(Logos)]
enum Shape {
	#[regex(r"(GF|LF|TF)@[a-zA-Z][_0-9a-zA-Z$%*!?\-]*")]
	Var,

	#[regex(r"string@([^\s#\\]|\\[0-9][0-9][0-9])*")]
	Str,

	#[regex(r"int@[+\-]?[0-9](_?[0-9])*")]
	IntDec,

	#[regex(r"int@[+\-]?0[xX][0-9a-fA-F](_?[0-9a-fA-F])*")]
	IntHex,

	#[regex(r"int@[+\-]?0[oO][0-7](_?[0-7])*")]
	IntOct,

	#[token("nil@nil")]
	Nil,

	#[token("bool@true")]
	#[token("bool@false")]
	Bool,

	#[error]
	Error,
}

//--> Functions <--

/// Classifies every word of a single source line. Fails on the first word that can't be lexed.
pub fn tokenize(line: &str) -> Result {
	let mut tokens: TokenStream = Vec::new();

	for (chunk, span) in Chunk::lexer(line).spanned() {
		let word = &line[span];

		match chunk {
			Chunk::Word => {
				let token = Token::classify(word)?;
				tracing::trace!("got token from text: {}", token);
				tokens.push(token);
			},
			Chunk::Error => return Err(LexError::new(word)),
		}
	}

	Ok(tokens)
}

fn header(word: &str) -> Option<TokenKind> {
	let mut chars = word.chars();
	chars.next()?;

	if chars.as_str() == DIALECT { Some(TokenKind::Header) } else { None }
}

fn identifier(word: &str) -> Option<TokenKind> {
	if !is_name(word) { return None }

	Some(TokenKind::Identifier(match word {
		"int" => Some(TypeName::Int),
		"bool" => Some(TypeName::Bool),
		"string" => Some(TypeName::String),
		_ => None
	}))
}

fn symbolic(word: &str) -> Option<TokenKind> {
	if !word.contains('@') { return None }

	let mut lexer = Shape::lexer(word);
	let shape = lexer.next()?;

	// a partial match means the rest of the word couldn't be lexed
	if lexer.span() != (0..word.len()) || lexer.next().is_some() { return None }

	let literal = match shape {
		Shape::Var => Literal::Var,
		Shape::Str => Literal::Str,
		Shape::IntDec | Shape::IntHex | Shape::IntOct => int_digits(word)?,
		Shape::Nil => Literal::Nil,
		Shape::Bool => Literal::Bool,
		Shape::Error => return None
	};

	Some(TokenKind::Literal(literal))
}

// The radix forms share states in the lexer's automaton, which doesn't backtrack, so a
// matched integer still has its digits checked against the radix its prefix names.
fn int_digits(word: &str) -> Option<Literal> {
	let payload = word.strip_prefix("int@")?;
	let payload = payload.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(payload);

	let (radix, digits) = match payload.get(..2) {
		Some("0x" | "0X") => (16, &payload[2..]),
		Some("0o" | "0O") => (8, &payload[2..]),
		_ => (10, payload)
	};

	if !digits.is_empty() && digits.chars().all(|c| c == '_' || c.is_digit(radix)) {
		Some(Literal::Int)
	} else {
		None
	}
}

/// An ASCII letter followed by letters, digits and `_ $ % * ! ? -`.
pub fn is_name(s: &str) -> bool {
	let mut chars = s.chars();

	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || "_$%*!?-".contains(c)),
		_ => false
	}
}

impl Token {
	pub fn classify(word: &str) -> std::result::Result<Token, LexError> {
		MATCHERS.iter()
			.find_map(|matcher| matcher(word))
			.map(|kind| Token { kind, source: String::from(word) })
			.ok_or_else(|| LexError::new(word))
	}

	/// The literal payload: the text after `prefix@` for constants, the whole word otherwise.
	pub fn value(&self) -> &str {
		match self.kind {
			TokenKind::Literal(Literal::Var) => &self.source,
			TokenKind::Literal(_) => self.source.split_once('@').map_or(self.source.as_str(), |(_, v)| v),
			_ => &self.source
		}
	}
}

impl LexError {
	pub fn new(word: &str) -> LexError { LexError { word: String::from(word) } }
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.kind {
			TokenKind::Header => write!(f, "the header '{}'", self.source),
			TokenKind::Identifier(Some(_)) => write!(f, "the type name '{}'", self.source),
			TokenKind::Identifier(None) => write!(f, "the identifier '{}'", self.source),
			TokenKind::Literal(lit) => match lit {
				Literal::Var => write!(f, "the variable '{}'", self.source),
				Literal::Str => write!(f, "a string literal '{}'", self.source),
				Literal::Int => write!(f, "an integer literal '{}'", self.source),
				Literal::Nil => write!(f, "the nil literal"),
				Literal::Bool => write!(f, "a boolean literal '{}'", self.source),
			}
		}
	}
}

//--> Tests <--
