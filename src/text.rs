//--> Functions <--

/// Replaces the characters XML gives meaning to with their entities.
pub fn escape_markup(s: &str) -> String {
	let mut escaped = String::with_capacity(s.len());

	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			_ => escaped.push(c)
		}
	}

	escaped
}

/// Like [`escape_markup`], but also safe inside a double-quoted attribute.
pub fn escape_attribute(s: &str) -> String {
	escape_markup(s).replace('"', "&quot;")
}

//--> Tests <--
