//! Minimal XML reader for OpenSMOKE style input files
use {fehler::{throws, throw}, pest::{Parser, iterators::Pair}};

#[derive(pest_derive::Parser)]#[grammar_inline = r#"
	WHITESPACE = _{ " " | "\t" | "\r" | "\n" }
	COMMENT = _{ "<!--" ~ (!"-->" ~ ANY)* ~ "-->" }
	declaration = @{ "<?" ~ (!"?>" ~ ANY)* ~ "?>" }
	name = @{ (ASCII_ALPHANUMERIC | "_" | "-" | "." | ":")+ }
	value = @{ "\"" ~ (!"\"" ~ ANY)* ~ "\"" | "'" ~ (!"'" ~ ANY)* ~ "'" }
	attribute = { name ~ "=" ~ value }
	text = @{ (!"<" ~ ANY)+ }
	element = { "<" ~ name ~ attribute* ~ ("/>" | ">" ~ (element | text)* ~ "</" ~ name ~ ">") }
	document = { SOI ~ declaration? ~ element ~ EOI }
"#] struct XML;

#[derive(Debug, Default)] pub struct Element<'t> {
	pub name: &'t str,
	pub children: Vec<Element<'t>>,
	text: String,
}

impl<'t> Element<'t> {
	pub fn child(&self, name: &str) -> Option<&Element<'t>> { self.children.iter().find(|e| e.name == name) }
	pub fn text(&self) -> &str { self.text.trim() }
}

fn unescape(text: &str) -> std::borrow::Cow<'_, str> {
	if !text.contains('&') { return text.into() }
	text.replace("&lt;", "<").replace("&gt;", ">").replace("&quot;", "\"").replace("&apos;", "'").replace("&amp;", "&").into()
}

#[throws(String)] fn element<'t>(pair: Pair<'t, Rule>) -> Element<'t> {
	let mut inner = pair.into_inner();
	let name = inner.next().ok_or("Missing element name")?.as_str();
	let mut element = Element{name, ..Default::default()};
	for pair in inner {
		match pair.as_rule() {
			Rule::attribute => {},
			Rule::element => element.children.push(self::element(pair)?),
			Rule::text => element.text.push_str(&unescape(pair.as_str())),
			Rule::name => if pair.as_str() != name { throw!(format!("<{name}> closed by </{}>", pair.as_str())) },
			rule => throw!(format!("Unexpected {rule:?} in <{name}>")),
		}
	}
	element
}

/// Parses `source` into its root element
#[throws(String)] pub fn parse(source: &str) -> Element<'_> {
	let source = source.trim_start_matches('\u{feff}');
	let document = XML::parse(Rule::document, source).map_err(|e| e.to_string())?.next().ok_or("Empty document")?;
	let root = document.into_inner().find(|pair| pair.as_rule() == Rule::element).ok_or("Missing root element")?;
	element(root)?
}
