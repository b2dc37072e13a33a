//! Decodes XML documents into `serde_json::Value` trees.
//!
//! Elements become objects keyed by local name (namespace prefixes dropped),
//! repeated siblings become arrays, text-only elements become strings and
//! empty elements become `null`. Attributes are ignored.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};

use crate::domain::error::GatewayError;

struct Frame {
	name:     String,
	children: Map<String, Value>,
	text:     String,
}

impl Frame {
	fn new(name: String) -> Self {
		Self {
			name,
			children: Map::new(),
			text: String::new(),
		}
	}

	fn into_value(self) -> (String, Value) {
		let value = if !self.children.is_empty() {
			Value::Object(self.children)
		} else if self.text.is_empty() {
			Value::Null
		} else {
			Value::String(self.text)
		};
		(self.name, value)
	}
}

fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
	match map.get_mut(&name) {
		Some(Value::Array(items)) => items.push(value),
		Some(existing) => {
			let first = existing.take();
			*existing = Value::Array(vec![first, value]);
		}
		None => {
			map.insert(name, value);
		}
	}
}

fn invalid(message: impl Into<String>) -> GatewayError {
	GatewayError::InvalidXml {
		message: message.into(),
	}
}

/// Returns `{ "<root>": <value> }` for the document's root element.
pub fn decode(xml: &str) -> Result<Value, GatewayError> {
	let mut reader = Reader::from_str(xml);
	reader.config_mut().trim_text(true);

	let mut stack: Vec<Frame> = vec![Frame::new(String::new())];

	loop {
		match reader.read_event()? {
			Event::Start(element) => {
				let name =
					String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
				stack.push(Frame::new(name));
			}
			Event::Empty(element) => {
				let name =
					String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
				if let Some(parent) = stack.last_mut() {
					insert_child(&mut parent.children, name, Value::Null);
				}
			}
			Event::End(_) => {
				if stack.len() < 2 {
					return Err(invalid("unbalanced closing tag"));
				}
				if let Some(frame) = stack.pop() {
					let (name, value) = frame.into_value();
					if let Some(parent) = stack.last_mut() {
						insert_child(&mut parent.children, name, value);
					}
				}
			}
			Event::Text(text) => {
				if let Some(frame) = stack.last_mut() {
					frame.text.push_str(&text.unescape()?);
				}
			}
			Event::CData(data) => {
				if let Some(frame) = stack.last_mut() {
					frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
				}
			}
			Event::Eof => break,
			_ => {}
		}
	}

	if stack.len() != 1 {
		return Err(invalid("document ended inside an element"));
	}

	match stack.pop() {
		Some(document) if !document.children.is_empty() => {
			Ok(Value::Object(document.children))
		}
		_ => Err(invalid("document has no root element")),
	}
}
