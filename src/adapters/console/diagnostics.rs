use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use crate::domain::gateway::Exchange;

/// Re-indents an XML document; `None` when it does not parse.
pub fn pretty_xml(raw: &str) -> Option<String> {
	let mut reader = Reader::from_str(raw);
	reader.config_mut().trim_text(true);
	let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

	loop {
		match reader.read_event().ok()? {
			Event::Eof => break,
			event => writer.write_event(event).ok()?,
		}
	}

	String::from_utf8(writer.into_inner()).ok()
}

fn render_envelope(raw: &[u8]) -> String {
	let text = String::from_utf8_lossy(raw);
	pretty_xml(&text).unwrap_or_else(|| text.into_owned())
}

/// Lines describing the last recorded request and response.
pub fn render(exchange: &Exchange) -> Vec<String> {
	let mut lines = Vec::new();
	if let Some(sent) = &exchange.sent {
		lines.push("--- last request ---".to_string());
		lines.push(render_envelope(sent));
	}
	if let Some(received) = &exchange.received {
		lines.push("--- last response ---".to_string());
		lines.push(render_envelope(received));
	}
	lines
}

pub fn print(exchange: &Exchange) {
	for line in render(exchange) {
		println!("{line}");
	}
}
