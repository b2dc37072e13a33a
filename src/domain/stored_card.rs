use derive_more::derive::Display;
use serde::Deserialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::domain::reconciliation::format_gateway_datetime;

pub const UNNAMED_CARD: &str = "-";

/// Opaque token the gateway hands out for a tokenized card.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub struct StoredCardHandle(String);

impl StoredCardHandle {
	/// Blank tokens are treated as no token at all.
	pub fn parse(raw: Option<&str>) -> Option<Self> {
		raw.map(str::trim)
			.filter(|token| !token.is_empty())
			.map(|token| StoredCardHandle(token.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CardListEntry {
	#[serde(rename = "ID")]
	pub id:            String,
	#[serde(rename = "KK_GUID")]
	pub guid:          String,
	#[serde(rename = "Tarih")]
	pub timestamp:     String,
	#[serde(rename = "KK_No")]
	pub masked_number: String,
	#[serde(rename = "Kart_Adi", default)]
	pub name:          Option<String>,
	#[serde(rename = "KK_Banka")]
	pub bank:          String,
	#[serde(rename = "KK_Marka")]
	pub brand:         String,
	#[serde(rename = "KK_Tip")]
	pub card_type:     String,
	#[serde(rename = "KK_Son4")]
	pub last_four:     String,
}

impl CardListEntry {
	pub fn display_name(&self) -> &str {
		match self.name.as_deref().map(str::trim) {
			Some(name) if !name.is_empty() => name,
			_ => UNNAMED_CARD,
		}
	}

	/// DataSet rows carry `xs:dateTime` values; anything else is shown as sent.
	pub fn formatted_timestamp(&self) -> String {
		OffsetDateTime::parse(self.timestamp.trim(), &Rfc3339)
			.map(format_gateway_datetime)
			.unwrap_or_else(|_| self.timestamp.clone())
	}
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
	#[display("empty")]
	Empty,
	#[display("direct")]
	Direct,
	#[display("wrapped")]
	Wrapped,
	#[display("double-wrapped")]
	DoubleWrapped,
	#[display("malformed")]
	Malformed,
}

/// The ways the stored-card list payload has been observed to nest its
/// records. Shapes are tried in declaration order.
#[derive(Debug, PartialEq)]
pub enum CardListShape<'a> {
	Empty,
	/// A record, or an array of records.
	Direct(Vec<&'a Value>),
	/// `{ "<name>": <direct> }`
	Wrapped(Vec<&'a Value>),
	/// `{ "<holder>": { "<name>": <direct> } }`
	DoubleWrapped(Vec<&'a Value>),
	Malformed,
}

impl<'a> CardListShape<'a> {
	pub fn classify(payload: &'a Value) -> Self {
		if is_blank(payload) {
			return CardListShape::Empty;
		}
		if let Some(items) = direct_items(payload) {
			return CardListShape::Direct(items);
		}
		if let Some(items) = wrapped_items(payload) {
			return CardListShape::Wrapped(items);
		}
		if let Some(items) = double_wrapped_items(payload) {
			return CardListShape::DoubleWrapped(items);
		}
		CardListShape::Malformed
	}

	pub fn layout(&self) -> ListLayout {
		match self {
			CardListShape::Empty => ListLayout::Empty,
			CardListShape::Direct(_) => ListLayout::Direct,
			CardListShape::Wrapped(_) => ListLayout::Wrapped,
			CardListShape::DoubleWrapped(_) => ListLayout::DoubleWrapped,
			CardListShape::Malformed => ListLayout::Malformed,
		}
	}

	fn items(&self) -> &[&'a Value] {
		match self {
			CardListShape::Direct(items) |
			CardListShape::Wrapped(items) |
			CardListShape::DoubleWrapped(items) => items,
			CardListShape::Empty | CardListShape::Malformed => &[],
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardListing {
	pub layout:  ListLayout,
	pub cards:   Vec<CardListEntry>,
	/// Items found in the list that could not be read as a card record.
	pub skipped: usize,
}

pub fn parse_card_list(payload: &Value) -> CardListing {
	let shape = CardListShape::classify(payload);
	let mut cards = Vec::new();
	let mut skipped = 0;

	for item in shape.items() {
		match CardListEntry::deserialize(*item) {
			Ok(card) => cards.push(card),
			Err(_) => skipped += 1,
		}
	}

	CardListing {
		layout: shape.layout(),
		cards,
		skipped,
	}
}

fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(text) => text.trim().is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
		_ => false,
	}
}

fn is_record(map: &Map<String, Value>) -> bool {
	map.contains_key("KK_GUID")
}

fn looks_like_record(value: &Value) -> bool {
	value.as_object().is_some_and(is_record)
}

fn direct_items(value: &Value) -> Option<Vec<&Value>> {
	match value {
		Value::Object(map) if is_record(map) => Some(vec![value]),
		Value::Array(items) if items.iter().any(looks_like_record) => {
			Some(items.iter().collect())
		}
		_ => None,
	}
}

fn wrapped_items(value: &Value) -> Option<Vec<&Value>> {
	match value {
		Value::Object(map) if !is_record(map) => {
			map.values().find_map(direct_items)
		}
		_ => None,
	}
}

fn double_wrapped_items(value: &Value) -> Option<Vec<&Value>> {
	match value {
		Value::Object(map) if !is_record(map) => {
			map.values().find_map(wrapped_items)
		}
		_ => None,
	}
}
