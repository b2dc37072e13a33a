use std::fmt;

/// Merchant login sent as the `G` block of every gateway call.
#[derive(Clone, PartialEq)]
pub struct Credentials {
	pub client_code: String,
	pub username:    String,
	pub password:    String,
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("client_code", &self.client_code)
			.field("username", &self.username)
			.field("password", &"***")
			.finish()
	}
}

/// The merchant code and GUID pair that enters every request signature.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantIdentity {
	pub client_code: String,
	pub guid:        String,
}

impl MerchantIdentity {
	pub fn new(client_code: impl Into<String>, guid: impl Into<String>) -> Self {
		Self {
			client_code: client_code.into(),
			guid:        guid.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
	pub number:       String,
	pub expiry_month: String,
	pub expiry_year:  String,
	pub cvc:          String,
	pub holder_name:  String,
	pub holder_phone: String,
}

impl Card {
	/// Card number with everything but the first six and last four digits hidden.
	pub fn masked_number(&self) -> String {
		let digits: Vec<char> = self.number.chars().collect();
		if digits.len() <= 10 {
			return "*".repeat(digits.len());
		}
		digits
			.iter()
			.enumerate()
			.map(|(i, c)| {
				if i < 6 || i >= digits.len() - 4 {
					*c
				} else {
					'*'
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_card(number: &str) -> Card {
		Card {
			number:       number.to_string(),
			expiry_month: "12".to_string(),
			expiry_year:  "2026".to_string(),
			cvc:          "000".to_string(),
			holder_name:  "Test Holder".to_string(),
			holder_phone: "5551234567".to_string(),
		}
	}

	#[test]
	fn test_masked_number_keeps_bin_and_last_four() {
		let card = test_card("4546711234567894");
		assert_eq!(card.masked_number(), "454671******7894");
	}

	#[test]
	fn test_masked_number_short_input_is_fully_hidden() {
		let card = test_card("1234");
		assert_eq!(card.masked_number(), "****");
	}

	#[test]
	fn test_credentials_debug_hides_password() {
		let credentials = Credentials {
			client_code: "10738".to_string(),
			username:    "Test".to_string(),
			password:    "secret".to_string(),
		};
		let debug = format!("{credentials:?}");
		assert!(debug.contains("10738"));
		assert!(!debug.contains("secret"));
	}
}
