pub mod entity;

use std::sync::OnceLock;

use regex::Regex;

use self::entity::NewUser;
use crate::services::response::ValidationError;

impl NewUser {
	/// Validates raw sign-up fields. Nothing here touches the store.
	pub fn parse(
		name: &str,
		email: &str,
		phone: &str,
		password: &str,
	) -> Result<Self, ValidationError> {
		let name = required(name, "name")?;
		let email = required(email, "email")?;
		if !is_valid_email(&email) {
			return Err(ValidationError::InvalidEmail);
		}
		let phone = parse_phone(required(phone, "phone")?.as_str())?;
		if password.is_empty() {
			return Err(ValidationError::EmptyField("password"));
		}

		Ok(Self {
			name,
			email,
			phone,
			password: password.to_string(),
		})
	}
}

/// Trims `value` and rejects it when nothing is left.
pub fn required(
	value: &str,
	field: &'static str,
) -> Result<String, ValidationError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(ValidationError::EmptyField(field));
	}
	Ok(trimmed.to_string())
}

pub fn is_valid_email(email: &str) -> bool {
	static EMAIL: OnceLock<Regex> = OnceLock::new();
	if email.contains(['\n', '\r']) {
		return false;
	}
	EMAIL
		.get_or_init(|| {
			// Local part is a dot-atom or a quoted string; domain is a hostname or a bracketed IPv4 literal.
			Regex::new(
				r##"^(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])$"##,
			)
			.expect("email pattern is valid")
		})
		.is_match(email)
}

/// Keeps only the digits; a phone number has 10 or 11 of them.
pub fn parse_phone(input: &str) -> Result<i64, ValidationError> {
	if input.contains(['\n', '\r']) {
		return Err(ValidationError::InvalidPhone);
	}
	let digits: String = input.chars().filter(char::is_ascii_digit).collect();
	if !(10..=11).contains(&digits.len()) {
		return Err(ValidationError::InvalidPhone);
	}
	digits.parse::<i64>().map_err(|_| ValidationError::InvalidPhone)
}

pub fn parse_user_id(input: &str) -> Result<i32, ValidationError> {
	input.trim().parse::<i32>().map_err(|_| ValidationError::InvalidId)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_email_validation() {
		assert!(is_valid_email("example@ualberta.ca"));
		assert!(is_valid_email("first.last+tag@mail.example.com"));
		assert!(!is_valid_email("no-at-sign.com"));
		assert!(!is_valid_email("trailing@dot."));
		assert!(!is_valid_email("a@b.c\n"));
		assert!(!is_valid_email("double..dot@example.com"));
	}

	#[test]
	fn test_quoted_local_part_and_address_literal() {
		assert!(is_valid_email("\"daffy..duck\"@pond.org"));
		assert!(is_valid_email("daffy@[192.168.0.1]"));
		assert!(!is_valid_email("daffy@[300.1.1.1]"));
		assert!(!is_valid_email("\"unclosed@pond.org"));
	}

	#[test]
	fn test_phone_strips_punctuation() {
		assert_eq!(parse_phone("510-827-7791").unwrap(), 5108277791);
		assert_eq!(parse_phone("+1 (510) 827 7791").unwrap(), 15108277791);
		assert!(matches!(parse_phone("827-7791"), Err(ValidationError::InvalidPhone)));
		assert!(matches!(parse_phone("123456789012"), Err(ValidationError::InvalidPhone)));
	}

	#[test]
	fn test_user_id_parsing() {
		assert_eq!(parse_user_id(" 42 ").unwrap(), 42);
		assert_eq!(parse_user_id("-3").unwrap(), -3);
		assert!(matches!(parse_user_id("4x"), Err(ValidationError::InvalidId)));
		assert!(matches!(parse_user_id("99999999999"), Err(ValidationError::InvalidId)));
	}

	#[test]
	fn test_new_user_parse() {
		'_given: {
			let parsed = NewUser::parse("  Daffy  ", "daffy@pond.org", "780 555 0199", "quack");

			'_when: {
				let user = parsed.unwrap();
				assert_eq!(user.name, "Daffy");
				assert_eq!(user.phone, 7805550199);
			}
		}

		assert!(matches!(NewUser::parse("   ", "a@b.co", "7805550199", "pw"), Err(ValidationError::EmptyField("name"))));
		assert!(matches!(NewUser::parse("Donald", "a@b.co", "7805550199", ""), Err(ValidationError::EmptyField("password"))));
		assert!(matches!(NewUser::parse("Donald", "nope", "7805550199", "pw"), Err(ValidationError::InvalidEmail)));
	}
}
