pub mod entity;

use std::collections::HashSet;

use crate::services::response::ValidationError;

/// Lowercased `#word` terms of a quack in order of appearance. A term used
/// twice is rejected, a quack stores each hashtag once.
pub fn extract_hashtags(text: &str) -> Result<Vec<String>, ValidationError> {
	let mut seen = HashSet::new();
	let mut terms = Vec::new();

	let mut rest = text;
	while let Some(start) = rest.find('#') {
		let after = &rest[start + 1..];
		let end = after.find(|c: char| !(c.is_alphanumeric() || c == '_')).unwrap_or(after.len());
		let term = after[..end].to_lowercase();
		if !term.is_empty() {
			if !seen.insert(term.clone()) {
				return Err(ValidationError::DuplicateHashtag(term));
			}
			terms.push(term);
		}
		rest = &after[end..];
	}
	Ok(terms)
}
