use serde::{Deserialize, Serialize};

/// The pull request targeted by the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
	/// `owner/name`
	pub full_repository_name: String,
	pub number: i64,
}

impl ExecutionContext {
	pub fn new<I: Into<String>>(full_repository_name: I, number: i64) -> Self {
		Self {
			full_repository_name: full_repository_name.into(),
			number,
		}
	}

	pub fn owner(&self) -> &str {
		self.split().0
	}

	pub fn repo_name(&self) -> &str {
		self.split().1
	}

	pub fn pr_name(&self) -> String {
		format!("#{}", self.number)
	}

	fn split(&self) -> (&str, &str) {
		match self.full_repository_name.split_once('/') {
			Some((owner, name)) => (owner, name),
			None => ("", &self.full_repository_name),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishOutcome {
	pub comment_id: Option<i64>,
	pub html_url: Option<String>,
}

/// State threaded through the comment pipeline. Each step fills in one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
	pub context: Option<ExecutionContext>,
	pub content: Option<String>,
	pub outcome: Option<PublishOutcome>,
}

pub fn parse_repository_full_name(full_name: &str) -> Option<(String, String)> {
	let mut parts = full_name.split('/');
	match (parts.next(), parts.next(), parts.next()) {
		(Some(owner), Some(name), None)
			if !owner.is_empty() && !name.is_empty() =>
		{
			Some((owner.to_string(), name.to_string()))
		}
		_ => None,
	}
}
