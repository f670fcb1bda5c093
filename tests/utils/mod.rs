#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use httptest::{all_of, matchers::*, responders::*, Expectation, Server};
use pr_joke_bot::{
	error::Error,
	pipeline::{ContentProvider, ContextResolver, ResultPublisher},
	types::{ExecutionContext, PublishOutcome},
	Result,
};
use serde_json::json;

pub const JOKE: &str = "Chuck Norris counted to infinity. Twice.";

pub struct FakeResolver {
	pub context: Option<ExecutionContext>,
	pub calls: Cell<usize>,
}

impl FakeResolver {
	pub fn found(repo: &str, number: i64) -> Self {
		Self {
			context: Some(ExecutionContext::new(repo, number)),
			calls: Cell::new(0),
		}
	}

	pub fn not_a_pull_request() -> Self {
		Self {
			context: None,
			calls: Cell::new(0),
		}
	}
}

impl ContextResolver for FakeResolver {
	fn discover(&self) -> Result<ExecutionContext> {
		self.calls.set(self.calls.get() + 1);
		self.context.clone().ok_or_else(|| Error::NoPullRequest {
			msg: "not running for a pull request".to_string(),
		})
	}
}

pub struct FakeProvider {
	pub content: Option<String>,
	pub calls: Cell<usize>,
}

impl FakeProvider {
	pub fn returning(content: &str) -> Self {
		Self {
			content: Some(content.to_string()),
			calls: Cell::new(0),
		}
	}

	pub fn failing() -> Self {
		Self {
			content: None,
			calls: Cell::new(0),
		}
	}
}

impl ContentProvider for FakeProvider {
	fn fetch(&self) -> Result<String> {
		self.calls.set(self.calls.get() + 1);
		self.content
			.clone()
			.ok_or(Error::MissingContent { field: "value" })
	}
}

#[derive(Default)]
pub struct RecordingPublisher {
	pub comments: RefCell<Vec<(ExecutionContext, String)>>,
	pub reject: bool,
}

impl RecordingPublisher {
	pub fn rejecting() -> Self {
		Self {
			reject: true,
			..Default::default()
		}
	}

	pub fn calls(&self) -> usize {
		self.comments.borrow().len()
	}
}

impl ResultPublisher for RecordingPublisher {
	fn publish(
		&self,
		context: &ExecutionContext,
		content: &str,
	) -> Result<PublishOutcome> {
		let mut comments = self.comments.borrow_mut();
		comments.push((context.clone(), content.to_string()));
		if self.reject {
			return Err(Error::Response {
				status: reqwest::StatusCode::FORBIDDEN,
				body: json!({ "message": "Resource not accessible by integration" }),
			});
		}
		let id = 1000 + comments.len() as i64;
		Ok(PublishOutcome {
			comment_id: Some(id),
			html_url: None,
		})
	}
}

pub fn expect_joke(server: &Server, body: serde_json::Value) {
	server.expect(
		Expectation::matching(all_of![
			request::method_path("GET", "/jokes/random"),
			request::query(url_decoded(contains(("category", "dev")))),
		])
		.respond_with(json_encoded(body)),
	);
}

pub fn joke_body(value: &str) -> serde_json::Value {
	json!({
		"categories": ["dev"],
		"icon_url": "https://assets.chucknorris.host/img/avatar/chuck-norris.png",
		"id": "abc123",
		"url": "https://api.chucknorris.io/jokes/abc123",
		"value": value,
	})
}

pub fn joke_api_url(server: &Server) -> String {
	server.url_str("/jokes/random")
}

pub fn github_api_url(server: &Server) -> String {
	server.url_str("")
}
