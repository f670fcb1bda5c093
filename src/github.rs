use serde::{Deserialize, Serialize};

use crate::{
	config::MainConfig,
	http,
	pipeline::ResultPublisher,
	types::{ExecutionContext, PublishOutcome},
	Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
	pub id: i64,
	pub html_url: Option<String>,
	pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
	pub number: i64,
	pub html_url: Option<String>,
	pub state: Option<String>,
	pub head: Option<Head>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Head {
	#[serde(rename = "ref")]
	pub ref_field: String,
	pub sha: Option<String>,
}

pub struct GithubClient<'a> {
	client: &'a http::Client,
	github_api_url: String,
}

impl<'a> GithubClient<'a> {
	pub fn new<I: Into<String>>(
		client: &'a http::Client,
		github_api_url: I,
	) -> Self {
		let github_api_url = github_api_url.into();
		Self {
			client,
			github_api_url: github_api_url.trim_end_matches('/').to_string(),
		}
	}

	pub fn from_config(client: &'a http::Client, config: &MainConfig) -> Self {
		Self::new(client, config.github_api_url.as_str())
	}

	/// Open pull requests whose head is `owner:branch`.
	pub fn pull_request_with_head(
		&self,
		owner: &str,
		repo: &str,
		branch: &str,
	) -> Result<Option<PullRequest>> {
		let head = format!("{}:{}", owner, branch);
		let pull_requests: Vec<PullRequest> = self.client.get_with_query(
			format!("{}/repos/{}/{}/pulls", self.github_api_url, owner, repo),
			&[("state", "open"), ("head", head.as_str())],
		)?;
		Ok(pull_requests.into_iter().next())
	}

	pub fn create_issue_comment(
		&self,
		owner: &str,
		repo: &str,
		number: i64,
		comment: &str,
	) -> Result<Comment> {
		let url = format!(
			"{}/repos/{}/{}/issues/{}/comments",
			self.github_api_url, owner, repo, number
		);
		self.client.post(url, &serde_json::json!({ "body": comment }))
	}
}

impl<'a> ResultPublisher for GithubClient<'a> {
	fn publish(
		&self,
		context: &ExecutionContext,
		content: &str,
	) -> Result<PublishOutcome> {
		let comment = self.create_issue_comment(
			context.owner(),
			context.repo_name(),
			context.number,
			content,
		)?;
		Ok(PublishOutcome {
			comment_id: Some(comment.id),
			html_url: comment.html_url,
		})
	}
}
