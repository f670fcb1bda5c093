use crate::{error::Error, Result};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_JOKE_API_URL: &str =
	"https://api.chucknorris.io/jokes/random";
// Other categories let explicit jokes through.
pub const DEFAULT_JOKE_CATEGORY: &str = "dev";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
	Json,
	Text,
}

#[derive(Debug, Clone)]
pub struct MainConfig {
	pub github_token: String,
	pub github_api_url: String,
	pub joke_api_url: String,
	pub joke_category: String,
}

impl MainConfig {
	pub fn from_env() -> Result<Self> {
		dotenv::dotenv().ok();

		let github_token = var("GITHUB_TOKEN")
			.or_else(|| var("GIT_TOKEN"))
			.ok_or_else(|| Error::MissingEnv {
				var: "GITHUB_TOKEN".to_string(),
			})?;
		let github_api_url = var("GITHUB_API_URL")
			.unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
			.trim_end_matches('/')
			.to_string();
		let joke_api_url = var("JOKE_API_URL")
			.unwrap_or_else(|| DEFAULT_JOKE_API_URL.to_string());
		let joke_category = var("JOKE_CATEGORY")
			.unwrap_or_else(|| DEFAULT_JOKE_CATEGORY.to_string());

		Ok(Self {
			github_token,
			github_api_url,
			joke_api_url,
			joke_category,
		})
	}
}

/// Read separately from `MainConfig` so that the logger can be set up before
/// anything else is validated.
pub fn log_format_from_env() -> Result<LogFormat> {
	dotenv::dotenv().ok();
	match var("LOG_FORMAT").as_deref() {
		None | Some("json") => Ok(LogFormat::Json),
		Some("text") => Ok(LogFormat::Text),
		Some(other) => Err(Error::InvalidEnv {
			var: "LOG_FORMAT".to_string(),
			value: other.to_string(),
		}),
	}
}

/// Everything the CI environment may tell us about the pull request being
/// built. Each field is the raw, non-empty value of its variable.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
	/// `REPO_OWNER`
	pub repo_owner: Option<String>,
	/// `REPO_NAME`
	pub repo_name: Option<String>,
	/// `GITHUB_REPOSITORY`, as `owner/name`
	pub github_repository: Option<String>,
	/// `PULL_NUMBER`
	pub pull_number: Option<String>,
	/// `BRANCH_NAME`, e.g. `PR-42` or a plain branch
	pub branch_name: Option<String>,
	/// `GITHUB_REF`, e.g. `refs/pull/42/merge`
	pub github_ref: Option<String>,
	/// `PULL_HEAD_REF`, falling back to `GITHUB_HEAD_REF`
	pub head_ref: Option<String>,
}

impl DiscoveryConfig {
	pub fn from_env() -> Self {
		dotenv::dotenv().ok();
		Self {
			repo_owner: var("REPO_OWNER"),
			repo_name: var("REPO_NAME"),
			github_repository: var("GITHUB_REPOSITORY"),
			pull_number: var("PULL_NUMBER"),
			branch_name: var("BRANCH_NAME"),
			github_ref: var("GITHUB_REF"),
			head_ref: var("PULL_HEAD_REF").or_else(|| var("GITHUB_HEAD_REF")),
		}
	}
}

fn var(key: &str) -> Option<String> {
	dotenv::var(key).ok().filter(|value| !value.trim().is_empty())
}
