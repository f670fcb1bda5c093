use crate::{
	config::DiscoveryConfig,
	error::Error,
	github::GithubClient,
	pipeline::ContextResolver,
	types::{parse_repository_full_name, ExecutionContext},
	Result,
};

const BRANCH_PR_PREFIX: &str = "PR-";
const GITHUB_PULL_REF_PREFIX: &str = "refs/pull/";

/// Finds the pull request from CI environment variables, asking GitHub for
/// the pull request of the source branch when no number is given.
pub struct EnvironmentResolver<'a> {
	config: DiscoveryConfig,
	github: Option<&'a GithubClient<'a>>,
}

impl<'a> EnvironmentResolver<'a> {
	pub fn new(config: DiscoveryConfig) -> Self {
		Self {
			config,
			github: None,
		}
	}

	pub fn with_github(mut self, github: &'a GithubClient<'a>) -> Self {
		self.github = Some(github);
		self
	}

	fn repository(&self) -> Result<(String, String)> {
		let DiscoveryConfig {
			repo_owner,
			repo_name,
			github_repository,
			..
		} = &self.config;

		if let (Some(owner), Some(name)) = (repo_owner, repo_name) {
			return Ok((owner.clone(), name.clone()));
		}

		match github_repository {
			Some(full_name) => parse_repository_full_name(full_name)
				.ok_or_else(|| Error::InvalidEnv {
					var: "GITHUB_REPOSITORY".to_string(),
					value: full_name.clone(),
				}),
			None => Err(Error::NoPullRequest {
				msg: "no repository given, set REPO_OWNER and REPO_NAME or GITHUB_REPOSITORY".to_string(),
			}),
		}
	}

	/// Pull request number named directly by the environment, if any.
	fn explicit_number(&self) -> Result<Option<i64>> {
		if let Some(number) = &self.config.pull_number {
			return parse_number("PULL_NUMBER", number).map(Some);
		}

		if let Some(branch) = &self.config.branch_name {
			if let Some(number) = branch.strip_prefix(BRANCH_PR_PREFIX) {
				return parse_number("BRANCH_NAME", number).map(Some);
			}
		}

		if let Some(github_ref) = &self.config.github_ref {
			if let Some(rest) = github_ref.strip_prefix(GITHUB_PULL_REF_PREFIX) {
				let number = rest.split('/').next().unwrap_or_default();
				return parse_number("GITHUB_REF", number).map(Some);
			}
		}

		Ok(None)
	}

	/// Source branch of the build, used to look the pull request up.
	fn source_branch(&self) -> Option<&str> {
		self.config.head_ref.as_deref().or_else(|| {
			self.config
				.branch_name
				.as_deref()
				.filter(|branch| !branch.starts_with(BRANCH_PR_PREFIX))
		})
	}
}

impl<'a> ContextResolver for EnvironmentResolver<'a> {
	fn discover(&self) -> Result<ExecutionContext> {
		let (owner, name) = self.repository()?;
		let full_name = format!("{}/{}", owner, name);

		if let Some(number) = self.explicit_number()? {
			return Ok(ExecutionContext::new(full_name, number));
		}

		let branch = self.source_branch().ok_or_else(|| Error::NoPullRequest {
			msg: format!(
				"{} is not being built for a pull request, set PULL_NUMBER or BRANCH_NAME",
				full_name
			),
		})?;
		let github = self.github.ok_or_else(|| Error::NoPullRequest {
			msg: format!(
				"no pull request number given for branch {} of {}",
				branch, full_name
			),
		})?;

		log::info!(
			"Looking up the pull request for branch {} of {}",
			branch,
			full_name
		);
		match github.pull_request_with_head(&owner, &name, branch)? {
			Some(pr) => Ok(ExecutionContext::new(full_name, pr.number)),
			None => Err(Error::NoPullRequest {
				msg: format!(
					"no open pull request for branch {} of {}",
					branch, full_name
				),
			}),
		}
	}
}

fn parse_number(var: &str, value: &str) -> Result<i64> {
	match value.trim().parse::<i64>() {
		Ok(number) if number > 0 => Ok(number),
		_ => Err(Error::InvalidEnv {
			var: var.to_string(),
			value: value.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config() -> DiscoveryConfig {
		DiscoveryConfig {
			repo_owner: Some("org".to_string()),
			repo_name: Some("repo".to_string()),
			..Default::default()
		}
	}

	#[test]
	fn test_pull_number() {
		let resolver = EnvironmentResolver::new(DiscoveryConfig {
			pull_number: Some("42".to_string()),
			..config()
		});
		assert_eq!(
			resolver.discover().unwrap(),
			ExecutionContext::new("org/repo", 42)
		);
	}

	#[test]
	fn test_pull_number_wins_over_branch_name() {
		let resolver = EnvironmentResolver::new(DiscoveryConfig {
			pull_number: Some("42".to_string()),
			branch_name: Some("PR-7".to_string()),
			..config()
		});
		assert_eq!(resolver.discover().unwrap().number, 42);
	}

	#[test]
	fn test_jenkins_x_branch_name() {
		let resolver = EnvironmentResolver::new(DiscoveryConfig {
			branch_name: Some("PR-7".to_string()),
			..config()
		});
		assert_eq!(resolver.discover().unwrap().number, 7);
	}

	#[test]
	fn test_github_actions() {
		let resolver = EnvironmentResolver::new(DiscoveryConfig {
			github_repository: Some("octo/hello".to_string()),
			github_ref: Some("refs/pull/13/merge".to_string()),
			..Default::default()
		});
		assert_eq!(
			resolver.discover().unwrap(),
			ExecutionContext::new("octo/hello", 13)
		);
	}

	#[test]
	fn test_repo_owner_and_name_win_over_github_repository() {
		let resolver = EnvironmentResolver::new(DiscoveryConfig {
			github_repository: Some("octo/hello".to_string()),
			pull_number: Some("1".to_string()),
			..config()
		});
		assert_eq!(
			resolver.discover().unwrap().full_repository_name,
			"org/repo"
		);
	}

	#[test]
	fn test_missing_repository() {
		let resolver = EnvironmentResolver::new(DiscoveryConfig {
			pull_number: Some("42".to_string()),
			..Default::default()
		});
		assert!(matches!(
			resolver.discover(),
			Err(Error::NoPullRequest { .. })
		));
	}

	#[test]
	fn test_invalid_numbers() {
		for bad in &["abc", "0", "-3"] {
			let resolver = EnvironmentResolver::new(DiscoveryConfig {
				pull_number: Some(bad.to_string()),
				..config()
			});
			assert!(matches!(
				resolver.discover(),
				Err(Error::InvalidEnv { .. })
			));
		}
	}

	#[test]
	fn test_branch_build_without_github_fails() {
		let resolver = EnvironmentResolver::new(DiscoveryConfig {
			branch_name: Some("main".to_string()),
			..config()
		});
		assert!(matches!(
			resolver.discover(),
			Err(Error::NoPullRequest { .. })
		));
	}

	#[test]
	fn test_nothing_to_go_on() {
		let resolver = EnvironmentResolver::new(config());
		assert!(matches!(
			resolver.discover(),
			Err(Error::NoPullRequest { .. })
		));
	}
}
