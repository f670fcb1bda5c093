use pr_joke_bot::{
	config::{self, DiscoveryConfig, LogFormat, MainConfig},
	discovery::EnvironmentResolver,
	github::GithubClient,
	http,
	joke::ChuckNorrisClient,
	logging,
	pipeline::comment_on_pull_request,
	types::RunState,
};

fn main() {
	let log_format = match config::log_format_from_env() {
		Ok(format) => format,
		Err(e) => {
			logging::init(LogFormat::Json);
			log::error!("Failed to validate options: {}", e);
			std::process::exit(1);
		}
	};
	logging::init(log_format);

	if let Err(e) = run() {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

fn run() -> pr_joke_bot::Result<()> {
	let config = MainConfig::from_env()?;

	let github_http = http::Client::new(config.github_token.as_str());
	let joke_http = http::Client::anonymous();

	let github = GithubClient::from_config(&github_http, &config);
	let resolver = EnvironmentResolver::new(DiscoveryConfig::from_env())
		.with_github(&github);
	let provider = ChuckNorrisClient::from_config(&joke_http, &config);

	let (_, result) = comment_on_pull_request(&resolver, &provider, &github);
	let RunState { outcome, .. } = result?;

	match outcome.and_then(|outcome| outcome.html_url) {
		Some(url) => log::info!("Successfully commented: {}", url),
		None => log::info!("Successfully commented"),
	}
	Ok(())
}
