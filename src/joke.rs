use serde::Deserialize;
use snafu::OptionExt;

use crate::{
	config::MainConfig, error, http, pipeline::ContentProvider, Result,
};

/// Body returned by the joke API. Only `value` is needed; the rest is kept
/// for logging.
#[derive(Debug, Deserialize)]
pub struct JokeResponse {
	pub id: Option<String>,
	pub url: Option<String>,
	#[serde(default)]
	pub categories: Vec<String>,
	pub value: Option<String>,
}

pub struct ChuckNorrisClient<'a> {
	client: &'a http::Client,
	api_url: String,
	category: Option<String>,
}

impl<'a> ChuckNorrisClient<'a> {
	pub fn new<I: Into<String>>(
		client: &'a http::Client,
		api_url: I,
		category: Option<String>,
	) -> Self {
		Self {
			client,
			api_url: api_url.into(),
			category,
		}
	}

	pub fn from_config(client: &'a http::Client, config: &MainConfig) -> Self {
		Self::new(
			client,
			config.joke_api_url.as_str(),
			Some(config.joke_category.clone()),
		)
	}

	pub fn random_joke(&self) -> Result<JokeResponse> {
		match &self.category {
			Some(category) => self.client.get_with_query(
				self.api_url.as_str(),
				&[("category", category.as_str())],
			),
			None => self.client.get(self.api_url.as_str()),
		}
	}
}

impl<'a> ContentProvider for ChuckNorrisClient<'a> {
	fn fetch(&self) -> Result<String> {
		let response = self.random_joke()?;
		log::debug!(
			"Got joke {:?} in categories {:?}",
			response.id,
			response.categories
		);
		let joke = response
			.value
			.context(error::MissingContent { field: "value" })?;
		if joke.trim().is_empty() {
			return error::EmptyContent.fail();
		}
		Ok(joke)
	}
}
