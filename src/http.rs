use std::borrow::Cow;

use crate::{error, Result};

use serde::Serialize;
use snafu::ResultExt;

const USER_AGENT: &str = concat!("pr-joke-bot/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client shared by every collaborator of a run.
pub struct Client {
	client: reqwest::blocking::Client,
	auth_key: Option<String>,
}

/// HTTP util methods.
impl Client {
	pub fn new<I: Into<String>>(auth_key: I) -> Self {
		Self {
			client: reqwest::blocking::Client::new(),
			auth_key: Some(auth_key.into()),
		}
	}

	/// Client for public endpoints which don't take credentials.
	pub fn anonymous() -> Self {
		Self {
			client: reqwest::blocking::Client::new(),
			auth_key: None,
		}
	}

	pub fn request(
		&self,
		builder: reqwest::blocking::RequestBuilder,
	) -> Result<reqwest::blocking::Response> {
		let builder = match &self.auth_key {
			Some(auth_key) => builder.bearer_auth(auth_key),
			None => builder,
		};
		let request = builder
			.header(reqwest::header::ACCEPT, "application/json")
			.header(reqwest::header::USER_AGENT, USER_AGENT)
			.build()
			.context(error::Http)?;

		log::debug!("{} {}", request.method(), request.url());

		let response = self.client.execute(request).context(error::Http)?;
		let status = response.status();

		if status.is_success() {
			Ok(response)
		} else {
			let text = response.text().context(error::Http)?;

			// Try to decode the response error as JSON otherwise store
			// it as plain text in a JSON object.
			let body = if let Ok(value) = serde_json::from_str(&text) {
				value
			} else {
				serde_json::json!({ "error_message": text })
			};

			error::Response { status, body }.fail()
		}
	}

	pub fn get_response<'b, I: Into<Cow<'b, str>>>(
		&self,
		url: I,
	) -> Result<reqwest::blocking::Response> {
		self.request(self.client.get(&*url.into()))
	}

	/// Sends a `GET` request to `url` and decodes the body as JSON.
	pub fn get<'b, I, T>(&self, url: I) -> Result<T>
	where
		I: Into<Cow<'b, str>>,
		T: serde::de::DeserializeOwned,
	{
		let text = self.get_response(url)?.text().context(error::Http)?;
		serde_json::from_str(&text).context(error::Json)
	}

	/// Like `get`, with `query` pairs percent-encoded onto the URL.
	pub fn get_with_query<'b, I, Q, T>(&self, url: I, query: &Q) -> Result<T>
	where
		I: Into<Cow<'b, str>>,
		Q: Serialize + ?Sized,
		T: serde::de::DeserializeOwned,
	{
		let text = self
			.request(self.client.get(&*url.into()).query(query))?
			.text()
			.context(error::Http)?;
		serde_json::from_str(&text).context(error::Json)
	}

	pub fn post_response<'b, I, B>(
		&self,
		url: I,
		body: &B,
	) -> Result<reqwest::blocking::Response>
	where
		I: Into<Cow<'b, str>>,
		B: Serialize,
	{
		self.request(self.client.post(&*url.into()).json(body))
	}

	pub fn post<'b, I, B, T>(&self, url: I, body: &B) -> Result<T>
	where
		I: Into<Cow<'b, str>>,
		B: Serialize,
		T: serde::de::DeserializeOwned,
	{
		let text = self.post_response(url, body)?.text().context(error::Http)?;
		serde_json::from_str(&text).context(error::Json)
	}
}
