use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility = "pub")]
pub enum Error {
	/// An error occurred while sending or receiving a HTTP request or response
	/// respectively.
	#[snafu(display("Http error: {}", source))]
	Http { source: reqwest::Error },

	/// An error occurred while parsing or serializing JSON.
	#[snafu(display("Json error: {}", source))]
	Json { source: serde_json::Error },

	/// An error occurred with an integration service (e.g. GitHub).
	#[snafu(display("Status code: {}, body: {}", status, body))]
	Response {
		status: reqwest::StatusCode,
		body: serde_json::Value,
	},

	/// The content provider answered without the expected text field.
	#[snafu(display("Response is missing the \"{}\" field", field))]
	MissingContent { field: &'static str },

	#[snafu(display("Response contained no text to post"))]
	EmptyContent {},

	#[snafu(display("Environment variable {} is not set", var))]
	MissingEnv { var: String },

	#[snafu(display("Environment variable {} has invalid value {:?}", var, value))]
	InvalidEnv { var: String, value: String },

	/// The environment does not point at a pull request.
	#[snafu(display("No pull request found: {}", msg))]
	NoPullRequest { msg: String },

	/// A step ran without the output of the step before it.
	#[snafu(display("Missing {} from a previous step", what))]
	MissingState { what: &'static str },

	#[snafu(display("Failed to discover pull request: {}", source))]
	Discovery {
		#[snafu(source(from(Error, Box::new)))]
		source: Box<Error>,
	},

	#[snafu(display(
		"Failed to fetch content for pull request #{} on repository {}: {}",
		number,
		repository,
		source
	))]
	Fetch {
		repository: String,
		number: i64,
		#[snafu(source(from(Error, Box::new)))]
		source: Box<Error>,
	},

	#[snafu(display(
		"Failed to comment on pull request #{} on repository {}: {}",
		number,
		repository,
		source
	))]
	Publish {
		repository: String,
		number: i64,
		#[snafu(source(from(Error, Box::new)))]
		source: Box<Error>,
	},

	/// A pipeline step failed; `step` is 1-based.
	#[snafu(display("Step {} ({}) failed: {}", step, step_name, source))]
	StepFailed {
		step: usize,
		step_name: &'static str,
		source: Box<Error>,
	},

	#[snafu(display("Runner has already finished"))]
	RunnerFinished {},
}

impl Error {
	/// Index of the failing step, if this error came out of a runner.
	pub fn failed_step(&self) -> Option<usize> {
		match self {
			Error::StepFailed { step, .. } => Some(*step),
			_ => None,
		}
	}

	/// Name of the step which failed, if this error came out of a runner.
	pub fn step_name(&self) -> Option<&'static str> {
		match self {
			Error::StepFailed { step_name, .. } => Some(*step_name),
			_ => None,
		}
	}

	/// Innermost error, skipping the step and runner wrappers.
	pub fn root_cause(&self) -> &Error {
		match self {
			Error::StepFailed { source, .. }
			| Error::Discovery { source }
			| Error::Fetch { source, .. }
			| Error::Publish { source, .. } => source.root_cause(),
			e => e,
		}
	}
}
