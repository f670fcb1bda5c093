use snafu::{OptionExt, ResultExt};

use crate::{
	error,
	runner::{RunnerState, SequentialTaskRunner},
	types::{ExecutionContext, PublishOutcome, RunState},
	Result,
};

pub const DISCOVER_STEP: &str = "discover pull request";
pub const FETCH_STEP: &str = "fetch joke";
pub const PUBLISH_STEP: &str = "comment on pull request";

/// Works out which pull request the current build belongs to.
pub trait ContextResolver {
	fn discover(&self) -> Result<ExecutionContext>;
}

/// Fetches the text to post. One attempt, no caching.
pub trait ContentProvider {
	fn fetch(&self) -> Result<String>;
}

/// Posts `content` as a new comment. Existing comments are never touched, so
/// publishing twice yields two comments.
pub trait ResultPublisher {
	fn publish(
		&self,
		context: &ExecutionContext,
		content: &str,
	) -> Result<PublishOutcome>;
}

/// Builds the discover -> fetch -> publish runner over the given
/// collaborators.
pub fn comment_pipeline<'a, R, C, P>(
	resolver: &'a R,
	provider: &'a C,
	publisher: &'a P,
) -> SequentialTaskRunner<'a, RunState>
where
	R: ContextResolver + ?Sized,
	C: ContentProvider + ?Sized,
	P: ResultPublisher + ?Sized,
{
	SequentialTaskRunner::new()
		.step(DISCOVER_STEP, move |state: RunState| {
			let context = resolver.discover().context(error::Discovery)?;
			log::info!(
				"Found pull request {} on repository {}",
				context.pr_name(),
				context.full_repository_name
			);
			Ok(RunState {
				context: Some(context),
				..state
			})
		})
		.step(FETCH_STEP, move |state: RunState| {
			let context = state.context.as_ref().context(error::MissingState {
				what: "execution context",
			})?;
			let content = provider
				.fetch()
				.and_then(|content| {
					if content.trim().is_empty() {
						error::EmptyContent.fail()
					} else {
						Ok(content)
					}
				})
				.context(error::Fetch {
					repository: context.full_repository_name.clone(),
					number: context.number,
				})?;
			log::info!(
				"About to comment on pull request {} on repository {}: {}",
				context.pr_name(),
				context.full_repository_name,
				content
			);
			Ok(RunState {
				content: Some(content),
				..state
			})
		})
		.step(PUBLISH_STEP, move |state: RunState| {
			let context = state.context.as_ref().context(error::MissingState {
				what: "execution context",
			})?;
			let content = state
				.content
				.as_deref()
				.filter(|content| !content.trim().is_empty())
				.context(error::MissingState { what: "content" })?;
			let outcome = publisher.publish(context, content).context(
				error::Publish {
					repository: context.full_repository_name.clone(),
					number: context.number,
				},
			)?;
			log::info!(
				"Commented on pull request {} on repository {}",
				context.pr_name(),
				context.full_repository_name
			);
			Ok(RunState {
				outcome: Some(outcome),
				..state
			})
		})
}

/// Runs the whole pipeline once, returning the final state alongside the
/// state the runner ended in.
pub fn comment_on_pull_request<R, C, P>(
	resolver: &R,
	provider: &C,
	publisher: &P,
) -> (RunnerState, Result<RunState>)
where
	R: ContextResolver + ?Sized,
	C: ContentProvider + ?Sized,
	P: ResultPublisher + ?Sized,
{
	let mut runner = comment_pipeline(resolver, provider, publisher);
	let result = runner.run(RunState::default());
	(runner.state(), result)
}
