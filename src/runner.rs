use crate::{error::Error, Result};

/// Where a runner is in its lifecycle. Step numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
	NotStarted,
	Running(usize),
	Succeeded,
	Failed(usize),
}

impl RunnerState {
	pub fn is_terminal(&self) -> bool {
		matches!(self, RunnerState::Succeeded | RunnerState::Failed(_))
	}
}

pub struct Step<'a, S> {
	name: &'static str,
	run: Box<dyn FnOnce(S) -> Result<S> + 'a>,
}

impl<'a, S> Step<'a, S> {
	pub fn new<F>(name: &'static str, run: F) -> Self
	where
		F: FnOnce(S) -> Result<S> + 'a,
	{
		Self {
			name,
			run: Box::new(run),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}
}

/// Runs dependent steps in order, handing each the state produced by the one
/// before it. The first failure ends the run; nothing after it is invoked and
/// nothing before it is undone.
pub struct SequentialTaskRunner<'a, S> {
	steps: Vec<Step<'a, S>>,
	state: RunnerState,
}

impl<'a, S> SequentialTaskRunner<'a, S> {
	pub fn new() -> Self {
		Self {
			steps: vec![],
			state: RunnerState::NotStarted,
		}
	}

	pub fn step<F>(mut self, name: &'static str, run: F) -> Self
	where
		F: FnOnce(S) -> Result<S> + 'a,
	{
		self.steps.push(Step::new(name, run));
		self
	}

	pub fn state(&self) -> RunnerState {
		self.state
	}

	pub fn len(&self) -> usize {
		self.steps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	pub fn run(&mut self, initial: S) -> Result<S> {
		if self.state.is_terminal() {
			return Err(Error::RunnerFinished {});
		}

		let total = self.steps.len();
		let mut state = initial;
		for (index, step) in self.steps.drain(..).enumerate() {
			let number = index + 1;
			self.state = RunnerState::Running(number);
			log::info!("Step {}/{}: {}", number, total, step.name);

			state = match (step.run)(state) {
				Ok(next) => next,
				Err(e) => {
					self.state = RunnerState::Failed(number);
					return Err(Error::StepFailed {
						step: number,
						step_name: step.name,
						source: Box::new(e),
					});
				}
			};
			log::info!("Step {}/{} succeeded: {}", number, total, step.name);
		}

		self.state = RunnerState::Succeeded;
		Ok(state)
	}
}

impl<'a, S> Default for SequentialTaskRunner<'a, S> {
	fn default() -> Self {
		Self::new()
	}
}
