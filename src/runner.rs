use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::discover::{PipelineStep, discover};
use crate::error::PipelineError;
use crate::extensions::ExtensionMap;
use crate::process::{ProcessSpawner, SystemSpawner};
use crate::record::{StepRecord, StepTimer};
use crate::report::RunReport;

/// Executes the prefixed files of one directory, one at a time, in prefix
/// order.
///
/// Discovery runs once, at construction, and fixes the step order for the
/// runner's lifetime. [`Runner::run`] walks the steps front to back and stops
/// at the first failure; calling it again restarts from the first step and
/// overwrites the previous records.
///
/// Example
/// ```no_run
/// use prefixrun::Runner;
///
/// let mut runner = Runner::new("./pipeline")?;
/// let report = runner.run()?;
/// println!("{report}");
/// # Ok::<(), prefixrun::PipelineError>(())
/// ```
impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("directory", &self.directory)
            .field("extensions", &self.extensions)
            .field("steps", &self.steps)
            .field("records", &self.records)
            .field("fail_on_nonzero", &self.fail_on_nonzero)
            .finish_non_exhaustive()
    }
}

pub struct Runner {
    directory: PathBuf,
    extensions: ExtensionMap,
    steps: Vec<PipelineStep>,
    records: Vec<Option<StepRecord>>,
    fail_on_nonzero: bool,
    spawner: Box<dyn ProcessSpawner>,
}

impl Runner {
    /// Discover the pipeline in `directory` using the default extension map.
    ///
    /// The directory must be resolved by the caller; the runner never reads
    /// ambient process state to pick one.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        Self::with_extensions(directory, ExtensionMap::defaults())
    }

    /// Discover the pipeline in `directory` with a caller-provided extension
    /// map (typically [`ExtensionMap::with_overrides`]).
    pub fn with_extensions(
        directory: impl Into<PathBuf>,
        extensions: ExtensionMap,
    ) -> Result<Self, PipelineError> {
        let directory = directory.into();
        let steps = discover(&directory)?;
        let records = vec![None; steps.len()];
        Ok(Self {
            directory,
            extensions,
            steps,
            records,
            fail_on_nonzero: false,
            spawner: Box::new(SystemSpawner),
        })
    }

    /// Treat a non-zero exit status from a step as a failure.
    ///
    /// Off by default: only a failed spawn or wait fails the pipeline, and a
    /// script that runs to completion with a non-zero status is recorded as a
    /// success.
    pub fn fail_on_nonzero(mut self, enabled: bool) -> Self {
        self.fail_on_nonzero = enabled;
        self
    }

    /// Replace the spawn-and-wait implementation.
    pub fn with_spawner(mut self, spawner: Box<dyn ProcessSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    /// The discovered steps, in execution order.
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// The directory the pipeline runs in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Execute every step in order, stopping at the first failure.
    ///
    /// Prior records are discarded first, so a second call restarts from the
    /// first step rather than resuming. On failure the failing step's record
    /// is finalized before the error propagates, and [`Runner::report`] shows
    /// every step up to and including the failure; steps after it stay not
    /// attempted.
    pub fn run(&mut self) -> Result<RunReport, PipelineError> {
        self.records = vec![None; self.steps.len()];
        for index in 0..self.steps.len() {
            self.run_step(index)?;
        }
        Ok(self.report())
    }

    /// The current report. Callable at any point, in particular after `run`
    /// has returned an error, to render partial progress.
    pub fn report(&self) -> RunReport {
        RunReport::project(&self.steps, &self.records)
    }

    fn run_step(&mut self, index: usize) -> Result<(), PipelineError> {
        let step = self.steps[index].clone();
        // Resolution failures halt before the step counts as attempted.
        let command = self.extensions.command_for(&step.name)?;
        debug!(file = %step.name, order = step.order, "starting step");
        let timer = StepTimer::start();
        let outcome = match self.spawner.spawn_and_wait(&command, &self.directory) {
            Ok(status) if status.success() || !self.fail_on_nonzero => {
                if !status.success() {
                    debug!(file = %step.name, %status, "step exited non-zero; not a failure");
                }
                Ok(())
            }
            Ok(status) => Err(PipelineError::NonZeroExit {
                file: step.name.clone(),
                status,
            }),
            Err(source) => Err(PipelineError::Invocation {
                file: step.name.clone(),
                command: command.join(" "),
                source,
            }),
        };
        let record = timer.finish(outcome.is_ok());
        match &outcome {
            Ok(()) => {
                info!(file = %step.name, elapsed_mins = record.elapsed_minutes, "step finished");
            }
            Err(error) => warn!(file = %step.name, %error, "step failed; stopping the pipeline"),
        }
        self.records[index] = Some(record);
        outcome
    }
}
