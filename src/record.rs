use std::time::Instant;

use chrono::{DateTime, Local};

/// A step that has been started but not yet finished.
///
/// Holds the wall-clock start for reporting and a monotonic clock for the
/// elapsed measurement. Consumed by [`StepTimer::finish`], so a started step
/// can only ever become a finalized [`StepRecord`]; together with the
/// runner's `Option<StepRecord>` slots this gives each step exactly three
/// states: never attempted, in flight, finalized.
#[derive(Debug)]
pub(crate) struct StepTimer {
    started_at: DateTime<Local>,
    clock: Instant,
}

impl StepTimer {
    pub(crate) fn start() -> Self {
        Self {
            started_at: Local::now(),
            clock: Instant::now(),
        }
    }

    /// Finalize the step. End time and elapsed minutes are captured here, on
    /// failed steps the same as on successful ones.
    pub(crate) fn finish(self, succeeded: bool) -> StepRecord {
        StepRecord {
            started_at: self.started_at,
            finished_at: Local::now(),
            elapsed_minutes: self.clock.elapsed().as_secs_f64() / 60.0,
            succeeded,
        }
    }
}

/// Finalized bookkeeping for one executed step.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Wall-clock time immediately before the interpreter was invoked.
    pub started_at: DateTime<Local>,
    /// Wall-clock time immediately after the invocation returned.
    pub finished_at: DateTime<Local>,
    /// Minutes between start and finish, measured on a monotonic clock.
    pub elapsed_minutes: f64,
    /// False when the invocation itself failed (or, under the strict exit
    /// policy, when the child exited non-zero).
    pub succeeded: bool,
}
