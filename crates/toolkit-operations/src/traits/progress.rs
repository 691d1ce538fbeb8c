/// Receives the progress callback invoked at each phase boundary of a
/// publish, regardless of the eventual outcome.
pub trait ProgressSink: Send + Sync {
    fn report(&self, stage: &str, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(&str, u8) + Send + Sync,
{
    fn report(&self, stage: &str, percent: u8) {
        self(stage, percent);
    }
}

/// A sink for callers that do not track progress.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _stage: &str, _percent: u8) {}
}
