use toolkit_operations::traits::ProgressSink;

/// Prints each phase boundary of a publish as a percentage line.
pub(crate) struct TerminalProgress;

impl ProgressSink for TerminalProgress {
    fn report(&self, stage: &str, percent: u8) {
        println!("[{percent:>3}%] {stage}");
    }
}
