mod progress;

pub(crate) use progress::TerminalProgress;
