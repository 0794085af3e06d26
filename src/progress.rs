// src/progress.rs
/// Stage reporting for a query run. The CLI prints these; tests record them.
pub trait Progress {
    /// Called at the start with the number of stages.
    fn begin(&mut self, _stages: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self, _ok: bool) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
