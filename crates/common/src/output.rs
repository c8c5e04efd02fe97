//! Output sinks for listings and directory renderings.
//!
//! Listings write plain-text lines to an [`OutputSink`]. The lines are
//! diagnostic; operations return their results independently of them.

use std::io::Write;
use std::sync::Mutex;

/// Destination for plain-text output lines.
pub trait OutputSink: Send + Sync {
    /// Called once per emitted line, without a trailing newline.
    ///
    /// # Arguments
    /// * `line` - The line to emit
    fn emit_line(&self, line: &str);
}

/// A sink that discards every line.
pub struct NoOpSink;

impl OutputSink for NoOpSink {
    fn emit_line(&self, _line: &str) {}
}

/// A sink that writes lines to standard output.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit_line(&self, line: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // Output is diagnostic; a closed stdout is not an error for the caller.
        let _ = writeln!(handle, "{}", line);
    }
}

/// A sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines emitted so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl OutputSink for MemorySink {
    fn emit_line(&self, line: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
    }
}

/// A sink that wraps a closure.
pub struct FnSink<F> {
    callback: F,
}

impl<F> FnSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    /// Create a new closure-based sink.
    ///
    /// # Arguments
    /// * `callback` - Closure that receives each line
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> OutputSink for FnSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn emit_line(&self, line: &str) {
        (self.callback)(line)
    }
}

/// Create an output sink from a closure.
///
/// # Arguments
/// * `f` - Closure that receives each line
///
/// # Returns
/// A `FnSink` wrapper implementing `OutputSink`.
pub fn sink_fn<F>(f: F) -> FnSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    FnSink::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_noop_sink_accepts_lines() {
        let sink: NoOpSink = NoOpSink;
        sink.emit_line("ignored");
    }

    #[test]
    fn test_memory_sink_preserves_order() {
        let sink: MemorySink = MemorySink::new();
        sink.emit_line("first");
        sink.emit_line("second");
        assert_eq!(sink.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_fn_sink_captures_state() {
        let counter: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let counter_clone: Arc<AtomicUsize> = counter.clone();

        let sink = sink_fn(move |line: &str| {
            counter_clone.fetch_add(line.len(), Ordering::SeqCst);
        });

        sink.emit_line("abc");
        sink.emit_line("de");

        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_sink_as_trait_object() {
        let memory: MemorySink = MemorySink::new();
        let sink: &dyn OutputSink = &memory;
        sink.emit_line("\tdocs/a.txt");
        assert_eq!(memory.lines(), vec!["\tdocs/a.txt"]);
    }
}
