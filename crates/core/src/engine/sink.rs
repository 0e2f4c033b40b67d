//! Status line outputs.
//!
//! A [`StatusSink`] owns one live line: [`write`](StatusSink::write)
//! replaces its content and [`persist`](StatusSink::persist) commits it so
//! the next write starts a fresh line.

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use std::io::{IsTerminal, Write};
use std::sync::{Mutex, MutexGuard};

/// A line-based live output surface.
///
/// Implementations must tolerate being called from the ticker task and
/// from the series concurrently.
pub trait StatusSink: Send + Sync {
    /// Replace the content of the live line.
    fn write(&self, line: &str);

    /// Keep the live line as it is and move to a new one.
    fn persist(&self);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Sink writing to the process's stdout or stderr.
///
/// On a terminal every write redraws the current line in place. When the
/// stream is redirected only persisted lines are printed, so logs and
/// pipes never see spinner frames.
pub struct TerminalSink {
    stream: Stream,
    interactive: bool,
    current: Mutex<String>,
}

impl TerminalSink {
    /// Create a sink for stdout, detecting whether it is a terminal.
    pub fn stdout() -> Self {
        Self::new(Stream::Stdout, std::io::stdout().is_terminal())
    }

    /// Create a sink for stderr, keeping stdout free for machine output.
    pub fn stderr() -> Self {
        Self::new(Stream::Stderr, std::io::stderr().is_terminal())
    }

    fn new(stream: Stream, interactive: bool) -> Self {
        Self {
            stream,
            interactive,
            current: Mutex::new(String::new()),
        }
    }

    fn redraw(&self, line: &str) -> std::io::Result<()> {
        match self.stream {
            Stream::Stdout => redraw_to(&mut std::io::stdout().lock(), line),
            Stream::Stderr => redraw_to(&mut std::io::stderr().lock(), line),
        }
    }

    fn print_line(&self, line: &str) -> std::io::Result<()> {
        match self.stream {
            Stream::Stdout => print_to(&mut std::io::stdout().lock(), line),
            Stream::Stderr => print_to(&mut std::io::stderr().lock(), line),
        }
    }
}

fn redraw_to<W: Write>(out: &mut W, line: &str) -> std::io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(line))?;
    out.flush()
}

fn print_to<W: Write>(out: &mut W, line: &str) -> std::io::Result<()> {
    writeln!(out, "{line}")?;
    out.flush()
}

impl StatusSink for TerminalSink {
    fn write(&self, line: &str) {
        let mut current = lock(&self.current);
        current.clear();
        current.push_str(line);

        if self.interactive {
            if let Err(e) = self.redraw(line) {
                tracing::debug!("status line redraw failed: {}", e);
            }
        }
    }

    fn persist(&self) {
        let line = std::mem::take(&mut *lock(&self.current));

        let result = if self.interactive {
            self.redraw(&line).and_then(|()| self.print_line(""))
        } else {
            self.print_line(&line)
        };

        if let Err(e) = result {
            tracing::debug!("status line persist failed: {}", e);
        }
    }
}

#[derive(Debug, Default)]
struct Recording {
    current: String,
    writes: Vec<String>,
    persisted: Vec<String>,
}

/// In-memory sink that records every write and every persisted line.
#[derive(Debug, Default)]
pub struct RecordingSink {
    inner: Mutex<Recording>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line passed to [`StatusSink::write`], in order.
    pub fn writes(&self) -> Vec<String> {
        lock(&self.inner).writes.clone()
    }

    /// Every line that was committed with [`StatusSink::persist`], in order.
    pub fn persisted(&self) -> Vec<String> {
        lock(&self.inner).persisted.clone()
    }

    /// Content of the live line.
    pub fn current(&self) -> String {
        lock(&self.inner).current.clone()
    }
}

impl StatusSink for RecordingSink {
    fn write(&self, line: &str) {
        let mut inner = lock(&self.inner);
        inner.current = line.to_string();
        inner.writes.push(line.to_string());
    }

    fn persist(&self) {
        let mut inner = lock(&self.inner);
        let line = std::mem::take(&mut inner.current);
        inner.persisted.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_tracks_live_and_persisted_lines() {
        let sink = RecordingSink::new();

        sink.write("frame 1");
        sink.write("frame 2");
        assert_eq!(sink.current(), "frame 2");
        assert!(sink.persisted().is_empty());

        sink.persist();
        assert_eq!(sink.persisted(), vec!["frame 2"]);
        assert_eq!(sink.current(), "");
        assert_eq!(sink.writes(), vec!["frame 1", "frame 2"]);
    }

    #[test]
    fn test_non_interactive_terminal_sink_keeps_current_line() {
        let sink = TerminalSink::new(Stream::Stdout, false);

        sink.write("pending");
        assert_eq!(*lock(&sink.current), "pending");

        sink.persist();
        assert!(lock(&sink.current).is_empty());
    }
}
