//! Debug trace — an append-only buffer flushed at most once per run.
//!
//! The buffer is a scoped resource: acquired empty at run start, appended to
//! freely, and released exactly once at run end. Nothing leaves the buffer
//! incrementally; the email body only materializes at [`TraceBuffer::flush`],
//! and only when the buffer was created with debugging enabled. Line order is
//! append order (FIFO).

use crate::time::now;

/// Append-only trace buffer for a single run.
#[derive(Debug)]
pub struct TraceBuffer {
    enabled: bool,
    lines: Vec<String>,
}

impl TraceBuffer {
    /// Create an empty buffer. `enabled` is resolved at configuration time,
    /// never from the inbound event.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            lines: Vec::new(),
        }
    }

    /// Append a line, prefixed with the current UTC timestamp.
    ///
    /// Lines are recorded even when debugging is disabled so callers never
    /// have to branch; a disabled buffer simply flushes to nothing.
    pub fn append(&mut self, line: impl AsRef<str>) {
        let ts = now().format("%Y-%m-%d %H:%M:%S UTC");
        self.lines.push(format!("[{ts}] {}", line.as_ref()));
    }

    /// Whether the buffer will produce a body on flush.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The lines appended so far, in append order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the buffer and produce the email body as an HTML fragment.
    ///
    /// Returns `None` when debugging is disabled; the caller then marks the
    /// email step suppressed. Consuming `self` is what makes "at most once"
    /// hold — there is no buffer left to flush again.
    #[must_use]
    pub fn flush(self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        Some(self.lines.join("<br>\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_flush_lines_in_append_order() {
        let mut trace = TraceBuffer::new(true);
        trace.append("first");
        trace.append("second");
        trace.append("third");

        let body = trace.flush().unwrap();
        let first = body.find("first").unwrap();
        let second = body.find("second").unwrap();
        let third = body.find("third").unwrap();
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn should_flush_to_none_when_disabled() {
        let mut trace = TraceBuffer::new(false);
        trace.append("never seen");
        assert!(trace.flush().is_none());
    }

    #[test]
    fn should_record_lines_even_when_disabled() {
        let mut trace = TraceBuffer::new(false);
        trace.append("recorded");
        assert_eq!(trace.lines().len(), 1);
        assert!(trace.lines()[0].ends_with("recorded"));
    }

    #[test]
    fn should_join_lines_with_html_breaks() {
        let mut trace = TraceBuffer::new(true);
        trace.append("a");
        trace.append("b");
        assert!(trace.flush().unwrap().contains("<br>\n"));
    }

    #[test]
    fn should_prefix_lines_with_timestamp() {
        let mut trace = TraceBuffer::new(true);
        trace.append("hello");
        assert!(trace.lines()[0].starts_with('['));
        assert!(trace.lines()[0].contains("UTC] hello"));
    }

    #[test]
    fn should_flush_empty_buffer_to_empty_body() {
        let trace = TraceBuffer::new(true);
        assert_eq!(trace.flush().unwrap(), "");
    }
}
