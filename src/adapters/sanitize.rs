//! Log redaction for patient inputs.
//!
//! Clinical field values (glucose, BMI, encoded categories) must never land
//! in log files. Call sites log field names, not values, but any formatted
//! `field=value`, `"field": value` or `("field", value)` pair that slips
//! through is masked here before it is written.
//!
//! Input is capped per line (see `STROKECHECK_SANITIZE_MAX_BYTES`) so a huge
//! log line cannot stall the writer.

use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::FEATURE_NAMES;

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

const REDACTED: &str = "[REDACTED]";

static FIELD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn max_sanitize_bytes() -> usize {
    std::env::var("STROKECHECK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

/// Matches `name=value`, `name: value`, `"name": value` and the tuple/array
/// form `"name", value` for every feature name plus the form's display labels.
fn field_pattern() -> &'static Regex {
    FIELD_PATTERN.get_or_init(|| {
        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|n| regex::escape(n)).collect();
        names.extend(
            ["age_group", "residence_type", "glucose", "avg_glucose"]
                .iter()
                .map(|n| regex::escape(n)),
        );
        let names = names.join("|");
        let pattern = format!(
            r#"(?i)((?:"(?:{names})"\s*[:=,]|\b(?:{names})\b\s*[:=])\s*)("[^"]*"|[^\s,;}})\]]+)"#
        );
        Regex::new(&pattern).expect("Valid regex")
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Mask clinical field values in a log line.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);
    let mut out = field_pattern()
        .replace_all(prefix, |caps: &regex::Captures<'_>| {
            format!("{}{REDACTED}", &caps[1])
        })
        .into_owned();
    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Whether a string carries an unmasked clinical field value.
#[must_use]
pub fn contains_patient_values(input: &str) -> bool {
    field_pattern()
        .captures_iter(input)
        .any(|caps| !caps[2].starts_with("[REDACTED"))
}

/// A `tracing_subscriber` writer factory that redacts each log line before
/// handing it to the wrapped writer.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        // Keep the newline out of the truncation window.
        let (body, newline) = match bytes.strip_suffix(b"\n") {
            Some(body) => (body, true),
            None => (bytes, false),
        };
        let text = String::from_utf8_lossy(body);
        self.inner.write_all(sanitize(&text).as_bytes())?;
        if newline {
            self.inner.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }

        // A line without newline that keeps growing is flushed in one piece.
        if self.pending.len() > max_sanitize_bytes().saturating_mul(2) {
            let line = std::mem::take(&mut self.pending);
            self.write_sanitized(&line)?;
            self.inner.write_all(b"\n")?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.write_sanitized(&line)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}
