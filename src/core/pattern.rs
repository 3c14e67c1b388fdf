//! Line format for log entries
//!
//! A format string mixes literal text with `%(field)s` placeholders:
//!
//! - `%(asctime)s`: timestamp, rendered with the configured [`TimestampFormat`]
//! - `%(msecs)d`: millisecond part of the timestamp
//! - `%(created)f` / `%(relativeCreated)d`: seconds since the epoch /
//!   milliseconds since logging started
//! - `%(name)s`: logger name
//! - `%(levelname)s` / `%(levelno)d`: level name / numeric level
//! - `%(message)s`: the message
//! - `%(thread)s` / `%(threadName)s`: thread id / thread name
//! - `%(process)d` / `%(processName)s`: process id / executable name
//!
//! A placeholder is `%(field)[flags][width][.precision]conversion`. Flags are
//! `-` (left align) and `0` (zero padding, numbers only); conversions are
//! `s`, `d`/`i` and `f`, the last two only for numeric fields. `%%`
//! produces a literal percent sign.
//!
//! Formats are compiled once; unknown fields are rejected up front.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use std::iter::Peekable;
use std::str::CharIndices;

/// Default line layout: `timestamp - logger_name - level - message`
pub const DEFAULT_FORMAT: &str = "%(asctime)s - %(name)s - %(levelname)s - %(message)s";

/// Largest accepted width or precision
pub const MAX_FIELD_WIDTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Asctime,
    Msecs,
    Created,
    RelativeCreated,
    Name,
    LevelName,
    LevelNo,
    Message,
    Thread,
    ThreadName,
    Process,
    ProcessName,
}

impl Field {
    fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "asctime" => Field::Asctime,
            "msecs" => Field::Msecs,
            "created" => Field::Created,
            "relativeCreated" => Field::RelativeCreated,
            "name" => Field::Name,
            "levelname" => Field::LevelName,
            "levelno" => Field::LevelNo,
            "message" => Field::Message,
            "thread" => Field::Thread,
            "threadName" => Field::ThreadName,
            "process" => Field::Process,
            "processName" => Field::ProcessName,
            _ => return None,
        })
    }

    fn is_numeric(self) -> bool {
        matches!(
            self,
            Field::Msecs
                | Field::Created
                | Field::RelativeCreated
                | Field::LevelNo
                | Field::Process
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Str,
    Int,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spec {
    conversion: Conversion,
    width: usize,
    precision: Option<usize>,
    left_align: bool,
    zero_pad: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { field: Field, spec: Spec },
}

enum Value {
    Text(String),
    Int(i64),
    Float(f64),
}

/// A compiled line format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFormat {
    source: String,
    segments: Vec<Segment>,
    timestamp_format: TimestampFormat,
}

impl LogFormat {
    /// Compile a format string
    ///
    /// # Examples
    ///
    /// ```
    /// use supermarket_sales_logging::LogFormat;
    ///
    /// let format = LogFormat::parse("%(levelname)s:%(name)s:%(message)s").unwrap();
    /// assert!(LogFormat::parse("%(asctime)s.%(msecs)03d %(message)s").is_ok());
    /// assert!(LogFormat::parse("%(user)s").is_err());
    /// # let _ = format;
    /// ```
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.peek() {
                Some((_, '%')) => {
                    chars.next();
                    literal.push('%');
                }
                Some((_, '(')) => {
                    chars.next();
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == ')' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(LoggerError::invalid_format(
                            pattern,
                            format!("unterminated placeholder at byte {}", start),
                        ));
                    }
                    let field = Field::lookup(&name).ok_or_else(|| {
                        LoggerError::invalid_format(pattern, format!("unknown field '{}'", name))
                    })?;
                    let spec = parse_spec(pattern, &name, field, &mut chars)?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field { field, spec });
                }
                _ => literal.push('%'),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Set how `%(asctime)s` is rendered
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// The format string this was compiled from
    pub fn pattern(&self) -> &str {
        &self.source
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Whether the format contains `%(levelname)s`
    pub fn has_level_name(&self) -> bool {
        self.segments.iter().any(|s| {
            matches!(
                s,
                Segment::Field {
                    field: Field::LevelName,
                    ..
                }
            )
        })
    }

    /// Render an entry as one line (without trailing newline)
    pub fn format(&self, entry: &LogEntry) -> String {
        self.format_with(entry, |level| level.to_string())
    }

    /// Render an entry, letting the caller decorate the level name (e.g. with colors)
    pub fn format_with<F>(&self, entry: &LogEntry, level_name: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = String::with_capacity(entry.message.len() + 64);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { field, spec } => {
                    let value = match field {
                        Field::Asctime => Value::Text(self.timestamp_format.format(&entry.timestamp)),
                        Field::Msecs => Value::Float(entry.msecs()),
                        Field::Created => Value::Float(entry.created()),
                        Field::RelativeCreated => Value::Float(entry.relative_created()),
                        Field::Name => Value::Text(entry.logger.clone()),
                        Field::LevelName => {
                            // Pad before decorating so escape codes don't count toward width
                            let padded = spec.render(Value::Text(entry.level.to_string()));
                            out.push_str(&level_name(&padded));
                            continue;
                        }
                        Field::LevelNo => Value::Int(i64::from(entry.level.number())),
                        Field::Message => Value::Text(entry.message.clone()),
                        Field::Thread => Value::Text(entry.thread_id.clone()),
                        Field::ThreadName => Value::Text(entry.thread_label().to_string()),
                        Field::Process => Value::Int(i64::from(entry.process_id)),
                        Field::ProcessName => Value::Text(entry.process_name().to_string()),
                    };
                    out.push_str(&spec.render(value));
                }
            }
        }
        out
    }
}

fn parse_spec(
    pattern: &str,
    name: &str,
    field: Field,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<Spec> {
    let mut left_align = false;
    let mut zero_pad = false;
    while let Some((_, flag @ ('-' | '0'))) = chars.peek().copied() {
        if flag == '-' {
            left_align = true;
        } else {
            zero_pad = true;
        }
        chars.next();
    }

    let width = parse_number(pattern, name, chars)?.unwrap_or(0);
    let precision = if matches!(chars.peek(), Some((_, '.'))) {
        chars.next();
        Some(parse_number(pattern, name, chars)?.unwrap_or(0))
    } else {
        None
    };

    let conversion = match chars.next().map(|(_, c)| c) {
        Some('s') => Conversion::Str,
        Some('d') | Some('i') => Conversion::Int,
        Some('f') => Conversion::Float,
        other => {
            return Err(LoggerError::invalid_format(
                pattern,
                format!(
                    "expected conversion 's', 'd' or 'f' after '%({})', found {:?}",
                    name, other
                ),
            ))
        }
    };
    if conversion != Conversion::Str && !field.is_numeric() {
        return Err(LoggerError::invalid_format(
            pattern,
            format!("field '{}' is not numeric", name),
        ));
    }

    Ok(Spec {
        conversion,
        width,
        precision,
        left_align,
        zero_pad,
    })
}

/// Read a run of decimal digits, bounded by [`MAX_FIELD_WIDTH`]
fn parse_number(
    pattern: &str,
    name: &str,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<Option<usize>> {
    let mut number: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|(_, c)| c.to_digit(10)) {
        chars.next();
        let next = number
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit as usize))
            .filter(|n| *n <= MAX_FIELD_WIDTH)
            .ok_or_else(|| {
                LoggerError::invalid_format(
                    pattern,
                    format!(
                        "width or precision of '%({})' exceeds {}",
                        name, MAX_FIELD_WIDTH
                    ),
                )
            })?;
        number = Some(next);
    }
    Ok(number)
}

impl Spec {
    fn render(&self, value: Value) -> String {
        let text = match (self.conversion, value) {
            (Conversion::Float, Value::Int(n)) => self.float(n as f64),
            (Conversion::Float, Value::Float(x)) => self.float(x),
            (Conversion::Int, Value::Int(n)) => self.int(n),
            (Conversion::Int, Value::Float(x)) => self.int(x.trunc() as i64),
            (Conversion::Str, Value::Int(n)) => self.truncate(n.to_string()),
            (Conversion::Str, Value::Float(x)) => self.truncate(format!("{:?}", x)),
            (_, Value::Text(text)) => self.truncate(text),
        };

        let width = self.width;
        if self.left_align {
            format!("{:<width$}", text)
        } else if self.zero_pad && self.conversion != Conversion::Str {
            zero_fill(&text, width)
        } else {
            format!("{:>width$}", text)
        }
    }

    fn float(&self, x: f64) -> String {
        format!("{:.*}", self.precision.unwrap_or(6), x)
    }

    /// Precision on an integer is a minimum digit count
    fn int(&self, n: i64) -> String {
        match self.precision {
            Some(digits) => zero_fill(&n.to_string(), digits + usize::from(n < 0)),
            None => n.to_string(),
        }
    }

    /// Precision on a string is a maximum length
    fn truncate(&self, text: String) -> String {
        match self.precision {
            Some(max) if text.chars().count() > max => text.chars().take(max).collect(),
            _ => text,
        }
    }
}

/// Pad with zeros after any sign
fn zero_fill(number: &str, width: usize) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let width = width.saturating_sub(sign.len());
    format!("{}{:0>width$}", sign, digits)
}

impl Default for LogFormat {
    fn default() -> Self {
        // The default pattern always compiles
        Self::parse(DEFAULT_FORMAT).unwrap_or_else(|_| Self {
            source: DEFAULT_FORMAT.to_string(),
            segments: Vec::new(),
            timestamp_format: TimestampFormat::default(),
        })
    }
}
