//! Frame-by-frame reports for failed template runs.
//!
//! A [`Diagnostic`] is built from the typed [`tera::Error`] chain, outermost
//! link first, and printed as:
//!
//! ```text
//!   File /abs/bindings.pyx.tera, line , in render
//!     
//!   File /abs/bindings.pyx.tera, line 3, in render
//!     {{ SCANNER }}
//! UndefinedError: Variable `SCANNER` not found in context while rendering '/abs/bindings.pyx.tera'
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::process::ExitCode;

use tera::ErrorKind;

/// Exit status of a run that ended in a [`Diagnostic`].
pub const EXIT_STATUS: u8 = 1;

/// Which engine step raised the failure; printed as the frame scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Render,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Render => "render",
        }
    }
}

/// Terminal classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Syntax,
    UndefinedName,
    Filter,
    Function,
    Test,
    Runtime,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Syntax        => "SyntaxError",
            FaultKind::UndefinedName => "UndefinedError",
            FaultKind::Filter        => "FilterError",
            FaultKind::Function      => "FunctionError",
            FaultKind::Test          => "TestError",
            FaultKind::Runtime       => "RuntimeError",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One level of the failure, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub source_file: String,
    pub line_number: Option<usize>,
    pub scope_name: String,
    pub source_line: String,
}

/// Structured report of a failed parse or render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub frames: Vec<Frame>,
    pub kind: FaultKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(frames: Vec<Frame>, kind: FaultKind, message: impl Into<String>) -> Self {
        Diagnostic { frames, kind, message: message.into() }
    }

    /// Build a report from a Tera failure raised while handling `template`,
    /// which was loaded from `source_file`.
    pub fn from_tera(err: &tera::Error, stage: Stage, source_file: &str, template: &str) -> Self {
        let chain = error_chain(err);

        let frames = chain
            .iter()
            .map(|link| {
                let line_number = locate(&link.to_string(), template);
                let source_line = line_number
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|idx| template.lines().nth(idx))
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string();
                Frame {
                    source_file: source_file.to_string(),
                    line_number,
                    scope_name: stage.as_str().to_string(),
                    source_line,
                }
            })
            .collect();

        let innermost = chain.last().map(|link| link.to_string()).unwrap_or_default();
        Diagnostic {
            frames,
            kind: classify(&chain, stage),
            message: summary_line(&innermost),
        }
    }

    /// The closing `<kind>: <message>` line.
    pub fn final_line(&self) -> String {
        format!("{}: {}", self.kind, self.message)
    }

    /// Write the full report, one line per `\n`.
    pub fn write_report(&self, out: &mut impl io::Write) -> io::Result<()> {
        write!(out, "{self}")
    }

    /// Always [`EXIT_STATUS`].
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(EXIT_STATUS)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            let line = frame.line_number.map(|n| n.to_string()).unwrap_or_default();
            writeln!(
                f,
                "  File {}, line {}, in {}",
                frame.source_file, line, frame.scope_name
            )?;
            writeln!(f, "    {}", frame.source_line)?;
        }
        writeln!(f, "{}", self.final_line())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn error_chain(err: &tera::Error) -> Vec<&(dyn StdError + 'static)> {
    let mut chain: Vec<&(dyn StdError + 'static)> = vec![err as &(dyn StdError + 'static)];
    let mut current = err.source();
    while let Some(link) = current {
        chain.push(link);
        current = link.source();
    }
    chain
}

fn classify(chain: &[&(dyn StdError + 'static)], stage: Stage) -> FaultKind {
    if stage == Stage::Parse {
        return FaultKind::Syntax;
    }
    for link in chain {
        let Some(err) = link.downcast_ref::<tera::Error>() else { continue };
        match &err.kind {
            ErrorKind::CallFilter(_) | ErrorKind::FilterNotFound(_) => return FaultKind::Filter,
            ErrorKind::CallFunction(_) | ErrorKind::FunctionNotFound(_) => return FaultKind::Function,
            ErrorKind::CallTest(_) | ErrorKind::TestNotFound(_) => return FaultKind::Test,
            _ => {}
        }
    }
    let undefined = chain
        .last()
        .map(|link| link.to_string().contains("not found in context"))
        .unwrap_or(false);
    if undefined {
        FaultKind::UndefinedName
    } else {
        FaultKind::Runtime
    }
}

/// Pest errors span several lines; the `= expected ...` tail carries the point.
fn summary_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(|line| line.strip_prefix("= ").unwrap_or(line))
        .unwrap_or_default()
        .to_string()
}

fn locate(message: &str, template: &str) -> Option<usize> {
    pest_line(message).or_else(|| {
        let name = backquoted(message)?;
        find_line(template, name).or_else(|| {
            let root = name.split(['.', '[']).next()?;
            find_line(template, root)
        })
    })
}

/// Parses the `--> line:col` marker of a pest error.
fn pest_line(message: &str) -> Option<usize> {
    let rest = &message[message.find("--> ")? + 4..];
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn backquoted(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(&message[start..start + len]).filter(|name| !name.is_empty())
}

/// First 1-based line where `name` appears as a whole identifier.
fn find_line(template: &str, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    template
        .lines()
        .position(|line| contains_identifier(line, name))
        .map(|idx| idx + 1)
}

fn contains_identifier(line: &str, name: &str) -> bool {
    line.match_indices(name).any(|(at, _)| {
        let before = line[..at].chars().next_back();
        let after = line[at + name.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
