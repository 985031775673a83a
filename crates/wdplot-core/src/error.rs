use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read digraph file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading digraph: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// The parse failure subkind, if this is a parse failure.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Error::Parse(err) => Some(err.kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A vertex/edge count line is present but is not a non-negative decimal integer.
    MalformedHeader,
    /// An edge line lacks three well-formed space-separated fields.
    MalformedEdgeLine,
    /// Input ended before every declared line was read.
    TruncatedInput,
    /// An edge endpoint is not below the declared vertex count (strict endpoint policy).
    VertexOutOfRange,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseErrorKind::MalformedHeader => "malformed header",
            ParseErrorKind::MalformedEdgeLine => "malformed edge line",
            ParseErrorKind::TruncatedInput => "truncated input",
            ParseErrorKind::VertexOutOfRange => "vertex out of range",
        })
    }
}

/// A parse failure pinned to a 1-based input line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }
}
