use crate::error::{Error, ParseError, ParseErrorKind, Result};
use crate::{EndpointPolicy, ParseOptions};
use std::io::{BufRead, BufReader};
use std::path::Path;
use wdplot_graph::{Digraph, VertexId};

/// Parses a digraph from an in-memory string.
pub fn parse_digraph(text: &str, options: ParseOptions) -> Result<Digraph> {
    read_digraph(text.as_bytes(), options)
}

/// Opens `path` and parses it. The file handle is released before this returns.
pub fn load_digraph(path: impl AsRef<Path>, options: ParseOptions) -> Result<Digraph> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading digraph file");
    read_digraph(BufReader::new(file), options)
}

/// Parses a digraph from a buffered stream, consuming only the declared lines.
pub fn read_digraph<R: BufRead>(reader: R, options: ParseOptions) -> Result<Digraph> {
    let mut lines = Lines::new(reader);

    let num_vertices = parse_count(&mut lines, "vertex count")?;
    let num_edges = parse_count(&mut lines, "edge count")?;

    let mut graph = Digraph::new();
    for i in 0..num_edges {
        let Some((line, text)) = lines.next_line()? else {
            return Err(ParseError::new(
                ParseErrorKind::TruncatedInput,
                lines.line_no + 1,
                format!(
                    "expected edge line {} of {num_edges}, found end of input",
                    i + 1
                ),
            )
            .into());
        };
        let (from, to, weight) = parse_edge_line(text, line)?;
        if options.endpoint_policy == EndpointPolicy::Reject {
            for v in [from, to] {
                if v >= num_vertices {
                    return Err(ParseError::new(
                        ParseErrorKind::VertexOutOfRange,
                        line,
                        format!("vertex {v} is not below the declared vertex count {num_vertices}"),
                    )
                    .into());
                }
            }
        }
        if graph.add_edge(from, to, weight).is_some() {
            tracing::debug!(
                line,
                from,
                to,
                weight,
                "duplicate arc replaces earlier weight"
            );
        }
    }

    for v in 0..num_vertices {
        graph.add_vertex(v);
    }

    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "parsed digraph"
    );
    if graph.vertex_count() == 0 || graph.edge_count() == 0 {
        tracing::warn!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "degenerate digraph input"
        );
    }

    Ok(graph)
}

struct Lines<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Next line (1-based number, text without its terminator), or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<(usize, &str)>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let text = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
        let text = text.strip_suffix('\r').unwrap_or(text);
        Ok(Some((self.line_no, text)))
    }
}

fn parse_count<R: BufRead>(lines: &mut Lines<R>, what: &str) -> Result<usize> {
    let Some((line, text)) = lines.next_line()? else {
        return Err(ParseError::new(
            ParseErrorKind::TruncatedInput,
            lines.line_no + 1,
            format!("expected {what}, found end of input"),
        )
        .into());
    };
    let raw = text.trim();
    let malformed = || {
        ParseError::new(
            ParseErrorKind::MalformedHeader,
            line,
            format!("expected {what} as a non-negative integer, found {raw:?}"),
        )
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed().into());
    }
    raw.parse::<usize>().map_err(|_| malformed().into())
}

fn parse_edge_line(text: &str, line: usize) -> Result<(VertexId, VertexId, f64)> {
    let malformed = |message: String| -> Error {
        ParseError::new(ParseErrorKind::MalformedEdgeLine, line, message).into()
    };

    let fields: Vec<&str> = text.split(' ').collect();
    if fields.len() < 3 {
        return Err(malformed(format!(
            "expected `<from> <to> <weight>`, found {} field(s) in {text:?}",
            fields.len()
        )));
    }

    let from = parse_vertex(fields[0]).map_err(|why| malformed(format!("source vertex {why}")))?;
    let to = parse_vertex(fields[1]).map_err(|why| malformed(format!("target vertex {why}")))?;

    let raw_weight = fields[2].trim();
    let weight = match raw_weight.parse::<f64>() {
        Ok(w) if w.is_finite() => w,
        Ok(_) => return Err(malformed(format!("weight {raw_weight:?} is not finite"))),
        Err(_) => {
            return Err(malformed(format!(
                "weight {raw_weight:?} is not a floating-point number"
            )));
        }
    };

    Ok((from, to, weight))
}

fn parse_vertex(field: &str) -> std::result::Result<VertexId, String> {
    let raw = field.trim();
    let value = raw
        .parse::<i64>()
        .map_err(|_| format!("{raw:?} is not an integer"))?;
    VertexId::try_from(value).map_err(|_| format!("{raw:?} is negative"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_line_ignores_extra_fields() {
        let (from, to, w) = parse_edge_line("0 1 2.5 trailing", 3).unwrap();
        assert_eq!((from, to, w), (0, 1, 2.5));
    }

    #[test]
    fn edge_line_rejects_double_space() {
        let err = parse_edge_line("0  1 2.5", 3).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::MalformedEdgeLine));
    }

    #[test]
    fn vertex_accepts_explicit_plus_sign() {
        assert_eq!(parse_vertex("+4"), Ok(4));
        assert!(parse_vertex("-1").unwrap_err().contains("negative"));
        assert!(parse_vertex("1.5").unwrap_err().contains("not an integer"));
    }

    #[test]
    fn lines_strip_crlf() {
        let mut lines = Lines::new("a\r\nb\n".as_bytes());
        assert_eq!(lines.next_line().unwrap(), Some((1, "a")));
        assert_eq!(lines.next_line().unwrap(), Some((2, "b")));
        assert_eq!(lines.next_line().unwrap(), None);
        assert_eq!(lines.line_no, 2);
    }
}
