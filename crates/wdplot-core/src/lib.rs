#![forbid(unsafe_code)]

//! Weighted digraph text format parser (headless).
//!
//! The format is line oriented:
//!
//! ```text
//! <numVertices>
//! <numEdges>
//! <from> <to> <weight>     (repeated numEdges times)
//! ```
//!
//! Parsing reads exactly the declared number of edge lines and ignores anything after them.
//! Every index in `[0, numVertices)` becomes a vertex, including ones no edge touches.

pub mod error;
pub mod parse;

pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use parse::{load_digraph, parse_digraph, read_digraph};
pub use wdplot_graph::{Digraph, Edge, EdgeKey, VertexId, alg, format_weight};

/// What to do with an edge endpoint that is not below the declared vertex count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndpointPolicy {
    /// Fail with [`ParseErrorKind::VertexOutOfRange`].
    #[default]
    Reject,
    /// Keep the edge; the endpoint becomes an extra vertex beyond the declared range.
    Absorb,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub endpoint_policy: EndpointPolicy,
}

impl ParseOptions {
    /// Strict parsing: out-of-range endpoints are errors.
    pub fn strict() -> Self {
        Self {
            endpoint_policy: EndpointPolicy::Reject,
        }
    }

    /// Lenient parsing: out-of-range endpoints silently add vertices.
    pub fn lenient() -> Self {
        Self {
            endpoint_policy: EndpointPolicy::Absorb,
        }
    }
}
