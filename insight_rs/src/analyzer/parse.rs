//! Parser adapter: source type selection, OXC parsing and offset lookup.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};

use crate::error::InsightError;
use crate::types::{Language, SourcePosition, SourceRange};

/// How a file is parsed, decided from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceKind {
    pub language: Language,
    pub jsx: bool,
}

impl SourceKind {
    pub(crate) fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            // Plain TS keeps JSX off so `<T>(x) => x` stays a generic arrow
            Some("ts") | Some("mts") | Some("cts") => Self {
                language: Language::Typescript,
                jsx: false,
            },
            Some("tsx") => Self {
                language: Language::Typescript,
                jsx: true,
            },
            _ => Self {
                language: Language::Javascript,
                jsx: true,
            },
        }
    }

    fn source_type(self) -> SourceType {
        if self.jsx {
            SourceType::tsx()
        } else {
            SourceType::ts()
        }
    }
}

/// Byte offset -> line/column lookup.
#[derive(Debug)]
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: text.len(),
        }
    }

    pub(crate) fn position(&self, offset: usize) -> SourcePosition {
        let offset = offset.min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        SourcePosition {
            line: line_idx + 1,
            column: offset - self.line_starts[line_idx] + 1,
            offset,
        }
    }

    pub(crate) fn range(&self, span: Span) -> SourceRange {
        SourceRange {
            start: self.position(span.start as usize),
            end: self.position(span.end as usize),
        }
    }
}

/// Parse `source` as a module. Any diagnostic fails the whole analysis.
pub(crate) fn parse_program<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    path: &Path,
    kind: SourceKind,
    lines: &LineIndex,
) -> Result<Program<'a>, InsightError> {
    let ret = Parser::new(allocator, source, kind.source_type()).parse();

    if let Some(err) = ret.errors.first() {
        let offset = err
            .labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map(|label| label.offset())
            .unwrap_or(0);
        let pos = lines.position(offset);
        return Err(InsightError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
            line: pos.line,
            column: pos.column,
        });
    }
    if ret.panicked {
        return Err(InsightError::Parse {
            path: path.to_path_buf(),
            message: "parser aborted".to_string(),
            line: 1,
            column: 1,
        });
    }

    Ok(ret.program)
}
