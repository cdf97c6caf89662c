//! InsightVisitor struct and helper methods for AST traversal.
//!
//! This module contains the core visitor structure plus the bookkeeping the
//! classifiers share: the enclosing-component stack, span helpers and the
//! declaration spans later used for usage lookup.

use std::collections::HashSet;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use oxc_span::Span;
use tracing::warn;

use crate::config::AnalysisConfig;
use crate::types::{FileInsight, InsightWarning, SourceRange, WarningKind};

use super::parse::{LineIndex, SourceKind};

/// Visitor for traversing JS/TS AST and collecting insight data.
pub(super) struct InsightVisitor<'a> {
    pub insight: FileInsight,
    pub source_text: &'a str,
    pub lines: &'a LineIndex,
    pub config: &'a AnalysisConfig,
    /// Enclosing component names, innermost last.
    pub component_stack: Vec<String>,
    pub dependencies: IndexSet<String>,
    /// `(start, end)` of state-hook calls already handled through their
    /// declarator.
    pub claimed_state_calls: HashSet<(u32, u32)>,
    pub component_sites: IndexMap<String, Span>,
    pub function_sites: IndexMap<String, Span>,
}

impl<'a> InsightVisitor<'a> {
    pub(super) fn new(
        source_text: &'a str,
        path: &Path,
        kind: SourceKind,
        lines: &'a LineIndex,
        config: &'a AnalysisConfig,
    ) -> Self {
        let mut insight = FileInsight::new(
            path.to_string_lossy().into_owned(),
            kind.language,
            kind.jsx,
        );
        insight.loc = source_text.lines().count();
        Self {
            insight,
            source_text,
            lines,
            config,
            component_stack: Vec::new(),
            dependencies: IndexSet::new(),
            claimed_state_calls: HashSet::new(),
            component_sites: IndexMap::new(),
            function_sites: IndexMap::new(),
        }
    }

    /// Verbatim source text covered by `span`.
    pub(super) fn slice(&self, span: Span) -> &'a str {
        let start = (span.start as usize).min(self.source_text.len());
        let end = (span.end as usize).clamp(start, self.source_text.len());
        self.source_text.get(start..end).unwrap_or_default()
    }

    pub(super) fn range(&self, span: Span) -> SourceRange {
        self.lines.range(span)
    }

    pub(super) fn get_line(&self, span: Span) -> usize {
        self.lines.position(span.start as usize).line
    }

    pub(super) fn current_component(&self) -> Option<&str> {
        self.component_stack.last().map(String::as_str)
    }

    pub(super) fn push_warning(&mut self, kind: WarningKind, message: String, span: Span) {
        let range = self.range(span);
        warn!(
            file = %self.insight.file_path,
            line = range.start.line,
            "{message}"
        );
        self.insight.warnings.push(InsightWarning {
            kind,
            message,
            range,
        });
    }

    /// Hand back the report with dependencies flattened in discovery order.
    pub(super) fn finish(mut self) -> (FileInsight, DeclarationSites) {
        self.insight.dependencies = self.dependencies.into_iter().collect();
        (
            self.insight,
            DeclarationSites {
                components: self.component_sites,
                functions: self.function_sites,
            },
        )
    }
}

/// Declaration spans of the final (last-write-wins) component and function
/// entries. Matched against the semantic model to collect usages.
#[derive(Debug, Default)]
pub(crate) struct DeclarationSites {
    pub components: IndexMap<String, Span>,
    pub functions: IndexMap<String, Span>,
}
