//! JSX/TypeScript insight extraction using OXC.
//!
//! One pass over the OXC AST fills a [`FileInsight`]:
//! - Components: `const X = () => ...` declarators, with the hooks, state,
//!   child components and props found inside them
//! - Top-level function declarations
//! - Imports and exports
//!
//! Two extra passes run after the walk: `oxc_semantic` resolves usage sites
//! of the recorded components and functions, and a raw-text scan collects
//! relative import specifiers as absolute paths.
//!
//! # Module Structure
//!
//! - `visitor` - InsightVisitor struct and shared helpers
//! - `components` - component declarators and JSX usage
//! - `hooks` - hook calls and state declarations
//! - `functions` - top-level function declarations
//! - `imports` / `exports` - module boundary declarations
//! - `usages` - semantic reference lookup
//! - [`references`] - raw-text relative import scan
//! - [`value`] - literal value rendering

mod components;
mod exports;
mod functions;
mod hooks;
mod imports;
mod parse;
pub mod references;
mod usages;
pub mod value;
mod visitor;

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::InsightError;
use crate::types::{AnalyzedFile, FileInsight};

use parse::{LineIndex, SourceKind, parse_program};
use visitor::InsightVisitor;

/// Analyze `source` as if it were the file at `path`.
///
/// `path` decides the parser dialect and anchors relative file references;
/// it is not read.
pub fn analyze_source(
    source: &str,
    path: &Path,
    config: &AnalysisConfig,
) -> Result<FileInsight, InsightError> {
    let lines = LineIndex::new(source);
    let kind = SourceKind::from_path(path);
    let allocator = Allocator::default();
    let program = parse_program(&allocator, source, path, kind, &lines)?;

    let mut visitor = InsightVisitor::new(source, path, kind, &lines, config);
    visitor.visit_program(&program);
    let (mut insight, sites) = visitor.finish();

    usages::attach_usages(&program, &lines, &sites, &mut insight);
    insight.file_references = references::resolve_file_references(source, path);

    debug!(
        file = %insight.file_path,
        components = insight.components.len(),
        functions = insight.functions.len(),
        hooks = insight.hooks.len(),
        warnings = insight.warnings.len(),
        "analyzed"
    );
    Ok(insight)
}

/// Read and analyze one file. The returned value carries the text as read.
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<AnalyzedFile, InsightError> {
    let file_content =
        std::fs::read_to_string(path).map_err(|e| InsightError::io(path, e))?;
    let insight = analyze_source(&file_content, path, config)?;
    Ok(AnalyzedFile {
        insight,
        file_content,
    })
}

impl<'a> Visit<'a> for InsightVisitor<'a> {
    fn visit_program(&mut self, program: &Program<'a>) {
        for stmt in &program.body {
            if let Some(func) = functions::top_level_function(stmt) {
                self.handle_function_declaration(func);
            }
        }
        walk::walk_program(self, program);
    }

    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.handle_import_declaration(decl);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        self.handle_export_named_declaration(decl);
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        self.handle_export_default_declaration(decl);
        walk::walk_export_default_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.handle_export_all_declaration(decl);
    }

    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        let component = Self::component_binding(decl);
        match &component {
            Some(name) => self.enter_component(name.clone(), decl),
            None => self.handle_state_declarator(decl),
        }
        walk::walk_variable_declarator(self, decl);
        if component.is_some() {
            self.leave_component();
        }
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        self.handle_hook_call(call);
        walk::walk_call_expression(self, call);
    }

    fn visit_jsx_opening_element(&mut self, elem: &JSXOpeningElement<'a>) {
        self.handle_jsx_opening_element(elem);
        walk::walk_jsx_opening_element(self, elem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, SpecifierKind};
    use std::io::Write;

    const COUNTER: &str = r#"import { useState } from 'react';
import Display from './Display';

const Counter = () => {
  const [count, setCount] = useState(0);
  return <Display value={count} onReset={() => setCount(0)} />;
};

export default Counter;
"#;

    fn analyze(content: &str, path: &str) -> FileInsight {
        analyze_source(content, Path::new(path), &AnalysisConfig::default()).expect("fixture parses")
    }

    #[test]
    fn test_counter_scenario() {
        let insight = analyze(COUNTER, "/app/src/Counter.jsx");

        let react = &insight.imports[0];
        assert_eq!(react.source, "react");
        assert_eq!(react.specifiers[0].kind, SpecifierKind::Named);
        assert_eq!(react.specifiers[0].local_name, "useState");
        assert_eq!(react.specifiers[0].imported_name.as_deref(), Some("useState"));

        let counter = &insight.components["Counter"];
        assert_eq!(counter.state_variables, ["count"]);
        assert_eq!(counter.child_components.iter().collect::<Vec<_>>(), ["Display"]);
        assert_eq!(counter.hooks, ["useState"]);

        let count = &insight.state_variables["count"];
        assert_eq!(count.initial_value, "0");
        assert_eq!(count.setter_name, "setCount");
        assert_eq!(count.component.as_deref(), Some("Counter"));

        assert!(insight.props["value"].components.contains("Counter"));
        assert_eq!(insight.props["value"].value.as_deref(), Some("count"));
        assert_eq!(
            insight.props["onReset"].value.as_deref(),
            Some(value::COMPLEX_EXPRESSION)
        );

        assert_eq!(insight.exports, ["Counter"]);
        assert_eq!(insight.dependencies, ["react", "./Display"]);
        assert_eq!(insight.file_references, ["/app/src/Display"]);
        assert_eq!(insight.language, Language::Javascript);
        assert_eq!(insight.loc, 9);
        assert!(insight.warnings.is_empty());
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let first = analyze(COUNTER, "/app/src/Counter.jsx");
        let second = analyze(COUNTER, "/app/src/Counter.jsx");
        assert_eq!(
            serde_json::to_string(&first).expect("serializes"),
            serde_json::to_string(&second).expect("serializes")
        );
    }

    #[test]
    fn test_every_import_appears_and_relative_ones_resolve() {
        let source = r#"
import a from './a';
import { b as c, d } from '../shared/b';
import * as e from 'pkg';
"#;
        let insight = analyze(source, "/repo/src/view/index.js");

        let locals: Vec<_> = insight
            .imports
            .iter()
            .flat_map(|i| i.specifiers.iter().map(|s| s.local_name.as_str()))
            .collect();
        assert_eq!(locals, ["a", "c", "d", "e"]);
        assert_eq!(
            insight.file_references,
            ["/repo/src/view/a", "/repo/src/shared/b"]
        );
        for dep in ["./a", "../shared/b", "pkg"] {
            assert!(insight.dependencies.iter().any(|d| d == dep), "missing {dep}");
        }
    }

    #[test]
    fn test_component_usages_from_semantic_model() {
        let source = r#"const Badge = () => <span />;
const Card = () => (
  <div>
    <Badge />
    <Badge />
  </div>
);
function format(x) { return x; }
format(1);
"#;
        let insight = analyze(source, "Card.jsx");

        let badge = &insight.components["Badge"];
        let lines: Vec<_> = badge.usages.iter().map(|r| r.start.line).collect();
        assert_eq!(lines, [4, 5]);
        assert!(insight.components["Card"].usages.is_empty());
        assert_eq!(insight.functions["format"].usages.len(), 1);
        assert_eq!(insight.functions["format"].usages[0].start.line, 9);
    }

    #[test]
    fn test_shadowed_binding_usages_are_not_mixed() {
        let source = r#"const Item = () => null;
function render() {
  const Item = 'local';
  return Item;
}
const Use = () => <Item />;
"#;
        let insight = analyze(source, "x.jsx");
        let lines: Vec<_> = insight.components["Item"]
            .usages
            .iter()
            .map(|r| r.start.line)
            .collect();
        assert_eq!(lines, [6]);
    }

    #[test]
    fn test_typescript_file_without_jsx() {
        let source = "export const id = <T,>(x: T): T => x;\nexport interface Box { v: number }\n";
        let insight = analyze(source, "util.ts");
        assert_eq!(insight.language, Language::Typescript);
        assert!(!insight.jsx);
        assert!(insight.components.contains_key("id"));
        assert_eq!(insight.exports, ["id", "Box"]);
    }

    #[test]
    fn test_parse_error_yields_no_report() {
        let err = analyze_source(
            "const A = () => <div>;\n",
            Path::new("Broken.jsx"),
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, InsightError::Parse { .. }));
    }

    #[test]
    fn test_analyze_file_reads_content() {
        let mut file = tempfile::Builder::new()
            .suffix(".jsx")
            .tempfile()
            .expect("temp file");
        file.write_all(COUNTER.as_bytes()).expect("write fixture");

        let analyzed = analyze_file(file.path(), &AnalysisConfig::default()).expect("analyzes");
        assert_eq!(analyzed.file_content, COUNTER);
        assert!(analyzed.insight.components.contains_key("Counter"));

        let json = serde_json::to_value(&analyzed).expect("serializes");
        assert!(json.get("fileContent").is_some());
        assert!(json.get("stateVariables").is_some());
    }

    #[test]
    fn test_analyze_file_missing_is_io_error() {
        let err = analyze_file(Path::new("/definitely/not/here.jsx"), &AnalysisConfig::default())
            .unwrap_err();
        assert!(matches!(err, InsightError::Io { .. }));
    }
}
