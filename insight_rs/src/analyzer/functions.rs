//! Top-level function declarations: parameters, body outline and callees.

use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_span::GetSpan;

use crate::types::FunctionInsight;

use super::visitor::InsightVisitor;

/// Function declared directly in the module body, exported or not.
pub(super) fn top_level_function<'b, 'a>(stmt: &'b Statement<'a>) -> Option<&'b Function<'a>> {
    match stmt {
        Statement::FunctionDeclaration(func) => Some(&**func),
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::FunctionDeclaration(func)) => Some(&**func),
            _ => None,
        },
        Statement::ExportDefaultDeclaration(export) => match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => Some(&**func),
            _ => None,
        },
        _ => None,
    }
}

impl<'a> InsightVisitor<'a> {
    pub(super) fn handle_function_declaration(&mut self, func: &Function<'a>) {
        // `export default function () {}` has nothing to key on
        let Some(id) = &func.id else {
            return;
        };
        let name = id.name.to_string();

        let (body, calls) = match &func.body {
            Some(body) => (
                body.statements
                    .iter()
                    .map(|stmt| statement_kind(stmt).to_string())
                    .collect(),
                collect_calls(body),
            ),
            None => (Vec::new(), Vec::new()),
        };

        let insight = FunctionInsight {
            params: self.function_params(&func.params),
            body,
            calls,
            code: self.slice(func.span).to_string(),
            range: self.range(func.span),
            usages: Vec::new(),
        };
        self.insight.functions.insert(name.clone(), insight);
        self.function_sites.insert(name, func.span);
    }

    fn function_params(&self, params: &FormalParameters<'a>) -> Vec<String> {
        let mut out: Vec<String> = params
            .items
            .iter()
            .map(|param| match &param.pattern {
                BindingPattern::BindingIdentifier(id) => id.name.to_string(),
                // Destructured and defaulted params keep their source form
                other => self.slice(other.span()).to_string(),
            })
            .collect();
        if let Some(rest) = &params.rest {
            out.push(self.slice(rest.span()).to_string());
        }
        out
    }
}

/// ESTree node type of a body statement.
fn statement_kind(stmt: &Statement<'_>) -> &'static str {
    match stmt {
        Statement::BlockStatement(_) => "BlockStatement",
        Statement::BreakStatement(_) => "BreakStatement",
        Statement::ContinueStatement(_) => "ContinueStatement",
        Statement::DebuggerStatement(_) => "DebuggerStatement",
        Statement::DoWhileStatement(_) => "DoWhileStatement",
        Statement::EmptyStatement(_) => "EmptyStatement",
        Statement::ExpressionStatement(_) => "ExpressionStatement",
        Statement::ForInStatement(_) => "ForInStatement",
        Statement::ForOfStatement(_) => "ForOfStatement",
        Statement::ForStatement(_) => "ForStatement",
        Statement::IfStatement(_) => "IfStatement",
        Statement::LabeledStatement(_) => "LabeledStatement",
        Statement::ReturnStatement(_) => "ReturnStatement",
        Statement::SwitchStatement(_) => "SwitchStatement",
        Statement::ThrowStatement(_) => "ThrowStatement",
        Statement::TryStatement(_) => "TryStatement",
        Statement::WhileStatement(_) => "WhileStatement",
        Statement::WithStatement(_) => "WithStatement",
        Statement::VariableDeclaration(_) => "VariableDeclaration",
        Statement::FunctionDeclaration(_) => "FunctionDeclaration",
        Statement::ClassDeclaration(_) => "ClassDeclaration",
        Statement::TSTypeAliasDeclaration(_) => "TSTypeAliasDeclaration",
        Statement::TSInterfaceDeclaration(_) => "TSInterfaceDeclaration",
        Statement::TSEnumDeclaration(_) => "TSEnumDeclaration",
        _ => "Statement",
    }
}

/// Callee paths of every call inside `body`, nested ones included.
fn collect_calls(body: &FunctionBody<'_>) -> Vec<String> {
    let mut collector = CalleeCollector::default();
    collector.visit_function_body(body);
    collector.calls
}

#[derive(Default)]
struct CalleeCollector {
    calls: Vec<String>,
}

impl<'a> Visit<'a> for CalleeCollector {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Some(callee) = callee_path(&call.callee) {
            self.calls.push(callee);
        }
        walk::walk_call_expression(self, call);
    }
}

/// `foo`, `api.get`, `this.props.load` -> dotted path. `None` for anything
/// computed (`fns[i]()`, `getFn()()`).
fn callee_path(expr: &Expression<'_>) -> Option<String> {
    match expr {
        Expression::Identifier(id) => Some(id.name.to_string()),
        Expression::ThisExpression(_) => Some("this".to_string()),
        Expression::StaticMemberExpression(member) => {
            let object = callee_path(&member.object)?;
            Some(format!("{object}.{}", member.property.name))
        }
        Expression::ParenthesizedExpression(p) => callee_path(&p.expression),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::*;
    use std::path::Path;

    fn analyze(content: &str) -> FileInsight {
        analyze_source(content, Path::new("src/util.js"), &AnalysisConfig::default())
            .expect("fixture parses")
    }

    #[test]
    fn test_params_body_and_calls() {
        let insight = analyze(
            r#"
function load(id, { retries = 3 }, ...rest) {
  const url = buildUrl(id);
  if (!url) return null;
  return api.client.get(url).then(parse);
}
"#,
        );

        let load = &insight.functions["load"];
        assert_eq!(load.params, ["id", "{ retries = 3 }", "...rest"]);
        assert_eq!(
            load.body,
            ["VariableDeclaration", "IfStatement", "ReturnStatement"]
        );
        assert_eq!(load.calls, ["buildUrl", "api.client.get"]);
        assert!(load.code.starts_with("function load("));
        assert_eq!(load.range.start.line, 2);
        assert_eq!(load.range.end.line, 6);
    }

    #[test]
    fn test_only_top_level_declarations() {
        let insight = analyze(
            r#"
export function exported() {
  function inner() {}
  return inner();
}
export default function main() {}
"#,
        );

        let names: Vec<_> = insight.functions.keys().map(String::as_str).collect();
        assert_eq!(names, ["exported", "main"]);
        assert_eq!(insight.functions["exported"].calls, ["inner"]);
    }

    #[test]
    fn test_function_expressions_are_components_not_functions() {
        let insight = analyze("const handler = function () { go(); };");
        assert!(insight.functions.is_empty());
        assert!(insight.components.contains_key("handler"));
    }

    #[test]
    fn test_nested_calls_are_collected() {
        let insight = analyze(
            r#"
function run() {
  items.forEach((item) => {
    save(item);
  });
}
"#,
        );
        assert_eq!(insight.functions["run"].calls, ["items.forEach", "save"]);
    }
}
