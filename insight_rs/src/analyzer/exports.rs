//! Export declaration handling.
//!
//! This module records:
//! - Named exports: `export const x = 1;`, `export function foo() {}`
//! - Default exports: `export default Counter;`, `export default class {}`
//! - Re-exports: `export { foo } from './bar'`, `export * as ns from './mod'`
//! - TypeScript declarations: interfaces, type aliases, enums

use oxc_ast::ast::*;

use crate::types::{ExportEntry, ExportKind};

use super::imports::module_export_name;
use super::visitor::InsightVisitor;

impl<'a> InsightVisitor<'a> {
    pub(super) fn handle_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        let line = self.get_line(decl.span);

        if decl.source.is_some() {
            for spec in &decl.specifiers {
                self.push_export(module_export_name(&spec.exported), ExportKind::Reexport, false, line);
            }
            return;
        }

        if let Some(declaration) = &decl.declaration {
            match declaration {
                Declaration::VariableDeclaration(var) => {
                    for d in &var.declarations {
                        let kind = match &d.init {
                            Some(
                                Expression::ArrowFunctionExpression(_)
                                | Expression::FunctionExpression(_),
                            ) => ExportKind::Function,
                            _ => ExportKind::Variable,
                        };
                        let mut names = Vec::new();
                        collect_binding_names(&d.id, &mut names);
                        for name in names {
                            self.push_export(name, kind, false, line);
                        }
                    }
                }
                Declaration::FunctionDeclaration(f) => {
                    if let Some(id) = &f.id {
                        self.push_export(id.name.to_string(), ExportKind::Function, false, line);
                    }
                }
                Declaration::ClassDeclaration(c) => {
                    if let Some(id) = &c.id {
                        self.push_export(id.name.to_string(), ExportKind::Class, false, line);
                    }
                }
                Declaration::TSTypeAliasDeclaration(t) => {
                    self.push_export(t.id.name.to_string(), ExportKind::Type, false, line);
                }
                Declaration::TSInterfaceDeclaration(i) => {
                    self.push_export(i.id.name.to_string(), ExportKind::Interface, false, line);
                }
                Declaration::TSEnumDeclaration(e) => {
                    self.push_export(e.id.name.to_string(), ExportKind::Enum, false, line);
                }
                _ => {}
            }
        }

        // export { foo, bar as baz };
        for spec in &decl.specifiers {
            self.push_export(module_export_name(&spec.exported), ExportKind::Variable, false, line);
        }
    }

    /// Default exports take the declared or referenced name when there is
    /// one, `default` otherwise.
    pub(super) fn handle_export_default_declaration(
        &mut self,
        decl: &ExportDefaultDeclaration<'a>,
    ) {
        let line = self.get_line(decl.span);
        let (name, kind) = match &decl.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(f) => {
                (f.id.as_ref().map(|id| id.name.to_string()), ExportKind::Function)
            }
            ExportDefaultDeclarationKind::ClassDeclaration(c) => {
                (c.id.as_ref().map(|id| id.name.to_string()), ExportKind::Class)
            }
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(i) => {
                (Some(i.id.name.to_string()), ExportKind::Interface)
            }
            ExportDefaultDeclarationKind::Identifier(id) => {
                (Some(id.name.to_string()), ExportKind::Expression)
            }
            _ => (None, ExportKind::Expression),
        };
        self.push_export(
            name.unwrap_or_else(|| "default".to_string()),
            kind,
            true,
            line,
        );
    }

    /// `export * from './mod'` is recorded as `*`; `export * as ns` by alias.
    pub(super) fn handle_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        let line = self.get_line(decl.span);
        let name = decl
            .exported
            .as_ref()
            .map(module_export_name)
            .unwrap_or_else(|| "*".to_string());
        self.push_export(name, ExportKind::Reexport, false, line);
    }

    fn push_export(&mut self, name: String, kind: ExportKind, is_default: bool, line: usize) {
        self.insight.exports.push(name.clone());
        self.insight.export_details.push(ExportEntry {
            name,
            kind,
            is_default,
            line,
        });
    }
}

fn collect_binding_names(pattern: &BindingPattern<'_>, out: &mut Vec<String>) {
    match pattern {
        BindingPattern::BindingIdentifier(id) => out.push(id.name.to_string()),
        BindingPattern::ObjectPattern(obj) => {
            for prop in &obj.properties {
                collect_binding_names(&prop.value, out);
            }
            if let Some(rest) = &obj.rest {
                collect_binding_names(&rest.argument, out);
            }
        }
        BindingPattern::ArrayPattern(arr) => {
            for element in arr.elements.iter().flatten() {
                collect_binding_names(element, out);
            }
            if let Some(rest) = &arr.rest {
                collect_binding_names(&rest.argument, out);
            }
        }
        BindingPattern::AssignmentPattern(assign) => collect_binding_names(&assign.left, out),
    }
}
