//! Import declaration handling.
//!
//! Covers default, named and namespace specifiers. Side-effect imports
//! (`import './styles.css'`) produce an entry with no specifiers.

use oxc_ast::ast::*;

use crate::types::{ImportEntry, ImportSpecifier, SpecifierKind};

use super::visitor::InsightVisitor;

impl<'a> InsightVisitor<'a> {
    pub(super) fn handle_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let source = decl.source.value.to_string();
        self.dependencies.insert(source.clone());

        let mut entry = ImportEntry {
            source,
            specifiers: Vec::new(),
        };
        if let Some(specifiers) = &decl.specifiers {
            for spec in specifiers {
                let specifier = match spec {
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => ImportSpecifier {
                        kind: SpecifierKind::Default,
                        local_name: s.local.name.to_string(),
                        imported_name: None,
                    },
                    ImportDeclarationSpecifier::ImportSpecifier(s) => ImportSpecifier {
                        kind: SpecifierKind::Named,
                        local_name: s.local.name.to_string(),
                        imported_name: Some(module_export_name(&s.imported)),
                    },
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => ImportSpecifier {
                        kind: SpecifierKind::Namespace,
                        local_name: s.local.name.to_string(),
                        imported_name: None,
                    },
                };
                entry.specifiers.push(specifier);
            }
        }
        self.insight.imports.push(entry);
    }
}

pub(super) fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.to_string(),
        ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        ModuleExportName::StringLiteral(s) => s.value.to_string(),
    }
}
