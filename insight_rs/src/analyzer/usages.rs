//! Usage sites of declared components and functions, from the semantic model.

use oxc_ast::ast::Program;
use oxc_semantic::SemanticBuilder;
use oxc_span::GetSpan;
use tracing::debug;

use crate::types::FileInsight;

use super::parse::LineIndex;
use super::visitor::DeclarationSites;

/// Fill `usages` for every component and function whose binding resolves to
/// the declaration the report kept. Shadowed or overwritten bindings of the
/// same name are ignored.
pub(super) fn attach_usages(
    program: &Program<'_>,
    lines: &LineIndex,
    sites: &DeclarationSites,
    insight: &mut FileInsight,
) {
    if sites.components.is_empty() && sites.functions.is_empty() {
        return;
    }

    let semantic_ret = SemanticBuilder::new().build(program);
    if !semantic_ret.errors.is_empty() {
        debug!(
            file = %insight.file_path,
            errors = semantic_ret.errors.len(),
            "semantic analysis failed, usages left empty"
        );
        return;
    }
    let semantic = semantic_ret.semantic;

    for symbol_id in semantic.scoping().symbol_ids() {
        let name = semantic.scoping().symbol_name(symbol_id);
        let decl_span = semantic.symbol_declaration(symbol_id).kind().span();

        let is_component = sites.components.get(name) == Some(&decl_span);
        let is_function = sites.functions.get(name) == Some(&decl_span);
        if !is_component && !is_function {
            continue;
        }

        let usages: Vec<_> = semantic
            .symbol_references(symbol_id)
            .map(|reference| lines.range(semantic.reference_span(reference)))
            .collect();

        if is_component && let Some(component) = insight.components.get_mut(name) {
            component.usages = usages;
        } else if is_function && let Some(function) = insight.functions.get_mut(name) {
            function.usages = usages;
        }
    }
}
