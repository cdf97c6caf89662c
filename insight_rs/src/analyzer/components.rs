//! Component declarations and JSX usage.
//!
//! A component is any `const X = () => ...` or `const X = function () {}`
//! declarator. While its subtree is walked the name sits on the component
//! stack, so JSX tags and attributes found there are attributed to it.

use indexmap::IndexSet;
use oxc_ast::ast::*;
use oxc_span::GetSpan;

use crate::types::{ComponentInsight, PropInsight};

use super::value::LiteralValue;
use super::visitor::InsightVisitor;

impl<'a> InsightVisitor<'a> {
    /// Binding name of a declarator initialized with a function.
    pub(super) fn component_binding(decl: &VariableDeclarator<'a>) -> Option<String> {
        let BindingPattern::BindingIdentifier(id) = &decl.id else {
            return None;
        };
        match decl.init.as_ref()? {
            Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_) => {
                Some(id.name.to_string())
            }
            _ => None,
        }
    }

    /// Record the component (replacing any earlier one of the same name) and
    /// make it the innermost enclosing component.
    pub(super) fn enter_component(&mut self, name: String, decl: &VariableDeclarator<'a>) {
        let component = ComponentInsight::new(self.slice(decl.span).to_string(), self.range(decl.span));
        self.insight.components.insert(name.clone(), component);
        self.component_sites.insert(name.clone(), decl.span);
        self.component_stack.push(name);
    }

    pub(super) fn leave_component(&mut self) {
        self.component_stack.pop();
    }

    pub(super) fn handle_jsx_opening_element(&mut self, elem: &JSXOpeningElement<'a>) {
        let tag = self.jsx_tag_name(&elem.name);
        let owner = self.current_component().map(str::to_string);

        if tag.chars().next().is_some_and(char::is_uppercase)
            && let Some(owner) = &owner
            && let Some(component) = self.insight.components.get_mut(owner)
        {
            component.child_components.insert(tag);
        }

        for item in &elem.attributes {
            // Spread attributes carry no name
            let JSXAttributeItem::Attribute(attr) = item else {
                continue;
            };
            let name = self.jsx_attribute_name(&attr.name);
            let value = jsx_attribute_value(attr.value.as_ref()).map(|v| v.to_string());

            let prop = self
                .insight
                .props
                .entry(name.clone())
                .or_insert_with(|| PropInsight {
                    components: IndexSet::new(),
                    value,
                });

            if let Some(owner) = &owner {
                prop.components.insert(owner.clone());
                if let Some(component) = self.insight.components.get_mut(owner) {
                    component.props.insert(name);
                }
            }
        }
    }

    fn jsx_tag_name(&self, name: &JSXElementName<'a>) -> String {
        match name {
            JSXElementName::Identifier(id) => id.name.to_string(),
            JSXElementName::IdentifierReference(id) => id.name.to_string(),
            // Member and namespaced tags keep their dotted/colon source form
            other => self.slice(other.span()).to_string(),
        }
    }

    fn jsx_attribute_name(&self, name: &JSXAttributeName<'a>) -> String {
        match name {
            JSXAttributeName::Identifier(id) => id.name.to_string(),
            other => self.slice(other.span()).to_string(),
        }
    }
}

/// `None` for valueless attributes (`<Input disabled />`) and empty
/// containers (`attr={}`).
fn jsx_attribute_value(value: Option<&JSXAttributeValue<'_>>) -> Option<LiteralValue> {
    match value? {
        JSXAttributeValue::StringLiteral(s) => Some(LiteralValue::String(s.value.to_string())),
        JSXAttributeValue::ExpressionContainer(container) => container
            .expression
            .as_expression()
            .map(LiteralValue::from_expression),
        JSXAttributeValue::Element(_) | JSXAttributeValue::Fragment(_) => {
            Some(LiteralValue::Complex)
        }
    }
}
