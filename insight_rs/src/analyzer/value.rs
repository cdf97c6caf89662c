//! Literal value rendering.
//!
//! Expressions are first lowered into [`LiteralValue`], a closed set of the
//! shapes the report can show, then printed. Anything that is not a plain
//! literal, identifier, array or object lowers to [`LiteralValue::Complex`].

use std::fmt;

use oxc_ast::ast::*;

/// Placeholder for expressions that are not statically renderable.
pub const COMPLEX_EXPRESSION: &str = "complex_expression";

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    /// Reference to a binding, rendered by name. No evaluation happens.
    Identifier(String),
    Array(Vec<LiteralValue>),
    Object(Vec<(String, LiteralValue)>),
    Spread(Box<LiteralValue>),
    /// Array hole, as in `[1, , 3]`.
    Hole,
    Complex,
}

impl LiteralValue {
    pub fn from_expression(expr: &Expression<'_>) -> Self {
        match expr {
            Expression::StringLiteral(s) => Self::String(s.value.to_string()),
            Expression::NumericLiteral(n) => Self::Number(n.value),
            Expression::BooleanLiteral(b) => Self::Boolean(b.value),
            Expression::NullLiteral(_) => Self::Null,
            Expression::Identifier(id) => Self::Identifier(id.name.to_string()),
            Expression::ParenthesizedExpression(p) => Self::from_expression(&p.expression),
            Expression::ArrayExpression(arr) => Self::Array(
                arr.elements
                    .iter()
                    .map(Self::from_array_element)
                    .collect(),
            ),
            Expression::ObjectExpression(obj) => Self::Object(
                obj.properties
                    .iter()
                    .map(Self::from_object_property)
                    .collect(),
            ),
            _ => Self::Complex,
        }
    }

    pub fn from_argument(arg: &Argument<'_>) -> Self {
        match arg {
            Argument::SpreadElement(spread) => {
                Self::Spread(Box::new(Self::from_expression(&spread.argument)))
            }
            other => other
                .as_expression()
                .map(Self::from_expression)
                .unwrap_or(Self::Complex),
        }
    }

    fn from_array_element(element: &ArrayExpressionElement<'_>) -> Self {
        match element {
            ArrayExpressionElement::SpreadElement(spread) => {
                Self::Spread(Box::new(Self::from_expression(&spread.argument)))
            }
            ArrayExpressionElement::Elision(_) => Self::Hole,
            other => other
                .as_expression()
                .map(Self::from_expression)
                .unwrap_or(Self::Complex),
        }
    }

    fn from_object_property(prop: &ObjectPropertyKind<'_>) -> (String, Self) {
        match prop {
            ObjectPropertyKind::ObjectProperty(p) => {
                let key = if p.computed {
                    None
                } else {
                    property_key_name(&p.key)
                };
                (
                    key.unwrap_or_else(|| COMPLEX_EXPRESSION.to_string()),
                    Self::from_expression(&p.value),
                )
            }
            ObjectPropertyKind::SpreadProperty(spread) => (
                String::new(),
                Self::Spread(Box::new(Self::from_expression(&spread.argument))),
            ),
        }
    }
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        PropertyKey::StringLiteral(s) => Some(s.value.to_string()),
        PropertyKey::NumericLiteral(n) => Some(LiteralValue::Number(n.value).to_string()),
        _ => None,
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    if matches!(c, '"' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::Identifier(name) => f.write_str(name),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(props) if props.is_empty() => f.write_str("{}"),
            Self::Object(props) => {
                f.write_str("{ ")?;
                for (i, (key, value)) in props.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match value {
                        // `{ ...rest }` has no key of its own
                        Self::Spread(_) => write!(f, "{value}")?,
                        _ => write!(f, "{key}: {value}")?,
                    }
                }
                f.write_str(" }")
            }
            Self::Spread(inner) => write!(f, "...{inner}"),
            Self::Hole => Ok(()),
            Self::Complex => f.write_str(COMPLEX_EXPRESSION),
        }
    }
}

/// Best-effort textual form of an expression.
pub fn render_expression(expr: &Expression<'_>) -> String {
    LiteralValue::from_expression(expr).to_string()
}
