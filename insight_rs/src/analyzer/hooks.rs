//! Hook calls and `[value, setter]` state declarations.

use oxc_ast::ast::*;

use crate::types::{StateInsight, WarningKind};

use super::value::LiteralValue;
use super::visitor::InsightVisitor;

impl<'a> InsightVisitor<'a> {
    /// Record a call to a bare identifier carrying the hook prefix.
    pub(super) fn handle_hook_call(&mut self, call: &CallExpression<'a>) {
        let Expression::Identifier(ident) = &call.callee else {
            return;
        };
        let name = ident.name.as_str();
        if !name.starts_with(self.config.hook_prefix.as_str()) {
            return;
        }

        let owner = self.current_component().map(str::to_string);
        let callers = self.insight.hooks.entry(name.to_string()).or_default();
        if let Some(owner) = owner {
            if let Some(component) = self.insight.components.get_mut(&owner) {
                component.hooks.push(name.to_string());
            }
            callers.push(owner);
        }

        if name == self.config.state_hook
            && !self
                .claimed_state_calls
                .contains(&(call.span.start, call.span.end))
        {
            self.push_warning(
                WarningKind::ShapeMismatch,
                format!("`{name}` call is not the initializer of a `[value, setter]` declaration"),
                call.span,
            );
        }
    }

    /// Handle `const [value, setValue] = useState(initial)`.
    ///
    /// Runs before the initializer is walked, so the call is claimed by the
    /// time [`Self::handle_hook_call`] sees it.
    pub(super) fn handle_state_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        let Some(Expression::CallExpression(call)) =
            decl.init.as_ref().map(Expression::without_parentheses)
        else {
            return;
        };
        let Expression::Identifier(callee) = &call.callee else {
            return;
        };
        if callee.name.as_str() != self.config.state_hook {
            return;
        }
        self.claimed_state_calls
            .insert((call.span.start, call.span.end));

        let (value, setter) = match state_pair(&decl.id) {
            Ok(pair) => pair,
            Err(reason) => {
                self.push_warning(
                    WarningKind::ShapeMismatch,
                    format!("`{}` result {reason}; state entry skipped", callee.name),
                    decl.span,
                );
                return;
            }
        };

        let initial_value = call
            .arguments
            .first()
            .map(|arg| LiteralValue::from_argument(arg).to_string())
            .unwrap_or_else(|| "undefined".to_string());
        let component = self.current_component().map(str::to_string);
        if let Some(owner) = &component
            && let Some(insight) = self.insight.components.get_mut(owner)
        {
            insight.state_variables.push(value.clone());
        }

        self.insight.state_variables.insert(
            value,
            StateInsight {
                initial_value,
                setter_name: setter,
                component,
            },
        );
    }
}

/// First two elements of an array pattern, both plain identifiers.
fn state_pair(pattern: &BindingPattern<'_>) -> Result<(String, String), &'static str> {
    let BindingPattern::ArrayPattern(array) = pattern else {
        return Err("is not destructured with an array pattern");
    };
    let mut names = array.elements.iter().take(2).map(|element| match element {
        Some(BindingPattern::BindingIdentifier(id)) => Some(id.name.to_string()),
        _ => None,
    });
    match (names.next().flatten(), names.next().flatten()) {
        (Some(value), Some(setter)) => Ok((value, setter)),
        _ => Err("does not bind both a value and a setter identifier"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::types::WarningKind;
    use std::path::Path;

    fn analyze(content: &str) -> FileInsight {
        analyze_source(content, Path::new("src/Hooks.jsx"), &AnalysisConfig::default())
            .expect("fixture parses")
    }

    #[test]
    fn test_state_pairing_inside_component() {
        let insight = analyze(
            r#"
            const Form = () => {
                const [name, setName] = useState('');
                const [tags, setTags] = useState(['a', 'b']);
                const [open, setOpen] = useState();
                const [busy, setBusy] = (useState(false));
                return <input value={name} />;
            };
        "#,
        );

        let name = &insight.state_variables["name"];
        assert_eq!(name.initial_value, "\"\"");
        assert_eq!(name.setter_name, "setName");
        assert_eq!(name.component.as_deref(), Some("Form"));
        assert_eq!(insight.state_variables["tags"].initial_value, "[\"a\", \"b\"]");
        assert_eq!(insight.state_variables["open"].initial_value, "undefined");
        assert_eq!(insight.state_variables["busy"].setter_name, "setBusy");
        assert_eq!(insight.state_variables["busy"].initial_value, "false");
        assert_eq!(
            insight.components["Form"].state_variables,
            ["name", "tags", "open", "busy"]
        );
        assert!(insight.warnings.is_empty());
    }

    #[test]
    fn test_hooks_recorded_per_call_site() {
        let insight = analyze(
            r#"
            const Panel = () => {
                useEffect(() => {}, []);
                useEffect(() => {}, [x]);
                const ref = useRef(null);
                return null;
            };
            const Other = () => {
                useEffect(() => {});
                return null;
            };
        "#,
        );

        assert_eq!(insight.hooks["useEffect"], ["Panel", "Panel", "Other"]);
        assert_eq!(insight.hooks["useRef"], ["Panel"]);
        assert_eq!(
            insight.components["Panel"].hooks,
            ["useEffect", "useEffect", "useRef"]
        );
    }

    #[test]
    fn test_hook_outside_component_has_no_owner() {
        let insight = analyze(
            r#"
            function useToggle() {
                const [on, setOn] = useState(false);
                return [on, () => setOn(!on)];
            }
        "#,
        );

        assert!(insight.hooks["useState"].is_empty());
        assert_eq!(insight.state_variables["on"].component, None);
        assert_eq!(insight.state_variables["on"].initial_value, "false");
    }

    #[test]
    fn test_member_callee_is_not_a_hook() {
        let insight = analyze(
            r#"
            const C = () => {
                const [a, setA] = React.useState(1);
                return null;
            };
        "#,
        );

        assert!(insight.hooks.is_empty());
        assert!(insight.state_variables.is_empty());
        assert!(insight.warnings.is_empty());
    }

    #[test]
    fn test_malformed_state_shapes_warn_and_skip() {
        let insight = analyze(
            r#"
            const Broken = () => {
                const state = useState(0);
                const [only] = useState(1);
                const { value } = useState(2);
                useState(3);
                const [ok, setOk] = useState(4);
                return null;
            };
        "#,
        );

        let keys: Vec<_> = insight.state_variables.keys().map(String::as_str).collect();
        assert_eq!(keys, ["ok"]);
        assert_eq!(insight.warnings.len(), 4);
        assert!(
            insight
                .warnings
                .iter()
                .all(|w| w.kind == WarningKind::ShapeMismatch)
        );
        // Every call is still a hook call site
        assert_eq!(insight.hooks["useState"].len(), 5);
        assert_eq!(insight.components["Broken"].state_variables, ["ok"]);
    }

    #[test]
    fn test_graceful_degradation_nine_of_ten() {
        let mut body = String::from("const Many = () => {\n");
        for i in 0..9 {
            body.push_str(&format!("  const [v{i}, setV{i}] = useState({i});\n"));
        }
        body.push_str("  const [broken] = useState(99);\n  return null;\n};\n");

        let insight = analyze(&body);
        assert_eq!(insight.state_variables.len(), 9);
        assert_eq!(insight.warnings.len(), 1);
        assert_eq!(insight.state_variables["v7"].initial_value, "7");
    }

    #[test]
    fn test_custom_hook_prefix_and_state_hook() {
        let config = AnalysisConfig {
            hook_prefix: "with".to_string(),
            state_hook: "withState".to_string(),
        };
        let insight = analyze_source(
            r#"
            const Box = () => {
                const [w, setW] = withState(10);
                useEffect(() => {});
                return null;
            };
        "#,
            Path::new("Box.jsx"),
            &config,
        )
        .expect("parses");

        assert_eq!(insight.hooks.keys().collect::<Vec<_>>(), ["withState"]);
        assert_eq!(insight.state_variables["w"].setter_name, "setW");
    }
}
