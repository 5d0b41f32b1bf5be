//! Rule matching and dependency extraction against the set of reachable
//! class definitions of a compilation.

use crate::document::{CssDocument, CssRule};
use crate::selector::{ConditionKind, CssSelector, UNIVERSAL_SELECTOR};
use crate::session::{node_key, CssCompilationSession};
use crate::value::{single_argument, CssValue, CssValueKind, CLASS_REFERENCE, EMBED};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use veld_interface::style::{EmbedRequest, SymbolResolver};
use veld_shared::location::SourceSpan;
use veld_shared::problems::{Problem, ProblemKind, Problems};

/// Element name the legacy dialect treats as matching every component
pub const GLOBAL_SELECTOR: &str = "global";

/// The simple name of a dot-separated qualified name:
/// `a.b.Foo` → `Foo`, `Bar` → `Bar`.
#[must_use]
pub fn qname_to_simple_name(qname: &str) -> &str {
    qname.rsplit('.').find(|part| !part.is_empty()).unwrap_or(qname)
}

/// The rules of a document whose selector group matches at least one of
/// the given qualified names, i.e. the "activated" rule set.
#[must_use]
pub fn matched_rules<'d>(document: &'d CssDocument, qnames: &IndexSet<String>, legacy: bool) -> Vec<&'d CssRule> {
    let simple_names: HashSet<&str> = qnames.iter().map(|qname| qname_to_simple_name(qname)).collect();

    document
        .rules
        .iter()
        .filter(|rule| {
            if legacy {
                legacy_rule_matches(rule, &simple_names)
            } else {
                rule_matches(rule, &simple_names)
            }
        })
        .collect()
}

/// A rule matches when any subject selector in its group matches;
/// combinator ancestors are not consulted.
fn rule_matches(rule: &CssRule, simple_names: &HashSet<&str>) -> bool {
    rule.selector_group.iter().any(|selector| selector_matches(selector, simple_names))
}

fn selector_matches(selector: &CssSelector, simple_names: &HashSet<&str>) -> bool {
    // class conditions win over the element name
    let mut has_class_condition = false;
    for condition in &selector.conditions {
        if condition.kind == ConditionKind::Class {
            has_class_condition = true;
            if simple_names.contains(condition.value.as_str()) {
                return true;
            }
        }
    }
    if has_class_condition {
        return false;
    }

    match selector.element_name.as_deref() {
        Some(UNIVERSAL_SELECTOR) => true,
        Some(element_name) => simple_names.contains(element_name),
        None => false,
    }
}

/// The legacy dialect drops rules with advanced selectors outright and
/// compares plain element names only; `global` is neutral.
fn legacy_rule_matches(rule: &CssRule, simple_names: &HashSet<&str>) -> bool {
    for selector in &rule.selector_group {
        if selector.is_advanced() {
            return false;
        }
        match selector.element_name.as_deref() {
            None | Some(GLOBAL_SELECTOR) => continue,
            Some(element_name) => {
                if !simple_names.contains(element_name) {
                    return false;
                }
            }
        }
    }
    true
}

/// Walks one activated rule's property values and collects the
/// dependencies they introduce: definitions named by `ClassReference(...)`
/// and embed units produced from `Embed(...)`.
///
/// An unresolvable class reference is reported and skipped; the walk keeps
/// going. The embed factory reports its own failures.
pub fn resolve_dependencies<R: SymbolResolver>(
    resolver: &R,
    session: &mut CssCompilationSession<R::Unit>,
    rule: &CssRule,
    class_references: &mut IndexMap<String, R::Definition>,
    embed_units: &mut IndexSet<R::Unit>,
    problems: &mut Problems,
) {
    for property in &rule.properties {
        each_function_call(&property.value, &mut |name, raw_arguments, span| {
            if name == CLASS_REFERENCE {
                // ClassReference(null) resets an inherited reference
                if raw_arguments.trim() == "null" {
                    return;
                }
                let qname = single_argument(raw_arguments);
                match resolver.resolve_definition(qname) {
                    Some(definition) => {
                        class_references.insert(qname.to_string(), definition);
                    }
                    None => {
                        log::debug!("unresolved class reference '{}'", qname);
                        problems.push(Problem::new(
                            ProblemKind::UnresolvedClassReference { qname: qname.to_string() },
                            span,
                        ));
                    }
                }
            } else if name == EMBED {
                let request = EmbedRequest { raw_arguments, span };
                if let Some(unit) = resolver.resolve_embed(&request, problems) {
                    session.resolved_embeds.insert(node_key(span), unit.clone());
                    embed_units.insert(unit);
                }
            }
        });
    }
}

/// Applies `f` to every function call inside a value; multi-value lists
/// recurse into each element.
fn each_function_call<'v>(value: &'v CssValue, f: &mut impl FnMut(&'v str, &'v str, &'v SourceSpan)) {
    match &value.kind {
        CssValueKind::FunctionCall { name, raw_arguments } => f(name, raw_arguments, &value.span),
        CssValueKind::Multi { elements } => {
            for element in elements {
                each_function_call(element, f);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::CssSelectorCondition;
    use veld_shared::location::SourceSpan;

    fn span() -> SourceSpan {
        SourceSpan::synthetic()
    }

    fn type_selector(name: &str) -> CssSelector {
        CssSelector {
            span: span(),
            combinator: None,
            namespace_prefix: None,
            element_name: Some(name.to_string()),
            conditions: vec![],
        }
    }

    fn class_selector(class: &str) -> CssSelector {
        CssSelector {
            span: span(),
            combinator: None,
            namespace_prefix: None,
            element_name: None,
            conditions: vec![CssSelectorCondition {
                kind: ConditionKind::Class,
                value: class.to_string(),
                span: span(),
            }],
        }
    }

    fn rule_with(selectors: Vec<CssSelector>) -> CssRule {
        CssRule {
            span: span(),
            media_queries: vec![],
            selector_group: selectors,
            properties: vec![],
        }
    }

    fn qnames(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn simple_names() {
        assert_eq!(qname_to_simple_name("a.b.foo"), "foo");
        assert_eq!(qname_to_simple_name("bar"), "bar");
        assert_eq!(qname_to_simple_name("a.b."), "b");
    }

    #[test]
    fn element_names_match_reachable_simple_names() {
        let document = CssDocument::new(
            vec![rule_with(vec![type_selector("Button")]), rule_with(vec![type_selector("Slider")])],
            vec![],
            vec![],
            vec![],
        );

        let matched = matched_rules(&document, &qnames(&["controls.Button", "controls.Label"]), false);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].selector_group[0].element_name.as_deref(), Some("Button"));

        // case-sensitive, exact
        let matched = matched_rules(&document, &qnames(&["controls.button"]), false);
        assert!(matched.is_empty());
    }

    #[test]
    fn class_conditions_match_by_condition_value() {
        let document = CssDocument::new(
            vec![rule_with(vec![class_selector("header")]), rule_with(vec![class_selector("footer")])],
            vec![],
            vec![],
            vec![],
        );

        let matched = matched_rules(&document, &qnames(&["views.header"]), false);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn universal_matches_everything() {
        let document = CssDocument::new(vec![rule_with(vec![type_selector("*")])], vec![], vec![], vec![]);
        let matched = matched_rules(&document, &qnames(&["anything.AtAll"]), false);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn any_selector_in_the_group_activates_the_rule() {
        let document = CssDocument::new(
            vec![rule_with(vec![type_selector("Unknown"), type_selector("Button")])],
            vec![],
            vec![],
            vec![],
        );
        let matched = matched_rules(&document, &qnames(&["controls.Button"]), false);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn legacy_mode_drops_advanced_selectors() {
        let mut namespaced = type_selector("Button");
        namespaced.namespace_prefix = Some("s".to_string());

        let document = CssDocument::new(
            vec![
                rule_with(vec![namespaced]),
                rule_with(vec![type_selector("Button")]),
                rule_with(vec![type_selector(GLOBAL_SELECTOR)]),
            ],
            vec![],
            vec![],
            vec![],
        );

        let matched = matched_rules(&document, &qnames(&["controls.Button"]), true);
        assert_eq!(matched.len(), 2);

        // unknown element names drop the rule in legacy mode
        let matched = matched_rules(&document, &qnames(&["controls.Label"]), true);
        assert_eq!(matched.len(), 1);
    }
}
