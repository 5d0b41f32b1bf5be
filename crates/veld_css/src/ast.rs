use crate::document::{
    CssDocument, CssFontFace, CssKeyFrames, CssMediaQueryCondition, CssNamespaceDefinition, CssProperty, CssRule,
};
use crate::selector::{CombinatorKind, ConditionKind, CssCombinator, CssSelector, CssSelectorCondition};
use crate::value::{single_argument, strip_quotes, CssValue};
use anyhow::anyhow;
use veld_shared::location::SourceSpan;
use veld_shared::node::Node as CssNode;
use veld_shared::problems::{Problem, ProblemKind, Problems};
use veld_shared::types::Result;

/*

Given the following document:

    @namespace s "library://ns.example.com/spark";

    s|Button.emphasized { color: #ff0000; }
    .header, Label { fontFamily: Arial, "Sans"; }

the external grammar produces a parse tree, which this module folds into
the typed document model:

CssDocument
    CssNamespaceDefinition prefix: s
    CssRule
        CssSelector: s|Button  (condition .emphasized)
        CssProperty color = Color(#ff0000)
    CssRule
        CssSelector: .header
        CssSelector: Label
        CssProperty fontFamily = Multi(Keyword(Arial), Str("Sans"))

Selector chains fold right-to-left: in `A > B`, the parse tree lists
`A`, `>`, `B` in sequence and the model stores B with a combinator whose
ancestor selector is A.

*/

/// Converts a style parse tree to a document model. Construction is
/// best-effort: malformed pieces report problems and are skipped, the rest
/// of the document still builds.
pub fn convert_ast_to_document(css_ast: &CssNode, problems: &mut Problems) -> Result<CssDocument> {
    log::trace!("convert_ast_to_document");

    if !css_ast.is_stylesheet() {
        return Err(anyhow!("style AST must start with a stylesheet node"));
    }

    let mut rules = vec![];
    let mut namespaces: Vec<CssNamespaceDefinition> = vec![];
    let mut font_faces = vec![];
    let mut keyframes = vec![];

    for node in css_ast.as_stylesheet() {
        if node.is_rule() {
            if let Some(rule) = convert_rule(node, &[]) {
                rules.push(rule);
            }
            continue;
        }
        if !node.is_at_rule() {
            continue;
        }

        let (name, prelude, block) = node.as_at_rule();
        match name.as_str() {
            "namespace" => {
                if let Some(namespace) = convert_namespace(node, prelude.as_ref()) {
                    if namespaces.iter().any(|n| n.prefix == namespace.prefix) {
                        problems.push(Problem::new(
                            ProblemKind::DuplicateNamespacePrefix {
                                prefix: namespace.prefix.clone().unwrap_or_default(),
                            },
                            &namespace.span,
                        ));
                    }
                    // last definition wins in the document's lookup map
                    namespaces.push(namespace);
                }
            }
            "font-face" => {
                let properties = convert_block_declarations(block.as_ref());
                if let Some(font_face) = CssFontFace::from_properties(&properties, node.span.clone(), problems) {
                    font_faces.push(font_face);
                }
            }
            "media" => {
                let conditions = convert_media_conditions(prelude.as_ref());
                for child in block.as_ref().filter(|b| b.is_block()).map(CssNode::as_block).into_iter().flatten() {
                    if child.is_rule() {
                        if let Some(rule) = convert_rule(child, &conditions) {
                            rules.push(rule);
                        }
                    }
                }
            }
            "keyframes" | "-webkit-keyframes" => {
                if let Some(frames) = convert_keyframes(node, prelude.as_ref(), name == "-webkit-keyframes") {
                    keyframes.push(frames);
                }
            }
            _ => {
                log::warn!("skipping unknown at-rule '@{}'", name);
            }
        }
    }

    Ok(CssDocument::new(rules, namespaces, font_faces, keyframes))
}

fn convert_namespace(node: &CssNode, prelude: Option<&CssNode>) -> Option<CssNamespaceDefinition> {
    let children = prelude.filter(|p| p.is_container()).map(CssNode::as_container)?;

    let prefix = children.iter().find(|c| c.is_ident()).map(|c| c.as_ident().clone());
    let Some(uri_node) = children.iter().find(|c| c.is_string()) else {
        log::warn!("skipping @namespace without a uri");
        return None;
    };

    Some(CssNamespaceDefinition {
        span: node.span.clone(),
        prefix,
        uri: strip_quotes(uri_node.as_string()).to_string(),
    })
}

fn convert_media_conditions(prelude: Option<&CssNode>) -> Vec<CssMediaQueryCondition> {
    let Some(list) = prelude.filter(|p| p.is_media_query_list()) else {
        return vec![];
    };
    list.as_media_query_list()
        .iter()
        .filter(|q| q.is_media_query())
        .map(|q| CssMediaQueryCondition {
            span: q.span.clone(),
            value: q.as_media_query().clone(),
        })
        .collect()
}

fn convert_keyframes(node: &CssNode, prelude: Option<&CssNode>, webkit: bool) -> Option<CssKeyFrames> {
    let name_node = match prelude {
        Some(p) if p.is_ident() => Some(p),
        Some(p) if p.is_container() => p.as_container().iter().find(|c| c.is_ident()),
        _ => None,
    };
    let Some(name_node) = name_node else {
        log::warn!("skipping @keyframes without a name");
        return None;
    };

    Some(CssKeyFrames {
        span: node.span.clone(),
        name: name_node.as_ident().clone(),
        webkit,
    })
}

fn convert_rule(node: &CssNode, media_queries: &[CssMediaQueryCondition]) -> Option<CssRule> {
    let (prelude, block) = node.as_rule();

    let mut selector_group = vec![];
    for selector_list in prelude.iter().filter(|p| p.is_selector_list()) {
        for selector_node in selector_list.as_selector_list() {
            if !selector_node.is_selector() {
                continue;
            }
            if let Some(selector) = convert_selector(selector_node) {
                selector_group.push(selector);
            }
        }
    }
    if selector_group.is_empty() {
        log::warn!("skipping rule without selectors");
        return None;
    }

    Some(CssRule {
        span: node.span.clone(),
        media_queries: media_queries.to_vec(),
        selector_group,
        properties: convert_block_declarations(block.as_ref()),
    })
}

/// Partially built simple selector, while walking a selector's parts.
#[derive(Default)]
struct SelectorParts {
    span: Option<SourceSpan>,
    namespace_prefix: Option<String>,
    element_name: Option<String>,
    conditions: Vec<CssSelectorCondition>,
}

impl SelectorParts {
    fn is_empty(&self) -> bool {
        self.namespace_prefix.is_none() && self.element_name.is_none() && self.conditions.is_empty()
    }

    fn note_span(&mut self, node: &CssNode) {
        if self.span.is_none() {
            self.span = Some(node.span.clone());
        }
    }

    fn finish(self, combinator: Option<Box<CssCombinator>>, fallback: &SourceSpan) -> CssSelector {
        CssSelector {
            span: self.span.unwrap_or_else(|| fallback.clone()),
            combinator,
            namespace_prefix: self.namespace_prefix,
            element_name: self.element_name,
            conditions: self.conditions,
        }
    }
}

fn convert_selector(node: &CssNode) -> Option<CssSelector> {
    let mut parts = SelectorParts::default();
    // the already-built ancestor selector and how the next one attaches to it
    let mut pending: Option<(CssSelector, CombinatorKind)> = None;

    for part in node.as_selector() {
        if part.is_combinator() {
            if parts.is_empty() {
                log::warn!("skipping selector with a leading combinator");
                return None;
            }
            let ancestor_combinator = pending
                .take()
                .map(|(selector, kind)| Box::new(CssCombinator { selector, kind }));
            let ancestor = std::mem::take(&mut parts).finish(ancestor_combinator, &node.span);
            pending = Some((ancestor, combinator_kind(part.as_combinator())));
        } else if part.is_type_selector() {
            let (namespace, value) = part.as_type_selector();
            parts.note_span(part);
            parts.namespace_prefix = namespace.clone();
            parts.element_name = Some(value.clone());
        } else if part.is_class_selector() {
            parts.note_span(part);
            parts.conditions.push(condition(ConditionKind::Class, part.as_class_selector(), part));
        } else if part.is_id_selector() {
            parts.note_span(part);
            parts.conditions.push(condition(ConditionKind::Id, part.as_id_selector(), part));
        } else if part.is_pseudo_class_selector() {
            parts.note_span(part);
            parts
                .conditions
                .push(condition(ConditionKind::Pseudo, part.as_pseudo_class_selector(), part));
        } else if part.is_attribute_selector() {
            parts.note_span(part);
            parts
                .conditions
                .push(condition(ConditionKind::Attribute, part.as_attribute_selector(), part));
        } else {
            panic!("unknown selector part: {:?}", part);
        }
    }

    if parts.is_empty() {
        log::warn!("skipping empty selector");
        return None;
    }
    let combinator = pending
        .take()
        .map(|(selector, kind)| Box::new(CssCombinator { selector, kind }));
    Some(parts.finish(combinator, &node.span))
}

fn condition(kind: ConditionKind, value: &str, node: &CssNode) -> CssSelectorCondition {
    CssSelectorCondition {
        kind,
        value: value.to_string(),
        span: node.span.clone(),
    }
}

fn combinator_kind(symbol: &str) -> CombinatorKind {
    match symbol.trim() {
        "" => CombinatorKind::Descendant,
        ">" => CombinatorKind::Child,
        "+" => CombinatorKind::Sibling,
        other => panic!("unknown combinator '{other}'"),
    }
}

fn convert_block_declarations(block: Option<&CssNode>) -> Vec<CssProperty> {
    let mut properties = vec![];
    for child in block.filter(|b| b.is_block()).map(CssNode::as_block).into_iter().flatten() {
        if child.is_declaration() {
            properties.push(convert_declaration(child));
        }
    }
    properties
}

fn convert_declaration(node: &CssNode) -> CssProperty {
    let (property, value_nodes) = node.as_declaration();

    let mut elements: Vec<CssValue> = vec![];
    let mut index = 0;
    while index < value_nodes.len() {
        let value_node = &value_nodes[index];
        if value_node.is_comma() {
            index += 1;
            continue;
        }
        // a source followed by a format hint collapses into one value
        if value_node.is_function() {
            let (name, raw_arguments) = value_node.as_function();
            if name == "url" || name == "local" {
                let format = value_nodes
                    .get(index + 1)
                    .filter(|next| next.is_function() && next.as_function().0.as_str() == "format")
                    .map(|next| single_argument(next.as_function().1).to_string());
                if format.is_some() {
                    index += 1;
                }
                elements.push(CssValue::url(name, raw_arguments, format, value_node.span.clone()));
                index += 1;
                continue;
            }
        }
        elements.push(convert_value_node(value_node));
        index += 1;
    }

    let value = if elements.len() == 1 {
        elements.remove(0)
    } else {
        CssValue::multi(elements, node.span.clone())
    };
    CssProperty::new(property, value, node.span.clone())
}

fn convert_value_node(node: &CssNode) -> CssValue {
    if node.is_ident() {
        CssValue::keyword(node.as_ident(), node.span.clone())
    } else if node.is_number() {
        CssValue::number(node.as_number(), node.span.clone())
    } else if node.is_hash() {
        CssValue::hex_color(&format!("#{}", node.as_hash()), node.span.clone())
    } else if node.is_string() {
        CssValue::string(node.as_string(), node.span.clone())
    } else if node.is_function() {
        let (name, raw_arguments) = node.as_function();
        CssValue::function(name, raw_arguments, node.span.clone())
    } else {
        panic!("cannot convert node to a property value: {:?}", node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CssValueKind;
    use veld_shared::location::Location;
    use veld_shared::node::NodeType;

    fn span_at(offset: usize) -> SourceSpan {
        SourceSpan::new("test.css", Location::new(1, offset + 1, offset), Location::new(1, offset + 2, offset + 1))
    }

    fn n(node_type: NodeType) -> CssNode {
        CssNode::new(node_type, span_at(0))
    }

    fn selector(children: Vec<CssNode>) -> CssNode {
        n(NodeType::Selector { children })
    }

    fn rule(selectors: Vec<CssNode>, declarations: Vec<CssNode>) -> CssNode {
        n(NodeType::Rule {
            prelude: Some(n(NodeType::SelectorList { selectors })),
            block: Some(n(NodeType::Block { children: declarations })),
        })
    }

    fn declaration(property: &str, value: Vec<CssNode>) -> CssNode {
        n(NodeType::Declaration {
            property: property.to_string(),
            value,
        })
    }

    fn ident(value: &str) -> CssNode {
        n(NodeType::Ident { value: value.to_string() })
    }

    fn string(value: &str) -> CssNode {
        n(NodeType::Str { value: value.to_string() })
    }

    fn stylesheet(children: Vec<CssNode>) -> CssNode {
        n(NodeType::StyleSheet { children })
    }

    #[test]
    fn non_stylesheet_root_is_rejected() {
        let mut problems = Problems::new();
        assert!(convert_ast_to_document(&ident("oops"), &mut problems).is_err());
    }

    #[test]
    fn converts_namespaces_rules_and_values() {
        let tree = stylesheet(vec![
            n(NodeType::AtRule {
                name: "namespace".to_string(),
                prelude: Some(n(NodeType::Container {
                    children: vec![ident("s"), string("\"library://ns.example.com/spark\"")],
                })),
                block: None,
            }),
            rule(
                vec![selector(vec![
                    n(NodeType::TypeSelector {
                        namespace: Some("s".to_string()),
                        value: "Button".to_string(),
                    }),
                    n(NodeType::ClassSelector { value: "emphasized".to_string() }),
                ])],
                vec![
                    declaration("color", vec![n(NodeType::Hash { value: "ff0000".to_string() })]),
                    declaration(
                        "font-family",
                        vec![ident("Arial"), n(NodeType::Comma), string("\"Sans\"")],
                    ),
                ],
            ),
        ]);

        let mut problems = Problems::new();
        let document = convert_ast_to_document(&tree, &mut problems).expect("document should build");

        assert!(problems.is_empty());
        assert_eq!(document.namespaces.len(), 1);
        assert_eq!(document.namespace_definition("s").map(|ns| ns.uri.as_str()),
            Some("library://ns.example.com/spark"));

        assert_eq!(document.rules.len(), 1);
        let rule = &document.rules[0];
        assert_eq!(rule.selector_group.len(), 1);
        let selector = &rule.selector_group[0];
        assert_eq!(selector.namespace_prefix.as_deref(), Some("s"));
        assert_eq!(selector.element_name.as_deref(), Some("Button"));
        assert_eq!(selector.conditions.len(), 1);
        assert!(selector.is_advanced());

        assert_eq!(rule.properties.len(), 2);
        assert!(matches!(rule.properties[0].value.kind, CssValueKind::Color { rgb: 0xff0000, .. }));
        // hyphenated names normalize during conversion
        assert_eq!(rule.properties[1].name, "fontFamily");
        assert_eq!(rule.properties[1].raw_name, "font-family");
        assert!(matches!(&rule.properties[1].value.kind, CssValueKind::Multi { elements } if elements.len() == 2));
    }

    #[test]
    fn folds_combinator_chains() {
        let tree = stylesheet(vec![rule(
            vec![selector(vec![
                n(NodeType::TypeSelector { namespace: None, value: "List".to_string() }),
                n(NodeType::Combinator { value: ">".to_string() }),
                n(NodeType::TypeSelector { namespace: None, value: "Item".to_string() }),
                n(NodeType::Combinator { value: " ".to_string() }),
                n(NodeType::TypeSelector { namespace: None, value: "Label".to_string() }),
            ])],
            vec![],
        )]);

        let mut problems = Problems::new();
        let document = convert_ast_to_document(&tree, &mut problems).expect("document should build");
        let selector = &document.rules[0].selector_group[0];

        let chain: Vec<_> = selector.chain().iter().map(|s| s.element_name.clone().unwrap_or_default()).collect();
        assert_eq!(chain, ["List", "Item", "Label"]);
        assert_eq!(selector.to_string(), "List > Item Label");
    }

    #[test]
    fn media_conditions_attach_to_nested_rules() {
        let tree = stylesheet(vec![n(NodeType::AtRule {
            name: "media".to_string(),
            prelude: Some(n(NodeType::MediaQueryList {
                media_queries: vec![
                    n(NodeType::MediaQuery { value: "all".to_string() }),
                    n(NodeType::MediaQuery { value: "(application-dpi: 240)".to_string() }),
                ],
            })),
            block: Some(n(NodeType::Block {
                children: vec![rule(
                    vec![selector(vec![n(NodeType::TypeSelector {
                        namespace: None,
                        value: "Button".to_string(),
                    })])],
                    vec![declaration("fontSize", vec![n(NodeType::Number { value: "12".to_string() })])],
                )],
            })),
        })]);

        let mut problems = Problems::new();
        let document = convert_ast_to_document(&tree, &mut problems).expect("document should build");

        assert_eq!(document.rules.len(), 1);
        let rule = &document.rules[0];
        assert_eq!(rule.media_queries.len(), 2);
        assert_eq!(rule.media_queries[1].value, "(application-dpi: 240)");
        assert_eq!(
            rule.to_string(),
            "@media all and (application-dpi: 240) {\n    Button {\n        fontSize: 12;\n    }\n}"
        );
    }

    #[test]
    fn duplicate_namespace_prefix_reports_and_last_wins() {
        let namespace = |prefix: &str, uri: &str| {
            n(NodeType::AtRule {
                name: "namespace".to_string(),
                prelude: Some(n(NodeType::Container {
                    children: vec![ident(prefix), string(&format!("\"{uri}\""))],
                })),
                block: None,
            })
        };
        let tree = stylesheet(vec![namespace("s", "library://one"), namespace("s", "library://two")]);

        let mut problems = Problems::new();
        let document = convert_ast_to_document(&tree, &mut problems).expect("document should build");

        assert_eq!(problems.len(), 1);
        assert!(matches!(
            &problems[0].kind,
            ProblemKind::DuplicateNamespacePrefix { prefix } if prefix == "s"
        ));
        assert_eq!(document.namespace_definition("s").map(|ns| ns.uri.as_str()), Some("library://two"));
    }

    #[test]
    fn font_face_and_keyframes_are_collected() {
        let tree = stylesheet(vec![
            n(NodeType::AtRule {
                name: "font-face".to_string(),
                prelude: None,
                block: Some(n(NodeType::Block {
                    children: vec![
                        declaration(
                            "src",
                            vec![
                                n(NodeType::Function {
                                    name: "url".to_string(),
                                    arguments: "\"Lato.woff\"".to_string(),
                                }),
                                n(NodeType::Function {
                                    name: "format".to_string(),
                                    arguments: "\"woff\"".to_string(),
                                }),
                            ],
                        ),
                        declaration("fontFamily", vec![ident("Lato")]),
                    ],
                })),
            }),
            n(NodeType::AtRule {
                name: "-webkit-keyframes".to_string(),
                prelude: Some(ident("pulse")),
                block: Some(n(NodeType::Block { children: vec![] })),
            }),
        ]);

        let mut problems = Problems::new();
        let document = convert_ast_to_document(&tree, &mut problems).expect("document should build");

        assert!(problems.is_empty());
        assert_eq!(document.font_faces.len(), 1);
        let font_face = &document.font_faces[0];
        assert_eq!(font_face.font_family, "Lato");
        assert_eq!(
            font_face.first_source().map(ToString::to_string),
            Some("url(\"Lato.woff\") format(\"woff\")".to_string())
        );

        assert_eq!(document.keyframes.len(), 1);
        assert_eq!(document.keyframes[0].name, "pulse");
        assert!(document.keyframes[0].webkit);
        assert_eq!(document.keyframes[0].to_string(), "@-webkit-keyframes pulse");
    }
}
