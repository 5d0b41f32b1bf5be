//! Style models and style dependency resolution for the Veld compiler.
//!
//! The external grammar hands this crate an already-built parse tree
//! (`veld_shared::node`); `ast` turns it into the typed document model,
//! and `manager` decides which rules a compilation activates and which
//! compilation units those rules drag in.

pub mod ast;
pub mod cache;
pub mod colors;
pub mod document;
pub mod manager;
pub mod matcher;
pub mod selector;
pub mod session;
pub mod value;
pub mod walker;

#[cfg(test)]
mod tests {
    use crate::ast::convert_ast_to_document;
    use crate::walker::Walker;
    use simple_logger::SimpleLogger;
    use veld_shared::location::SourceSpan;
    use veld_shared::node::{Node, NodeType};
    use veld_shared::problems::Problems;

    #[test]
    fn builds_a_document_from_a_parse_tree() {
        SimpleLogger::new().init().ok();

        let span = SourceSpan::synthetic;
        let tree = Node::new(
            NodeType::StyleSheet {
                children: vec![Node::new(
                    NodeType::Rule {
                        prelude: Some(Node::new(
                            NodeType::SelectorList {
                                selectors: vec![Node::new(
                                    NodeType::Selector {
                                        children: vec![Node::new(
                                            NodeType::TypeSelector {
                                                namespace: None,
                                                value: "Application".to_string(),
                                            },
                                            span(),
                                        )],
                                    },
                                    span(),
                                )],
                            },
                            span(),
                        )),
                        block: Some(Node::new(
                            NodeType::Block {
                                children: vec![Node::new(
                                    NodeType::Declaration {
                                        property: "background-color".to_string(),
                                        value: vec![Node::new(
                                            NodeType::Hash { value: "336699".to_string() },
                                            span(),
                                        )],
                                    },
                                    span(),
                                )],
                            },
                            span(),
                        )),
                    },
                    span(),
                )],
            },
            span(),
        );

        let mut problems = Problems::new();
        let document = convert_ast_to_document(&tree, &mut problems).expect("document should build");

        assert!(problems.is_empty());
        assert_eq!(document.rules.len(), 1);
        assert_eq!(document.rules[0].properties[0].name, "backgroundColor");
        assert!(Walker::new(&document).walk_to_string().contains("[Property] backgroundColor = #336699"));
    }
}
