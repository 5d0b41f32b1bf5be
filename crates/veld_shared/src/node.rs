//! The raw style parse tree handed to this subsystem by the external
//! lexer/grammar. The style models consume this tree; they never build it
//! from text themselves.

use crate::location::SourceSpan;
use core::fmt::{Display, Formatter};
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    StyleSheet {
        children: Vec<Node>,
    },
    /// `@namespace`, `@font-face`, `@media`, `@keyframes`, `@-webkit-keyframes`
    AtRule {
        name: String,
        prelude: Option<Node>,
        block: Option<Node>,
    },
    Rule {
        prelude: Option<Node>,
        block: Option<Node>,
    },
    Block {
        children: Vec<Node>,
    },
    Declaration {
        property: String,
        value: Vec<Node>,
    },
    SelectorList {
        selectors: Vec<Node>,
    },
    Selector {
        children: Vec<Node>,
    },
    TypeSelector {
        namespace: Option<String>,
        value: String,
    },
    ClassSelector {
        value: String,
    },
    IdSelector {
        value: String,
    },
    PseudoClassSelector {
        value: String,
    },
    AttributeSelector {
        value: String,
    },
    Combinator {
        value: String,
    },
    MediaQueryList {
        media_queries: Vec<Node>,
    },
    /// One media condition, kept as raw text (`all`, `(application-dpi: 240)`)
    MediaQuery {
        value: String,
    },
    Container {
        children: Vec<Node>,
    },
    Ident {
        value: String,
    },
    /// Raw numeric text; splitting value and unit happens in the value model
    Number {
        value: String,
    },
    /// Hex digits without the leading `#`
    Hash {
        value: String,
    },
    /// Raw string literal, quotes included
    Str {
        value: String,
    },
    /// Any `name(...)`; `arguments` is the raw text between the outermost
    /// parentheses, not tokenized at this layer
    Function {
        name: String,
        arguments: String,
    },
    Comma,
}

/// A node is a single element in the parse tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_type: Box<NodeType>,
    pub span: SourceSpan,
}

impl Node {
    #[must_use]
    pub fn new(node_type: NodeType, span: SourceSpan) -> Self {
        Self {
            node_type: Box::new(node_type),
            span,
        }
    }

    pub fn is_stylesheet(&self) -> bool {
        matches!(&*self.node_type, NodeType::StyleSheet { .. })
    }

    pub fn as_stylesheet(&self) -> &Vec<Node> {
        match &self.node_type.deref() {
            &NodeType::StyleSheet { children } => children,
            _ => panic!("Node is not a stylesheet"),
        }
    }

    pub fn is_at_rule(&self) -> bool {
        matches!(&*self.node_type, NodeType::AtRule { .. })
    }

    pub fn as_at_rule(&self) -> (&String, &Option<Node>, &Option<Node>) {
        match &self.node_type.deref() {
            &NodeType::AtRule { name, prelude, block } => (name, prelude, block),
            _ => panic!("Node is not an at-rule"),
        }
    }

    pub fn is_rule(&self) -> bool {
        matches!(&*self.node_type, NodeType::Rule { .. })
    }

    pub fn as_rule(&self) -> (&Option<Node>, &Option<Node>) {
        match &self.node_type.deref() {
            &NodeType::Rule { prelude, block } => (prelude, block),
            _ => panic!("Node is not a rule"),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(&*self.node_type, NodeType::Block { .. })
    }

    pub fn as_block(&self) -> &Vec<Node> {
        match &self.node_type.deref() {
            &NodeType::Block { children } => children,
            _ => panic!("Node is not a block"),
        }
    }

    pub fn is_declaration(&self) -> bool {
        matches!(&*self.node_type, NodeType::Declaration { .. })
    }

    pub fn as_declaration(&self) -> (&String, &Vec<Node>) {
        match &self.node_type.deref() {
            &NodeType::Declaration { property, value } => (property, value),
            _ => panic!("Node is not a declaration"),
        }
    }

    pub fn is_selector_list(&self) -> bool {
        matches!(&*self.node_type, NodeType::SelectorList { .. })
    }

    pub fn as_selector_list(&self) -> &Vec<Node> {
        match &self.node_type.deref() {
            &NodeType::SelectorList { selectors } => selectors,
            _ => panic!("Node is not a selector list"),
        }
    }

    pub fn is_selector(&self) -> bool {
        matches!(&*self.node_type, NodeType::Selector { .. })
    }

    pub fn as_selector(&self) -> &Vec<Node> {
        match &self.node_type.deref() {
            &NodeType::Selector { children } => children,
            _ => panic!("Node is not a selector"),
        }
    }

    pub fn is_type_selector(&self) -> bool {
        matches!(&*self.node_type, NodeType::TypeSelector { .. })
    }

    pub fn as_type_selector(&self) -> (&Option<String>, &String) {
        match &self.node_type.deref() {
            &NodeType::TypeSelector { namespace, value } => (namespace, value),
            _ => panic!("Node is not a type selector"),
        }
    }

    pub fn is_class_selector(&self) -> bool {
        matches!(&*self.node_type, NodeType::ClassSelector { .. })
    }

    pub fn as_class_selector(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::ClassSelector { value } => value,
            _ => panic!("Node is not a class selector"),
        }
    }

    pub fn is_id_selector(&self) -> bool {
        matches!(&*self.node_type, NodeType::IdSelector { .. })
    }

    pub fn as_id_selector(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::IdSelector { value } => value,
            _ => panic!("Node is not an id selector"),
        }
    }

    pub fn is_pseudo_class_selector(&self) -> bool {
        matches!(&*self.node_type, NodeType::PseudoClassSelector { .. })
    }

    pub fn as_pseudo_class_selector(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::PseudoClassSelector { value } => value,
            _ => panic!("Node is not a pseudo class selector"),
        }
    }

    pub fn is_attribute_selector(&self) -> bool {
        matches!(&*self.node_type, NodeType::AttributeSelector { .. })
    }

    pub fn as_attribute_selector(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::AttributeSelector { value } => value,
            _ => panic!("Node is not an attribute selector"),
        }
    }

    pub fn is_combinator(&self) -> bool {
        matches!(&*self.node_type, NodeType::Combinator { .. })
    }

    pub fn as_combinator(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::Combinator { value } => value,
            _ => panic!("Node is not a combinator"),
        }
    }

    pub fn is_media_query_list(&self) -> bool {
        matches!(&*self.node_type, NodeType::MediaQueryList { .. })
    }

    pub fn as_media_query_list(&self) -> &Vec<Node> {
        match &self.node_type.deref() {
            &NodeType::MediaQueryList { media_queries } => media_queries,
            _ => panic!("Node is not a media query list"),
        }
    }

    pub fn is_media_query(&self) -> bool {
        matches!(&*self.node_type, NodeType::MediaQuery { .. })
    }

    pub fn as_media_query(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::MediaQuery { value } => value,
            _ => panic!("Node is not a media query"),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(&*self.node_type, NodeType::Container { .. })
    }

    pub fn as_container(&self) -> &Vec<Node> {
        match &self.node_type.deref() {
            &NodeType::Container { children } => children,
            _ => panic!("Node is not a container"),
        }
    }

    pub fn is_ident(&self) -> bool {
        matches!(&*self.node_type, NodeType::Ident { .. })
    }

    pub fn as_ident(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::Ident { value } => value,
            _ => panic!("Node is not an ident"),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(&*self.node_type, NodeType::Number { .. })
    }

    pub fn as_number(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::Number { value } => value,
            _ => panic!("Node is not a number"),
        }
    }

    pub fn is_hash(&self) -> bool {
        matches!(&*self.node_type, NodeType::Hash { .. })
    }

    pub fn as_hash(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::Hash { value } => value,
            _ => panic!("Node is not a hash"),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(&*self.node_type, NodeType::Str { .. })
    }

    pub fn as_string(&self) -> &String {
        match &self.node_type.deref() {
            &NodeType::Str { value } => value,
            _ => panic!("Node is not a string"),
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(&*self.node_type, NodeType::Function { .. })
    }

    pub fn as_function(&self) -> (&String, &String) {
        match &self.node_type.deref() {
            &NodeType::Function { name, arguments } => (name, arguments),
            _ => panic!("Node is not a function"),
        }
    }

    pub fn is_comma(&self) -> bool {
        matches!(&*self.node_type, NodeType::Comma)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self.node_type.deref() {
            NodeType::Ident { value } => value.clone(),
            NodeType::Number { value } => value.clone(),
            NodeType::Hash { value } => format!("#{}", value),
            NodeType::Str { value } => value.clone(),
            NodeType::Function { name, arguments } => format!("{}({})", name, arguments),
            NodeType::TypeSelector { namespace, value } => {
                let ns = namespace.as_ref().map(|ns| format!("{}|", ns)).unwrap_or_default();
                format!("{}{}", ns, value)
            }
            NodeType::ClassSelector { value } => format!(".{}", value),
            NodeType::IdSelector { value } => format!("#{}", value),
            NodeType::PseudoClassSelector { value } => format!(":{}", value),
            NodeType::AttributeSelector { value } => format!("[{}]", value),
            NodeType::Combinator { value } => value.clone(),
            NodeType::MediaQuery { value } => value.clone(),
            NodeType::Comma => ",".to_string(),
            _ => String::new(),
        };

        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceSpan;

    #[test]
    fn terminal_display() {
        let span = SourceSpan::synthetic();
        assert_eq!(
            Node::new(
                NodeType::Function {
                    name: "ClassReference".to_string(),
                    arguments: "\"spark.skins.ButtonSkin\"".to_string(),
                },
                span.clone(),
            )
            .to_string(),
            "ClassReference(\"spark.skins.ButtonSkin\")"
        );
        assert_eq!(
            Node::new(NodeType::Hash { value: "ff0000".to_string() }, span.clone()).to_string(),
            "#ff0000"
        );
        assert_eq!(
            Node::new(
                NodeType::TypeSelector {
                    namespace: Some("s".to_string()),
                    value: "Button".to_string(),
                },
                span,
            )
            .to_string(),
            "s|Button"
        );
    }

    #[test]
    fn accessors() {
        let span = SourceSpan::synthetic();
        let decl = Node::new(
            NodeType::Declaration {
                property: "color".to_string(),
                value: vec![Node::new(NodeType::Ident { value: "red".to_string() }, span.clone())],
            },
            span,
        );

        assert!(decl.is_declaration());
        let (property, value) = decl.as_declaration();
        assert_eq!(property, "color");
        assert_eq!(value.len(), 1);
        assert!(value[0].is_ident());
    }
}
