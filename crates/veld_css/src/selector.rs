use std::fmt::{Display, Formatter};
use veld_shared::location::SourceSpan;

/// The universal selector `*`
pub const UNIVERSAL_SELECTOR: &str = "*";

/// Kind of a condition attached to a simple selector, with the prefix used
/// when re-serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    /// `.className`
    Class,
    /// `#id`
    Id,
    /// `:state`
    Pseudo,
    /// `[attribute]`
    Attribute,
}

impl ConditionKind {
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            ConditionKind::Class => ".",
            ConditionKind::Id => "#",
            ConditionKind::Pseudo => ":",
            ConditionKind::Attribute => "[",
        }
    }
}

/// One condition on a simple selector.
#[derive(Debug, Clone, PartialEq)]
pub struct CssSelectorCondition {
    pub kind: ConditionKind,
    pub value: String,
    pub span: SourceSpan,
}

impl Display for CssSelectorCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ConditionKind::Attribute => write!(f, "[{}]", self.value),
            _ => write!(f, "{}{}", self.kind.prefix(), self.value),
        }
    }
}

/// How a selector is reached from its ancestor in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorKind {
    Descendant,
    Child,
    Sibling,
}

impl Display for CombinatorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CombinatorKind::Descendant => write!(f, " "),
            CombinatorKind::Child => write!(f, ">"),
            CombinatorKind::Sibling => write!(f, "+"),
        }
    }
}

/// "This selector, reached via `kind` from `selector`."
#[derive(Debug, Clone, PartialEq)]
pub struct CssCombinator {
    pub selector: CssSelector,
    pub kind: CombinatorKind,
}

/// A simple selector, optionally chained to an ancestor selector.
///
/// At least one of the element name, namespace prefix or conditions is
/// present; the builder never produces a fully empty selector.
#[derive(Debug, Clone, PartialEq)]
pub struct CssSelector {
    pub span: SourceSpan,
    pub combinator: Option<Box<CssCombinator>>,
    pub namespace_prefix: Option<String>,
    pub element_name: Option<String>,
    pub conditions: Vec<CssSelectorCondition>,
}

impl CssSelector {
    pub fn is_universal(&self) -> bool {
        self.element_name.as_deref() == Some(UNIVERSAL_SELECTOR)
    }

    /// Legacy classification: a selector is "advanced" when it uses any
    /// syntax the old cascade treated specially, i.e. a namespace prefix, a
    /// non-class condition, a combinator chain, or the universal selector.
    pub fn is_advanced(&self) -> bool {
        self.namespace_prefix.is_some()
            || self.combinator.is_some()
            || self.is_universal()
            || self.conditions.iter().any(|c| c.kind != ConditionKind::Class)
    }

    /// The full selector chain in ancestors-first order, ending with this
    /// selector.
    #[must_use]
    pub fn chain(&self) -> Vec<&CssSelector> {
        let mut chain = vec![];
        let mut current = self;
        loop {
            chain.insert(0, current);
            match &current.combinator {
                Some(combinator) => current = &combinator.selector,
                None => break,
            }
        }
        chain
    }

    fn fmt_simple(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.namespace_prefix {
            write!(f, "{}|", prefix)?;
        }
        if let Some(element) = &self.element_name {
            write!(f, "{}", element)?;
        }
        for condition in &self.conditions {
            write!(f, "{}", condition)?;
        }
        Ok(())
    }
}

impl Display for CssSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(combinator) = &self.combinator {
            match combinator.kind {
                CombinatorKind::Descendant => write!(f, "{} ", combinator.selector)?,
                kind => write!(f, "{} {} ", combinator.selector, kind)?,
            }
        }
        self.fmt_simple(f)
    }
}
