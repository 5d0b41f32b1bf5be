use crate::document::CssRule;
use indexmap::IndexMap;
use veld_shared::location::SourceSpan;

/// Stable identity of a model node: source path plus start offset. Two
/// nodes from one parse never share a key.
pub type NodeKey = (String, usize);

#[must_use]
pub fn node_key(span: &SourceSpan) -> NodeKey {
    (span.path().to_string(), span.start.offset)
}

/// Per-compilation accumulator the resolver fills in while it walks style
/// documents. The emitter later serializes only the activated rules, so
/// rules nothing reachable matched never make it into the output.
///
/// Insertion order is kept so emission stays deterministic.
#[derive(Debug)]
pub struct CssCompilationSession<U> {
    /// Rules whose selector group matched a reachable definition
    pub activated_rules: IndexMap<NodeKey, CssRule>,
    /// Embed units already produced for `Embed(...)` values, by call site
    pub resolved_embeds: IndexMap<NodeKey, U>,
}

impl<U> CssCompilationSession<U> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            activated_rules: IndexMap::new(),
            resolved_embeds: IndexMap::new(),
        }
    }

    pub fn record_activated(&mut self, rule: &CssRule) {
        self.activated_rules.insert(node_key(&rule.span), rule.clone());
    }

    #[must_use]
    pub fn is_activated(&self, rule: &CssRule) -> bool {
        self.activated_rules.contains_key(&node_key(&rule.span))
    }
}

impl<U> Default for CssCompilationSession<U> {
    fn default() -> Self {
        Self::new()
    }
}
