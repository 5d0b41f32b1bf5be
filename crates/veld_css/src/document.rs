use crate::selector::CssSelector;
use crate::value::{CssValue, CssValueKind};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use veld_shared::location::SourceSpan;
use veld_shared::problems::{Problem, ProblemKind, Problems};

/// Required `@font-face` property holding the font sources
pub const FONT_FACE_SRC: &str = "src";
/// Required `@font-face` property holding the family name
pub const FONT_FACE_FONT_FAMILY: &str = "fontFamily";

/// Normalizes a hyphenated property name to camelCase
/// (`font-family` → `fontFamily`). CamelCase names pass through unchanged.
#[must_use]
pub fn normalize_property_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// One `name: value` entry of a rule or `@font-face` block.
#[derive(Debug, Clone, PartialEq)]
pub struct CssProperty {
    pub span: SourceSpan,
    /// Normalized camelCase name
    pub name: String,
    /// Name exactly as written in the source
    pub raw_name: String,
    pub value: CssValue,
}

impl CssProperty {
    #[must_use]
    pub fn new(raw_name: &str, value: CssValue, span: SourceSpan) -> Self {
        Self {
            span,
            name: normalize_property_name(raw_name),
            raw_name: raw_name.to_string(),
            value,
        }
    }
}

impl Display for CssProperty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {};", self.name, self.value)
    }
}

/// An `@namespace` statement. The default namespace has no prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct CssNamespaceDefinition {
    pub span: SourceSpan,
    pub prefix: Option<String>,
    pub uri: String,
}

impl Display for CssNamespaceDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "@namespace {} \"{}\";", prefix, self.uri),
            None => write!(f, "@namespace \"{}\";", self.uri),
        }
    }
}

/// One condition of an `@media` prelude, kept as raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct CssMediaQueryCondition {
    pub span: SourceSpan,
    pub value: String,
}

impl Display for CssMediaQueryCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// One style rule: optional media conditions, a non-empty selector group
/// and the declared properties.
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub span: SourceSpan,
    pub media_queries: Vec<CssMediaQueryCondition>,
    pub selector_group: Vec<CssSelector>,
    pub properties: Vec<CssProperty>,
}

impl Display for CssRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut indent = "";
        if !self.media_queries.is_empty() {
            let conditions = self
                .media_queries
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" and ");
            writeln!(f, "@media {} {{", conditions)?;
            indent = "    ";
        }

        let selectors = self
            .selector_group
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "{}{} {{", indent, selectors)?;
        for property in &self.properties {
            writeln!(f, "{}    {}", indent, property)?;
        }
        write!(f, "{}}}", indent)?;

        if !self.media_queries.is_empty() {
            write!(f, "\n}}")?;
        }
        Ok(())
    }
}

/// An `@font-face` statement derived from its property list.
#[derive(Debug, Clone, PartialEq)]
pub struct CssFontFace {
    pub span: SourceSpan,
    /// Everything the `src` property listed, in source order
    pub sources: Vec<CssValue>,
    pub font_family: String,
    pub font_style: String,
    pub font_weight: String,
    pub embed_as_cff: bool,
    pub advanced_anti_aliasing: bool,
}

impl CssFontFace {
    /// Builds a font face from an `@font-face` property list. `src` and
    /// `fontFamily` are required; their absence fails this one node (a
    /// problem is recorded and `None` returned) without affecting the rest
    /// of the document.
    pub fn from_properties(properties: &[CssProperty], span: SourceSpan, problems: &mut Problems) -> Option<Self> {
        let find = |name: &str| properties.iter().find(|p| p.name == name);

        let Some(src) = find(FONT_FACE_SRC) else {
            problems.push(Problem::new(
                ProblemKind::FontFaceMissingProperty {
                    property: FONT_FACE_SRC.to_string(),
                },
                &span,
            ));
            return None;
        };
        let Some(family) = find(FONT_FACE_FONT_FAMILY).and_then(|p| p.value.as_text()) else {
            problems.push(Problem::new(
                ProblemKind::FontFaceMissingProperty {
                    property: FONT_FACE_FONT_FAMILY.to_string(),
                },
                &span,
            ));
            return None;
        };

        // src is a single source call or a comma list of them
        let sources = match &src.value.kind {
            CssValueKind::Multi { elements } => elements.clone(),
            _ => vec![src.value.clone()],
        };

        let text_or = |name: &str, default: &str| {
            find(name)
                .and_then(|p| p.value.as_text())
                .unwrap_or(default)
                .to_string()
        };
        let flag = |name: &str| {
            find(name)
                .and_then(|p| p.value.as_text())
                .map_or(true, |text| !text.eq_ignore_ascii_case("false"))
        };

        Some(Self {
            span,
            sources,
            font_family: family.to_string(),
            font_style: text_or("fontStyle", "normal"),
            font_weight: text_or("fontWeight", "normal"),
            embed_as_cff: flag("embedAsCFF"),
            advanced_anti_aliasing: flag("advancedAntiAliasing"),
        })
    }

    /// The primary source, i.e. the first entry of the `src` list.
    #[must_use]
    pub fn first_source(&self) -> Option<&CssValue> {
        self.sources.first()
    }
}

/// An `@keyframes` / `@-webkit-keyframes` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CssKeyFrames {
    pub span: SourceSpan,
    pub name: String,
    pub webkit: bool,
}

impl Display for CssKeyFrames {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.webkit {
            write!(f, "@-webkit-keyframes {}", self.name)
        } else {
            write!(f, "@keyframes {}", self.name)
        }
    }
}

/// A complete style document. Immutable once built; the prefix lookup map
/// is computed at construction, with the default namespace stored under the
/// empty-string key and later definitions winning over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct CssDocument {
    pub rules: Vec<CssRule>,
    pub namespaces: Vec<CssNamespaceDefinition>,
    pub font_faces: Vec<CssFontFace>,
    pub keyframes: Vec<CssKeyFrames>,
    prefix_lookup: HashMap<String, usize>,
}

impl CssDocument {
    #[must_use]
    pub fn new(
        rules: Vec<CssRule>,
        namespaces: Vec<CssNamespaceDefinition>,
        font_faces: Vec<CssFontFace>,
        keyframes: Vec<CssKeyFrames>,
    ) -> Self {
        let mut prefix_lookup = HashMap::new();
        for (index, namespace) in namespaces.iter().enumerate() {
            let key = namespace.prefix.clone().unwrap_or_default();
            prefix_lookup.insert(key, index);
        }
        Self {
            rules,
            namespaces,
            font_faces,
            keyframes,
            prefix_lookup,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![], vec![], vec![], vec![])
    }

    /// Looks up a namespace by prefix; the empty string finds the default
    /// namespace.
    #[must_use]
    pub fn namespace_definition(&self, prefix: &str) -> Option<&CssNamespaceDefinition> {
        self.prefix_lookup.get(prefix).map(|&index| &self.namespaces[index])
    }

    #[must_use]
    pub fn default_namespace_definition(&self) -> Option<&CssNamespaceDefinition> {
        self.namespace_definition("")
    }
}

impl Default for CssDocument {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veld_shared::location::SourceSpan;

    fn span() -> SourceSpan {
        SourceSpan::synthetic()
    }

    #[test]
    fn property_name_normalization() {
        assert_eq!(normalize_property_name("font-family"), "fontFamily");
        assert_eq!(normalize_property_name("fontFamily"), "fontFamily");
        assert_eq!(normalize_property_name("color"), "color");
        assert_eq!(normalize_property_name("border-top-left-radius"), "borderTopLeftRadius");
    }

    fn font_face_properties(entries: &[(&str, CssValue)]) -> Vec<CssProperty> {
        entries
            .iter()
            .map(|(name, value)| CssProperty::new(name, value.clone(), span()))
            .collect()
    }

    #[test]
    fn font_face_defaults() {
        let properties = font_face_properties(&[
            ("src", CssValue::url("url", "\"Lato.ttf\"", None, span())),
            ("fontFamily", CssValue::keyword("Lato", span())),
        ]);
        let mut problems = Problems::new();
        let font_face = CssFontFace::from_properties(&properties, span(), &mut problems)
            .expect("font face should build");

        assert!(problems.is_empty());
        assert_eq!(font_face.font_family, "Lato");
        assert_eq!(font_face.font_style, "normal");
        assert_eq!(font_face.font_weight, "normal");
        assert!(font_face.embed_as_cff);
        assert!(font_face.advanced_anti_aliasing);
        assert!(font_face.first_source().is_some());
    }

    #[test]
    fn font_face_explicit_false_flags() {
        let properties = font_face_properties(&[
            ("src", CssValue::url("url", "\"Lato.ttf\"", None, span())),
            ("fontFamily", CssValue::keyword("Lato", span())),
            ("embedAsCFF", CssValue::string("\"false\"", span())),
            ("fontWeight", CssValue::keyword("bold", span())),
        ]);
        let mut problems = Problems::new();
        let font_face =
            CssFontFace::from_properties(&properties, span(), &mut problems).expect("font face should build");

        assert!(!font_face.embed_as_cff);
        assert!(font_face.advanced_anti_aliasing);
        assert_eq!(font_face.font_weight, "bold");
    }

    #[test]
    fn font_face_missing_src_is_fatal_to_the_node() {
        let properties = font_face_properties(&[("fontFamily", CssValue::keyword("Lato", span()))]);
        let mut problems = Problems::new();
        let font_face = CssFontFace::from_properties(&properties, span(), &mut problems);

        assert!(font_face.is_none());
        assert_eq!(problems.len(), 1);
        assert!(matches!(
            &problems[0].kind,
            ProblemKind::FontFaceMissingProperty { property } if property == "src"
        ));
    }

    #[test]
    fn font_face_multi_value_src_keeps_all_sources() {
        let src = CssValue::multi(
            vec![
                CssValue::url("url", "\"Lato.woff\"", Some("woff".to_string()), span()),
                CssValue::url("local", "\"Lato\"", None, span()),
            ],
            span(),
        );
        let properties = font_face_properties(&[
            ("src", src),
            ("fontFamily", CssValue::keyword("Lato", span())),
        ]);
        let mut problems = Problems::new();
        let font_face =
            CssFontFace::from_properties(&properties, span(), &mut problems).expect("font face should build");

        assert_eq!(font_face.sources.len(), 2);
        assert_eq!(
            font_face.first_source().map(ToString::to_string),
            Some("url(\"Lato.woff\") format(\"woff\")".to_string())
        );
    }

    #[test]
    fn namespace_lookup_prefers_the_last_definition() {
        let make = |prefix: Option<&str>, uri: &str| CssNamespaceDefinition {
            span: span(),
            prefix: prefix.map(str::to_string),
            uri: uri.to_string(),
        };
        let document = CssDocument::new(
            vec![],
            vec![
                make(None, "library://ns.example.com/basic"),
                make(Some("s"), "library://ns.example.com/spark"),
                make(Some("s"), "library://ns.example.com/spark2"),
            ],
            vec![],
            vec![],
        );

        assert_eq!(
            document.default_namespace_definition().map(|n| n.uri.as_str()),
            Some("library://ns.example.com/basic")
        );
        assert_eq!(
            document.namespace_definition("s").map(|n| n.uri.as_str()),
            Some("library://ns.example.com/spark2")
        );
        assert!(document.namespace_definition("mx").is_none());
    }
}
