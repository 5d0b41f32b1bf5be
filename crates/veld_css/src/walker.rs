use crate::document::CssDocument;
use itertools::Itertools;
use std::io::Write;

/// The walker prints a document model as an indented tree, for diagnostics
/// and round-trip tests.
pub struct Walker<'a> {
    root: &'a CssDocument,
}

impl<'a> Walker<'a> {
    #[must_use]
    pub fn new(root: &'a CssDocument) -> Self {
        Self { root }
    }

    pub fn walk_stdout(&self) {
        let _ = inner_walk(self.root, &mut std::io::stdout());
    }

    #[must_use]
    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = inner_walk(self.root, &mut output);

        String::from_utf8_lossy(&output).to_string()
    }
}

fn inner_walk(document: &CssDocument, f: &mut dyn Write) -> Result<(), std::io::Error> {
    writeln!(f, "[Document ({} rules)]", document.rules.len())?;

    for namespace in &document.namespaces {
        writeln!(
            f,
            "  [Namespace] prefix: {} uri: {}",
            namespace.prefix.as_deref().unwrap_or("(default)"),
            namespace.uri
        )?;
    }

    for font_face in &document.font_faces {
        writeln!(f, "  [FontFace] family: {}", font_face.font_family)?;
        for source in &font_face.sources {
            writeln!(f, "    [Source] {}", source)?;
        }
    }

    for keyframes in &document.keyframes {
        writeln!(f, "  [KeyFrames] {}", keyframes)?;
    }

    for rule in &document.rules {
        writeln!(f, "  [Rule]")?;
        if !rule.media_queries.is_empty() {
            writeln!(f, "    [MediaQueries] {}", rule.media_queries.iter().join(" and "))?;
        }
        writeln!(f, "    [Selectors] {}", rule.selector_group.iter().join(", "))?;
        for property in &rule.properties {
            writeln!(f, "    [Property] {} = {}", property.name, property.value)?;
        }
    }
    Ok(())
}
