//! Project-level style manager: decides which rules a compilation
//! activates, collects the compilation units those rules depend on, and
//! aggregates the default/theme style documents contributed by library
//! archives.

use crate::ast::convert_ast_to_document;
use crate::cache::{CacheKey, CssDocumentCache};
use crate::document::CssDocument;
use crate::matcher;
use crate::session::CssCompilationSession;
use indexmap::{IndexMap, IndexSet};
use std::path::Path;
use std::sync::Arc;
use veld_interface::style::{Definition, StyleArchive, StyleFileEntry, SymbolResolver, TargetSettings};
use veld_shared::location::SourceSpan;
use veld_shared::problems::{Problem, ProblemKind, Problems};

/// Compatibility versions at or below this threshold select the legacy
/// cascade behaviors. Versions encode as `major * 1_000_000 +
/// minor * 1_000 + revision`.
pub const LEGACY_DIALECT_VERSION: u32 = 3_000_000;

/// Entry name of an archive's default style document
pub const DEFAULTS_STYLE_FILENAME: &str = "defaults.css";

pub struct StyleManager<R> {
    resolver: R,
    excluded_style_files: Vec<String>,
    compatibility_version: Option<u32>,
    cache: Arc<CssDocumentCache>,
}

impl<R: SymbolResolver> StyleManager<R> {
    pub fn new(resolver: R, settings: &impl TargetSettings, cache: Arc<CssDocumentCache>) -> Self {
        Self {
            resolver,
            excluded_style_files: settings.excluded_style_files().to_vec(),
            compatibility_version: settings.compatibility_version(),
            cache,
        }
    }

    /// True when the configured compatibility version selects the legacy
    /// cascade behaviors.
    #[must_use]
    pub fn is_legacy_dialect(&self) -> bool {
        self.compatibility_version
            .is_some_and(|version| version <= LEGACY_DIALECT_VERSION)
    }

    /// Finds all compilation units a style document drags into the build,
    /// given the definitions reachable from the current compilation.
    ///
    /// Rules whose selector group matches a reachable definition are
    /// activated and recorded in the session; their property values are
    /// walked for `ClassReference(...)` and `Embed(...)` dependencies. An
    /// unresolved class reference reports a problem and is skipped, it
    /// never aborts the pass.
    pub fn dependent_compilation_units(
        &self,
        session: &mut CssCompilationSession<R::Unit>,
        document: &CssDocument,
        reachable: &[R::Definition],
        problems: &mut Problems,
    ) -> IndexSet<R::Unit> {
        let qnames: IndexSet<String> = reachable
            .iter()
            .map(|definition| definition.qualified_name().to_string())
            .collect();

        let matched = matcher::matched_rules(document, &qnames, self.is_legacy_dialect());
        log::debug!("{} of {} style rules activated", matched.len(), document.rules.len());

        let mut class_references: IndexMap<String, R::Definition> = IndexMap::new();
        let mut embed_units: IndexSet<R::Unit> = IndexSet::new();
        for &rule in &matched {
            matcher::resolve_dependencies(
                &self.resolver,
                session,
                rule,
                &mut class_references,
                &mut embed_units,
                problems,
            );
        }

        let mut units = self.compilation_units_for_definitions(&class_references, problems);

        // only activated rules reach code generation
        for rule in matched {
            session.record_activated(rule);
        }

        units.extend(embed_units);
        units
    }

    /// Maps resolved class references to their compilation units. A
    /// definition may lack a unit (synthetic definitions do), but then a
    /// problem for that exact qualified name must already be on record.
    fn compilation_units_for_definitions(
        &self,
        class_references: &IndexMap<String, R::Definition>,
        problems: &Problems,
    ) -> IndexSet<R::Unit> {
        let mut units = IndexSet::new();
        for (qname, definition) in class_references {
            match self.resolver.compilation_unit_of(definition) {
                Some(unit) => {
                    units.insert(unit);
                }
                None => {
                    debug_assert!(
                        problem_created_for_unresolved_reference(problems, qname),
                        "no compilation unit for class '{qname}'; expected an unresolved-class-reference problem"
                    );
                }
            }
        }
        units
    }

    /// One default style document per archive, built through the cache.
    /// Archives without a defaults entry contribute nothing; explicitly
    /// excluded entries are skipped silently.
    pub fn default_style_documents<A: StyleArchive>(
        &self,
        archives: &[A],
        problems: &mut Problems,
    ) -> Vec<Arc<CssDocument>> {
        archives
            .iter()
            .filter_map(|archive| self.default_style_document(archive, problems))
            .collect()
    }

    /// Every style document the archives contribute: defaults plus each
    /// archive's miscellaneous (non-default) style entries.
    pub fn theme_style_documents<A: StyleArchive>(
        &self,
        archives: &[A],
        problems: &mut Problems,
    ) -> Vec<Arc<CssDocument>> {
        let mut documents = vec![];
        for archive in archives {
            if let Some(document) = self.default_style_document(archive, problems) {
                documents.push(document);
            }
            for (name, entry) in archive.files() {
                if !name.to_ascii_lowercase().ends_with(".css") || name.contains("default") {
                    continue;
                }
                if self.is_excluded(archive, name) {
                    continue;
                }
                documents.push(self.document_for_entry(archive, entry, problems));
            }
        }
        documents
    }

    fn default_style_document<A: StyleArchive>(&self, archive: &A, problems: &mut Problems) -> Option<Arc<CssDocument>> {
        let entry = archive.default_style_entry(self.compatibility_version)?;
        if self.is_excluded(archive, entry.name()) {
            log::debug!("skipping excluded style file '{}' of '{}'", entry.name(), archive.identity());
            return None;
        }
        Some(self.document_for_entry(archive, entry, problems))
    }

    fn document_for_entry<A: StyleArchive>(
        &self,
        archive: &A,
        entry: &A::Entry,
        problems: &mut Problems,
    ) -> Arc<CssDocument> {
        let key = CacheKey::for_archive_entry(archive.identity(), entry.name());
        self.cache
            .get_or_build(key, problems, |problems| build_document_from_entry(entry, problems))
    }

    /// Exclusion keys are either `archive.ext:entry.css` or a bare entry
    /// name.
    fn is_excluded<A: StyleArchive>(&self, archive: &A, entry_name: &str) -> bool {
        let archive_file = Path::new(archive.identity())
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_else(|| archive.identity());
        let qualified = format!("{archive_file}:{entry_name}");
        self.excluded_style_files
            .iter()
            .any(|excluded| excluded == &qualified || excluded == entry_name)
    }
}

fn build_document_from_entry<E: StyleFileEntry>(entry: &E, problems: &mut Problems) -> CssDocument {
    let span = SourceSpan::new(entry.name(), Default::default(), Default::default());
    let tree = match entry.parse_tree() {
        Ok(tree) => tree,
        Err(error) => {
            problems.push(Problem::new(
                ProblemKind::ParseProblem { message: error.to_string() },
                &span,
            ));
            return CssDocument::empty();
        }
    };
    match convert_ast_to_document(&tree, problems) {
        Ok(document) => document,
        Err(error) => {
            problems.push(Problem::new(
                ProblemKind::ParseProblem { message: error.to_string() },
                &span,
            ));
            CssDocument::empty()
        }
    }
}

fn problem_created_for_unresolved_reference(problems: &[Problem], qname: &str) -> bool {
    problems
        .iter()
        .any(|problem| matches!(&problem.kind, ProblemKind::UnresolvedClassReference { qname: q } if q == qname))
}
