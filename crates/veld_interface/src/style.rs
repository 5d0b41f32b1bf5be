//! Boundary traits between the style subsystem and the rest of the
//! compiler: the symbol table, the compilation-unit graph, the embed
//! factory, library archives and target settings. The style crate only
//! ever talks to these traits; the driver supplies the implementations.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use veld_shared::errors::CssResult;
use veld_shared::location::SourceSpan;
use veld_shared::node::Node;
use veld_shared::problems::Problems;

/// A class or interface definition owned by the external symbol table.
pub trait Definition: Clone + Eq + Hash + Debug {
    /// Fully qualified, dot-separated name, e.g. `controls.Button`.
    fn qualified_name(&self) -> &str;
}

/// An `Embed(...)` property value, reduced to what the embed factory needs.
#[derive(Debug)]
pub struct EmbedRequest<'a> {
    /// Raw text between the parentheses of the `Embed(...)` call
    pub raw_arguments: &'a str,
    /// Where the call appears, for problem reporting
    pub span: &'a SourceSpan,
}

/// Resolution services supplied by the symbol table and unit graph.
pub trait SymbolResolver {
    type Definition: Definition;
    /// Opaque compilation unit handle
    type Unit: Clone + Eq + Hash + Debug;

    /// Resolve a qualified name to a definition. `None` when the name does
    /// not resolve; the caller reports the problem.
    fn resolve_definition(&self, qname: &str) -> Option<Self::Definition>;

    /// The compilation unit that owns a definition. Synthetic definitions
    /// have none.
    fn compilation_unit_of(&self, definition: &Self::Definition) -> Option<Self::Unit>;

    /// Turn an `Embed(...)` call into an embed compilation unit. The factory
    /// reports its own problems; `None` means it already did so.
    fn resolve_embed(&self, request: &EmbedRequest<'_>, problems: &mut Problems) -> Option<Self::Unit>;
}

/// One file inside a library archive. The archive manager has already
/// staged the bytes and run the external parser; this subsystem only reads
/// the materialized parse tree.
pub trait StyleFileEntry {
    /// Entry name inside the archive, e.g. `defaults.css`
    fn name(&self) -> &str;

    /// The style parse tree for this entry.
    fn parse_tree(&self) -> CssResult<Node>;
}

/// A library archive that can contribute style documents.
pub trait StyleArchive {
    type Entry: StyleFileEntry;

    /// Stable identity of the archive, normally its normalized path.
    fn identity(&self) -> &str;

    /// All files in the archive, keyed by entry name.
    fn files(&self) -> &BTreeMap<String, Self::Entry>;

    /// The archive's default style entry for the given compatibility
    /// version, when the archive ships one.
    fn default_style_entry(&self, compatibility_version: Option<u32>) -> Option<&Self::Entry>;
}

/// Project settings the style subsystem consults.
pub trait TargetSettings {
    /// Style files excluded from theme/default aggregation, as
    /// `archive.ext:entry.css` keys or plain entry names.
    fn excluded_style_files(&self) -> &[String];

    /// Configured compatibility version, encoded as
    /// `major * 1_000_000 + minor * 1_000 + revision`.
    fn compatibility_version(&self) -> Option<u32>;
}
