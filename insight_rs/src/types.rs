//! Report types produced by the analyzer.
//!
//! Everything here serializes to camelCase JSON. Maps are insertion ordered so
//! the JSON lists components, functions and props in the order they were
//! discovered in the source.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A point in the analyzed source. `line` and `column` are 1-based, `offset`
/// is a byte offset into the file text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecifierKind {
    Default,
    Named,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifier {
    pub kind: SpecifierKind,
    pub local_name: String,
    /// Name exported by the source module. Absent for default and namespace
    /// specifiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    Variable,
    Type,
    Interface,
    Enum,
    Reexport,
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    pub name: String,
    pub kind: ExportKind,
    pub is_default: bool,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    FunctionComponent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInsight {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub state_variables: Vec<String>,
    pub props: IndexSet<String>,
    pub child_components: IndexSet<String>,
    /// One entry per hook call site inside the component.
    pub hooks: Vec<String>,
    pub code: String,
    pub range: SourceRange,
    pub usages: Vec<SourceRange>,
}

impl ComponentInsight {
    pub fn new(code: String, range: SourceRange) -> Self {
        Self {
            kind: ComponentKind::FunctionComponent,
            state_variables: Vec::new(),
            props: IndexSet::new(),
            child_components: IndexSet::new(),
            hooks: Vec::new(),
            code,
            range,
            usages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInsight {
    pub params: Vec<String>,
    /// ESTree kind of each top-level statement in the body.
    pub body: Vec<String>,
    pub calls: Vec<String>,
    pub code: String,
    pub range: SourceRange,
    pub usages: Vec<SourceRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInsight {
    pub initial_value: String,
    pub setter_name: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropInsight {
    pub components: IndexSet<String>,
    /// Rendered value from the first occurrence of the prop.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    ShapeMismatch,
}

/// Non-fatal diagnostic. The declaration it refers to is left out of the
/// report; everything else is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightWarning {
    pub kind: WarningKind,
    pub message: String,
    pub range: SourceRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInsight {
    pub file_path: String,
    pub language: Language,
    pub jsx: bool,
    pub loc: usize,
    pub imports: Vec<ImportEntry>,
    pub exports: Vec<String>,
    pub export_details: Vec<ExportEntry>,
    pub components: IndexMap<String, ComponentInsight>,
    pub functions: IndexMap<String, FunctionInsight>,
    /// Hook name -> invoking component, one entry per call site.
    pub hooks: IndexMap<String, Vec<String>>,
    pub state_variables: IndexMap<String, StateInsight>,
    pub props: IndexMap<String, PropInsight>,
    /// Distinct import sources in discovery order.
    pub dependencies: Vec<String>,
    /// Absolute paths of relative `from '...'` specifiers found in the raw
    /// text. Best effort: the scan does not skip comments or strings.
    pub file_references: Vec<String>,
    pub warnings: Vec<InsightWarning>,
}

impl FileInsight {
    pub fn new(file_path: String, language: Language, jsx: bool) -> Self {
        Self {
            file_path,
            language,
            jsx,
            loc: 0,
            imports: Vec::new(),
            exports: Vec::new(),
            export_details: Vec::new(),
            components: IndexMap::new(),
            functions: IndexMap::new(),
            hooks: IndexMap::new(),
            state_variables: IndexMap::new(),
            props: IndexMap::new(),
            dependencies: Vec::new(),
            file_references: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// A report together with the text it was computed from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedFile {
    #[serde(flatten)]
    pub insight: FileInsight,
    pub file_content: String,
}
