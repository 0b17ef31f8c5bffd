//! Named node kinds of the FreeMarker grammar.
//!
//! The compiled grammar produces syntax nodes whose kind strings are stable
//! across artifact builds; this enum is the typed view of that vocabulary.
//! Parsing is via [`FromStr`] over the snake_case grammar names, and
//! [`Display`](std::fmt::Display) renders them back unchanged.

use std::fmt;
use std::str::FromStr;

const DIRECTIVE_ASSIGN: &str = "https://freemarker.apache.org/docs/ref_directive_assign.html";
const DIRECTIVE_IMPORT: &str = "https://freemarker.apache.org/docs/ref_directive_import.html";
const DIRECTIVE_LIST_BREAK: &str =
    "https://freemarker.apache.org/docs/ref_directive_list.html#ref_list_break";
const COMPARISON_EXPRESSION: &str =
    "https://freemarker.apache.org/docs/dgui_template_exp.html#dgui_template_exp_comparison";
const TOPLEVEL_VARIABLE: &str =
    "https://freemarker.apache.org/docs/dgui_template_exp.html#dgui_template_exp_var_toplevel";

/// A named node kind produced by the FreeMarker grammar.
///
/// Variants map one-to-one onto the snake_case rule names in the compiled
/// artifact (`assign_clause`, `if_begin`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum NodeKind {
    AmbiguousStringLiteral,
    AssignBegin,
    AssignClause,
    AssignClose,
    AssignOperator,
    BinaryOperator,
    BooleanFalse,
    BooleanTrue,
    BreakStmt,
    BuiltinName,
    CaseBegin,
    CaseClause,
    CloseTag,
    Comment,
    DefaultBegin,
    DefaultClause,
    DefaultOperator,
    DeprecatedEqualOperator,
    ElseBegin,
    ElseClause,
    ElseifBegin,
    EqualOperator,
    FtlBegin,
    FunctionBegin,
    FunctionClause,
    FunctionClose,
    FunctionName,
    GreaterThanEqualOperator,
    GreaterThanOperator,
    Identifier,
    IfBegin,
    IfClause,
    IfClose,
    ImportAlias,
    ImportBegin,
    ImportPath,
    ImportStmt,
    InterpolationPrepend,
    KeywordAs,
    ListBegin,
    ListClause,
    ListClose,
    LocalBegin,
    LocalClause,
    LocalClose,
    MacroBegin,
    MacroCallBegin,
    MacroCallEnd,
    MacroClause,
    MacroClose,
    MacroCloseTag,
    MacroName,
    MacroNamespace,
    MacroSpecs,
    NegationOperator,
    Number,
    OnBegin,
    OnClause,
    ParameterName,
    ReturnBegin,
    SepBegin,
    SepClose,
    StringLiteral,
    SwitchBegin,
    SwitchClause,
    SwitchClose,
    UndocumentedCloseTag,
    Variable,
}

impl NodeKind {
    /// Returns the snake_case grammar name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::AmbiguousStringLiteral => "ambiguous_string_literal",
            NodeKind::AssignBegin => "assign_begin",
            NodeKind::AssignClause => "assign_clause",
            NodeKind::AssignClose => "assign_close",
            NodeKind::AssignOperator => "assign_operator",
            NodeKind::BinaryOperator => "binary_operator",
            NodeKind::BooleanFalse => "boolean_false",
            NodeKind::BooleanTrue => "boolean_true",
            NodeKind::BreakStmt => "break_stmt",
            NodeKind::BuiltinName => "builtin_name",
            NodeKind::CaseBegin => "case_begin",
            NodeKind::CaseClause => "case_clause",
            NodeKind::CloseTag => "close_tag",
            NodeKind::Comment => "comment",
            NodeKind::DefaultBegin => "default_begin",
            NodeKind::DefaultClause => "default_clause",
            NodeKind::DefaultOperator => "default_operator",
            NodeKind::DeprecatedEqualOperator => "deprecated_equal_operator",
            NodeKind::ElseBegin => "else_begin",
            NodeKind::ElseClause => "else_clause",
            NodeKind::ElseifBegin => "elseif_begin",
            NodeKind::EqualOperator => "equal_operator",
            NodeKind::FtlBegin => "ftl_begin",
            NodeKind::FunctionBegin => "function_begin",
            NodeKind::FunctionClause => "function_clause",
            NodeKind::FunctionClose => "function_close",
            NodeKind::FunctionName => "function_name",
            NodeKind::GreaterThanEqualOperator => "greater_than_equal_operator",
            NodeKind::GreaterThanOperator => "greater_than_operator",
            NodeKind::Identifier => "identifier",
            NodeKind::IfBegin => "if_begin",
            NodeKind::IfClause => "if_clause",
            NodeKind::IfClose => "if_close",
            NodeKind::ImportAlias => "import_alias",
            NodeKind::ImportBegin => "import_begin",
            NodeKind::ImportPath => "import_path",
            NodeKind::ImportStmt => "import_stmt",
            NodeKind::InterpolationPrepend => "interpolation_prepend",
            NodeKind::KeywordAs => "keyword_as",
            NodeKind::ListBegin => "list_begin",
            NodeKind::ListClause => "list_clause",
            NodeKind::ListClose => "list_close",
            NodeKind::LocalBegin => "local_begin",
            NodeKind::LocalClause => "local_clause",
            NodeKind::LocalClose => "local_close",
            NodeKind::MacroBegin => "macro_begin",
            NodeKind::MacroCallBegin => "macro_call_begin",
            NodeKind::MacroCallEnd => "macro_call_end",
            NodeKind::MacroClause => "macro_clause",
            NodeKind::MacroClose => "macro_close",
            NodeKind::MacroCloseTag => "macro_close_tag",
            NodeKind::MacroName => "macro_name",
            NodeKind::MacroNamespace => "macro_namespace",
            NodeKind::MacroSpecs => "macro_specs",
            NodeKind::NegationOperator => "negation_operator",
            NodeKind::Number => "number",
            NodeKind::OnBegin => "on_begin",
            NodeKind::OnClause => "on_clause",
            NodeKind::ParameterName => "parameter_name",
            NodeKind::ReturnBegin => "return_begin",
            NodeKind::SepBegin => "sep_begin",
            NodeKind::SepClose => "sep_close",
            NodeKind::StringLiteral => "string_literal",
            NodeKind::SwitchBegin => "switch_begin",
            NodeKind::SwitchClause => "switch_clause",
            NodeKind::SwitchClose => "switch_close",
            NodeKind::UndocumentedCloseTag => "undocumented_close_tag",
            NodeKind::Variable => "variable",
        }
    }

    /// Returns `true` for clause kinds (directive bodies such as
    /// `assign_clause` or `if_clause`).
    #[must_use]
    pub fn is_clause(self) -> bool {
        self.name().ends_with("_clause")
    }

    /// Returns `true` for operator kinds.
    #[must_use]
    pub fn is_operator(self) -> bool {
        self.name().ends_with("_operator")
    }

    /// Returns the official FreeMarker reference page for this kind, where
    /// one exists.
    #[must_use]
    pub fn reference_url(self) -> Option<&'static str> {
        match self {
            NodeKind::AssignBegin
            | NodeKind::AssignClause
            | NodeKind::AssignClose
            | NodeKind::AssignOperator => Some(DIRECTIVE_ASSIGN),
            NodeKind::ImportAlias
            | NodeKind::ImportBegin
            | NodeKind::ImportPath
            | NodeKind::ImportStmt
            | NodeKind::KeywordAs => Some(DIRECTIVE_IMPORT),
            NodeKind::BreakStmt => Some(DIRECTIVE_LIST_BREAK),
            NodeKind::DeprecatedEqualOperator
            | NodeKind::EqualOperator
            | NodeKind::GreaterThanEqualOperator
            | NodeKind::GreaterThanOperator => Some(COMPARISON_EXPRESSION),
            NodeKind::Variable => Some(TOPLEVEL_VARIABLE),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a known FreeMarker node kind.
#[derive(Debug, thiserror::Error)]
#[error("unknown FreeMarker node kind: {0}")]
pub struct UnknownNodeKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "ambiguous_string_literal" => NodeKind::AmbiguousStringLiteral,
            "assign_begin" => NodeKind::AssignBegin,
            "assign_clause" => NodeKind::AssignClause,
            "assign_close" => NodeKind::AssignClose,
            "assign_operator" => NodeKind::AssignOperator,
            "binary_operator" => NodeKind::BinaryOperator,
            "boolean_false" => NodeKind::BooleanFalse,
            "boolean_true" => NodeKind::BooleanTrue,
            "break_stmt" => NodeKind::BreakStmt,
            "builtin_name" => NodeKind::BuiltinName,
            "case_begin" => NodeKind::CaseBegin,
            "case_clause" => NodeKind::CaseClause,
            "close_tag" => NodeKind::CloseTag,
            "comment" => NodeKind::Comment,
            "default_begin" => NodeKind::DefaultBegin,
            "default_clause" => NodeKind::DefaultClause,
            "default_operator" => NodeKind::DefaultOperator,
            "deprecated_equal_operator" => NodeKind::DeprecatedEqualOperator,
            "else_begin" => NodeKind::ElseBegin,
            "else_clause" => NodeKind::ElseClause,
            "elseif_begin" => NodeKind::ElseifBegin,
            "equal_operator" => NodeKind::EqualOperator,
            "ftl_begin" => NodeKind::FtlBegin,
            "function_begin" => NodeKind::FunctionBegin,
            "function_clause" => NodeKind::FunctionClause,
            "function_close" => NodeKind::FunctionClose,
            "function_name" => NodeKind::FunctionName,
            "greater_than_equal_operator" => NodeKind::GreaterThanEqualOperator,
            "greater_than_operator" => NodeKind::GreaterThanOperator,
            "identifier" => NodeKind::Identifier,
            "if_begin" => NodeKind::IfBegin,
            "if_clause" => NodeKind::IfClause,
            "if_close" => NodeKind::IfClose,
            "import_alias" => NodeKind::ImportAlias,
            "import_begin" => NodeKind::ImportBegin,
            "import_path" => NodeKind::ImportPath,
            "import_stmt" => NodeKind::ImportStmt,
            "interpolation_prepend" => NodeKind::InterpolationPrepend,
            "keyword_as" => NodeKind::KeywordAs,
            "list_begin" => NodeKind::ListBegin,
            "list_clause" => NodeKind::ListClause,
            "list_close" => NodeKind::ListClose,
            "local_begin" => NodeKind::LocalBegin,
            "local_clause" => NodeKind::LocalClause,
            "local_close" => NodeKind::LocalClose,
            "macro_begin" => NodeKind::MacroBegin,
            "macro_call_begin" => NodeKind::MacroCallBegin,
            "macro_call_end" => NodeKind::MacroCallEnd,
            "macro_clause" => NodeKind::MacroClause,
            "macro_close" => NodeKind::MacroClose,
            "macro_close_tag" => NodeKind::MacroCloseTag,
            "macro_name" => NodeKind::MacroName,
            "macro_namespace" => NodeKind::MacroNamespace,
            "macro_specs" => NodeKind::MacroSpecs,
            "negation_operator" => NodeKind::NegationOperator,
            "number" => NodeKind::Number,
            "on_begin" => NodeKind::OnBegin,
            "on_clause" => NodeKind::OnClause,
            "parameter_name" => NodeKind::ParameterName,
            "return_begin" => NodeKind::ReturnBegin,
            "sep_begin" => NodeKind::SepBegin,
            "sep_close" => NodeKind::SepClose,
            "string_literal" => NodeKind::StringLiteral,
            "switch_begin" => NodeKind::SwitchBegin,
            "switch_clause" => NodeKind::SwitchClause,
            "switch_close" => NodeKind::SwitchClose,
            "undocumented_close_tag" => NodeKind::UndocumentedCloseTag,
            "variable" => NodeKind::Variable,
            other => return Err(UnknownNodeKind(other.to_string())),
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        let assign_clause = NodeKind::from_str("assign_clause").unwrap();
        assert_eq!(assign_clause, NodeKind::AssignClause);
        assert_eq!(assign_clause.to_string(), "assign_clause");
    }

    #[test]
    fn test_unknown_kind_is_error() {
        let err = NodeKind::from_str("velocity").unwrap_err();
        assert_eq!(err.to_string(), "unknown FreeMarker node kind: velocity");
    }

    #[test]
    fn test_classification() {
        assert!(NodeKind::IfClause.is_clause());
        assert!(!NodeKind::IfBegin.is_clause());
        assert!(NodeKind::EqualOperator.is_operator());
        assert!(!NodeKind::Comment.is_operator());
    }

    #[test]
    fn test_reference_urls() {
        assert!(NodeKind::AssignClause
            .reference_url()
            .unwrap()
            .ends_with("ref_directive_assign.html"));
        assert!(NodeKind::BreakStmt
            .reference_url()
            .unwrap()
            .ends_with("#ref_list_break"));
        assert_eq!(NodeKind::Comment.reference_url(), None);
    }
}
