// SPDX-License-Identifier: MPL-2.0

//! Structured diagnostics: kinds, severities, and mechanical fixes.
//!
//! Every report the generator can make is an enumerated [`DiagnosticKind`] carrying the
//! values its message template interpolates, so rendering never has to reach back into the
//! syntax tree. A [`Diagnostic`] anchors a kind to the offending span and may suggest one
//! or more [`Fix`]es, each a small edit script a host tool can apply without re-parsing.

use std::fmt;

use proc_macro2::Span as Span2;
use syn::spanned::Spanned as _;

use crate::Error;

/// How serious a [`Diagnostic`] is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Severity {
    /// Aborts generation for the annotated item.
    Error,
    /// Generation proceeds, but the user probably wants to act.
    Warning,
    /// Informational only.
    Remark,
}

/// What a [`Diagnostic`] is about.
#[derive(Clone, Debug)]
pub(crate) enum DiagnosticKind {
    /// The attribute is attached to an item that is not an enum.
    WrongHostShape,
    /// A boolean argument has a value that is not a boolean literal.
    NonBooleanArgument { name: &'static str },
    /// A case named `all` collides with the generated combination constant.
    CombinationNameConflict { case: String },
    /// A case's bit index does not fit in the storage type.
    IndexOutOfRange { case: String, index: u32, storage: String },
    /// Two cases occupy the same bit index.
    DuplicateIndex { case: String, prior: String, index: u32 },
}

impl DiagnosticKind {
    pub(crate) fn severity(&self) -> Severity {
        match self {
            Self::WrongHostShape | Self::NonBooleanArgument { .. } => Severity::Error,
            Self::CombinationNameConflict { .. } | Self::IndexOutOfRange { .. } => {
                Severity::Warning
            }
            Self::DuplicateIndex { .. } => Severity::Remark,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongHostShape => f.write_str("item must be an enum"),
            Self::NonBooleanArgument { name } => {
                write!(f, "argument `{name}` must be a boolean literal")
            }
            Self::CombinationNameConflict { case } => {
                write!(f, "case `{case}` conflicts with the generated `all` constant")
            }
            Self::IndexOutOfRange { case, index, storage } => {
                write!(f, "case `{case}` has bit index {index}, which is out of range for `{storage}`")
            }
            Self::DuplicateIndex { case, prior, index } => {
                write!(
                    f,
                    "case `{case}` reuses bit index {index}, which is already occupied by case `{prior}`",
                )
            }
        }
    }
}

/// A single edit a host tool can apply mechanically.
#[derive(Clone, Debug)]
pub(crate) enum SourceEdit {
    /// Replace the spanned source range with `text`. Removal is a replacement with nothing.
    Replace { span: Span2, text: String },
    /// Insert `text` immediately after the spanned source range.
    InsertAfter { span: Span2, text: String },
}

impl SourceEdit {
    /// The replacement or inserted text.
    pub(crate) fn text(&self) -> &str {
        match self {
            Self::Replace { text, .. } | Self::InsertAfter { text, .. } => text,
        }
    }
}

/// A suggested fix: a short description plus the edit script realizing it.
#[derive(Clone, Debug)]
pub(crate) struct Fix {
    pub(crate) message: String,
    pub(crate) edits: Vec<SourceEdit>,
}

impl Fix {
    pub(crate) fn new(message: impl Into<String>, edit: SourceEdit) -> Self {
        Self { message: message.into(), edits: vec![edit] }
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for edit in &self.edits {
            let text = edit.text();
            if !text.is_empty() {
                write!(f, ": `{text}`")?;
            }
        }

        Ok(())
    }
}

/// A source-anchored diagnostic record.
#[derive(Clone, Debug)]
pub(crate) struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) span: Span2,
    pub(crate) fixes: Vec<Fix>,
}

impl Diagnostic {
    /// Reports that the attribute is attached to something other than an enum.
    ///
    /// The fix replaces the item's introducer keyword where one cleanly maps onto `enum`.
    pub(crate) fn wrong_host_shape(item: &syn::Item) -> Self {
        let introducer = match item {
            syn::Item::Struct(it) => Some(it.struct_token.span),
            syn::Item::Union(it) => Some(it.union_token.span),
            _ => None,
        };
        let fixes = introducer
            .map(|span| {
                Fix::new(
                    "replace the item introducer",
                    SourceEdit::Replace { span, text: "enum".to_owned() },
                )
            })
            .into_iter()
            .collect();

        Self { kind: DiagnosticKind::WrongHostShape, span: item.span(), fixes }
    }

    /// Reports a boolean argument whose value is not `true` or `false`.
    ///
    /// Two fixes are offered: flip the value to the negation of the argument's default, or
    /// drop the argument entirely.
    pub(crate) fn non_boolean_argument(
        name: &'static str,
        default: bool,
        name_span: Span2,
        value_span: Span2,
    ) -> Self {
        let opposite = (!default).to_string();
        let replace = Fix::new(
            "replace the value",
            SourceEdit::Replace { span: value_span, text: opposite },
        );
        let arg_span = name_span.join(value_span).unwrap_or(name_span);
        let remove = Fix::new(
            "remove the argument",
            SourceEdit::Replace { span: arg_span, text: String::new() },
        );

        Self {
            kind: DiagnosticKind::NonBooleanArgument { name },
            span: value_span,
            fixes: vec![replace, remove],
        }
    }

    /// Reports a case literally named `all`.
    pub(crate) fn combination_name_conflict(ident: &syn::Ident) -> Self {
        let fix = Fix::new(
            "escape the case name",
            SourceEdit::Replace { span: ident.span(), text: "r#all".to_owned() },
        );

        Self {
            kind: DiagnosticKind::CombinationNameConflict { case: ident.to_string() },
            span: ident.span(),
            fixes: vec![fix],
        }
    }

    /// Reports a case whose bit index lies outside the storage width.
    pub(crate) fn index_out_of_range(
        ident: &syn::Ident,
        index: u32,
        storage: String,
        span: Span2,
        fix: Fix,
    ) -> Self {
        Self {
            kind: DiagnosticKind::IndexOutOfRange { case: ident.to_string(), index, storage },
            span,
            fixes: vec![fix],
        }
    }

    /// Reports a case landing on a bit index that an earlier case already occupies.
    pub(crate) fn duplicate_index(
        ident: &syn::Ident,
        prior: &syn::Ident,
        index: u32,
        span: Span2,
    ) -> Self {
        Self {
            kind: DiagnosticKind::DuplicateIndex {
                case: ident.to_string(),
                prior: prior.to_string(),
                index,
            },
            span,
            fixes: vec![],
        }
    }

    pub(crate) fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub(crate) fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Renders this into the crate [`Error`], folding the fixes into `help:` lines.
    pub(crate) fn into_error(self) -> Error {
        let mut message = self.message();
        for fix in &self.fixes {
            message.push_str("\nhelp: ");
            message.push_str(&fix.to_string());
        }

        Error(syn::Error::new(self.span, message))
    }
}

/// Warning- and remark-severity diagnostics collected while generation proceeds.
#[derive(Default)]
pub(crate) struct Diagnostics(pub(crate) Vec<Diagnostic>);

impl Diagnostics {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Surfaces the collected diagnostics through the compiler.
    ///
    /// Stable rustc offers proc macros no warning channel, so without the `nightly` feature
    /// the records are dropped after collection; tests read them directly instead.
    pub(crate) fn emit(self) {
        // Fatal records abort expansion through `Error` before reaching the collector.
        debug_assert!(self.0.iter().all(|it| it.severity() != Severity::Error));

        #[cfg(feature = "nightly")]
        {
            if !proc_macro::is_available() {
                return;
            }
            for diagnostic in self.0 {
                let level = match diagnostic.severity() {
                    Severity::Error => proc_macro::Level::Error,
                    Severity::Warning => proc_macro::Level::Warning,
                    Severity::Remark => proc_macro::Level::Note,
                };
                let mut out = proc_macro::Diagnostic::spanned(
                    diagnostic.span.unwrap(),
                    level,
                    diagnostic.message(),
                );
                for fix in &diagnostic.fixes {
                    out = out.help(fix.to_string());
                }
                out.emit();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_follow_the_kind() {
        assert_eq!(DiagnosticKind::WrongHostShape.severity(), Severity::Error);
        assert_eq!(
            DiagnosticKind::NonBooleanArgument { name: "describe" }.severity(),
            Severity::Error,
        );
        assert_eq!(
            DiagnosticKind::CombinationNameConflict { case: "all".into() }.severity(),
            Severity::Warning,
        );
        assert_eq!(
            DiagnosticKind::IndexOutOfRange { case: "A".into(), index: 8, storage: "u8".into() }
                .severity(),
            Severity::Warning,
        );
        assert_eq!(
            DiagnosticKind::DuplicateIndex { case: "B".into(), prior: "A".into(), index: 0 }
                .severity(),
            Severity::Remark,
        );
    }

    #[test]
    fn messages_name_the_offenders() {
        let kind =
            DiagnosticKind::IndexOutOfRange { case: "Standard".into(), index: 8, storage: "u8".into() };
        assert_eq!(
            kind.to_string(),
            "case `Standard` has bit index 8, which is out of range for `u8`",
        );

        let kind =
            DiagnosticKind::DuplicateIndex { case: "B".into(), prior: "A".into(), index: 3 };
        assert_eq!(
            kind.to_string(),
            "case `B` reuses bit index 3, which is already occupied by case `A`",
        );
    }

    #[test]
    fn fixes_render_their_replacement_text() {
        let span = Span2::call_site();
        let fix = Fix::new(
            "escape the case name",
            SourceEdit::Replace { span, text: "r#all".to_owned() },
        );
        assert_eq!(fix.to_string(), "escape the case name: `r#all`");

        let removal =
            Fix::new("remove the argument", SourceEdit::Replace { span, text: String::new() });
        assert_eq!(removal.to_string(), "remove the argument");
    }

    #[test]
    fn errors_carry_help_lines() {
        let item: syn::Item = syn::parse_quote! { struct S; };
        let error = Diagnostic::wrong_host_shape(&item).into_error();
        let message = error.0.to_string();
        assert!(message.contains("item must be an enum"), "{message}");
        assert!(message.contains("help: replace the item introducer: `enum`"), "{message}");
    }
}
