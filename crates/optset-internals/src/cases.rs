// SPDX-License-Identifier: MPL-2.0

//! Lowering of enum variants into cases and the bit-index assignment walk.

use proc_macro2::Span as Span2;
use syn::spanned::Spanned as _;

use crate::{
    args::Config,
    diagnostic::{Diagnostic, Diagnostics},
    Error, Result,
};

/// One named case of the annotated enum.
///
/// Declaration order is semantically significant and is preserved from the variant list
/// through every generated member.
pub(crate) struct Case {
    pub(crate) ident: syn::Ident,
    /// The discriminant written on the case, if any.
    pub(crate) explicit_index: Option<u32>,
    /// Whether the case carries fields.
    pub(crate) has_payload: bool,
    pub(crate) span: Span2,
}

/// A case together with its assigned bit position.
pub(crate) struct IndexedCase {
    pub(crate) index: u32,
    pub(crate) ident: syn::Ident,
}

/// Returns an [`Error`] if the given [`syn::Generics`] is non-empty.
///
/// The generated set type holds plain integer storage, so generic enums are not supported.
pub(crate) fn check_generics(generics: &syn::Generics) -> Result<()> {
    if !generics.params.is_empty() {
        return Err(
            err!(generics.params.span(); "generic parameters are not supported in this context"),
        );
    }
    if let Some(clause) = &generics.where_clause {
        return Err(err!(clause.span(); "`where` clauses are not supported in this context"));
    }

    Ok(())
}

/// Lowers the variant list into [`Case`] records.
///
/// # Errors
///
/// An error is returned if a variant has a discriminant that is not an integer literal.
pub(crate) fn lower<'a>(
    variants: impl IntoIterator<Item = &'a syn::Variant>,
) -> Result<Vec<Case>> {
    variants
        .into_iter()
        .map(|variant| {
            let explicit_index = match &variant.discriminant {
                Some((_, syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Int(lit), .. }))) => {
                    Some(lit.base10_parse().map_err(Error)?)
                }
                Some((_, expr)) => {
                    return Err(err!(expr.span(); "case index must be an integer literal"));
                }
                None => None,
            };

            Ok(Case {
                ident: variant.ident.clone(),
                explicit_index,
                has_payload: !variant.fields.is_empty(),
                span: variant.span(),
            })
        })
        .collect()
}

/// Walks the cases in declaration order and assigns each a bit index.
///
/// A case keeps its explicit index when it has one; otherwise it takes one past the
/// previous case's index, starting from zero. Every case receives an index no matter how
/// large: an index past the storage width is reported as a warning (with a fix that turns
/// overflow checking off) rather than dropped, and two cases landing on the same index are
/// reported as a remark while both keep their bit.
pub(crate) fn assign_indices(
    cases: &[Case],
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Vec<IndexedCase> {
    let width = config.bit_width();
    let mut indexed: Vec<IndexedCase> = Vec::with_capacity(cases.len());
    let mut next_index = 0u32;

    for case in cases {
        let index = case.explicit_index.unwrap_or(next_index);
        if !width.admits(index) {
            diagnostics.push(Diagnostic::index_out_of_range(
                &case.ident,
                index,
                config.storage.name(),
                case.span,
                config.overflow_fix.clone(),
            ));
        }
        if let Some(prior) = indexed.iter().find(|it| it.index == index) {
            diagnostics.push(Diagnostic::duplicate_index(
                &case.ident,
                &prior.ident,
                index,
                case.span,
            ));
        }
        indexed.push(IndexedCase { index, ident: case.ident.clone() });
        next_index = index.saturating_add(1);
    }

    indexed
}
