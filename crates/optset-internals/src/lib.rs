// SPDX-License-Identifier: MPL-2.0

//! Implementation details for [optset].
//!
//! This crate provides the [`option_set`] attribute macro that is re-exported by the main
//! *optset* crate.
//!
//! [optset]: https://crates.io/crates/optset
//!
//! The macro is organized as a two-stage pipeline. A thin frontend (in this file) parses
//! the attribute arguments and the annotated item into plain data: a resolved `Config` and
//! an ordered list of `Case`s. Everything downstream of that, from bit-index assignment to
//! member generation and diagnostics, is a function of those values alone and is
//! unit-tested by constructing them directly.

#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]
#![cfg_attr(feature = "nightly", feature(proc_macro_diagnostic))]

/// A type alias for [`Result<T, E>`] where `E` is [`Error`].
///
/// [`Result<T, E>`]: std::result::Result
type Result<T> = std::result::Result<T, Error>;

/// The error type returned by fallible functions in *optset-internals*.
///
/// This is a wrapper over [`syn::Error`] and is convertible into token streams via [`From`]
/// implementations.
#[derive(Debug)]
struct Error(syn::Error);

impl From<Error> for TokenStream {
    fn from(e: Error) -> Self {
        TokenStream2::from(e).into()
    }
}

impl From<Error> for TokenStream2 {
    fn from(e: Error) -> Self {
        e.0.into_compile_error()
    }
}

/// Creates an [`Error`] with the given message and, optionally, span.
///
/// The syntax of this macro is similar to that of [`format!`] except that the format string
/// may be preceded by a span expression and a semicolon. The span of the error message is
/// the span expression, if present, or `Span2::call_site` otherwise.
macro_rules! err {
    ($fmt:expr $(, $fmt_arg:expr)* $(,)?) => {
        err!(Span2::call_site(); $fmt $(, $fmt_arg)*)
    };
    ($span:expr ; $fmt:expr $(, $fmt_arg:expr)* $(,)?) => {
        Error(syn::Error::new($span, format!($fmt $(, $fmt_arg)*)))
    };
}

mod args;
mod cases;
mod diagnostic;
mod members;
mod storage;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

use args::Args;
use diagnostic::{Diagnostic, Diagnostics};

/// The whole point.
///
/// Refer to the `syntax` module in the crate root of *optset* for usage information.
#[proc_macro_attribute]
pub fn option_set(args: TokenStream, item: TokenStream) -> TokenStream {
    match expand(args.into(), item.into()) {
        Ok(it) => it.into(),
        Err(e) => e.into(),
    }
}

/// The `option_set` macro over [`proc_macro2`] token streams.
///
/// Factoring the macro this way keeps the whole expansion callable from unit tests.
fn expand(args: TokenStream2, item: TokenStream2) -> Result<TokenStream2> {
    let args = Args::parse(args)?;
    let item = match syn::parse2::<syn::Item>(item).map_err(Error)? {
        syn::Item::Enum(item) => item,
        item => return Err(Diagnostic::wrong_host_shape(&item).into_error()),
    };
    cases::check_generics(&item.generics)?;

    let config = args.resolve(item.vis.clone()).map_err(Diagnostic::into_error)?;
    let cases = cases::lower(&item.variants)?;

    let mut diagnostics = Diagnostics::default();
    let indexed = cases::assign_indices(&cases, &config, &mut diagnostics);
    let members = members::generate(&item.ident, &config, &cases, &indexed, &mut diagnostics);
    diagnostics.emit();

    Ok(members::assemble(item, &config, members))
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    #[test]
    fn expansion_is_valid_rust() {
        let output = expand(
            quote!(u8),
            quote! {
                pub enum Shipping {
                    NextDay,
                    SecondDay,
                    Priority = 3,
                    Standard,
                }
            },
        )
        .unwrap();

        // The enum as written, the set struct, its inherent impl, the two formatting
        // impls, and the `OptionSet` impl.
        let file: syn::File = syn::parse2(output).unwrap();
        assert_eq!(file.items.len(), 6);
    }

    #[test]
    fn non_enum_items_are_rejected() {
        let error = expand(quote!(), quote! { struct S; }).unwrap_err();
        let message = error.0.to_string();
        assert!(message.contains("item must be an enum"), "{message}");
        assert!(message.contains("help:"), "{message}");
    }

    #[test]
    fn non_boolean_argument_aborts_expansion() {
        let error = expand(quote!(describe = "yes"), quote! { enum E { A } }).unwrap_err();
        let message = error.0.to_string();
        assert!(message.contains("argument `describe` must be a boolean literal"), "{message}");
    }

    #[test]
    fn generic_enums_are_rejected() {
        let error = expand(quote!(), quote! { enum E<T> { A(T) } }).unwrap_err();
        assert!(error.0.to_string().contains("generic parameters"));
    }
}
