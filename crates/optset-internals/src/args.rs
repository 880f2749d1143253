// SPDX-License-Identifier: MPL-2.0

//! Parsing and resolution of the `option_set` attribute arguments.

use proc_macro2::{Span as Span2, TokenStream as TokenStream2};
use quote::ToTokens;
use syn::{parse::Parser as _, spanned::Spanned as _};

use crate::{
    diagnostic::{Diagnostic, Fix, SourceEdit},
    storage::{BitWidth, Storage},
    Error, Result,
};

/// A boolean argument as written, prior to resolution.
struct BoolArg {
    name: &'static str,
    /// The raw value expression; resolution insists on a boolean literal.
    value: syn::Expr,
    name_span: Span2,
}

/// Models acceptable arguments to the `option_set` attribute.
pub(crate) struct Args {
    /// The storage type named positionally, as a bare path argument.
    positional_storage: Option<syn::Path>,
    /// The storage type named with the `storage` label. Takes precedence over the
    /// positional spelling.
    labeled_storage: Option<syn::Path>,
    /// The `check_overflow` argument, if present.
    check_overflow: Option<BoolArg>,
    /// The `describe` argument, if present.
    describe: Option<BoolArg>,
    /// Each argument as written, in order, for rebuilding the list in fixes.
    rendered: Vec<String>,
    /// Position of `check_overflow` within [`rendered`](Self::rendered).
    check_overflow_position: Option<usize>,
    /// The span of the whole argument list.
    list_span: Span2,
}

impl Args {
    /// Parses comma-separated arguments to the `option_set` attribute from the given
    /// [`TokenStream2`].
    ///
    /// # Errors
    ///
    /// An error is returned if any argument
    ///
    /// - has a name other than `storage`, `check_overflow`, or `describe` and is not a
    ///   bare type path;
    /// - has the same name as a previous argument; or
    /// - is labeled but missing a value.
    pub(crate) fn parse(args: TokenStream2) -> Result<Self> {
        let mut output = Self {
            positional_storage: None,
            labeled_storage: None,
            check_overflow: None,
            describe: None,
            rendered: Vec::new(),
            check_overflow_position: None,
            list_span: args.span(),
        };

        if args.is_empty() {
            return Ok(output);
        }

        syn::meta::parser(|meta| {
            if meta.path.is_ident("storage") {
                if output.labeled_storage.is_some() {
                    return Err(meta.error("argument is a duplicate"));
                }
                let value: syn::Path = meta.value()?.parse()?;
                output.rendered.push(format!("storage = {}", path_text(&value)));
                output.labeled_storage = Some(value);
            } else if meta.path.is_ident("check_overflow") {
                let arg =
                    parse_bool_arg(&meta, "check_overflow", output.check_overflow.is_some())?;
                output.check_overflow_position = Some(output.rendered.len());
                output
                    .rendered
                    .push(format!("check_overflow = {}", arg.value.to_token_stream()));
                output.check_overflow = Some(arg);
            } else if meta.path.is_ident("describe") {
                let arg = parse_bool_arg(&meta, "describe", output.describe.is_some())?;
                output.rendered.push(format!("describe = {}", arg.value.to_token_stream()));
                output.describe = Some(arg);
            } else if meta.input.peek(syn::Token![=]) {
                return Err(meta.error("argument is not supported"));
            } else {
                // A bare path names the storage type positionally.
                if output.positional_storage.is_some() {
                    return Err(meta.error("argument is a duplicate"));
                }
                output.rendered.push(path_text(&meta.path));
                output.positional_storage = Some(meta.path.clone());
            }

            Ok(())
        })
        .parse2(args)
        .map_err(Error)?;

        Ok(output)
    }

    /// Resolves the parsed arguments into a [`Config`] for the given item visibility.
    ///
    /// # Errors
    ///
    /// A boolean argument whose value is not `true` or `false` yields an error-severity
    /// diagnostic; generation for the whole item stops there.
    pub(crate) fn resolve(
        &self,
        vis: syn::Visibility,
    ) -> std::result::Result<Config, Diagnostic> {
        let storage = match self.labeled_storage.as_ref().or(self.positional_storage.as_ref()) {
            Some(path) => Storage::from_path(path.clone()),
            None => Storage::default_with_span(self.list_span),
        };
        let check_overflow = resolve_bool(self.check_overflow.as_ref(), true)?;
        let describe = resolve_bool(self.describe.as_ref(), true)?;

        Ok(Config {
            storage,
            check_overflow,
            describe,
            vis,
            overflow_fix: self.disable_overflow_fix(),
        })
    }

    /// The fix attached to out-of-range warnings: rewrite the argument list so overflow
    /// checking is off, keeping every other argument as written.
    fn disable_overflow_fix(&self) -> Fix {
        if self.rendered.is_empty() {
            return Fix::new(
                "add an attribute argument",
                SourceEdit::InsertAfter {
                    span: self.list_span,
                    text: "(check_overflow = false)".to_owned(),
                },
            );
        }

        let mut rendered = self.rendered.clone();
        match self.check_overflow_position {
            Some(position) => rendered[position] = "check_overflow = false".to_owned(),
            None => rendered.push("check_overflow = false".to_owned()),
        }

        Fix::new(
            "replace the attribute arguments",
            SourceEdit::Replace { span: self.list_span, text: rendered.join(", ") },
        )
    }
}

fn parse_bool_arg(
    meta: &syn::meta::ParseNestedMeta<'_>,
    name: &'static str,
    is_duplicate: bool,
) -> syn::Result<BoolArg> {
    if is_duplicate {
        return Err(meta.error("argument is a duplicate"));
    }
    let value: syn::Expr = meta.value()?.parse()?;

    Ok(BoolArg { name, value, name_span: meta.path.span() })
}

/// The literal value of a boolean argument, or its default when the argument is absent.
fn resolve_bool(
    arg: Option<&BoolArg>,
    default: bool,
) -> std::result::Result<bool, Diagnostic> {
    let Some(arg) = arg else {
        return Ok(default);
    };

    match &arg.value {
        syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Bool(lit), .. }) => Ok(lit.value),
        value => {
            Err(Diagnostic::non_boolean_argument(arg.name, default, arg.name_span, value.span()))
        }
    }
}

/// Renders a path the way it was written, without token spacing.
fn path_text(path: &syn::Path) -> String {
    path.to_token_stream().to_string().replace(' ', "")
}

/// The resolved configuration for one annotated enum.
pub(crate) struct Config {
    /// The storage type backing the generated set.
    pub(crate) storage: Storage,
    /// Whether bit indices are checked against the storage width. Defaults to on.
    pub(crate) check_overflow: bool,
    /// Whether the formatting members are generated. Defaults to on.
    pub(crate) describe: bool,
    /// The annotated item's visibility, reused for everything generated.
    pub(crate) vis: syn::Visibility,
    /// The argument-list rewrite attached to out-of-range warnings.
    pub(crate) overflow_fix: Fix,
}

impl Config {
    /// The width bit indices are validated against.
    pub(crate) fn bit_width(&self) -> BitWidth {
        self.storage.bit_width(self.check_overflow)
    }
}
