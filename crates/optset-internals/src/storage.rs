// SPDX-License-Identifier: MPL-2.0

//! Models the integer type backing a generated option set.

use proc_macro2::Span as Span2;
use quote::ToTokens;

/// The number of usable bit positions in a storage type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum BitWidth {
    /// A width known at macro evaluation time; bit indices are checked against it.
    Known(u32),
    /// Nothing to check against: every index is accepted.
    Unbounded,
}

impl BitWidth {
    /// Whether a bit index lies inside this width.
    pub(crate) fn admits(self, index: u32) -> bool {
        match self {
            Self::Known(width) => index < width,
            Self::Unbounded => true,
        }
    }
}

/// The storage type named in the attribute arguments, or the default `i64`.
#[derive(Clone)]
pub(crate) struct Storage {
    path: syn::Path,
    /// The width parsed from the path when it names a primitive integer.
    primitive_width: Option<u32>,
}

impl Storage {
    /// The default storage type: the native 64-bit signed integer.
    pub(crate) fn default_with_span(span: Span2) -> Self {
        Self::from_path(syn::Ident::new("i64", span).into())
    }

    /// Classifies a user-written storage path.
    ///
    /// A single-segment path naming a primitive integer gets a known width; any other path
    /// is carried into the generated code verbatim and never range-checked.
    pub(crate) fn from_path(path: syn::Path) -> Self {
        let primitive_width = path.get_ident().and_then(primitive_width);

        Self { path, primitive_width }
    }

    /// The range-checking width under the given overflow policy.
    pub(crate) fn bit_width(&self, check_overflow: bool) -> BitWidth {
        match self.primitive_width {
            Some(width) if check_overflow => BitWidth::Known(width),
            _ => BitWidth::Unbounded,
        }
    }

    /// The type as written, for interpolation into generated code.
    pub(crate) fn path(&self) -> &syn::Path {
        &self.path
    }

    /// The user-facing spelling, for diagnostics.
    pub(crate) fn name(&self) -> String {
        self.path.to_token_stream().to_string().replace(' ', "")
    }
}

/// The bit width of a primitive integer identifier, if it is one.
///
/// The width is the identifier's trailing digits; the pointer-sized types carry none and
/// count as 64 bits.
fn primitive_width(ident: &syn::Ident) -> Option<u32> {
    let name = ident.to_string();
    let digits = name.strip_prefix('u').or_else(|| name.strip_prefix('i'))?;
    if digits == "size" {
        return Some(64);
    }

    let width = digits.parse().ok()?;
    matches!(width, 8 | 16 | 32 | 64 | 128).then_some(width)
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn storage(tokens: proc_macro2::TokenStream) -> Storage {
        Storage::from_path(syn::parse2(tokens).unwrap())
    }

    #[test]
    fn primitive_widths_come_from_the_trailing_digits() {
        assert_eq!(storage(quote!(u8)).bit_width(true), BitWidth::Known(8));
        assert_eq!(storage(quote!(i32)).bit_width(true), BitWidth::Known(32));
        assert_eq!(storage(quote!(u128)).bit_width(true), BitWidth::Known(128));
    }

    #[test]
    fn pointer_sized_types_count_as_64_bits() {
        assert_eq!(storage(quote!(usize)).bit_width(true), BitWidth::Known(64));
        assert_eq!(storage(quote!(isize)).bit_width(true), BitWidth::Known(64));
    }

    #[test]
    fn unrecognized_types_are_never_checked() {
        assert_eq!(storage(quote!(String)).bit_width(true), BitWidth::Unbounded);
        assert_eq!(storage(quote!(u7)).bit_width(true), BitWidth::Unbounded);
        assert_eq!(storage(quote!(core::primitive::u8)).bit_width(true), BitWidth::Unbounded);
    }

    #[test]
    fn disabling_the_check_unbounds_any_width() {
        assert_eq!(storage(quote!(u8)).bit_width(false), BitWidth::Unbounded);
        assert!(BitWidth::Unbounded.admits(u32::MAX));
        assert!(!BitWidth::Known(8).admits(8));
        assert!(BitWidth::Known(8).admits(7));
    }

    #[test]
    fn the_default_is_a_signed_64_bit_integer() {
        let storage = Storage::default_with_span(Span2::call_site());
        assert_eq!(storage.name(), "i64");
        assert_eq!(storage.bit_width(true), BitWidth::Known(64));
    }
}
