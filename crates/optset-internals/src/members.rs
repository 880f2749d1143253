// SPDX-License-Identifier: MPL-2.0

//! Assembly of the generated option-set members.

use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;

use crate::{
    args::Config,
    cases::{Case, IndexedCase},
    diagnostic::{Diagnostic, Diagnostics},
};

/// One generated member, tagged by role.
///
/// The tag decides where the rendered tokens land: the set struct's body, its inherent
/// impl block, or a free-standing item after both.
pub(crate) enum Member {
    /// The field holding the raw value.
    StorageField(TokenStream2),
    /// `from_bits`: identity assignment from a raw value.
    RawConstructor(TokenStream2),
    /// `from_bit_index`: the single-bit value `1 << index`.
    BitIndexConstructor(TokenStream2),
    /// One named constant per case.
    OptionConstant(TokenStream2),
    /// `all`: the union of every per-case constant.
    CombinationConstant(TokenStream2),
    /// `bit_indices`: the positions of every present flag.
    BitIndexSetAccessor(TokenStream2),
    /// `from_bit_indices`: the union of the flags at the given positions.
    BitIndexSetConstructor(TokenStream2),
    /// The `Display` impl listing flagged positions by name.
    Description(TokenStream2),
    /// The `Debug` impl rendering the raw value in binary.
    DebugDescription(TokenStream2),
    /// `cases`: the original case values present in the set.
    CaseListAccessor(TokenStream2),
    /// `from_cases`: the union of the flags for the given cases.
    CaseListConstructor(TokenStream2),
}

/// Where a [`Member`]'s tokens belong in the final expansion.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Placement {
    Field,
    ImplItem,
    TrailingItem,
}

impl Member {
    fn placement(&self) -> Placement {
        match self {
            Self::StorageField(_) => Placement::Field,
            Self::Description(_) | Self::DebugDescription(_) => Placement::TrailingItem,
            _ => Placement::ImplItem,
        }
    }

    fn tokens(&self) -> &TokenStream2 {
        match self {
            Self::StorageField(it)
            | Self::RawConstructor(it)
            | Self::BitIndexConstructor(it)
            | Self::OptionConstant(it)
            | Self::CombinationConstant(it)
            | Self::BitIndexSetAccessor(it)
            | Self::BitIndexSetConstructor(it)
            | Self::Description(it)
            | Self::DebugDescription(it)
            | Self::CaseListAccessor(it)
            | Self::CaseListConstructor(it) => it,
        }
    }
}

/// The name of the generated set type: the enum's name with a `Set` suffix.
fn set_ident(enum_ident: &syn::Ident) -> syn::Ident {
    let name = enum_ident.to_string();
    let name = name.trim_start_matches("r#");

    syn::Ident::new(&format!("{name}Set"), enum_ident.span())
}

/// A case name as the generated `Display` impl prints it, without any raw-identifier
/// escape.
fn display_name(ident: &syn::Ident) -> String {
    ident.to_string().trim_start_matches("r#").to_owned()
}

/// The case named `all`, under either spelling, if there is one.
fn all_case(cases: &[Case]) -> Option<&Case> {
    cases.iter().find(|case| {
        let name = case.ident.to_string();
        name == "all" || name == "r#all"
    })
}

/// Produces the full member list for one annotated enum, in a fixed order.
///
/// Only the two formatting members and the case round trip are conditional: the former on
/// the `describe` argument, the latter on no case carrying a payload. A case named `all`
/// suppresses the combination constant, with a warning unless the name is written `r#all`.
pub(crate) fn generate(
    enum_ident: &syn::Ident,
    config: &Config,
    cases: &[Case],
    indexed: &[IndexedCase],
    diagnostics: &mut Diagnostics,
) -> Vec<Member> {
    let vis = &config.vis;
    let storage = config.storage.path();
    let set_ident = set_ident(enum_ident);

    let mut members = Vec::new();

    members.push(Member::StorageField(quote! {
        #vis bits: #storage
    }));

    members.push(Member::RawConstructor(quote! {
        /// Creates a set from a raw storage value.
        #vis const fn from_bits(bits: #storage) -> Self {
            Self { bits }
        }
    }));

    let bit_index_constructor = if config.check_overflow {
        let message = format!("bit index is out of range for `{}`", config.storage.name());
        quote! {
            /// Creates a set holding the single flag at `index`.
            ///
            /// The index must fit the storage type; a violation is a programming error,
            /// not a recoverable one.
            #vis const fn from_bit_index(index: u32) -> Self {
                assert!(index < <#storage>::BITS, #message);
                Self { bits: (1 as #storage) << index }
            }
        }
    } else {
        quote! {
            /// Creates a set holding the single flag at `index`.
            ///
            /// Overflow checking is disabled: an index past the storage width yields the
            /// empty set.
            #vis const fn from_bit_index(index: u32) -> Self {
                Self {
                    bits: match (1 as #storage).checked_shl(index) {
                        ::core::option::Option::Some(bits) => bits,
                        ::core::option::Option::None => 0,
                    },
                }
            }
        }
    };
    members.push(Member::BitIndexConstructor(bit_index_constructor));

    for case in indexed {
        let ident = &case.ident;
        let index = Literal::u32_unsuffixed(case.index);
        members.push(Member::OptionConstant(quote! {
            #vis const #ident: Self = Self::from_bit_index(#index);
        }));
    }

    match all_case(cases) {
        Some(case) if case.ident.to_string() == "all" => {
            diagnostics.push(Diagnostic::combination_name_conflict(&case.ident));
        }
        // A raw `r#all` still aliases the name, so the constant cannot be generated
        // beside it either; the escape shows intent and silences the warning.
        Some(_) => {}
        None => {
            let idents = indexed.iter().map(|it| &it.ident);
            members.push(Member::CombinationConstant(quote! {
                /// The union of every individual flag.
                #vis const all: Self = Self::from_bits(0 #( | Self::#idents.bits )*);
            }));
        }
    }

    members.push(Member::BitIndexSetAccessor(quote! {
        /// The positions of every flag present in this set, ascending.
        #vis fn bit_indices(&self) -> ::std::vec::Vec<u32> {
            let mut indices = ::std::vec::Vec::new();
            let mut index = 0u32;
            while index < <#storage>::BITS {
                if self.bits & ((1 as #storage) << index) != 0 {
                    indices.push(index);
                }
                index += 1;
            }
            indices
        }
    }));

    members.push(Member::BitIndexSetConstructor(quote! {
        /// The union of the flags at the given positions.
        #vis fn from_bit_indices<I>(indices: I) -> Self
        where
            I: ::core::iter::IntoIterator<Item = u32>,
        {
            let mut set = Self { bits: 0 };
            for index in indices {
                set.bits |= Self::from_bit_index(index).bits;
            }
            set
        }
    }));

    if config.describe {
        // The first case declared at a position names it; later duplicates defer to it.
        let mut named_positions = Vec::new();
        let mut arms = Vec::new();
        for case in indexed {
            if named_positions.contains(&case.index) {
                continue;
            }
            named_positions.push(case.index);
            let index = Literal::u32_unsuffixed(case.index);
            let name = display_name(&case.ident);
            arms.push(quote! { #index => f.write_str(#name)?, });
        }

        members.push(Member::Description(quote! {
            impl ::core::fmt::Display for #set_ident {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    f.write_str("[")?;
                    let mut is_first = true;
                    let mut index = 0u32;
                    while index < <#storage>::BITS {
                        if self.bits & ((1 as #storage) << index) != 0 {
                            if !is_first {
                                f.write_str(", ")?;
                            }
                            is_first = false;
                            match index {
                                #(#arms)*
                                other => {
                                    ::core::write!(f, "{}", other)?;
                                }
                            }
                        }
                        index += 1;
                    }
                    f.write_str("]")
                }
            }
        }));

        let set_name = set_ident.to_string();
        members.push(Member::DebugDescription(quote! {
            impl ::core::fmt::Debug for #set_ident {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::write!(
                        f,
                        "{}(0b{:0width$b})",
                        #set_name,
                        self.bits,
                        width = <#storage>::BITS as usize,
                    )
                }
            }
        }));
    }

    if cases.iter().all(|case| !case.has_payload) {
        let idents: Vec<_> = indexed.iter().map(|it| &it.ident).collect();
        // With zero cases there is nothing to push, so the binding never needs `mut`.
        let mut_allow = indexed.is_empty().then(|| quote!(#[allow(unused_mut)]));

        members.push(Member::CaseListAccessor(quote! {
            /// The original cases present in this set, in declaration order.
            #vis fn cases(&self) -> ::std::vec::Vec<#enum_ident> {
                #mut_allow
                let mut cases = ::std::vec::Vec::new();
                #(
                    if self.bits & Self::#idents.bits != 0 {
                        cases.push(#enum_ident::#idents);
                    }
                )*
                cases
            }
        }));

        members.push(Member::CaseListConstructor(quote! {
            /// The union of the flags for the given cases.
            #vis fn from_cases<I>(cases: I) -> Self
            where
                I: ::core::iter::IntoIterator<Item = #enum_ident>,
            {
                let mut set = Self { bits: 0 };
                for case in cases {
                    let flag: #storage = match case {
                        #( #enum_ident::#idents => Self::#idents.bits, )*
                    };
                    set.bits |= flag;
                }
                set
            }
        }));
    }

    members
}

/// Renders the final expansion: the enum as written, the set struct, its inherent impl,
/// the trailing formatting impls, and the `OptionSet` trait impl.
pub(crate) fn assemble(item: syn::ItemEnum, config: &Config, members: Vec<Member>) -> TokenStream2 {
    let vis = &config.vis;
    let storage = config.storage.path();
    let set_ident = set_ident(&item.ident);
    let set_docs = format!("A bit-flag set over the cases of [`{}`].", item.ident);

    let fields = members
        .iter()
        .filter(|it| it.placement() == Placement::Field)
        .map(Member::tokens);
    let impl_items = members
        .iter()
        .filter(|it| it.placement() == Placement::ImplItem)
        .map(Member::tokens);
    let trailing = members
        .iter()
        .filter(|it| it.placement() == Placement::TrailingItem)
        .map(Member::tokens);

    quote! {
        #item

        #[doc = #set_docs]
        #[derive(Clone, Copy, PartialEq, Eq)]
        #vis struct #set_ident {
            #(#fields,)*
        }

        #[allow(non_upper_case_globals)]
        impl #set_ident {
            #(#impl_items)*
        }

        #(#trailing)*

        impl ::optset::OptionSet for #set_ident {
            type Storage = #storage;

            fn from_bits(bits: #storage) -> Self {
                Self { bits }
            }

            fn bits(self) -> #storage {
                self.bits
            }
        }
    }
}
