// SPDX-License-Identifier: MPL-2.0

//! A documentation-only module that explains how to use [`option_set`].
//!
//! [`option_set`]: crate::option_set
//!
//! `option_set` is applied to an enum whose variants name the flags of a bit set. The
//! macro re-emits the enum unchanged and adds a companion struct, named after the enum
//! with a `Set` suffix, that holds one bit per case in a fixed-width integer.
//!
//! ## Syntax Reference
//!
//! The input item and attribute arguments are validated against the following rules,
//! notated in a modified [Augmented Backus-Naur Form] where:
//!
//! [Augmented Backus-Naur Form]: https://en.wikipedia.org/wiki/Augmented_Backus%E2%80%93Naur_form
//!
//! - implicit whitespace is allowed between concatenated rule elements; and
//! - <code>%r"<em>rule</em>"</code> is a rule from [The Rust Reference] (and should not be
//!   interpreted as a literal text string).
//!
//! [The Rust Reference]: https://doc.rust-lang.org/reference/
//!
//! ```abnf
//! item-attr = option-set-attr / %r"OuterAttribute"
//! option-set-attr = "#[" "option_set" [attr-input] "]"
//! attr-input = "(" *(attr-arg ",") [attr-arg [","]] ")"
//! attr-arg = storage-arg / check-overflow-arg / describe-arg
//! storage-arg = %r"SimplePath" / ("storage" "=" %r"SimplePath")
//! check-overflow-arg = "check_overflow" "=" boolean
//! describe-arg = "describe" "=" boolean
//! boolean = "true" / "false"
//!
//! enum-item = 1*item-attr %r"Visibility" "enum" %r"IDENTIFIER" enum-body
//! enum-body = "{" *(case ",") [case [","]] "}"
//! ; Note: indices, if present, must be integer literals.
//! case = %r"IDENTIFIER" [%r"EnumItemTuple" / %r"EnumItemStruct"] ["=" 1*%r"DEC_DIGIT"]
//! ```
//!
//! ## Semantics
//!
//! The storage type may be named positionally or with the `storage` label; the label wins
//! when both are present. It defaults to `i64` and must resolve to a primitive integer
//! type for the generated code to compile.
//!
//! Each case occupies one bit position: its written index if it has one, otherwise one
//! past the previous case's position, starting from zero. With `check_overflow` left on
//! (the default), a position at or past the storage width is reported when the macro runs,
//! and constructing that flag fails as a precondition violation. With
//! `check_overflow = false`, such a flag silently evaluates to the empty set instead.
//!
//! A case literally named `all` collides with the generated combination constant, which is
//! then skipped with a warning. Writing the name as `r#all` keeps the warning quiet; the
//! combination constant stays suppressed either way, since a raw identifier names the same
//! constant.
//!
//! ## Output
//!
//! This macro produces, in order:
//!
//! - the enum, as written;
//! - a struct definition with a `bits` field of the storage type;
//! - an impl block with the `from_bits` and `from_bit_index` constructors, one constant
//!   per case, the `all` combination constant, and the `bit_indices`/`from_bit_indices`
//!   pair; when no case carries fields, it also holds the `cases`/`from_cases` pair
//!   mapping sets back to the original case values;
//! - `Display` and `Debug` implementations, unless `describe = false`;
//! - an implementation of the [`OptionSet`] trait.
//!
//! [`OptionSet`]: crate::OptionSet
