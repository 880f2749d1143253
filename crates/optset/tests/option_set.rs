// SPDX-License-Identifier: MPL-2.0

use optset::{OptionSet, OptionSetExt};

#[optset::option_set(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Pair {
    A,
    B,
}

#[optset::option_set]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Shipping {
    NextDay,
    SecondDay,
    Priority = 3,
    Standard,
}

#[optset::option_set(u8, check_overflow = false)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Wide {
    First,
    Distant = 20,
}

#[optset::option_set(u16)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(non_camel_case_types)]
enum Mixed {
    r#all,
    Other,
}

#[optset::option_set(u32)]
#[allow(dead_code)]
enum Payload {
    Plain,
    Tagged(u8),
}

#[optset::option_set(u8, describe = false)]
#[derive(Clone, Copy, PartialEq, Eq)]
enum Quiet {
    Lo,
    Hi,
}

#[optset::option_set(u8)]
enum Never {}

#[test]
fn sequential_indices_count_up_from_zero() {
    assert_eq!(PairSet::A.bits, 1);
    assert_eq!(PairSet::B.bits, 2);
    assert_eq!(PairSet::A.bit_indices(), [0]);
    assert_eq!(PairSet::B.bit_indices(), [1]);
}

#[test]
fn an_explicit_index_restarts_the_count() {
    assert_eq!(ShippingSet::NextDay.bit_indices(), [0]);
    assert_eq!(ShippingSet::SecondDay.bit_indices(), [1]);
    assert_eq!(ShippingSet::Priority.bit_indices(), [3]);
    assert_eq!(ShippingSet::Standard.bit_indices(), [4]);
}

#[test]
fn all_is_the_union_of_every_case() {
    let union = ShippingSet::NextDay.bits
        | ShippingSet::SecondDay.bits
        | ShippingSet::Priority.bits
        | ShippingSet::Standard.bits;
    assert_eq!(ShippingSet::all.bits, union);
    assert_eq!(ShippingSet::all.bits, 0b11011);
}

#[test]
fn the_default_storage_is_a_signed_64_bit_integer() {
    let bits: i64 = ShippingSet::all.bits;
    assert_eq!(bits, 0b11011);
    assert_eq!(ShippingSet::STORAGE_WIDTH, 64);
}

#[test]
fn bit_indices_round_trip() {
    let value = ShippingSet::from_bits(0b11010);
    assert_eq!(ShippingSet::from_bit_indices(value.bit_indices()), value);
}

#[test]
fn case_lists_round_trip() {
    let set = ShippingSet::from_cases([Shipping::Priority, Shipping::NextDay]);
    // Declaration order, not insertion order.
    assert_eq!(set.cases(), [Shipping::NextDay, Shipping::Priority]);
    assert_eq!(ShippingSet::from_cases(set.cases()), set);
}

#[test]
fn descriptions_render_case_names_in_ascending_bit_order() {
    assert_eq!(PairSet::from_bits(0).to_string(), "[]");
    let pair = PairSet::from_bits(PairSet::A.bits | PairSet::B.bits);
    assert_eq!(pair.to_string(), "[A, B]");
    assert_eq!(ShippingSet::all.to_string(), "[NextDay, SecondDay, Priority, Standard]");
}

#[test]
fn descriptions_fall_back_to_bare_indices() {
    let set = PairSet::from_bits(0b100_0001);
    assert_eq!(set.to_string(), "[A, 6]");
}

#[test]
fn debug_rendering_pads_to_the_storage_width() {
    assert_eq!(format!("{:?}", PairSet::from_bits(3)), "PairSet(0b00000011)");
    assert_eq!(
        format!("{:?}", ShippingSet::from_bits(1)).len(),
        "ShippingSet(0b)".len() + 64,
    );
}

#[test]
fn unchecked_overflow_collapses_to_the_empty_set() {
    assert_eq!(WideSet::First.bits, 1);
    assert_eq!(WideSet::Distant.bits, 0);
    assert_eq!(WideSet::Distant, WideSet::from_bits(0));
    assert_eq!(WideSet::from_bit_index(9).bits, 0);
    assert_eq!(WideSet::Distant.to_string(), "[]");
}

#[test]
fn an_escaped_all_case_keeps_its_per_case_constant() {
    assert_eq!(MixedSet::r#all.bits, 1);
    assert_eq!(MixedSet::r#all.to_string(), "[all]");
    assert_eq!(MixedSet::Other.bits, 2);
}

#[test]
fn payload_cases_still_get_constants() {
    assert_eq!(PayloadSet::Plain.bits, 1);
    assert_eq!(PayloadSet::Tagged.bits, 2);
    assert_eq!(PayloadSet::Tagged.to_string(), "[Tagged]");
}

#[test]
fn describe_can_be_disabled() {
    assert!(QuietSet::Lo.bits == 1);
    assert!(QuietSet::from_cases([Quiet::Hi]).bits == 2);
}

#[test]
fn empty_enums_yield_the_empty_set() {
    assert_eq!(NeverSet::all.bits, 0);
    assert_eq!(NeverSet::all.to_string(), "[]");
    assert_eq!(NeverSet::from_cases(std::iter::empty()).bits, 0);
}

#[test]
fn sets_implement_the_option_set_trait() {
    fn bits_of<S: OptionSet>(set: S) -> S::Storage {
        set.bits()
    }

    assert_eq!(bits_of(PairSet::A), 1);
    let restored: PairSet = OptionSet::from_bits(3);
    assert_eq!(restored, PairSet::from_bits(3));
}
