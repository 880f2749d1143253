// SPDX-License-Identifier: MPL-2.0

#[optset::option_set(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Shipping {
    NextDay,
    SecondDay,
    Priority = 3,
    Standard,
}

fn main() {
    let order = ShippingSet::from_cases([Shipping::NextDay, Shipping::Priority]);
    println!("{order} -> {order:?}");
}
