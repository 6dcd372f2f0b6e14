//! Derived totals for a sale's line items.
//!
//! The authoritative `subtotal` lives on the server; these functions compute
//! what the item list currently adds up to so it can be shown next to it.
//! Items whose product was not loaded contribute nothing.

use crate::entities::{Barang, ItemPenjualan};

/// `qty * harga` for one line, or `None` when the product is not loaded.
#[must_use]
pub fn line_total(item: &ItemPenjualan) -> Option<i64> {
    item.barang
        .as_ref()
        .map(|barang| item.qty.saturating_mul(barang.harga))
}

/// Sum of [`line_total`] over the items; zero for an empty collection.
#[must_use]
pub fn compute_total<'a, I>(items: I) -> i64
where
    I: IntoIterator<Item = &'a ItemPenjualan>,
{
    items
        .into_iter()
        .filter_map(line_total)
        .fold(0, i64::saturating_add)
}

/// Preview of a line before it is saved, looking the price up in `catalog`.
#[must_use]
pub fn preview_line_total(kode_barang: &str, qty: i64, catalog: &[Barang]) -> i64 {
    catalog
        .iter()
        .find(|barang| barang.kode == kode_barang)
        .map_or(0, |barang| qty.saturating_mul(barang.harga))
}
