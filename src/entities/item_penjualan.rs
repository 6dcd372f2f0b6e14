//! Item penjualan entity - One line of a sale.
//!
//! Line items are keyed by the pair (`nota`, `kode_barang`), so a sale holds
//! at most one line per product. The server may eager-load the referenced
//! barang, which is what the local total is computed from.

use super::{Barang, Resource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compound key of a line item, rendered in paths as `{nota}/{kode_barang}`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemKey {
    /// `id_nota` of the owning sale
    pub nota: String,
    /// `kode` of the product
    pub kode_barang: String,
}

impl ItemKey {
    #[must_use]
    pub fn new(nota: impl Into<String>, kode_barang: impl Into<String>) -> Self {
        Self {
            nota: nota.into(),
            kode_barang: kode_barang.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.nota, self.kode_barang)
    }
}

/// Line item as returned by `/api/item_penjualan`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPenjualan {
    /// `id_nota` of the owning sale
    pub nota: String,
    /// `kode` of the product sold
    pub kode_barang: String,
    /// Quantity sold, always positive
    pub qty: i64,
    /// Referenced product, present when the server eager-loads it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barang: Option<Barang>,
}

impl ItemPenjualan {
    /// Product name, or a placeholder when the product was not loaded.
    #[must_use]
    pub fn nama_barang(&self) -> &str {
        self.barang.as_ref().map_or("-", |b| b.nama.as_str())
    }
}

/// Body for `POST /api/item_penjualan`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemPenjualan {
    /// `id_nota` of the owning sale
    pub nota: String,
    /// `kode` of the product sold
    pub kode_barang: String,
    /// Quantity sold
    pub qty: i64,
}

/// Body for `PUT /api/item_penjualan/{nota}/{kode_barang}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItemPenjualan {
    /// New quantity
    pub qty: i64,
}

impl Resource for ItemPenjualan {
    const PATH: &'static str = "item_penjualan";
    const LABEL: &'static str = "item penjualan";

    type Key = ItemKey;
    type Create = CreateItemPenjualan;
    type Update = UpdateItemPenjualan;

    fn key(&self) -> ItemKey {
        ItemKey::new(self.nota.clone(), self.kode_barang.clone())
    }

    fn key_segments(key: &ItemKey) -> Vec<String> {
        vec![key.nota.clone(), key.kode_barang.clone()]
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.nama_barang(), self.nota)
    }
}
