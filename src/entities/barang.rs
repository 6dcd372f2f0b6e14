//! Barang entity - Product master data.
//!
//! A barang is identified by its `kode` and carries a whole-rupiah `harga`.
//! Line items reference barang by `kode`; the server refuses to delete a
//! barang that still appears on a sale.

use super::Resource;
use serde::{Deserialize, Serialize};

/// Product record as returned by `/api/barang`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barang {
    /// Unique product code (e.g. "B1")
    pub kode: String,
    /// Product name
    pub nama: String,
    /// Free-text category (e.g. "Elektronik")
    pub kategori: String,
    /// Unit price in rupiah
    pub harga: i64,
}

/// Body for `POST /api/barang`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBarang {
    /// Product code, unique across all barang
    pub kode: String,
    /// Product name
    pub nama: String,
    /// Category
    pub kategori: String,
    /// Unit price in rupiah
    pub harga: i64,
}

/// Body for `PUT /api/barang/{kode}`; the key itself is immutable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBarang {
    /// New product name
    pub nama: String,
    /// New category
    pub kategori: String,
    /// New unit price in rupiah
    pub harga: i64,
}

impl Resource for Barang {
    const PATH: &'static str = "barang";
    const LABEL: &'static str = "barang";
    const REFERENCED_BY: &'static str = "data penjualan";
    const DEPENDENT_HINT: &'static str = "Hapus item penjualan terlebih dahulu.";

    type Key = String;
    type Create = CreateBarang;
    type Update = UpdateBarang;

    fn key(&self) -> String {
        self.kode.clone()
    }

    fn key_segments(key: &String) -> Vec<String> {
        vec![key.clone()]
    }

    fn display_name(&self) -> String {
        self.nama.clone()
    }
}
