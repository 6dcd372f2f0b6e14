//! Entity module - Contains the records mirrored from the sales REST API.
//! These entities are plain data; the server owns every invariant on them.
//! Each entity has a record struct, a create payload, and an update payload.

pub mod barang;
pub mod item_penjualan;
pub mod pelanggan;
pub mod penjualan;
pub mod response;

use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

pub use barang::{Barang, CreateBarang, UpdateBarang};
pub use item_penjualan::{CreateItemPenjualan, ItemKey, ItemPenjualan, UpdateItemPenjualan};
pub use pelanggan::{CreatePelanggan, JenisKelamin, Pelanggan, UpdatePelanggan};
pub use penjualan::{CreatePenjualan, Penjualan, PelangganRef, UpdatePenjualan};
pub use response::{ApiResponse, Page, PageRequest};

/// Ties an entity to its REST resource.
///
/// The associated constants double as the wording used in user-facing
/// messages, so `LABEL` is lowercase Indonesian as shown in the UI
/// ("Gagal mengambil data barang").
pub trait Resource: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Path segment under `/api/`, e.g. `barang`
    const PATH: &'static str;
    /// Lowercase label used inside sentences, e.g. `item penjualan`
    const LABEL: &'static str;
    /// Extra sentence appended to the delete confirmation, if deleting cascades
    const DELETE_WARNING: Option<&'static str> = None;
    /// What still points at a record that cannot be deleted, e.g. `data penjualan`
    const REFERENCED_BY: &'static str = "data lain";
    /// Instruction shown when the record is still referenced elsewhere
    const DEPENDENT_HINT: &'static str = "Hapus data yang terkait terlebih dahulu.";

    /// Primary key type
    type Key: Clone + PartialEq + fmt::Display + fmt::Debug + Send + Sync;
    /// Body sent on `POST /api/{PATH}`
    type Create: Serialize + fmt::Debug + Send + Sync;
    /// Body sent on `PUT /api/{PATH}/{key}`
    type Update: Serialize + fmt::Debug + Send + Sync;

    /// Returns the record's primary key.
    fn key(&self) -> Self::Key;

    /// Splits a key into URL path segments (compound keys yield several).
    fn key_segments(key: &Self::Key) -> Vec<String>;

    /// Name used when referring to a single record in messages.
    fn display_name(&self) -> String {
        self.key().to_string()
    }
}

/// Capitalizes the first character of a label ("barang" -> "Barang").
#[must_use]
pub fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
