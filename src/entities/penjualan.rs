//! Penjualan entity - Sales transaction header.
//!
//! A penjualan groups line items under one `id_nota`. Its `subtotal` is
//! recomputed by the server whenever items change, which is why item
//! mutations re-fetch the sale list.

use super::{JenisKelamin, Resource};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Customer summary embedded in a sale when the server eager-loads it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PelangganRef {
    pub id_pelanggan: String,
    /// Customer name
    pub nama: String,
    #[serde(default)]
    pub domisili: String,
    #[serde(default)]
    pub jenis_kelamin: Option<JenisKelamin>,
}

/// Sale header as returned by `/api/penjualan`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penjualan {
    /// Invoice number, the sale's primary key
    pub id_nota: String,
    /// Transaction date
    #[serde(deserialize_with = "deserialize_tanggal")]
    pub tgl: NaiveDate,
    /// `id_pelanggan` of the buying customer
    pub kode_pelanggan: String,
    /// Server-derived sum of `qty * harga` over the sale's items
    #[serde(default)]
    pub subtotal: i64,
    /// Buying customer, present when the server eager-loads it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pelanggan: Option<PelangganRef>,
}

impl Penjualan {
    /// Customer name when embedded, otherwise the raw customer code.
    #[must_use]
    pub fn nama_pelanggan(&self) -> &str {
        self.pelanggan
            .as_ref()
            .map_or(self.kode_pelanggan.as_str(), |p| p.nama.as_str())
    }
}

/// Body for `POST /api/penjualan`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePenjualan {
    /// Invoice number of the new sale
    pub id_nota: String,
    /// Transaction date
    pub tgl: NaiveDate,
    /// `id_pelanggan` of the buying customer
    pub kode_pelanggan: String,
    /// Always `0`; the server derives it from the items
    pub subtotal: i64,
}

/// Body for `PUT /api/penjualan/{id_nota}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePenjualan {
    /// Transaction date
    pub tgl: NaiveDate,
    /// `id_pelanggan` of the buying customer
    pub kode_pelanggan: String,
    /// Last known subtotal; the server remains the authority
    pub subtotal: i64,
}

impl Resource for Penjualan {
    const PATH: &'static str = "penjualan";
    const LABEL: &'static str = "penjualan";
    const DELETE_WARNING: Option<&'static str> = Some("Semua item akan terhapus juga.");

    type Key = String;
    type Create = CreatePenjualan;
    type Update = UpdatePenjualan;

    fn key(&self) -> String {
        self.id_nota.clone()
    }

    fn key_segments(key: &String) -> Vec<String> {
        vec![key.clone()]
    }
}

/// Accepts `2024-01-15` as well as timestamps such as `2024-01-15T00:00:00.000000Z`.
fn deserialize_tanggal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_tanggal(&raw).map_err(serde::de::Error::custom)
}

/// Parses the date portion of an API date or timestamp string.
///
/// # Errors
/// Returns a message when the first ten characters are not a `YYYY-MM-DD` date.
pub fn parse_tanggal(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| format!("Format tanggal '{trimmed}' tidak valid: {e}"))
}
