//! Pelanggan entity - Customer master data.

use super::Resource;
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Customer gender as stored by the API.
///
/// Deployments disagree on casing: the web server uses `pria`, the mobile
/// one `Pria`. Parsing is case-insensitive. Serialization yields the
/// lowercase form, and [`ApiClient`](crate::client::ApiClient) recases it to
/// match its [`ClientProfile`](crate::config::ClientProfile) before sending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JenisKelamin {
    /// Male
    Pria,
    /// Female
    Wanita,
}

impl JenisKelamin {
    /// Label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pria => "Laki-laki",
            Self::Wanita => "Perempuan",
        }
    }
}

impl fmt::Display for JenisKelamin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JenisKelamin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pria" | "laki-laki" | "l" => Ok(Self::Pria),
            "wanita" | "perempuan" | "p" => Ok(Self::Wanita),
            other => Err(format!(
                "Jenis kelamin '{other}' tidak dikenal (pilih pria atau wanita)"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for JenisKelamin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Customer record as returned by `/api/pelanggan`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pelanggan {
    /// Customer ID, the primary key
    pub id_pelanggan: String,
    /// Full name
    pub nama: String,
    /// City or area of residence
    pub domisili: String,
    /// Gender
    pub jenis_kelamin: JenisKelamin,
}

/// Body for `POST /api/pelanggan`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePelanggan {
    /// Customer ID, unique across all pelanggan
    pub id_pelanggan: String,
    /// Full name
    pub nama: String,
    /// City or area of residence
    pub domisili: String,
    /// Gender; its casing on the wire follows the client profile
    pub jenis_kelamin: JenisKelamin,
}

/// Body for `PUT /api/pelanggan/{id_pelanggan}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePelanggan {
    /// New full name
    pub nama: String,
    /// New city or area of residence
    pub domisili: String,
    /// New gender
    pub jenis_kelamin: JenisKelamin,
}

impl Resource for Pelanggan {
    const PATH: &'static str = "pelanggan";
    const LABEL: &'static str = "pelanggan";
    const REFERENCED_BY: &'static str = "data penjualan";
    const DEPENDENT_HINT: &'static str = "Hapus data penjualan terlebih dahulu.";

    type Key = String;
    type Create = CreatePelanggan;
    type Update = UpdatePelanggan;

    fn key(&self) -> String {
        self.id_pelanggan.clone()
    }

    fn key_segments(key: &String) -> Vec<String> {
        vec![key.clone()]
    }

    fn display_name(&self) -> String {
        self.nama.clone()
    }
}
