//! Form validation - turns raw form input into create- or update-shaped payloads.
//!
//! Every form knows whether it is creating a record or editing one. In edit
//! mode the immutable key is neither validated nor sent. Required strings are
//! trimmed before they are checked and before they are sent; numeric fields
//! must be strictly positive. A form that fails validation never reaches the
//! network.

use crate::entities::{
    Barang, CreateBarang, CreateItemPenjualan, CreatePelanggan, CreatePenjualan, ItemPenjualan,
    JenisKelamin, Pelanggan, Penjualan, Resource, UpdateBarang, UpdateItemPenjualan,
    UpdatePelanggan, UpdatePenjualan, penjualan::parse_tanggal,
};
use chrono::NaiveDate;
use std::{collections::BTreeMap, fmt};

/// Whether a form creates a new record or edits an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Field-level validation messages, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Removes the message for a field once the user edits it.
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Finishes a validation pass: `Ok(build())` when nothing was reported.
    fn into_result<T>(self, build: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(build()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// A validated payload, shaped for the mode the form was submitted in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission<C, U> {
    Create(C),
    Update(U),
}

/// Shorthand for the submission type of a resource.
pub type SubmissionFor<R> = Submission<<R as Resource>::Create, <R as Resource>::Update>;

/// A form bound to one resource.
pub trait EntityForm {
    /// Resource this form creates or edits
    type Resource: Resource;

    /// Validates the input for the given mode.
    ///
    /// # Errors
    /// Returns every field that failed, keyed by field name.
    fn validate(&self, mode: FormMode) -> Result<SubmissionFor<Self::Resource>, FieldErrors>;
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn require_positive(errors: &mut FieldErrors, field: &'static str, value: i64, message: &str) {
    if value <= 0 {
        errors.insert(field, message);
    }
}

/// Input for creating or editing a [`Barang`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BarangForm {
    pub kode: String,
    pub nama: String,
    pub kategori: String,
    pub harga: i64,
}

impl BarangForm {
    /// Pre-fills the form from an existing record.
    #[must_use]
    pub fn from_record(barang: &Barang) -> Self {
        Self {
            kode: barang.kode.clone(),
            nama: barang.nama.clone(),
            kategori: barang.kategori.clone(),
            harga: barang.harga,
        }
    }
}

impl EntityForm for BarangForm {
    type Resource = Barang;

    fn validate(&self, mode: FormMode) -> Result<SubmissionFor<Barang>, FieldErrors> {
        let mut errors = FieldErrors::new();
        if mode == FormMode::Create {
            require(&mut errors, "kode", &self.kode, "Kode barang wajib diisi");
        }
        require(&mut errors, "nama", &self.nama, "Nama barang wajib diisi");
        require(&mut errors, "kategori", &self.kategori, "Kategori wajib diisi");
        require_positive(&mut errors, "harga", self.harga, "Harga harus lebih dari 0");

        errors.into_result(|| match mode {
            FormMode::Create => Submission::Create(CreateBarang {
                kode: self.kode.trim().to_string(),
                nama: self.nama.trim().to_string(),
                kategori: self.kategori.trim().to_string(),
                harga: self.harga,
            }),
            FormMode::Edit => Submission::Update(UpdateBarang {
                nama: self.nama.trim().to_string(),
                kategori: self.kategori.trim().to_string(),
                harga: self.harga,
            }),
        })
    }
}

/// Input for creating or editing a [`Pelanggan`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PelangganForm {
    pub id_pelanggan: String,
    pub nama: String,
    pub domisili: String,
    pub jenis_kelamin: JenisKelamin,
}

impl Default for PelangganForm {
    fn default() -> Self {
        Self {
            id_pelanggan: String::new(),
            nama: String::new(),
            domisili: String::new(),
            jenis_kelamin: JenisKelamin::Pria,
        }
    }
}

impl PelangganForm {
    #[must_use]
    pub fn from_record(pelanggan: &Pelanggan) -> Self {
        Self {
            id_pelanggan: pelanggan.id_pelanggan.clone(),
            nama: pelanggan.nama.clone(),
            domisili: pelanggan.domisili.clone(),
            jenis_kelamin: pelanggan.jenis_kelamin,
        }
    }
}

impl EntityForm for PelangganForm {
    type Resource = Pelanggan;

    fn validate(&self, mode: FormMode) -> Result<SubmissionFor<Pelanggan>, FieldErrors> {
        let mut errors = FieldErrors::new();
        if mode == FormMode::Create {
            require(&mut errors, "id_pelanggan", &self.id_pelanggan, "ID Pelanggan wajib diisi");
        }
        require(&mut errors, "nama", &self.nama, "Nama wajib diisi");
        require(&mut errors, "domisili", &self.domisili, "Domisili wajib diisi");

        errors.into_result(|| match mode {
            FormMode::Create => Submission::Create(CreatePelanggan {
                id_pelanggan: self.id_pelanggan.trim().to_string(),
                nama: self.nama.trim().to_string(),
                domisili: self.domisili.trim().to_string(),
                jenis_kelamin: self.jenis_kelamin,
            }),
            FormMode::Edit => Submission::Update(UpdatePelanggan {
                nama: self.nama.trim().to_string(),
                domisili: self.domisili.trim().to_string(),
                jenis_kelamin: self.jenis_kelamin,
            }),
        })
    }
}

/// Input for creating or editing a [`Penjualan`].
///
/// `tgl` stays a string until validation so a malformed date is reported
/// against the field instead of failing earlier. `subtotal` is carried
/// through untouched; the server recomputes it from the line items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PenjualanForm {
    pub id_nota: String,
    pub tgl: String,
    pub kode_pelanggan: String,
    pub subtotal: i64,
}

impl PenjualanForm {
    /// Empty form dated today, as a new sale starts.
    #[must_use]
    pub fn dated(today: NaiveDate) -> Self {
        Self {
            tgl: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_record(penjualan: &Penjualan) -> Self {
        Self {
            id_nota: penjualan.id_nota.clone(),
            tgl: penjualan.tgl.format("%Y-%m-%d").to_string(),
            kode_pelanggan: penjualan.kode_pelanggan.clone(),
            subtotal: penjualan.subtotal,
        }
    }
}

impl EntityForm for PenjualanForm {
    type Resource = Penjualan;

    fn validate(&self, mode: FormMode) -> Result<SubmissionFor<Penjualan>, FieldErrors> {
        let mut errors = FieldErrors::new();
        if mode == FormMode::Create {
            require(&mut errors, "id_nota", &self.id_nota, "Nota wajib diisi");
        }
        let tgl = if self.tgl.trim().is_empty() {
            errors.insert("tgl", "Tanggal wajib diisi");
            None
        } else {
            match parse_tanggal(&self.tgl) {
                Ok(date) => Some(date),
                Err(message) => {
                    errors.insert("tgl", message);
                    None
                }
            }
        };
        require(&mut errors, "kode_pelanggan", &self.kode_pelanggan, "Pelanggan wajib dipilih");

        let Some(tgl) = tgl else {
            return Err(errors);
        };
        errors.into_result(|| match mode {
            FormMode::Create => Submission::Create(CreatePenjualan {
                id_nota: self.id_nota.trim().to_string(),
                tgl,
                kode_pelanggan: self.kode_pelanggan.trim().to_string(),
                subtotal: self.subtotal,
            }),
            FormMode::Edit => Submission::Update(UpdatePenjualan {
                tgl,
                kode_pelanggan: self.kode_pelanggan.trim().to_string(),
                subtotal: self.subtotal,
            }),
        })
    }
}

/// Input for adding a line to a sale or changing its quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemPenjualanForm {
    pub nota: String,
    pub kode_barang: String,
    pub qty: i64,
}

impl ItemPenjualanForm {
    /// New line for the given sale, quantity defaulting to one.
    #[must_use]
    pub fn for_nota(nota: impl Into<String>) -> Self {
        Self {
            nota: nota.into(),
            kode_barang: String::new(),
            qty: 1,
        }
    }

    #[must_use]
    pub fn from_record(item: &ItemPenjualan) -> Self {
        Self {
            nota: item.nota.clone(),
            kode_barang: item.kode_barang.clone(),
            qty: item.qty,
        }
    }
}

impl EntityForm for ItemPenjualanForm {
    type Resource = ItemPenjualan;

    fn validate(&self, mode: FormMode) -> Result<SubmissionFor<ItemPenjualan>, FieldErrors> {
        let mut errors = FieldErrors::new();
        if mode == FormMode::Create {
            require(&mut errors, "nota", &self.nota, "Nota wajib diisi");
            require(&mut errors, "kode_barang", &self.kode_barang, "Barang wajib dipilih");
        }
        require_positive(&mut errors, "qty", self.qty, "Quantity harus lebih dari 0");

        errors.into_result(|| match mode {
            FormMode::Create => Submission::Create(CreateItemPenjualan {
                nota: self.nota.trim().to_string(),
                kode_barang: self.kode_barang.trim().to_string(),
                qty: self.qty,
            }),
            FormMode::Edit => Submission::Update(UpdateItemPenjualan { qty: self.qty }),
        })
    }
}
