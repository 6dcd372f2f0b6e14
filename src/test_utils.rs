//! Shared test utilities for `SalesBuddy`.
//!
//! This module provides record fixtures with sensible defaults and
//! [`FakeApi`], an in-memory [`SalesApi`] that behaves like the real server
//! closely enough for the screens: it rejects duplicate keys, refuses to
//! delete referenced master data, cascades sale deletes to their items, and
//! keeps each sale's subtotal in step with its items.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use crate::{
    client::SalesApi,
    entities::{
        Barang, ItemPenjualan, JenisKelamin, Page, PageRequest, Pelanggan, Penjualan, Resource,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

/// Rows the server returns for an unpaged list request (its first page).
pub const SERVER_PAGE_SIZE: usize = 10;

/// Creates a product.
pub fn barang(kode: &str, nama: &str, kategori: &str, harga: i64) -> Barang {
    Barang {
        kode: kode.to_string(),
        nama: nama.to_string(),
        kategori: kategori.to_string(),
        harga,
    }
}

/// Creates a customer.
pub fn pelanggan(id: &str, nama: &str, domisili: &str, jenis_kelamin: JenisKelamin) -> Pelanggan {
    Pelanggan {
        id_pelanggan: id.to_string(),
        nama: nama.to_string(),
        domisili: domisili.to_string(),
        jenis_kelamin,
    }
}

/// Creates a sale dated `tgl` (`YYYY-MM-DD`) with no embedded customer.
pub fn penjualan(id_nota: &str, tgl: &str, kode_pelanggan: &str, subtotal: i64) -> Penjualan {
    Penjualan {
        id_nota: id_nota.to_string(),
        tgl: NaiveDate::parse_from_str(tgl, "%Y-%m-%d").unwrap(),
        kode_pelanggan: kode_pelanggan.to_string(),
        subtotal,
        pelanggan: None,
    }
}

/// Creates a line item; `harga` of `None` leaves the product unresolved.
pub fn item(nota: &str, kode_barang: &str, qty: i64, harga: Option<i64>) -> ItemPenjualan {
    ItemPenjualan {
        nota: nota.to_string(),
        kode_barang: kode_barang.to_string(),
        qty,
        barang: harga.map(|harga| barang(kode_barang, "Barang", "Umum", harga)),
    }
}

/// Installs a test subscriber once so `RUST_LOG` works inside tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Kind of request recorded by [`FakeApi`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    ListPage,
    Get,
    Create,
    Update,
    Delete,
}

/// One recorded request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub op: Op,
    pub resource: &'static str,
}

/// Failure to return instead of handling the next matching request.
#[derive(Clone, Debug)]
pub enum Injected {
    Timeout,
    /// The request never completes
    Stall,
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },
}

impl Injected {
    pub fn api(status: u16, message: &str) -> Self {
        Self::Api {
            status,
            message: message.to_string(),
            code: None,
        }
    }

    fn into_error(self) -> Error {
        match self {
            Self::Timeout | Self::Stall => Error::Timeout,
            Self::Api {
                status,
                message,
                code,
            } => Error::Api {
                status,
                message,
                code,
            },
        }
    }
}

#[derive(Default)]
struct State {
    tables: HashMap<&'static str, Vec<Value>>,
    calls: Vec<Call>,
    failures: Vec<(Op, &'static str, Injected)>,
}

/// In-memory stand-in for the sales API.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<State>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts records directly, bypassing the call log.
    pub fn seed<R: Resource>(&self, records: &[R]) {
        let mut state = self.state.lock().unwrap();
        let table = state.tables.entry(R::PATH).or_default();
        table.extend(records.iter().map(|r| serde_json::to_value(r).unwrap()));
    }

    /// Makes the next `op` on `resource` fail with `failure`.
    pub fn fail_next(&self, op: Op, resource: &'static str, failure: Injected) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((op, resource, failure));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of recorded `op` requests against `resource`.
    pub fn count(&self, op: Op, resource: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.op == op && call.resource == resource)
            .count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Current contents of a table, as the server would list them.
    pub fn stored<R: Resource>(&self) -> Vec<R> {
        let state = self.state.lock().unwrap();
        decode_rows(&state, R::PATH)
    }

    async fn begin(&self, op: Op, resource: &'static str) -> Result<MutexGuard<'_, State>> {
        let failure = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call { op, resource });
            state
                .failures
                .iter()
                .position(|(o, r, _)| *o == op && *r == resource)
                .map(|pos| state.failures.remove(pos).2)
        };
        match failure {
            None => Ok(self.state.lock().unwrap()),
            Some(Injected::Stall) => std::future::pending().await,
            Some(failure) => Err(failure.into_error()),
        }
    }
}

/// Rows of a table, with items enriched by their product as the server does.
fn decode_rows<R: Resource>(state: &State, path: &str) -> Vec<R> {
    let rows = state.tables.get(path).cloned().unwrap_or_default();
    rows.into_iter()
        .map(|mut row| {
            if path == ItemPenjualan::PATH {
                let kode = row["kode_barang"].clone();
                if let Some(barang) = state
                    .tables
                    .get(Barang::PATH)
                    .and_then(|t| t.iter().find(|b| b["kode"] == kode))
                {
                    row["barang"] = barang.clone();
                }
            }
            serde_json::from_value(row).unwrap()
        })
        .collect()
}

fn position_of<R: Resource>(state: &State, key: &R::Key) -> Option<usize> {
    decode_rows::<R>(state, R::PATH)
        .iter()
        .position(|record| record.key() == *key)
}

fn not_found<R: Resource>(key: &R::Key) -> Error {
    Error::Api {
        status: 404,
        message: format!("Data {} {key} tidak ditemukan", R::LABEL),
        code: None,
    }
}

fn still_referenced(state: &State, path: &str, key: &str) -> bool {
    let (child, column) = match path {
        "barang" => (ItemPenjualan::PATH, "kode_barang"),
        "pelanggan" => (Penjualan::PATH, "kode_pelanggan"),
        _ => return false,
    };
    state
        .tables
        .get(child)
        .is_some_and(|rows| rows.iter().any(|row| row[column] == key))
}

/// Recomputes every sale's subtotal from its items.
fn recompute_subtotals(state: &mut State) {
    let items: Vec<ItemPenjualan> = decode_rows(state, ItemPenjualan::PATH);
    if let Some(sales) = state.tables.get_mut(Penjualan::PATH) {
        for sale in sales.iter_mut() {
            let nota = sale["id_nota"].as_str().unwrap_or_default().to_string();
            let total = crate::core::compute_total(items.iter().filter(|i| i.nota == nota));
            sale["subtotal"] = json!(total);
        }
    }
}

#[async_trait]
impl SalesApi for FakeApi {
    async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        let state = self.begin(Op::List, R::PATH).await?;
        let mut rows: Vec<R> = decode_rows(&state, R::PATH);
        rows.truncate(SERVER_PAGE_SIZE);
        Ok(rows)
    }

    async fn list_page<R: Resource>(&self, page: PageRequest) -> Result<Page<R>> {
        let state = self.begin(Op::ListPage, R::PATH).await?;
        let all: Vec<R> = decode_rows(&state, R::PATH);
        let limit = page.limit.max(1) as usize;
        let total = all.len();
        let mut result = Page::empty();
        result.data = all
            .into_iter()
            .skip((page.page.max(1) as usize - 1) * limit)
            .take(limit)
            .collect();
        result.current_page = page.page;
        result.per_page = page.limit;
        result.total = total as u64;
        result.last_page = u32::try_from(total.div_ceil(limit).max(1)).unwrap();
        Ok(result)
    }

    async fn get<R: Resource>(&self, key: &R::Key) -> Result<R> {
        let state = self.begin(Op::Get, R::PATH).await?;
        decode_rows::<R>(&state, R::PATH)
            .into_iter()
            .find(|record| record.key() == *key)
            .ok_or_else(|| Error::NotFound {
                resource: R::LABEL,
                key: key.to_string(),
            })
    }

    async fn create<R: Resource>(&self, payload: &R::Create) -> Result<Option<R>> {
        let mut state = self.begin(Op::Create, R::PATH).await?;
        let row = serde_json::to_value(payload)?;
        let record: R = serde_json::from_value(row.clone())?;
        if position_of::<R>(&state, &record.key()).is_some() {
            return Err(Error::Api {
                status: 422,
                message: format!("Data {} {} sudah ada", R::LABEL, record.key()),
                code: None,
            });
        }
        state.tables.entry(R::PATH).or_default().push(row);
        if R::PATH == ItemPenjualan::PATH {
            recompute_subtotals(&mut state);
        }
        Ok(Some(record))
    }

    async fn update<R: Resource>(&self, key: &R::Key, payload: &R::Update) -> Result<Option<R>> {
        let mut state = self.begin(Op::Update, R::PATH).await?;
        let pos = position_of::<R>(&state, key).ok_or_else(|| not_found::<R>(key))?;
        let changes = serde_json::to_value(payload)?;
        let row = &mut state.tables.get_mut(R::PATH).unwrap()[pos];
        if let (Some(row), Some(changes)) = (row.as_object_mut(), changes.as_object()) {
            for (field, value) in changes {
                row.insert(field.clone(), value.clone());
            }
        }
        let record: R = serde_json::from_value(row.clone())?;
        if R::PATH == ItemPenjualan::PATH {
            recompute_subtotals(&mut state);
        }
        Ok(Some(record))
    }

    async fn delete<R: Resource>(&self, key: &R::Key) -> Result<String> {
        let mut state = self.begin(Op::Delete, R::PATH).await?;
        let pos = position_of::<R>(&state, key).ok_or_else(|| not_found::<R>(key))?;
        if still_referenced(&state, R::PATH, &key.to_string()) {
            return Err(Error::Api {
                status: 500,
                message: "SQLSTATE[23000]: Integrity constraint violation: 1451 Cannot delete or update a parent row: a foreign key constraint fails".to_string(),
                code: None,
            });
        }
        state.tables.get_mut(R::PATH).unwrap().remove(pos);
        match R::PATH {
            "penjualan" => {
                let nota = key.to_string();
                if let Some(items) = state.tables.get_mut(ItemPenjualan::PATH) {
                    items.retain(|row| row["nota"] != nota.as_str());
                }
            }
            "item_penjualan" => recompute_subtotals(&mut state),
            _ => {}
        }
        Ok(format!("Data {} berhasil dihapus", R::LABEL))
    }
}

/// A fake with two products, two customers, and one sale holding one item.
pub fn seeded_api() -> FakeApi {
    let api = FakeApi::new();
    api.seed(&[
        barang("B1", "Mouse", "Elektronik", 50_000),
        barang("B2", "Keyboard", "Elektronik", 150_000),
    ]);
    api.seed(&[
        pelanggan("P1", "Andi", "Bandung", JenisKelamin::Pria),
        pelanggan("P2", "Siti", "Jakarta", JenisKelamin::Wanita),
    ]);
    api.seed(&[penjualan("N1", "2024-05-01", "P1", 100_000)]);
    api.seed(&[ItemPenjualan {
        nota: "N1".to_string(),
        kode_barang: "B1".to_string(),
        qty: 2,
        barang: None,
    }]);
    api
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_keeps_subtotals_in_step() {
        let api = seeded_api();
        let payload = crate::entities::CreateItemPenjualan {
            nota: "N1".to_string(),
            kode_barang: "B2".to_string(),
            qty: 1,
        };
        api.create::<ItemPenjualan>(&payload).await.unwrap();

        let sales = api.list::<Penjualan>().await.unwrap();
        assert_eq!(sales[0].subtotal, 250_000);
        assert_eq!(api.count(Op::List, "penjualan"), 1);
    }

    #[tokio::test]
    async fn test_fake_injects_failures_once() {
        let api = seeded_api();
        api.fail_next(Op::List, "barang", Injected::Timeout);
        assert!(matches!(api.list::<Barang>().await, Err(Error::Timeout)));
        assert_eq!(api.list::<Barang>().await.unwrap().len(), 2);
    }
}
