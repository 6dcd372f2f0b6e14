//! Sales screen: the sale list, the selected sale's line items, and the
//! customer and product lists the forms pick from.
//!
//! A sale's `subtotal` is computed by the server from its items, so every
//! item mutation re-fetches the sale list as well as the item list. The sale
//! list only holds the server's first page; the selected sale is fetched by
//! key instead of being looked up there.

use super::{Confirm, Feedback, ListScreen};
use crate::{
    client::SalesApi,
    core::{EntityForm, compute_total, subtotal::preview_line_total},
    entities::{Barang, ItemKey, ItemPenjualan, Pelanggan, Penjualan},
    errors::Result,
};
use tracing::{debug, instrument, warn};

/// State of the sales page: sales, the selected sale's items, and the pickers.
pub struct PenjualanScreen<A> {
    api: A,
    sales: ListScreen<Penjualan, A>,
    items: ListScreen<ItemPenjualan, A>,
    pelanggan: Vec<Pelanggan>,
    barang: Vec<Barang>,
    selected: Option<String>,
    selected_sale: Option<Penjualan>,
}

impl<A: SalesApi + Clone> PenjualanScreen<A> {
    /// An empty screen; call [`load`](Self::load) to fill it.
    pub fn new(api: A) -> Self {
        Self {
            sales: ListScreen::new(api.clone()),
            items: ListScreen::new(api.clone()),
            api,
            pelanggan: Vec::new(),
            barang: Vec::new(),
            selected: None,
            selected_sale: None,
        }
    }

    /// The sale list.
    pub const fn sales(&self) -> &ListScreen<Penjualan, A> {
        &self.sales
    }

    /// The sale list, for form and search actions.
    pub const fn sales_mut(&mut self) -> &mut ListScreen<Penjualan, A> {
        &mut self.sales
    }

    /// Line items of the selected sale.
    pub const fn items(&self) -> &ListScreen<ItemPenjualan, A> {
        &self.items
    }

    /// Line items of the selected sale, for form actions.
    pub const fn items_mut(&mut self) -> &mut ListScreen<ItemPenjualan, A> {
        &mut self.items
    }

    /// Customers for the sale form's picker.
    pub fn pelanggan(&self) -> &[Pelanggan] {
        &self.pelanggan
    }

    /// Products for the item form's picker.
    pub fn barang(&self) -> &[Barang] {
        &self.barang
    }

    /// `id_nota` of the selected sale.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected sale as last fetched from `GET /api/penjualan/{nota}`.
    pub const fn selected_sale(&self) -> Option<&Penjualan> {
        self.selected_sale.as_ref()
    }

    /// Loads the reference lists and the sale list.
    pub async fn load(&mut self) -> bool {
        self.load_references().await;
        self.sales.refresh().await
    }

    /// Loads customers and products for the pickers.
    ///
    /// A failure here is logged and leaves that list empty; it does not set
    /// the screen's error banner.
    #[instrument(skip(self))]
    pub async fn load_references(&mut self) {
        self.pelanggan = self.api.list::<Pelanggan>().await.unwrap_or_else(|e| {
            warn!("Failed to load pelanggan for picker: {e}");
            Vec::new()
        });
        self.barang = self.api.list::<Barang>().await.unwrap_or_else(|e| {
            warn!("Failed to load barang for picker: {e}");
            Vec::new()
        });
    }

    /// Selects a sale, fetches it, and loads its line items.
    ///
    /// Returns whether the items loaded; their failure is on the item screen.
    ///
    /// # Errors
    /// Returns the fetch error when the sale itself cannot be retrieved. Its
    /// items are not loaded then.
    #[instrument(skip(self))]
    pub async fn select(&mut self, nota: &str) -> Result<bool> {
        let owned = nota.to_string();
        self.selected = Some(owned.clone());
        self.items
            .set_scope(Some(Box::new(move |item: &ItemPenjualan| item.nota == owned)));
        self.items.close_form();
        self.reload_selected().await?;
        Ok(self.items.refresh().await)
    }

    /// Re-fetches the selected sale; on failure it is forgotten, not kept stale.
    async fn reload_selected(&mut self) -> Result<()> {
        let Some(nota) = self.selected.clone() else {
            return Ok(());
        };
        match self.api.get::<Penjualan>(&nota).await {
            Ok(sale) => {
                self.selected_sale = Some(sale);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to fetch penjualan {nota}: {e}");
                self.selected_sale = None;
                Err(e)
            }
        }
    }

    /// Re-fetches what an item change affects: the sale list and the selected sale.
    async fn refresh_sales(&mut self) {
        self.sales.refresh().await;
        if let Err(e) = self.reload_selected().await {
            debug!("Selected sale left unset after item change: {e}");
        }
    }

    /// Creates or updates a line item, then re-fetches items and sales.
    pub async fn submit_item<F>(&mut self, form: &F) -> Feedback
    where
        F: EntityForm<Resource = ItemPenjualan>,
    {
        let feedback = self.items.submit(form).await;
        if feedback.is_success() {
            self.refresh_sales().await;
        }
        feedback
    }

    /// Deletes a line item after confirmation, then re-fetches items and sales.
    pub async fn delete_item<C>(&mut self, key: &ItemKey, confirm: &mut C) -> Feedback
    where
        C: Confirm + ?Sized,
    {
        let feedback = self.items.delete(key, confirm).await;
        if feedback.is_success() {
            self.refresh_sales().await;
        }
        feedback
    }

    /// Deletes a sale (and with it, server-side, its items), then re-fetches both lists.
    pub async fn delete_sale<C>(&mut self, nota: &str, confirm: &mut C) -> Feedback
    where
        C: Confirm + ?Sized,
    {
        let feedback = self.sales.delete(&nota.to_string(), confirm).await;
        if feedback.is_success() {
            if self.selected.as_deref() == Some(nota) {
                self.selected = None;
                self.selected_sale = None;
            }
            self.items.refresh().await;
        }
        feedback
    }

    /// Sum of the loaded line items, computed locally.
    pub fn total(&self) -> i64 {
        compute_total(self.items.items())
    }

    /// Line value of an item not yet saved, priced from the product list.
    pub fn preview(&self, kode_barang: &str, qty: i64) -> i64 {
        preview_line_total(kode_barang, qty, &self.barang)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::validation::ItemPenjualanForm,
        test_utils::{Injected, Op, SERVER_PAGE_SIZE, penjualan, seeded_api},
    };

    fn yes(_: &str) -> bool {
        true
    }

    #[tokio::test]
    async fn test_load_fills_references_and_sales() {
        let api = seeded_api();
        let mut screen = PenjualanScreen::new(api.clone());
        assert!(screen.load().await);
        assert_eq!(screen.pelanggan().len(), 2);
        assert_eq!(screen.barang().len(), 2);
        assert_eq!(screen.sales().items().len(), 1);
    }

    #[tokio::test]
    async fn test_reference_failure_is_silent() {
        let api = seeded_api();
        api.fail_next(Op::List, "pelanggan", Injected::Timeout);
        let mut screen = PenjualanScreen::new(api.clone());

        assert!(screen.load().await);
        assert!(screen.pelanggan().is_empty());
        assert_eq!(screen.barang().len(), 2);
        assert!(screen.sales().error().is_none());
    }

    #[tokio::test]
    async fn test_select_loads_only_that_sales_items() {
        let api = seeded_api();
        api.seed(&[ItemPenjualan {
            nota: "N2".to_string(),
            kode_barang: "B2".to_string(),
            qty: 1,
            barang: None,
        }]);
        let mut screen = PenjualanScreen::new(api.clone());
        screen.load().await;

        assert!(screen.select("N1").await.unwrap());
        assert_eq!(screen.items().items().len(), 1);
        assert_eq!(screen.total(), 100_000);
        assert_eq!(screen.selected_sale().map(|s| s.subtotal), Some(100_000));
    }

    #[tokio::test]
    async fn test_adding_item_refetches_items_and_sales() {
        let api = seeded_api();
        let mut screen = PenjualanScreen::new(api.clone());
        screen.load().await;
        screen.select("N1").await.unwrap();
        api.clear_calls();

        screen.items_mut().open_create();
        let form = ItemPenjualanForm {
            kode_barang: "B2".to_string(),
            qty: 2,
            ..ItemPenjualanForm::for_nota("N1")
        };
        assert_eq!(screen.preview(&form.kode_barang, form.qty), 300_000);

        let feedback = screen.submit_item(&form).await;
        assert!(feedback.is_success());
        assert_eq!(api.count(Op::List, "item_penjualan"), 1);
        assert_eq!(api.count(Op::List, "penjualan"), 1);
        assert_eq!(screen.total(), 400_000);
        assert_eq!(screen.selected_sale().unwrap().subtotal, 400_000);
    }

    #[tokio::test]
    async fn test_deleting_item_refetches_items_and_sales() {
        let api = seeded_api();
        let mut screen = PenjualanScreen::new(api.clone());
        screen.load().await;
        screen.select("N1").await.unwrap();
        api.clear_calls();

        let feedback = screen
            .delete_item(&ItemKey::new("N1", "B1"), &mut yes)
            .await;
        assert_eq!(
            feedback,
            Feedback::Deleted("Item penjualan berhasil dihapus".to_string())
        );
        assert_eq!(api.count(Op::List, "item_penjualan"), 1);
        assert_eq!(api.count(Op::List, "penjualan"), 1);
        assert_eq!(screen.total(), 0);
        assert_eq!(screen.selected_sale().unwrap().subtotal, 0);
    }

    #[tokio::test]
    async fn test_deleting_sale_refetches_items_and_sales() {
        let api = seeded_api();
        let mut screen = PenjualanScreen::new(api.clone());
        screen.load().await;
        screen.select("N1").await.unwrap();
        api.clear_calls();

        let feedback = screen.delete_sale("N1", &mut yes).await;
        assert!(feedback.is_success());
        assert_eq!(api.count(Op::List, "item_penjualan"), 1);
        assert_eq!(api.count(Op::List, "penjualan"), 1);
        assert!(screen.sales().items().is_empty());
        assert!(screen.items().items().is_empty());
        assert!(screen.selected().is_none());
    }

    #[tokio::test]
    async fn test_sale_beyond_first_list_page_is_fetched_by_key() {
        let api = seeded_api();
        let later: Vec<Penjualan> = (2..=SERVER_PAGE_SIZE + 1)
            .map(|n| penjualan(&format!("N{n}"), "2024-05-02", "P2", 0))
            .collect();
        api.seed(&later);
        let last = format!("N{}", SERVER_PAGE_SIZE + 1);

        let mut screen = PenjualanScreen::new(api.clone());
        screen.load().await;
        assert!(screen.sales().find(&last).is_none());

        assert!(screen.select(&last).await.unwrap());
        assert_eq!(screen.selected_sale().unwrap().id_nota, last);
        assert_eq!(api.count(Op::Get, "penjualan"), 1);

        screen.items_mut().open_create();
        let form = ItemPenjualanForm {
            kode_barang: "B1".to_string(),
            qty: 3,
            ..ItemPenjualanForm::for_nota(last.clone())
        };
        assert!(screen.submit_item(&form).await.is_success());
        assert_eq!(screen.selected_sale().unwrap().subtotal, 150_000);
        assert_eq!(api.count(Op::Get, "penjualan"), 2);
    }

    #[tokio::test]
    async fn test_selecting_missing_sale_fails_without_loading_items() {
        let api = seeded_api();
        let mut screen = PenjualanScreen::new(api.clone());

        let err = screen.select("N9").await.unwrap_err();
        assert!(matches!(err, crate::errors::Error::NotFound { .. }));
        assert!(screen.selected_sale().is_none());
        assert_eq!(api.count(Op::List, "item_penjualan"), 0);
    }

    #[tokio::test]
    async fn test_failed_item_delete_skips_cascade() {
        let api = seeded_api();
        let mut screen = PenjualanScreen::new(api.clone());
        screen.load().await;
        screen.select("N1").await.unwrap();
        api.clear_calls();
        api.fail_next(Op::Delete, "item_penjualan", Injected::Timeout);

        let feedback = screen
            .delete_item(&ItemKey::new("N1", "B1"), &mut yes)
            .await;
        assert_eq!(
            feedback,
            Feedback::Failed("Gagal menghapus data item penjualan".to_string())
        );
        assert_eq!(api.count(Op::List, "penjualan"), 0);
        assert_eq!(screen.items().items().len(), 1);
    }
}
