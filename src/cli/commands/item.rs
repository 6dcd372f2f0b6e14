//! `sales-buddy item ...`
//!
//! Item changes go through [`PenjualanScreen`] so the parent sale is
//! re-fetched and its new subtotal can be printed.

use super::report_failure;
use crate::{
    cli::{
        CliContext,
        prompt::StdinConfirm,
        render::{format_rupiah, print_feedback, print_records},
    },
    client::SalesApi,
    core::validation::ItemPenjualanForm,
    entities::{ItemKey, ItemPenjualan},
    errors::Result,
    screens::{Feedback, PenjualanScreen},
};
use clap::{ArgAction, Subcommand};
use tracing::warn;

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// List the items of a sale
    List {
        nota: String,
    },
    /// Add a product to a sale
    Add {
        nota: String,
        #[arg(long, help = "Product code")]
        barang: String,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Change the quantity of an item
    Update {
        nota: String,
        kode_barang: String,
        #[arg(long, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove an item from a sale
    Delete {
        nota: String,
        kode_barang: String,
        #[arg(long, short, action = ArgAction::SetTrue, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle<A: SalesApi + Clone>(
    context: &CliContext<A>,
    command: ItemCommand,
) -> Result<bool> {
    match command {
        ItemCommand::List { nota } => match context.api.items_for_nota(&nota).await {
            Ok(items) => {
                let items: Vec<&ItemPenjualan> = items.iter().collect();
                print_records(&items, context.json)?;
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to fetch items of {nota}: {e}");
                report_failure("Gagal mengambil data item penjualan")
            }
        },
        ItemCommand::Add { nota, barang, qty } => {
            let mut screen = PenjualanScreen::new(context.api.clone());
            if let Err(e) = screen.select(&nota).await {
                return report_failure(&e.to_string());
            }
            screen.items_mut().open_create();
            let form = ItemPenjualanForm {
                kode_barang: barang,
                qty,
                ..ItemPenjualanForm::for_nota(nota)
            };
            let feedback = screen.submit_item(&form).await;
            finish(context, &screen, &feedback)
        }
        ItemCommand::Update {
            nota,
            kode_barang,
            qty,
        } => {
            let mut screen = PenjualanScreen::new(context.api.clone());
            if let Err(e) = screen.select(&nota).await {
                return report_failure(&e.to_string());
            }
            let key = ItemKey::new(nota, kode_barang);
            let form = match screen.items_mut().open_edit(&key).await {
                Ok(current) => ItemPenjualanForm {
                    qty,
                    ..ItemPenjualanForm::from_record(current)
                },
                Err(e) => return report_failure(&e.to_string()),
            };
            let feedback = screen.submit_item(&form).await;
            finish(context, &screen, &feedback)
        }
        ItemCommand::Delete {
            nota,
            kode_barang,
            yes,
        } => {
            let mut screen = PenjualanScreen::new(context.api.clone());
            if let Err(e) = screen.select(&nota).await {
                return report_failure(&e.to_string());
            }
            let key = ItemKey::new(nota, kode_barang);
            let feedback = screen
                .delete_item(&key, &mut StdinConfirm::new(yes))
                .await;
            finish(context, &screen, &feedback)
        }
    }
}

/// Prints the feedback and, after a change, the sale's refreshed subtotal.
fn finish<A: SalesApi + Clone>(
    context: &CliContext<A>,
    screen: &PenjualanScreen<A>,
    feedback: &Feedback,
) -> Result<bool> {
    print_feedback(feedback, context.json)?;
    if let (true, false, Some(sale)) = (
        feedback.is_success(),
        context.json,
        screen.selected_sale(),
    ) {
        println!(
            "Subtotal nota {}: {}",
            sale.id_nota,
            format_rupiah(sale.subtotal)
        );
    }
    Ok(feedback.is_success())
}
