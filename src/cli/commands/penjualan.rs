//! `sales-buddy penjualan ...`

use super::{DeleteArgs, PageArgs, output, print_page_info, report_failure};
use crate::{
    cli::{
        CliContext,
        prompt::StdinConfirm,
        render::{format_rupiah, format_tanggal, print_feedback, print_records, table},
    },
    client::SalesApi,
    core::validation::PenjualanForm,
    entities::{Penjualan, Resource},
    errors::{Error, Result},
    screens::{ListScreen, PenjualanScreen},
};
use chrono::Local;
use clap::{Args, Subcommand};
use serde_json::json;

#[derive(Debug, Subcommand)]
pub enum PenjualanCommand {
    /// List sales
    List(PageArgs),
    /// Show a sale with its line items and totals
    Show {
        nota: String,
    },
    /// Record a new sale (add items with `item add`)
    Add(AddPenjualanArgs),
    /// Change a sale's date or customer
    Update(UpdatePenjualanArgs),
    /// Delete a sale and all of its items
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AddPenjualanArgs {
    #[arg(long)]
    pub nota: String,
    #[arg(long, help = "Date as YYYY-MM-DD; defaults to today")]
    pub tgl: Option<String>,
    #[arg(long, help = "Customer ID")]
    pub pelanggan: String,
}

#[derive(Debug, Args)]
pub struct UpdatePenjualanArgs {
    pub nota: String,
    #[arg(long, help = "Date as YYYY-MM-DD")]
    pub tgl: Option<String>,
    #[arg(long, help = "Customer ID")]
    pub pelanggan: Option<String>,
}

pub async fn handle<A: SalesApi + Clone>(
    context: &CliContext<A>,
    command: PenjualanCommand,
) -> Result<bool> {
    match command {
        PenjualanCommand::List(args) => list(context, &args).await,
        PenjualanCommand::Show { nota } => show(context, &nota).await,
        PenjualanCommand::Add(args) => {
            let today = PenjualanForm::dated(Local::now().date_naive());
            let form = PenjualanForm {
                id_nota: args.nota,
                tgl: args.tgl.unwrap_or(today.tgl),
                kode_pelanggan: args.pelanggan,
                subtotal: 0,
            };
            super::create(context, &form).await
        }
        PenjualanCommand::Update(args) => {
            super::update::<Penjualan, A, _>(context, &args.nota, |current| {
                let current = PenjualanForm::from_record(current);
                PenjualanForm {
                    tgl: args.tgl.unwrap_or(current.tgl),
                    kode_pelanggan: args.pelanggan.unwrap_or(current.kode_pelanggan),
                    ..current
                }
            })
            .await
        }
        PenjualanCommand::Delete(args) => {
            let mut screen = PenjualanScreen::new(context.api.clone());
            screen.load().await;
            let feedback = screen
                .delete_sale(&args.key, &mut StdinConfirm::new(args.yes))
                .await;
            print_feedback(&feedback, context.json)?;
            Ok(feedback.is_success())
        }
    }
}

async fn list<A: SalesApi + Clone>(context: &CliContext<A>, args: &PageArgs) -> Result<bool> {
    let mut screen = ListScreen::<Penjualan, A>::new(context.api.clone());
    screen.set_paging(args.request(context.page_limit));
    if !screen.refresh().await {
        return report_failure(screen.error().unwrap_or_default());
    }
    let sales: Vec<&Penjualan> = screen.items().iter().collect();
    print_records(&sales, context.json)?;
    print_page_info(screen.page_info(), context.json);
    Ok(true)
}

async fn show<A: SalesApi + Clone>(context: &CliContext<A>, nota: &str) -> Result<bool> {
    let mut screen = PenjualanScreen::new(context.api.clone());
    screen.load_references().await;
    match screen.select(nota).await {
        Ok(true) => {}
        Ok(false) => return report_failure(screen.items().error().unwrap_or_default()),
        Err(e) => return report_failure(&e.to_string()),
    }
    let Some(sale) = screen.selected_sale().cloned() else {
        let missing = Error::NotFound {
            resource: Penjualan::LABEL,
            key: nota.to_string(),
        };
        return report_failure(&missing.to_string());
    };

    let items = screen.items().items();
    let total = screen.total();
    let customer = sale.pelanggan.as_ref().map_or_else(
        || {
            screen
                .pelanggan()
                .iter()
                .find(|p| p.id_pelanggan == sale.kode_pelanggan)
                .map_or(sale.kode_pelanggan.as_str(), |p| p.nama.as_str())
        },
        |p| p.nama.as_str(),
    );

    let document = json!({ "penjualan": sale, "items": items, "total": total });
    output(context.json, &document, || {
        println!("Nota      : {}", sale.id_nota);
        println!("Tanggal   : {}", format_tanggal(sale.tgl));
        println!("Pelanggan : {customer} ({})", sale.kode_pelanggan);
        println!("Subtotal  : {}", format_rupiah(sale.subtotal));
        println!();
        if items.is_empty() {
            println!("Belum ada item.");
        } else {
            println!("{}", table(items));
        }
        println!();
        println!("Total item: {}", format_rupiah(total));
        if total != sale.subtotal {
            println!("⚠️ Total item berbeda dengan subtotal dari server.");
        }
    })?;
    Ok(true)
}
