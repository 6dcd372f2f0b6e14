//! `sales-buddy barang ...`

use super::{DeleteArgs, ListArgs};
use crate::{
    cli::CliContext,
    client::SalesApi,
    core::validation::BarangForm,
    entities::Barang,
    errors::Result,
};
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum BarangCommand {
    /// List products
    List(ListArgs),
    /// Show one product
    Show {
        kode: String,
    },
    /// Add a product
    Add(AddBarangArgs),
    /// Change a product; omitted fields keep their current value
    Update(UpdateBarangArgs),
    /// Delete a product that no sale references
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AddBarangArgs {
    #[arg(long)]
    pub kode: String,
    #[arg(long)]
    pub nama: String,
    #[arg(long)]
    pub kategori: String,
    #[arg(long, allow_negative_numbers = true, help = "Unit price in rupiah")]
    pub harga: i64,
}

#[derive(Debug, Args)]
pub struct UpdateBarangArgs {
    pub kode: String,
    #[arg(long)]
    pub nama: Option<String>,
    #[arg(long)]
    pub kategori: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub harga: Option<i64>,
}

pub async fn handle<A: SalesApi + Clone>(
    context: &CliContext<A>,
    command: BarangCommand,
) -> Result<bool> {
    match command {
        BarangCommand::List(args) => super::list::<Barang, A>(context, &args).await,
        BarangCommand::Show { kode } => super::show::<Barang, A>(context, &kode).await,
        BarangCommand::Add(args) => {
            let form = BarangForm {
                kode: args.kode,
                nama: args.nama,
                kategori: args.kategori,
                harga: args.harga,
            };
            super::create(context, &form).await
        }
        BarangCommand::Update(args) => {
            super::update::<Barang, A, _>(context, &args.kode, |current| {
                let current = BarangForm::from_record(current);
                BarangForm {
                    nama: args.nama.unwrap_or(current.nama),
                    kategori: args.kategori.unwrap_or(current.kategori),
                    harga: args.harga.unwrap_or(current.harga),
                    ..current
                }
            })
            .await
        }
        BarangCommand::Delete(args) => super::delete::<Barang, A>(context, &args.key, args.yes).await,
    }
}
