//! `sales-buddy pelanggan ...`

use super::{DeleteArgs, ListArgs};
use crate::{
    cli::CliContext,
    client::SalesApi,
    core::validation::PelangganForm,
    entities::{JenisKelamin, Pelanggan},
    errors::Result,
};
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum PelangganCommand {
    /// List customers
    List(ListArgs),
    /// Show one customer
    Show {
        id: String,
    },
    /// Add a customer
    Add(AddPelangganArgs),
    /// Change a customer; omitted fields keep their current value
    Update(UpdatePelangganArgs),
    /// Delete a customer without sales
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AddPelangganArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub nama: String,
    #[arg(long)]
    pub domisili: String,
    #[arg(long, default_value = "pria", help = "pria or wanita")]
    pub jenis_kelamin: JenisKelamin,
}

#[derive(Debug, Args)]
pub struct UpdatePelangganArgs {
    pub id: String,
    #[arg(long)]
    pub nama: Option<String>,
    #[arg(long)]
    pub domisili: Option<String>,
    #[arg(long)]
    pub jenis_kelamin: Option<JenisKelamin>,
}

pub async fn handle<A: SalesApi + Clone>(
    context: &CliContext<A>,
    command: PelangganCommand,
) -> Result<bool> {
    match command {
        PelangganCommand::List(args) => super::list::<Pelanggan, A>(context, &args).await,
        PelangganCommand::Show { id } => super::show::<Pelanggan, A>(context, &id).await,
        PelangganCommand::Add(args) => {
            let form = PelangganForm {
                id_pelanggan: args.id,
                nama: args.nama,
                domisili: args.domisili,
                jenis_kelamin: args.jenis_kelamin,
            };
            super::create(context, &form).await
        }
        PelangganCommand::Update(args) => {
            super::update::<Pelanggan, A, _>(context, &args.id, |current| {
                let current = PelangganForm::from_record(current);
                PelangganForm {
                    nama: args.nama.unwrap_or(current.nama),
                    domisili: args.domisili.unwrap_or(current.domisili),
                    jenis_kelamin: args.jenis_kelamin.unwrap_or(current.jenis_kelamin),
                    ..current
                }
            })
            .await
        }
        PelangganCommand::Delete(args) => {
            super::delete::<Pelanggan, A>(context, &args.key, args.yes).await
        }
    }
}
