//! Subcommand groups and the handlers shared between them.

/// `barang` subcommands
pub mod barang;
/// `item` subcommands
pub mod item;
/// `pelanggan` subcommands
pub mod pelanggan;
/// `penjualan` subcommands
pub mod penjualan;

use super::{
    CliContext,
    prompt::StdinConfirm,
    render::{Tabular, print_feedback, print_json, print_records},
};
use crate::{
    client::SalesApi,
    core::{EntityForm, Searchable},
    entities::{PageRequest, Resource},
    errors::Result,
    screens::{ListScreen, list::PageInfo},
};
use clap::Args;
use tracing::warn;

/// `--page` / `--limit`
#[derive(Debug, Default, Args)]
pub struct PageArgs {
    #[arg(long, help = "Page to fetch (starts at 1)")]
    pub page: Option<u32>,
    #[arg(long, help = "Records per page")]
    pub limit: Option<u32>,
}

impl PageArgs {
    /// `None` when neither flag was given, which fetches the default list.
    #[must_use]
    pub fn request(&self, default_limit: Option<u32>) -> Option<PageRequest> {
        PageRequest::from_parts(self.page, self.limit.or(self.page.and(default_limit)))
    }
}

/// Arguments of `list` for searchable entities.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    #[arg(long, short, help = "Case-insensitive filter over the listed fields")]
    pub search: Option<String>,
    #[command(flatten)]
    pub page: PageArgs,
}

/// Arguments of `delete`.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(value_name = "KEY")]
    pub key: String,
    #[arg(long, short, action = clap::ArgAction::SetTrue, help = "Skip the confirmation prompt")]
    pub yes: bool,
}

/// Prints a failure on stderr and reports it as unsuccessful.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn report_failure(message: &str) -> Result<bool> {
    eprintln!("❌ {message}");
    Ok(false)
}

pub(crate) fn print_page_info(info: Option<PageInfo>, json: bool) {
    if let (Some(info), false) = (info, json) {
        println!(
            "Halaman {} dari {} ({} data)",
            info.current_page, info.last_page, info.total
        );
    }
}

/// Lists a searchable entity, filtered by `--search`.
pub(crate) async fn list<R, A>(context: &CliContext<A>, args: &ListArgs) -> Result<bool>
where
    R: Resource + Searchable + Tabular,
    A: SalesApi + Clone,
{
    let mut screen = ListScreen::<R, A>::new(context.api.clone());
    screen.set_paging(args.page.request(context.page_limit));
    if let Some(term) = &args.search {
        screen.set_search(term.as_str());
    }

    if !screen.refresh().await {
        return report_failure(screen.error().unwrap_or_default());
    }
    print_records(&screen.visible(), context.json)?;
    print_page_info(screen.page_info(), context.json);
    Ok(true)
}

/// Fetches and prints one record.
pub(crate) async fn show<R, A>(context: &CliContext<A>, key: &R::Key) -> Result<bool>
where
    R: Resource + Tabular,
    A: SalesApi + Clone,
{
    match context.api.get::<R>(key).await {
        Ok(record) => {
            print_records(&[&record], context.json)?;
            Ok(true)
        }
        Err(e) => {
            warn!("Failed to fetch {} {key}: {e}", R::LABEL);
            report_failure(&e.to_string())
        }
    }
}

/// Submits a create form.
pub(crate) async fn create<F, A>(context: &CliContext<A>, form: &F) -> Result<bool>
where
    F: EntityForm,
    A: SalesApi + Clone,
{
    let mut screen = ListScreen::<F::Resource, A>::new(context.api.clone());
    screen.open_create();
    let feedback = screen.submit(form).await;
    print_feedback(&feedback, context.json)?;
    Ok(feedback.is_success())
}

/// Loads a record, lets `edit` derive the form from it, and submits the update.
pub(crate) async fn update<R, A, F>(
    context: &CliContext<A>,
    key: &R::Key,
    edit: impl FnOnce(&R) -> F,
) -> Result<bool>
where
    R: Resource,
    A: SalesApi + Clone,
    F: EntityForm<Resource = R>,
{
    let mut screen = ListScreen::<R, A>::new(context.api.clone());
    let form = match screen.open_edit(key).await {
        Ok(current) => edit(current),
        Err(e) => return report_failure(&e.to_string()),
    };
    let feedback = screen.submit(&form).await;
    print_feedback(&feedback, context.json)?;
    Ok(feedback.is_success())
}

/// Confirms and deletes one record.
pub(crate) async fn delete<R, A>(context: &CliContext<A>, key: &R::Key, yes: bool) -> Result<bool>
where
    R: Resource,
    A: SalesApi + Clone,
{
    let mut screen = ListScreen::<R, A>::new(context.api.clone());
    // Loaded only so messages can name the record.
    screen.refresh().await;
    let feedback = screen.delete(key, &mut StdinConfirm::new(yes)).await;
    print_feedback(&feedback, context.json)?;
    Ok(feedback.is_success())
}

/// Prints a JSON document or, otherwise, runs `text`.
pub(crate) fn output(json: bool, value: &serde_json::Value, text: impl FnOnce()) -> Result<()> {
    if json {
        print_json(value)
    } else {
        text();
        Ok(())
    }
}
