//! Generic list screen: fetch, filter, create/edit form, confirmed delete.

use super::{Confirm, Feedback, STILL_REFERENCED_TITLE};
use crate::{
    client::SalesApi,
    core::{DeleteFailure, EntityForm, FieldErrors, FormMode, Searchable, Submission, filter_by_term},
    entities::{PageRequest, Resource, title_case},
    errors::{Error, Result},
};
use tracing::{debug, info, instrument, warn};

/// Predicate restricting which fetched records a screen keeps.
pub type Scope<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// Pagination metadata of the last paged fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}

/// State of one entity's list page.
pub struct ListScreen<R: Resource, A> {
    api: A,
    items: Vec<R>,
    search: String,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    editing: Option<R>,
    form_open: bool,
    field_errors: FieldErrors,
    paging: Option<PageRequest>,
    page_info: Option<PageInfo>,
    scope: Option<Scope<R>>,
}

impl<R: Resource, A: SalesApi> ListScreen<R, A> {
    /// An empty screen; call [`refresh`](Self::refresh) to load it.
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            search: String::new(),
            loading: false,
            error: None,
            notice: None,
            editing: None,
            form_open: false,
            field_errors: FieldErrors::new(),
            paging: None,
            page_info: None,
            scope: None,
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sets the search term; [`visible`](Self::visible) reflects it immediately.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub const fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub const fn editing(&self) -> Option<&R> {
        self.editing.as_ref()
    }

    pub const fn form_open(&self) -> bool {
        self.form_open
    }

    pub const fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub const fn page_info(&self) -> Option<PageInfo> {
        self.page_info
    }

    /// Fetches one page at a time instead of the default list; `None` returns to the default.
    pub fn set_paging(&mut self, paging: Option<PageRequest>) {
        self.paging = paging;
    }

    /// Keeps only the fetched records matching `scope`.
    pub fn set_scope(&mut self, scope: Option<Scope<R>>) {
        self.scope = scope;
    }

    /// Mode the open form submits in.
    pub const fn mode(&self) -> FormMode {
        if self.editing.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    /// Looks a record up in the loaded list.
    pub fn find(&self, key: &R::Key) -> Option<&R> {
        self.items.iter().find(|record| record.key() == *key)
    }

    /// Re-fetches the list.
    ///
    /// On failure the list becomes empty and the error banner is set. Returns
    /// whether the fetch succeeded.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn refresh(&mut self) -> bool {
        self.error = None;

        let fetched = {
            let _busy = InFlight::start(&mut self.loading);
            fetch::<R, A>(&self.api, self.paging).await
        };

        match fetched {
            Ok((mut items, page_info)) => {
                if let Some(scope) = &self.scope {
                    items.retain(|record| scope(record));
                }
                debug!(count = items.len(), "List refreshed");
                self.items = items;
                self.page_info = page_info;
                true
            }
            Err(e) => {
                warn!("Failed to fetch {} list: {e}", R::LABEL);
                self.items.clear();
                self.page_info = None;
                self.error = Some(format!("Gagal mengambil data {}", R::LABEL));
                false
            }
        }
    }

    /// Opens an empty form in create mode.
    pub fn open_create(&mut self) {
        self.editing = None;
        self.form_open = true;
        self.field_errors = FieldErrors::new();
    }

    /// Opens the form in edit mode for `key`, fetching the record if it is not loaded.
    ///
    /// # Errors
    /// Returns the fetch error when the record is neither loaded nor retrievable.
    pub async fn open_edit(&mut self, key: &R::Key) -> Result<&R> {
        let loaded = self.find(key).cloned();
        let record = match loaded {
            Some(record) => record,
            None => match self.api.get::<R>(key).await {
                Ok(record) => record,
                Err(e) => {
                    warn!("Failed to load {} {key}: {e}", R::LABEL);
                    self.error = Some(format!("Gagal mengambil data {}", R::LABEL));
                    return Err(e);
                }
            },
        };

        self.form_open = true;
        self.field_errors = FieldErrors::new();
        Ok(&*self.editing.insert(record))
    }

    /// Closes the form and forgets the record being edited.
    pub fn close_form(&mut self) {
        self.form_open = false;
        self.editing = None;
        self.field_errors = FieldErrors::new();
    }

    /// Validates `form` and sends it as a create or update.
    ///
    /// Invalid input never reaches the API. On success the form closes and
    /// the list is re-fetched; on failure the form stays open.
    #[instrument(skip(self, form), fields(resource = R::PATH))]
    pub async fn submit<F>(&mut self, form: &F) -> Feedback
    where
        F: EntityForm<Resource = R>,
    {
        if self.loading {
            return Feedback::Busy;
        }

        let mode = self.mode();
        let submission = match form.validate(mode) {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(%errors, "Form rejected");
                self.field_errors = errors.clone();
                return Feedback::Invalid(errors);
            }
        };
        self.field_errors = FieldErrors::new();

        let (outcome, fallback, notice) = match submission {
            Submission::Create(payload) => {
                let _busy = InFlight::start(&mut self.loading);
                let outcome = self.api.create::<R>(&payload).await.map(drop);
                (
                    outcome,
                    format!("Gagal menambah data {}", R::LABEL),
                    format!("{} berhasil ditambahkan", title_case(R::LABEL)),
                )
            }
            Submission::Update(payload) => {
                let fallback = format!("Gagal mengupdate data {}", R::LABEL);
                let Some(key) = self.editing.as_ref().map(Resource::key) else {
                    return self.fail(fallback);
                };
                let _busy = InFlight::start(&mut self.loading);
                let outcome = self.api.update::<R>(&key, &payload).await.map(drop);
                (
                    outcome,
                    fallback,
                    format!("{} berhasil diupdate", title_case(R::LABEL)),
                )
            }
        };

        match outcome {
            Ok(()) => {
                info!("{notice}");
                self.close_form();
                self.notice = Some(notice.clone());
                self.refresh().await;
                Feedback::Saved(notice)
            }
            Err(e) => {
                warn!("Submit failed: {e}");
                let message = e.server_message().map_or(fallback, str::to_string);
                self.fail(message)
            }
        }
    }

    /// Asks for confirmation, then deletes `key`.
    #[instrument(skip(self, confirm), fields(resource = R::PATH))]
    pub async fn delete<C>(&mut self, key: &R::Key, confirm: &mut C) -> Feedback
    where
        C: Confirm + ?Sized,
    {
        if self.loading {
            return Feedback::Busy;
        }
        if !confirm.confirm(&delete_prompt::<R>()) {
            debug!("Delete cancelled");
            return Feedback::Cancelled;
        }

        let name = self
            .find(key)
            .map_or_else(|| key.to_string(), Resource::display_name);

        let outcome = {
            let _busy = InFlight::start(&mut self.loading);
            self.api.delete::<R>(key).await
        };

        match outcome {
            Ok(server_message) => {
                info!(%server_message, "Deleted {} {key}", R::LABEL);
                if self.editing.as_ref().is_some_and(|r| r.key() == *key) {
                    self.close_form();
                }
                let notice = format!("{} berhasil dihapus", title_case(R::LABEL));
                self.notice = Some(notice.clone());
                self.refresh().await;
                Feedback::Deleted(notice)
            }
            Err(e) => self.delete_failed(&e, &name),
        }
    }

    fn delete_failed(&mut self, error: &Error, name: &str) -> Feedback {
        match DeleteFailure::classify(error) {
            DeleteFailure::StillReferenced => {
                warn!("Delete blocked by dependent records: {error}");
                let message = format!(
                    "{} \"{name}\" masih terhubung dengan {}.\n\n{}",
                    title_case(R::LABEL),
                    R::REFERENCED_BY,
                    R::DEPENDENT_HINT
                );
                self.error = Some(message.clone());
                Feedback::StillReferenced {
                    title: STILL_REFERENCED_TITLE.to_string(),
                    message,
                }
            }
            DeleteFailure::Other => {
                warn!("Delete failed: {error}");
                self.fail(format!("Gagal menghapus data {}", R::LABEL))
            }
        }
    }

    fn fail(&mut self, message: String) -> Feedback {
        self.error = Some(message.clone());
        Feedback::Failed(message)
    }
}

impl<R: Resource + Searchable, A: SalesApi> ListScreen<R, A> {
    /// Loaded records matching the search term, in list order.
    pub fn visible(&self) -> Vec<&R> {
        filter_by_term(&self.items, &self.search)
    }
}

/// One request's worth of `loading`; the flag drops back to `false` with the
/// guard, also when the request future is cancelled.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Fetches the default list, or one page when paging is set.
async fn fetch<R: Resource, A: SalesApi>(
    api: &A,
    paging: Option<PageRequest>,
) -> Result<(Vec<R>, Option<PageInfo>)> {
    match paging {
        Some(request) => {
            let page = api.list_page::<R>(request).await?;
            let info = PageInfo {
                current_page: page.current_page,
                last_page: page.last_page,
                total: page.total,
            };
            Ok((page.data, Some(info)))
        }
        None => Ok((api.list::<R>().await?, None)),
    }
}

/// Confirmation text for deleting one `R`.
pub fn delete_prompt<R: Resource>() -> String {
    let prompt = format!("Apakah Anda yakin ingin menghapus data {} ini?", R::LABEL);
    match R::DELETE_WARNING {
        Some(warning) => format!("{prompt} {warning}"),
        None => prompt,
    }
}
