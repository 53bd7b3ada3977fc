use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use crate::model::{Filter, Item, ItemId, OwnerId};

use super::request::{Completion, Op, Reply, Request, RequestId};

/// Default lifetime of an error banner
pub const ERROR_TIMEOUT: Duration = Duration::from_secs(3);

/// The user-facing failure messages. One slot, last writer wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    EmptyTitle,
    Add,
    Update,
    Delete,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Load => "Unable to load todos",
            ErrorKind::EmptyTitle => "Title should not be empty",
            ErrorKind::Add => "Unable to add a todo",
            ErrorKind::Update => "Unable to update a todo",
            ErrorKind::Delete => "Unable to delete a todo",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The error currently shown, with the instant it clears itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub kind: ErrorKind,
    /// `None` when the timeout is too large to represent
    pub expires_at: Option<Instant>,
}

/// Inline rename in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: ItemId,
    pub text: String,
    /// A commit for this draft is awaiting its response
    pub submitted: bool,
}

/// One rendered list row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub item: &'a Item,
    pub pending: bool,
    pub placeholder: bool,
}

/// Why a request was issued, so its completion can be reconciled
#[derive(Debug, Clone)]
enum Purpose {
    Load,
    Create,
    Toggle(ItemId),
    Rename { id: ItemId, title: String },
    Delete(ItemId),
}

/// Owns everything the todo view shows and drives every transition.
///
/// Intents return the requests to perform; the caller executes them in any
/// order and feeds each result back through [`ViewState::complete`]. The list
/// is only ever changed by completions, never optimistically (the create
/// placeholder lives beside the list, not in it).
#[derive(Debug)]
pub struct ViewState {
    owner_id: OwnerId,
    items: Vec<Item>,
    filter: Filter,
    /// Counted: an id stays pending until every operation on it has settled
    pending: HashMap<ItemId, usize>,
    placeholder: Option<Item>,
    new_title: String,
    input_disabled: bool,
    focus_input: bool,
    edit: Option<EditDraft>,
    notice: Option<Notice>,
    error_timeout: Duration,
    loading: bool,
    in_flight: HashMap<RequestId, Purpose>,
    next_request: u64,
}

impl ViewState {
    pub fn new(owner_id: OwnerId) -> Self {
        ViewState {
            owner_id,
            items: Vec::new(),
            filter: Filter::All,
            pending: HashMap::new(),
            placeholder: None,
            new_title: String::new(),
            input_disabled: false,
            focus_input: false,
            edit: None,
            notice: None,
            error_timeout: ERROR_TIMEOUT,
            loading: false,
            in_flight: HashMap::new(),
            next_request: 1,
        }
    }

    pub fn with_error_timeout(mut self, timeout: Duration) -> Self {
        self.error_timeout = timeout;
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// The authoritative list, in server order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        let filter = self.filter;
        self.items.iter().filter(move |item| filter.matches(item))
    }

    /// Visible items followed by the create placeholder, if any.
    /// The placeholder is shown regardless of the filter.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let mut rows: Vec<Row> = self
            .visible_items()
            .map(|item| Row {
                item,
                pending: self.is_pending(item.id),
                placeholder: false,
            })
            .collect();
        if let Some(placeholder) = &self.placeholder {
            rows.push(Row {
                item: placeholder,
                pending: true,
                placeholder: true,
            });
        }
        rows
    }

    pub fn placeholder(&self) -> Option<&Item> {
        self.placeholder.as_ref()
    }

    pub fn is_pending(&self, id: ItemId) -> bool {
        self.pending.get(&id).is_some_and(|n| *n > 0)
    }

    pub fn pending_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self
            .pending
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// "N items left"
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    pub fn has_completed(&self) -> bool {
        self.items.iter().any(|item| item.completed)
    }

    /// Toggle-all indicator state
    pub fn all_completed(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.completed)
    }

    /// Toggle-all control and footer are only shown for a non-empty list
    pub fn show_chrome(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn new_title(&self) -> &str {
        &self.new_title
    }

    pub fn input_disabled(&self) -> bool {
        self.input_disabled
    }

    pub fn edit(&self) -> Option<&EditDraft> {
        self.edit.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.notice.map(|n| n.kind)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Requests issued but not yet completed
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns true once after a create settles, telling the UI to put
    /// keyboard focus back on the new-item input.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_input)
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Fetch the whole list. Issued once at startup.
    pub fn load(&mut self) -> Vec<Request> {
        self.loading = true;
        vec![self.issue(Op::List, Purpose::Load)]
    }

    /// Replace the new-item input text. Typing also dismisses the error.
    /// Ignored while a create is in flight.
    pub fn set_new_title(&mut self, text: impl Into<String>) {
        if self.input_disabled {
            return;
        }
        self.new_title = text.into();
        self.notice = None;
    }

    /// Submit the new-item input.
    pub fn submit_new(&mut self, now: Instant) -> Vec<Request> {
        if self.input_disabled {
            return Vec::new();
        }
        let title = self.new_title.trim().to_string();
        if title.is_empty() {
            self.show_error(ErrorKind::EmptyTitle, now);
            return Vec::new();
        }

        self.input_disabled = true;
        self.placeholder = Some(Item::placeholder(title.clone(), self.owner_id));
        vec![self.issue(
            Op::Create {
                title,
                completed: false,
            },
            Purpose::Create,
        )]
    }

    /// Invert one item's completed flag. Leaves edit mode.
    pub fn toggle(&mut self, id: ItemId) -> Vec<Request> {
        self.edit = None;
        let Some(item) = self.item(id) else {
            return Vec::new();
        };
        let updated = item.with_completed(!item.completed);
        self.mark_pending(id);
        vec![self.issue(Op::Update(updated), Purpose::Toggle(id))]
    }

    /// Complete every incomplete item, or reopen everything when all are done.
    /// Each item is an independent toggle; there is no batch request.
    pub fn toggle_all(&mut self) -> Vec<Request> {
        let any_incomplete = self.items.iter().any(|item| !item.completed);
        let targets: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| !any_incomplete || !item.completed)
            .map(|item| item.id)
            .collect();
        targets.into_iter().flat_map(|id| self.toggle(id)).collect()
    }

    pub fn delete(&mut self, id: ItemId) -> Vec<Request> {
        if self.item(id).is_none() {
            return Vec::new();
        }
        self.mark_pending(id);
        vec![self.issue(Op::Delete(id), Purpose::Delete(id))]
    }

    /// Delete every item that is completed right now.
    pub fn clear_completed(&mut self) -> Vec<Request> {
        let completed: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| item.completed)
            .map(|item| item.id)
            .collect();
        completed.into_iter().flat_map(|id| self.delete(id)).collect()
    }

    /// Enter edit mode for one item, seeded with its title. Replaces any
    /// other draft.
    pub fn begin_rename(&mut self, id: ItemId) -> bool {
        let Some(item) = self.item(id) else {
            return false;
        };
        self.edit = Some(EditDraft {
            id,
            text: item.title.clone(),
            submitted: false,
        });
        true
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.edit
            && !edit.submitted
        {
            edit.text = text.into();
        }
    }

    /// Commit the draft (Enter or focus loss).
    ///
    /// Unchanged title: leave edit mode silently. Empty title: delete the
    /// item. Otherwise send the trimmed title.
    pub fn commit_rename(&mut self) -> Vec<Request> {
        let Some(edit) = &self.edit else {
            return Vec::new();
        };
        if edit.submitted {
            return Vec::new();
        }
        let id = edit.id;
        let title = edit.text.trim().to_string();

        let Some(item) = self.item(id) else {
            self.edit = None;
            return Vec::new();
        };
        if title == item.title {
            self.edit = None;
            return Vec::new();
        }

        let requests = if title.is_empty() {
            self.delete(id)
        } else {
            let updated = item.with_title(title.clone());
            self.mark_pending(id);
            vec![self.issue(Op::Update(updated), Purpose::Rename { id, title })]
        };
        if let Some(edit) = &mut self.edit {
            edit.submitted = true;
        }
        requests
    }

    /// Escape: discard the draft.
    pub fn cancel_rename(&mut self) {
        if self.edit.as_ref().is_some_and(|e| !e.submitted) {
            self.edit = None;
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn dismiss_error(&mut self) {
        self.notice = None;
    }

    /// Clear the error once its display time is over.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.is_some_and(|n| n.expires_at.is_some_and(|at| now >= at)) {
            self.notice = None;
        }
    }

    // -----------------------------------------------------------------------
    // Completions
    // -----------------------------------------------------------------------

    /// Reconcile a settled request into the view.
    pub fn complete(&mut self, completion: Completion, now: Instant) {
        let Some(purpose) = self.in_flight.remove(&completion.request) else {
            tracing::warn!(request = %completion.request, "completion for unknown request");
            return;
        };
        if let Err(e) = &completion.result {
            tracing::warn!(request = %completion.request, ?purpose, error = %e, "request failed");
        }

        match purpose {
            Purpose::Load => {
                self.loading = false;
                match completion.result {
                    Ok(Reply::Items(items)) => self.items = items,
                    Ok(other) => unexpected_reply("list", &other),
                    Err(_) => self.show_error(ErrorKind::Load, now),
                }
            }
            Purpose::Create => {
                self.placeholder = None;
                self.input_disabled = false;
                self.focus_input = true;
                match completion.result {
                    Ok(Reply::Created(item)) => {
                        self.items.push(item);
                        self.new_title.clear();
                    }
                    Ok(other) => unexpected_reply("create", &other),
                    Err(_) => self.show_error(ErrorKind::Add, now),
                }
            }
            Purpose::Toggle(id) => {
                self.unmark_pending(id);
                match completion.result {
                    Ok(_) => {
                        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                            item.completed = !item.completed;
                        }
                    }
                    Err(_) => self.show_error(ErrorKind::Update, now),
                }
            }
            Purpose::Rename { id, title } => {
                self.unmark_pending(id);
                match completion.result {
                    Ok(_) => {
                        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                            item.title = title;
                        }
                    }
                    Err(_) => self.show_error(ErrorKind::Update, now),
                }
                if self.edit.as_ref().is_some_and(|e| e.id == id) {
                    self.edit = None;
                }
            }
            Purpose::Delete(id) => {
                self.unmark_pending(id);
                match completion.result {
                    Ok(_) => {
                        self.items.retain(|item| item.id != id);
                        if self.edit.as_ref().is_some_and(|e| e.id == id) {
                            self.edit = None;
                        }
                    }
                    Err(_) => {
                        // A rename that turned into a delete stays editable.
                        if let Some(edit) = &mut self.edit
                            && edit.id == id
                        {
                            edit.submitted = false;
                        }
                        self.show_error(ErrorKind::Delete, now);
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn issue(&mut self, op: Op, purpose: Purpose) -> Request {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        tracing::debug!(request = %id, op = op.name(), "issuing request");
        self.in_flight.insert(id, purpose);
        Request { id, op }
    }

    fn show_error(&mut self, kind: ErrorKind, now: Instant) {
        self.notice = Some(Notice {
            kind,
            expires_at: now.checked_add(self.error_timeout),
        });
    }

    fn mark_pending(&mut self, id: ItemId) {
        *self.pending.entry(id).or_insert(0) += 1;
    }

    fn unmark_pending(&mut self, id: ItemId) {
        if let Some(count) = self.pending.get_mut(&id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.pending.remove(&id);
            }
        }
    }
}

fn unexpected_reply(op: &str, reply: &Reply) {
    tracing::error!(op, ?reply, "reply does not match request");
}
