//! Ticket lifecycle operations over the [`Store`]
//!
//! Every mutating operation loads the whole document, changes it in memory
//! and saves it back through [`Store::save`], which also refreshes the
//! statistics. An operation that fails part-way never reaches `save`, so the
//! persisted document is either fully updated or untouched.

mod admin;
mod filter;
mod reports;

pub use filter::{ALL, SearchFilters, parse_filter_date, search};

use crate::core::{Clock, Document, Mobile, Status, Ticket, TicketDraft, TicketId, User};
use crate::error::{HelpdeskError, Result};
use crate::storage::{DocumentBackend, Store};
use tracing::{info, warn};

/// Operations used by the submitter and admin views
pub struct TicketService<B, C> {
    store: Store<B, C>,
}

impl<B: DocumentBackend, C: Clock> TicketService<B, C> {
    pub const fn new(store: Store<B, C>) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &Store<B, C> {
        &self.store
    }

    /// Submit a new ticket
    ///
    /// The ticket gets the next monotonic id, status `pending`, and is
    /// inserted at the head of the list. The submitter's user record is
    /// created if needed and gains the new id.
    pub fn create(&self, draft: TicketDraft) -> Result<Ticket> {
        let mut document = self.store.load()?;
        let now = self.store.now();
        let id = document.allocate_ticket_id();

        let user = document.user_or_insert(&draft.mobile, now);
        fill_blank(&mut user.name, &draft.name);
        fill_blank(&mut user.department, &draft.department);
        if let Some(email) = &draft.email {
            fill_blank(&mut user.email, email);
        }
        user.attach_ticket(id.clone());
        user.touch(now);

        let ticket = Ticket::from_draft(id, draft, now);
        document.tickets.insert(0, ticket.clone());
        self.store.save(&mut document)?;

        info!(
            id = %ticket.id,
            category = %ticket.issue_type,
            urgency = %ticket.urgency,
            "Ticket created"
        );
        Ok(ticket)
    }

    /// Change a ticket's status, optionally recording a resolution and assignee
    ///
    /// Non-empty `resolution` and `assigned_to` overwrite the stored values;
    /// empty or absent ones leave them as they are. Re-applying the current
    /// status only refreshes `updated_at`.
    pub fn update_status(
        &self,
        id: &TicketId,
        status: Status,
        resolution: Option<&str>,
        assigned_to: Option<&str>,
    ) -> Result<Ticket> {
        let mut document = self.store.load()?;
        let now = self.store.now();

        let Some(ticket) = document.ticket_mut(id) else {
            warn!(id = %id, "Status update for unknown ticket");
            return Err(HelpdeskError::TicketNotFound { id: id.to_string() });
        };

        let previous = ticket.status;
        ticket.set_status(status, now);
        if let Some(resolution) = non_blank(resolution) {
            ticket.resolution = Some(resolution.to_string());
        }
        if let Some(technician) = non_blank(assigned_to) {
            ticket.assigned_to = Some(technician.to_string());
        }
        let updated = ticket.clone();

        self.store.save(&mut document)?;
        info!(id = %id, from = %previous, to = %status, "Ticket status updated");
        Ok(updated)
    }

    /// Delete a ticket, returning `false` if it did not exist
    pub fn delete(&self, id: &TicketId) -> Result<bool> {
        let mut document = self.store.load()?;

        let Some(index) = document.tickets.iter().position(|t| &t.id == id) else {
            warn!(id = %id, "Delete for unknown ticket");
            return Ok(false);
        };

        let ticket = document.tickets.remove(index);
        if let Some(owner) = document.user_mut(&ticket.mobile) {
            owner.detach_ticket(id);
        }

        self.store.save(&mut document)?;
        info!(id = %id, "Ticket deleted");
        Ok(true)
    }

    pub fn get_ticket(&self, id: &TicketId) -> Result<Option<Ticket>> {
        Ok(self.store.load()?.ticket(id).cloned())
    }

    /// All tickets, most recent first
    pub fn all_tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.store.load()?.tickets)
    }

    /// Tickets submitted from `mobile`
    pub fn user_tickets(&self, mobile: &Mobile) -> Result<Vec<Ticket>> {
        Ok(self
            .store
            .load()?
            .tickets
            .into_iter()
            .filter(|t| &t.mobile == mobile)
            .collect())
    }

    /// Text query plus structured filters; never mutates the stored list
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<Ticket>> {
        let document = self.store.load()?;
        Ok(search(&document.tickets, query, filters))
    }

    /// Register a user on login, or refresh an existing one
    pub fn register_user(
        &self,
        mobile: &Mobile,
        name: &str,
        department: &str,
        email: &str,
    ) -> Result<User> {
        let mut document = self.store.load()?;
        let now = self.store.now();

        let user = document.user_or_insert(mobile, now);
        user.update_profile(name, department, email);
        user.touch(now);
        let user = user.clone();

        self.store.save(&mut document)?;
        info!(mobile = %mobile, "User registered");
        Ok(user)
    }

    pub fn user(&self, mobile: &Mobile) -> Result<Option<User>> {
        Ok(self.store.load()?.user(mobile).cloned())
    }

    pub fn all_users(&self) -> Result<Vec<User>> {
        Ok(self.store.load()?.users)
    }

    /// Copy of the whole persisted document
    pub fn document(&self) -> Result<Document> {
        self.store.load()
    }

    /// Replace the whole persisted document
    pub fn replace_document(&self, mut document: Document) -> Result<()> {
        self.store.save(&mut document)?;
        info!(tickets = document.tickets.len(), "Document replaced");
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn fill_blank(field: &mut String, value: &str) {
    if field.is_empty() {
        value.trim().clone_into(field);
    }
}
