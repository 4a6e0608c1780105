use super::{Mobile, TicketId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An end user, identified by mobile number
///
/// `tickets` is a denormalized index of the ids this user submitted. The
/// service keeps it in sync on ticket create and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub mobile: Mobile,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tickets: Vec<TicketId>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn new(mobile: Mobile, now: DateTime<Utc>) -> Self {
        Self {
            mobile,
            name: String::new(),
            department: String::new(),
            email: String::new(),
            tickets: Vec::new(),
            created_at: now,
            last_active: now,
        }
    }

    /// Overwrite profile fields with any non-empty values given
    pub fn update_profile(&mut self, name: &str, department: &str, email: &str) {
        for (field, value) in [
            (&mut self.name, name),
            (&mut self.department, department),
            (&mut self.email, email),
        ] {
            let value = value.trim();
            if !value.is_empty() {
                *field = value.to_string();
            }
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = now;
    }

    pub fn attach_ticket(&mut self, id: TicketId) {
        if !self.tickets.contains(&id) {
            self.tickets.push(id);
        }
    }

    /// Remove `id` from the ticket index, returning whether it was present
    pub fn detach_ticket(&mut self, id: &TicketId) -> bool {
        let before = self.tickets.len();
        self.tickets.retain(|t| t != id);
        self.tickets.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile_skips_blank_fields() {
        let mut user = User::new(Mobile::demo(), Utc::now());
        user.update_profile("Rajesh Kumar", "cse", "");
        user.update_profile("", "  ", "rajesh@campus.edu");

        assert_eq!(user.name, "Rajesh Kumar");
        assert_eq!(user.department, "cse");
        assert_eq!(user.email, "rajesh@campus.edu");
    }

    #[test]
    fn test_ticket_index() {
        let mut user = User::new(Mobile::demo(), Utc::now());
        let id = TicketId::from_number(1001);
        user.attach_ticket(id.clone());
        user.attach_ticket(id.clone());
        assert_eq!(user.tickets.len(), 1);

        assert!(user.detach_ticket(&id));
        assert!(!user.detach_ticket(&id));
        assert!(user.tickets.is_empty());
    }
}
