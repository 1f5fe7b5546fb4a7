//! Permissions granted to admin callers by the upstream gateway.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    PagesRead,
    PagesWrite,
    PostsRead,
    PostsWrite,
    EventsRead,
    EventsWrite,
    InboxRead,
    InboxWrite,
    SettingsRead,
    SettingsWrite,
    AuditRead,
}

impl Permission {
    pub const ALL: [Permission; 11] = [
        Permission::PagesRead,
        Permission::PagesWrite,
        Permission::PostsRead,
        Permission::PostsWrite,
        Permission::EventsRead,
        Permission::EventsWrite,
        Permission::InboxRead,
        Permission::InboxWrite,
        Permission::SettingsRead,
        Permission::SettingsWrite,
        Permission::AuditRead,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::PagesRead => "website_pages.read",
            Permission::PagesWrite => "website_pages.write",
            Permission::PostsRead => "website_posts.read",
            Permission::PostsWrite => "website_posts.write",
            Permission::EventsRead => "website_events.read",
            Permission::EventsWrite => "website_events.write",
            Permission::InboxRead => "website_inbox.read",
            Permission::InboxWrite => "website_inbox.write",
            Permission::SettingsRead => "website_settings.read",
            Permission::SettingsWrite => "website_settings.write",
            Permission::AuditRead => "website_audit.read",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AccessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AccessError::UnknownPermission(value.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("permission `{0}` is required")]
    Forbidden(Permission),
    #[error("unknown permission `{0}`")]
    UnknownPermission(String),
}

/// The admin caller and the permissions the gateway granted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    actor: String,
    permissions: BTreeSet<Permission>,
}

impl Principal {
    pub fn new(actor: impl Into<String>, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            actor: actor.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Principal holding every website permission; used by operator tooling.
    pub fn operator(actor: impl Into<String>) -> Self {
        Self::new(actor, Permission::ALL)
    }

    /// Parse a comma separated permission list. Unknown names are skipped.
    pub fn from_header_values(actor: impl Into<String>, permissions: &str) -> Self {
        let granted = permissions
            .split(',')
            .filter(|value| !value.trim().is_empty())
            .filter_map(|value| match value.parse::<Permission>() {
                Ok(permission) => Some(permission),
                Err(err) => {
                    tracing::debug!(
                        target = "nazim_site::application::access",
                        error = %err,
                        "ignoring permission"
                    );
                    None
                }
            });
        Self::new(actor, granted)
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn require(&self, permission: Permission) -> Result<(), AccessError> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(AccessError::Forbidden(permission))
        }
    }
}
