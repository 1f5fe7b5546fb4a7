//! Application services for the website manager console.

pub mod audit;
pub mod events;
pub mod inbox;
pub mod seo;
pub mod settings;

pub use events::{AdminEventError, AdminEventService};
pub use inbox::{AdminInboxError, AdminInboxService, InboxSession};
pub use audit::AdminAuditService;
pub use seo::{AdminSeoError, AdminSeoService};
pub use settings::{AdminSettingsError, AdminSettingsService, UpdateSettingsCommand};
