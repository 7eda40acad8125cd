mod client;
mod invoice;
mod line_item;
mod project;

pub use client::Client;
pub use invoice::{Invoice, InvoiceStatus};
pub use line_item::{LineItem, Unit};
pub use project::{Project, ProjectStatus};
