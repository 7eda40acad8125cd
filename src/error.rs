use thiserror::Error;

/// Errors raised while turning user input into typed values.
///
/// The calculators and list processors never fail; these are only produced
/// at the edges where strings from the command line or a CSV file are parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown sort field '{0}' (expected id, client, amount, date or dueDate)")]
    UnknownSortField(String),

    #[error("unknown sort direction '{0}' (expected asc or desc)")]
    UnknownSortDirection(String),

    #[error("unknown invoice status '{0}' (expected draft, due, paid or overdue)")]
    UnknownStatus(String),

    #[error("unknown status filter '{0}' (expected all or an invoice status)")]
    UnknownStatusFilter(String),

    #[error("unknown project status '{0}' (expected not-started, in-progress or completed)")]
    UnknownProjectStatus(String),

    #[error("unknown unit '{0}' (expected hour, day, unit, item or flat)")]
    UnknownUnit(String),

    #[error("invalid line item '{0}' (expected description:quantity:rate[:unit])")]
    InvalidLineItem(String),

    #[error("unknown time range '{0}' (expected monthly, quarterly or yearly)")]
    UnknownTimeRange(String),

    #[error("unknown currency '{0}' (expected usd, eur, gbp, cad or aud)")]
    UnknownCurrency(String),

    #[error("unknown date format '{0}' (expected mdy, dmy or ymd)")]
    UnknownDateFormat(String),

    #[error("invoice draft is incomplete: {0}")]
    IncompleteDraft(&'static str),
}
