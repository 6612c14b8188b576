//! Small validate-then-summarize toolkit.
//!
//! Each module takes one decoded JSON value, checks its shape, and returns a
//! derived record:
//!
//! - [`message`]: one exported chat line into sender, text and sentiment
//! - [`report`]: subject marks into a graded report card
//! - [`transactions`]: a UPI transaction log into totals and breakdowns
//! - [`form`]: an admission form into per-field error messages
//! - [`pnr`]: a railway reservation into passenger status and a summary
//!
//! Malformed input yields `None` rather than an error; the form validator
//! instead always returns a [`form::ValidationResult`].

pub mod coerce;
pub mod error;
pub mod fmt;
pub mod form;
pub mod message;
pub mod pnr;
pub mod report;
pub mod settings;
pub mod transactions;

pub use error::{DaftarError, Result};
pub use form::{validate_form, ValidationResult};
pub use message::{parse_message, parse_message_value, ParsedMessage, Sentiment};
pub use pnr::{process_reservation, PnrReport, StatusLabel};
pub use report::{generate_report, Grade, ReportCard};
pub use transactions::{analyze_transactions, TransactionSummary};
