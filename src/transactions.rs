use std::io::Read;

use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

use crate::coerce::value_as_text;
use crate::error::{DaftarError, Result};
use crate::fmt::{serialize_amount_pairs, serialize_number};

pub const SMALL_TXN_LIMIT: f64 = 100.0;
pub const LARGE_TXN_THRESHOLD: f64 = 5000.0;

const CSV_COLUMNS: [&str; 6] = ["id", "type", "amount", "to", "category", "date"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }
}

/// A transaction that passed the credit/debit and positive-amount checks.
/// `raw` is the record exactly as it was supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub to: String,
    pub category: String,
    pub date: String,
    pub raw: Value,
}

impl Transaction {
    /// Returns `None` for entries the analyzer skips: non-objects, unknown
    /// types, and amounts that are not positive numbers.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = TransactionKind::parse(obj.get("type")?.as_str()?)?;
        let amount = obj.get("amount")?.as_f64().filter(|a| *a > 0.0)?;
        Some(Transaction {
            id: value_as_text(obj.get("id")),
            kind,
            amount,
            to: value_as_text(obj.get("to")),
            category: value_as_text(obj.get("category")),
            date: value_as_text(obj.get("date")),
            raw: value.clone(),
        })
    }
}

/// Keep the valid entries of a transaction list, in order.
pub fn valid_entries(value: &Value) -> Result<Vec<Transaction>> {
    let list = match value.as_array() {
        Some(list) if !list.is_empty() => list,
        _ => return Err(DaftarError::NoTransactions),
    };
    let entries: Vec<Transaction> = list.iter().filter_map(Transaction::from_value).collect();
    if entries.is_empty() {
        return Err(DaftarError::NoValidTransactions);
    }
    let skipped = list.len() - entries.len();
    if skipped > 0 {
        debug!(skipped, "skipped invalid transactions");
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    #[serde(serialize_with = "serialize_number")]
    pub total_credit: f64,
    #[serde(serialize_with = "serialize_number")]
    pub total_debit: f64,
    #[serde(serialize_with = "serialize_number")]
    pub net_balance: f64,
    pub transaction_count: usize,
    pub avg_transaction: i64,
    pub highest_transaction: Value,
    #[serde(serialize_with = "serialize_amount_pairs")]
    pub category_breakdown: Vec<(String, f64)>,
    pub frequent_contact: String,
    pub all_above100: bool,
    pub has_large_transaction: bool,
}

impl TransactionSummary {
    /// Aggregate already-validated entries. Returns `None` for an empty slice.
    pub fn from_entries(entries: &[Transaction]) -> Option<Self> {
        let first = entries.first()?;

        let mut total_credit = 0.0;
        let mut total_debit = 0.0;
        let mut highest = first;
        let mut category_breakdown: Vec<(String, f64)> = Vec::new();
        let mut contacts: Vec<(&str, usize)> = Vec::new();

        for txn in entries {
            match txn.kind {
                TransactionKind::Credit => total_credit += txn.amount,
                TransactionKind::Debit => total_debit += txn.amount,
            }
            if txn.amount > highest.amount {
                highest = txn;
            }
            match category_breakdown.iter_mut().find(|(c, _)| *c == txn.category) {
                Some((_, total)) => *total += txn.amount,
                None => category_breakdown.push((txn.category.clone(), txn.amount)),
            }
            match contacts.iter_mut().find(|(c, _)| *c == txn.to) {
                Some((_, count)) => *count += 1,
                None => contacts.push((txn.to.as_str(), 1)),
            }
        }

        // Contacts are in first-seen order, so a strict comparison keeps the
        // earliest recipient on ties.
        let mut frequent = contacts[0];
        for contact in &contacts[1..] {
            if contact.1 > frequent.1 {
                frequent = *contact;
            }
        }

        let transaction_count = entries.len();
        let sum = total_credit + total_debit;
        let summary = TransactionSummary {
            total_credit,
            total_debit,
            net_balance: total_credit - total_debit,
            transaction_count,
            avg_transaction: (sum / transaction_count as f64).round() as i64,
            highest_transaction: highest.raw.clone(),
            category_breakdown,
            frequent_contact: frequent.0.to_string(),
            all_above100: entries.iter().all(|t| t.amount > SMALL_TXN_LIMIT),
            has_large_transaction: entries.iter().any(|t| t.amount >= LARGE_TXN_THRESHOLD),
        };
        trace!(
            count = summary.transaction_count,
            net = summary.net_balance,
            "transaction summary built"
        );
        Some(summary)
    }
}

/// Validate a decoded transaction list and summarize its valid entries.
pub fn analyze_transactions(value: &Value) -> Option<TransactionSummary> {
    match valid_entries(value) {
        Ok(entries) => TransactionSummary::from_entries(&entries),
        Err(e) => {
            debug!(error = %e, "rejected transaction list");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// CSV input
// ---------------------------------------------------------------------------

/// Strip grouping commas, quotes and rupee signs before parsing.
fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw
        .replace(',', "")
        .replace('"', "")
        .replace('\u{20b9}', "");
    s.trim().parse::<f64>().ok().filter(|a| a.is_finite())
}

/// Read a UPI-style CSV export (`id,type,amount,to,category,date`, in any
/// column order) into the record list [`analyze_transactions`] expects.
/// Rows before the header line are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Value>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    let mut columns: Vec<Option<&'static str>> = Vec::new();
    let mut found_header = false;

    for result in rdr.records() {
        let record = result?;
        if !found_header {
            columns = record
                .iter()
                .map(|h| {
                    let h = h.trim().to_lowercase();
                    CSV_COLUMNS.iter().copied().find(|c| *c == h)
                })
                .collect();
            found_header =
                columns.contains(&Some("type")) && columns.contains(&Some("amount"));
            continue;
        }
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let mut obj = Map::new();
        for (field, column) in record.iter().zip(&columns) {
            let Some(column) = column else { continue };
            let field = field.trim();
            let value = if *column == "amount" {
                parse_amount(field)
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(field.to_string()))
            } else {
                Value::String(field.to_string())
            };
            obj.insert(column.to_string(), value);
        }
        rows.push(Value::Object(obj));
    }

    if !found_header {
        return Err(DaftarError::Other(
            "CSV has no header row with type and amount columns".to_string(),
        ));
    }
    Ok(rows)
}
