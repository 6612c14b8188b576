use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::coerce::{interpret_as_boolean, value_as_text};
use crate::error::{DaftarError, Result};

const NAME_WIDTH: usize = 20;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Train {
    pub number: String,
    pub name: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub booking: String,
    pub current: String,
}

/// A reservation record that passed the shape checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub pnr: String,
    pub train: Train,
    pub class_booked: String,
    pub passengers: Vec<Passenger>,
}

fn is_pnr(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit())
}

impl TryFrom<&Value> for Booking {
    type Error = DaftarError;

    fn try_from(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(DaftarError::WrongType("a PNR object"))?;

        let pnr = match obj.get("pnr") {
            Some(Value::String(s)) if is_pnr(s) => s.clone(),
            _ => return Err(DaftarError::InvalidPnr),
        };

        // Any truthy train passes; only an object contributes details.
        let train = obj.get("train");
        if !interpret_as_boolean(train) {
            return Err(DaftarError::MissingTrain);
        }
        let train_field = |key: &str| value_as_text(train.and_then(|t| t.get(key)));

        let list = match obj.get("passengers") {
            Some(Value::Array(list)) if !list.is_empty() => list,
            _ => return Err(DaftarError::NoPassengers),
        };
        let passengers = list
            .iter()
            .map(|p| {
                let p = p.as_object().ok_or(DaftarError::WrongType("a passenger object"))?;
                Ok(Passenger {
                    name: value_as_text(p.get("name")),
                    age: value_as_text(p.get("age")),
                    gender: value_as_text(p.get("gender")),
                    booking: value_as_text(p.get("booking")),
                    current: value_as_text(p.get("current")),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Booking {
            pnr,
            train: Train {
                number: train_field("number"),
                name: train_field("name"),
                from: train_field("from"),
                to: train_field("to"),
            },
            class_booked: value_as_text(obj.get("classBooked")),
            passengers,
        })
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusLabel {
    Confirmed,
    Waiting,
    Rac,
    Cancelled,
}

impl StatusLabel {
    /// Berth (`B..`) or seat (`S..`) codes are confirmed, `WL..` is waiting,
    /// `RAC..` is RAC. Anything else counts as cancelled.
    pub fn from_code(code: &str) -> Self {
        if code.starts_with('B') || code.starts_with('S') {
            StatusLabel::Confirmed
        } else if code.starts_with("WL") {
            StatusLabel::Waiting
        } else if code.starts_with("RAC") {
            StatusLabel::Rac
        } else {
            StatusLabel::Cancelled
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Confirmed => "CONFIRMED",
            StatusLabel::Waiting => "WAITING",
            StatusLabel::Rac => "RAC",
            StatusLabel::Cancelled => "CANCELLED",
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerStatus {
    pub formatted_name: String,
    pub booking_status: String,
    pub current_status: String,
    pub status_label: StatusLabel,
    pub is_confirmed: bool,
}

impl PassengerStatus {
    pub fn from_passenger(p: &Passenger) -> Self {
        let status_label = StatusLabel::from_code(&p.current);
        PassengerStatus {
            formatted_name: format!("{:<width$}({}/{})", p.name, p.age, p.gender, width = NAME_WIDTH),
            booking_status: p.booking.clone(),
            current_status: p.current.clone(),
            status_label,
            is_confirmed: status_label == StatusLabel::Confirmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnrSummary {
    pub total_passengers: usize,
    pub confirmed: usize,
    pub waiting: usize,
    pub cancelled: usize,
    pub rac: usize,
    pub all_confirmed: bool,
    pub any_waiting: bool,
}

impl PnrSummary {
    fn tally(passengers: &[PassengerStatus]) -> Self {
        let count = |label: StatusLabel| passengers.iter().filter(|p| p.status_label == label).count();
        PnrSummary {
            total_passengers: passengers.len(),
            confirmed: count(StatusLabel::Confirmed),
            waiting: count(StatusLabel::Waiting),
            cancelled: count(StatusLabel::Cancelled),
            rac: count(StatusLabel::Rac),
            all_confirmed: passengers.iter().all(|p| p.is_confirmed),
            any_waiting: passengers.iter().any(|p| p.status_label == StatusLabel::Waiting),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnrReport {
    pub pnr_formatted: String,
    pub train_info: String,
    pub passengers: Vec<PassengerStatus>,
    pub summary: PnrSummary,
    pub chart_prepared: bool,
}

impl PnrReport {
    pub fn from_booking(booking: &Booking) -> Self {
        let pnr = &booking.pnr;
        let train = &booking.train;
        let passengers: Vec<PassengerStatus> =
            booking.passengers.iter().map(PassengerStatus::from_passenger).collect();

        let report = PnrReport {
            pnr_formatted: format!("{}-{}-{}", &pnr[..3], &pnr[3..6], &pnr[6..]),
            train_info: format!(
                "Train: {} - {} | {} \u{2192} {} | Class: {}",
                train.number, train.name, train.from, train.to, booking.class_booked
            ),
            summary: PnrSummary::tally(&passengers),
            chart_prepared: passengers
                .iter()
                .filter(|p| p.status_label != StatusLabel::Cancelled)
                .all(|p| p.is_confirmed),
            passengers,
        };
        trace!(pnr = %report.pnr_formatted, chart_prepared = report.chart_prepared, "PNR report built");
        report
    }
}

/// Validate a decoded reservation record and build its status report.
pub fn process_reservation(value: &Value) -> Option<PnrReport> {
    match Booking::try_from(value) {
        Ok(booking) => Some(PnrReport::from_booking(&booking)),
        Err(e) => {
            debug!(error = %e, "rejected reservation record");
            None
        }
    }
}
