use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{DaftarError, Result};
use crate::fmt::{round2, serialize_number};

pub const PASS_MARK: f64 = 40.0;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A validated student record. Subjects keep the order they were given in.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: String,
    pub marks: Vec<(String, f64)>,
}

impl TryFrom<&Value> for Student {
    type Error = DaftarError;

    fn try_from(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(DaftarError::WrongType("a student object"))?;

        let name = match obj.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => return Err(DaftarError::InvalidName),
        };

        let marks_obj = match obj.get("marks") {
            Some(Value::Object(m)) if !m.is_empty() => m,
            _ => return Err(DaftarError::NoMarks),
        };

        let mut marks = Vec::with_capacity(marks_obj.len());
        for (subject, score) in marks_obj {
            match score.as_f64() {
                Some(s) if (0.0..=100.0).contains(&s) => marks.push((subject.clone(), s)),
                _ => return Err(DaftarError::ScoreOutOfRange(subject.clone())),
            }
        }

        Ok(Student { name, marks })
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Inclusive lower bounds, checked top-down.
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 90.0 {
            Grade::APlus
        } else if pct >= 80.0 {
            Grade::A
        } else if pct >= 70.0 {
            Grade::B
        } else if pct >= 60.0 {
            Grade::C
        } else if pct >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

// ---------------------------------------------------------------------------
// Report card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCard {
    pub name: String,
    #[serde(serialize_with = "serialize_number")]
    pub total_marks: f64,
    #[serde(serialize_with = "serialize_number")]
    pub percentage: f64,
    pub grade: Grade,
    pub highest_subject: String,
    pub lowest_subject: String,
    pub passed_subjects: Vec<String>,
    pub failed_subjects: Vec<String>,
    pub subject_count: usize,
}

impl ReportCard {
    /// Build the report for a validated student. Returns `None` only when the
    /// student has no subjects.
    pub fn from_student(student: &Student) -> Option<Self> {
        let (first_subject, first_score) = student.marks.first()?;

        let subject_count = student.marks.len();
        let total_marks: f64 = student.marks.iter().map(|(_, s)| s).sum();
        let percentage = round2(total_marks / (subject_count as f64 * 100.0) * 100.0);

        // Strict comparisons keep the first subject on ties.
        let mut highest = (first_subject, *first_score);
        let mut lowest = (first_subject, *first_score);
        for (subject, score) in &student.marks[1..] {
            if *score > highest.1 {
                highest = (subject, *score);
            }
            if *score < lowest.1 {
                lowest = (subject, *score);
            }
        }

        let (passed, failed): (Vec<_>, Vec<_>) =
            student.marks.iter().partition(|(_, s)| *s >= PASS_MARK);

        let card = ReportCard {
            name: student.name.clone(),
            total_marks,
            percentage,
            grade: Grade::from_percentage(percentage),
            highest_subject: highest.0.clone(),
            lowest_subject: lowest.0.clone(),
            passed_subjects: passed.into_iter().map(|(s, _)| s.clone()).collect(),
            failed_subjects: failed.into_iter().map(|(s, _)| s.clone()).collect(),
            subject_count,
        };
        trace!(name = %card.name, percentage = card.percentage, grade = card.grade.as_str(), "report card built");
        Some(card)
    }
}

/// Validate a decoded student record and build its report card.
pub fn generate_report(value: &Value) -> Option<ReportCard> {
    match Student::try_from(value) {
        Ok(student) => ReportCard::from_student(&student),
        Err(e) => {
            debug!(error = %e, "rejected student record");
            None
        }
    }
}
