//! Prediction request and response bodies

use medi_symptoms::{Prediction, TriageVerdict};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::checker::CheckError;

/// Number of predictions returned when `topk` is not given
pub const DEFAULT_TOPK: usize = 3;

pub(crate) const MISSING_SYMPTOMS: &str =
    "Provide 'symptoms' as a non-empty list or comma-separated string.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomRequest {
    pub symptoms: Vec<String>,
    pub topk: usize,
}

impl SymptomRequest {
    pub fn new(symptoms: Vec<String>, topk: usize) -> Self {
        Self { symptoms, topk }
    }

    /// Build a request from a comma-separated list such as `"itching, skin rash"`
    pub fn from_list(list: &str, topk: usize) -> Self {
        Self::new(split_symptom_list(list), topk)
    }

    /// Interpret a decoded request body.
    ///
    /// Anything other than an object is treated as an empty body. `symptoms`
    /// may be an array of strings or a comma-separated string; `topk` may be
    /// omitted, null, a non-negative integer or a string holding one.
    pub fn from_json(body: &JsonValue) -> Result<Self, CheckError> {
        let empty = serde_json::Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        let symptoms = match fields.get("symptoms") {
            Some(JsonValue::String(list)) => split_symptom_list(list),
            Some(JsonValue::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        CheckError::InvalidRequest(
                            "Each entry in 'symptoms' must be a string.".into(),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => Vec::new(),
        };
        if symptoms.is_empty() {
            return Err(CheckError::InvalidRequest(MISSING_SYMPTOMS.into()));
        }

        let topk = match fields.get("topk") {
            None | Some(JsonValue::Null) => Some(DEFAULT_TOPK),
            Some(JsonValue::Number(n)) => n.as_u64().and_then(|k| usize::try_from(k).ok()),
            Some(JsonValue::String(s)) => s.trim().parse::<usize>().ok(),
            Some(_) => None,
        }
        .ok_or_else(|| {
            CheckError::InvalidRequest("'topk' must be a non-negative integer.".into())
        })?;

        Ok(Self::new(symptoms, topk))
    }
}

/// Split on commas, trimming entries and dropping empty ones
pub fn split_symptom_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Successful prediction body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResponse {
    pub input_symptoms: Vec<String>,
    pub results: Vec<Prediction>,
    pub triage: TriageVerdict,
    pub unknown_symptoms: Vec<String>,
}
