//! Briefing domain types
//!
//! Raw form input is collected into a `BriefingForm`; `into_request`
//! performs the completeness check and yields an immutable
//! `BriefingRequest` for the prompt builder.

pub(crate) mod prompt;

use std::fmt;

use chrono::NaiveTime;
use clap::ValueEnum;
use serde::Deserialize;

use crate::completion::CompletionOutcome;
use crate::error::AppError;

pub(crate) use prompt::build_prompt;

/// Calendar trimester selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    pub(crate) fn parse(s: &str) -> Result<Self, AppError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            _ => Err(AppError::InvalidQuarter {
                input: s.trim().to_string(),
            }),
        }
    }

    /// Parse "Q1, Q3" or "Q1 Q3". Blank input yields an empty list.
    pub(crate) fn parse_list(s: &str) -> Result<Vec<Self>, AppError> {
        s.split([',', ' '])
            .filter(|part| !part.trim().is_empty())
            .map(Quarter::parse)
            .collect()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the model applies the 85% safety margin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BriefingMode {
    /// Figures as-is, no margin
    Raw,
    /// 85% safety margin on W/C and ISA DEV (default)
    #[default]
    Conservative,
}

impl BriefingMode {
    pub(crate) fn parse(s: &str) -> Result<Self, AppError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(BriefingMode::Raw),
            "conservative" => Ok(BriefingMode::Conservative),
            _ => Err(AppError::InvalidMode {
                input: s.trim().to_string(),
            }),
        }
    }
}

/// Form fields as submitted, before the completeness check
#[derive(Debug, Clone, Default)]
pub(crate) struct BriefingForm {
    pub(crate) departure: String,
    pub(crate) arrival: String,
    pub(crate) departure_time: Option<NaiveTime>,
    pub(crate) route: String,
    pub(crate) flight_levels: String,
    pub(crate) quarters: Vec<Quarter>,
    pub(crate) mode: BriefingMode,
}

impl BriefingForm {
    /// Validate completeness. `fallback_time` fills an unset departure time.
    pub(crate) fn into_request(self, fallback_time: NaiveTime) -> Result<BriefingRequest, AppError> {
        let mut missing = Vec::new();
        if self.departure.trim().is_empty() {
            missing.push("departure");
        }
        if self.quarters.is_empty() {
            missing.push("quarters");
        }
        if !missing.is_empty() {
            return Err(AppError::IncompleteForm { missing });
        }

        let mut quarters: Vec<Quarter> = Vec::with_capacity(self.quarters.len());
        for q in self.quarters {
            if !quarters.contains(&q) {
                quarters.push(q);
            }
        }

        Ok(BriefingRequest {
            departure: self.departure.trim().to_string(),
            arrival: non_blank(self.arrival),
            departure_time: self.departure_time.unwrap_or(fallback_time),
            route: non_blank(self.route),
            flight_levels: non_blank(self.flight_levels),
            quarters,
            mode: self.mode,
        })
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A complete, immutable briefing request. `quarters` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BriefingRequest {
    pub(crate) departure: String,
    pub(crate) arrival: Option<String>,
    pub(crate) departure_time: NaiveTime,
    pub(crate) route: Option<String>,
    pub(crate) flight_levels: Option<String>,
    pub(crate) quarters: Vec<Quarter>,
    pub(crate) mode: BriefingMode,
}

/// The prompt that was sent and what came back
#[derive(Debug, Clone)]
pub(crate) struct BriefingResult {
    pub(crate) airport: String,
    pub(crate) prompt: String,
    pub(crate) outcome: CompletionOutcome,
}

impl BriefingResult {
    pub(crate) fn response_text(&self) -> String {
        self.outcome.response_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn form() -> BriefingForm {
        BriefingForm {
            departure: "SKBO".to_string(),
            quarters: vec![Quarter::Q1],
            ..Default::default()
        }
    }

    #[test]
    fn quarter_parse_is_case_insensitive() {
        assert_eq!(Quarter::parse("q3").unwrap(), Quarter::Q3);
        assert_eq!(Quarter::parse(" Q4 ").unwrap(), Quarter::Q4);
        assert!(Quarter::parse("Q5").is_err());
    }

    #[test]
    fn quarter_parse_list_keeps_order() {
        let qs = Quarter::parse_list("Q3, q1 Q2").unwrap();
        assert_eq!(qs, vec![Quarter::Q3, Quarter::Q1, Quarter::Q2]);
        assert!(Quarter::parse_list("  ").unwrap().is_empty());
    }

    #[test]
    fn mode_parse() {
        assert_eq!(BriefingMode::parse("RAW").unwrap(), BriefingMode::Raw);
        assert_eq!(
            BriefingMode::parse("conservative").unwrap(),
            BriefingMode::Conservative
        );
        assert!(BriefingMode::parse("aggressive").is_err());
    }

    #[test]
    fn into_request_blank_optionals_become_none() {
        let mut f = form();
        f.arrival = "   ".to_string();
        f.route = String::new();
        let req = f.into_request(noon()).unwrap();
        assert_eq!(req.arrival, None);
        assert_eq!(req.route, None);
        assert_eq!(req.flight_levels, None);
        assert_eq!(req.departure_time, noon());
    }

    #[test]
    fn into_request_missing_departure_and_quarters() {
        let f = BriefingForm::default();
        match f.into_request(noon()) {
            Err(AppError::IncompleteForm { missing }) => {
                assert_eq!(missing, vec!["departure", "quarters"]);
            }
            other => panic!("expected IncompleteForm, got {other:?}"),
        }
    }

    #[test]
    fn into_request_dedups_quarters_in_order() {
        let mut f = form();
        f.quarters = vec![Quarter::Q3, Quarter::Q1, Quarter::Q3];
        let req = f.into_request(noon()).unwrap();
        assert_eq!(req.quarters, vec![Quarter::Q3, Quarter::Q1]);
    }

    #[test]
    fn into_request_keeps_explicit_time() {
        let mut f = form();
        let t = NaiveTime::from_hms_opt(6, 45, 0).unwrap();
        f.departure_time = Some(t);
        assert_eq!(f.into_request(noon()).unwrap().departure_time, t);
    }

    #[test]
    fn into_request_unset_time_uses_fallback() {
        let req = form().into_request(noon()).unwrap();
        assert_eq!(req.departure_time, noon());
        assert_ne!(req.departure_time, NaiveTime::MIN);
    }
}
