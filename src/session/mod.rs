//! Per-user session state
//!
//! A `Session` is created after the access gate admits a user and is passed
//! by `&mut` into every handler. It owns the query history and the latest
//! result; both are dropped with the session.

mod history;

use chrono::{DateTime, Utc};

use crate::auth::Principal;
use crate::briefing::BriefingResult;
use crate::utils::Timezone;

pub(crate) use history::{HistoryEntry, SessionHistory};

pub(crate) struct Session {
    principal: Principal,
    history: SessionHistory,
    last_result: Option<BriefingResult>,
}

impl Session {
    pub(crate) fn new(principal: Principal) -> Self {
        Self {
            principal,
            history: SessionHistory::new(),
            last_result: None,
        }
    }

    pub(crate) fn user(&self) -> &str {
        &self.principal.username
    }

    pub(crate) fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub(crate) fn last_result(&self) -> Option<&BriefingResult> {
        self.last_result.as_ref()
    }

    /// Append the exchange to the history and remember it for export
    pub(crate) fn record(&mut self, result: BriefingResult, at: DateTime<Utc>, timezone: Timezone) {
        self.history.append(HistoryEntry {
            user: self.principal.username.clone(),
            timestamp: timezone.format_timestamp(at),
            airport: result.airport.clone(),
            result: result.response_text(),
        });
        self.last_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionFailure, CompletionOutcome};

    fn session() -> Session {
        Session::new(Principal {
            username: "usuario2".to_string(),
        })
    }

    fn result(airport: &str, outcome: CompletionOutcome) -> BriefingResult {
        BriefingResult {
            airport: airport.to_string(),
            prompt: "prompt".to_string(),
            outcome,
        }
    }

    #[test]
    fn record_appends_entry_and_sets_last() {
        let mut s = session();
        let at = "2026-04-02T09:15:00Z".parse::<DateTime<Utc>>().unwrap();
        s.record(
            result("SKBO", CompletionOutcome::Answered("Q1".to_string())),
            at,
            Timezone::Named(chrono_tz::UTC),
        );

        let entry = s.history().list_reversed().next().unwrap();
        assert_eq!(entry.user, "usuario2");
        assert_eq!(entry.timestamp, "2026-04-02 09:15");
        assert_eq!(entry.airport, "SKBO");
        assert_eq!(entry.result, "Q1");
        assert_eq!(s.last_result().unwrap().airport, "SKBO");
    }

    #[test]
    fn failures_are_recorded_as_text() {
        let mut s = session();
        s.record(
            result(
                "SCEL",
                CompletionOutcome::Failed(CompletionFailure::Status { status: 401 }),
            ),
            Utc::now(),
            Timezone::Local,
        );
        let entry = s.history().list_reversed().next().unwrap();
        assert_eq!(entry.result, "API request failed: server responded with HTTP 401");
    }

    #[test]
    fn fresh_session_has_nothing() {
        let s = session();
        assert_eq!(s.user(), "usuario2");
        assert!(s.history().is_empty());
        assert!(s.last_result().is_none());
    }
}
