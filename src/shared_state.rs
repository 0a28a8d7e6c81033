use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::FromRef;

use crate::config::Config;
use crate::models::sizing::{HspStats, Location};
use crate::services::consumption_ledger::{ConsumptionLog, LedgerError};

/// Per-session pipeline context: the location, its solar resource and the
/// consumption log one consulting session owns. Created empty at session
/// start, discarded with the process.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub location: Location,
    pub hsp: HspStats,
    pub consumption: ConsumptionLog,
}

#[derive(Clone, Debug)]
pub struct AppState {
    /// Map of session_id to session context
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a new empty session and returns its id.
    pub fn create_session(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        if let Ok(mut map) = self.sessions.write() {
            map.insert(id.clone(), Session::default());
        }
        id
    }

    /// Replaces the session's location and solar resource wholesale; no
    /// lookup history is kept. Returns false for an unknown session.
    pub fn set_resource(&self, session_id: &str, location: Location, hsp: HspStats) -> bool {
        if let Ok(mut map) = self.sessions.write() {
            if let Some(session) = map.get_mut(session_id) {
                session.location = location;
                session.hsp = hsp;
                return true;
            }
        }
        false
    }

    /// Appends one raw consumption reading. `None` for an unknown session;
    /// the inner result carries the ledger's accept/reject decision.
    pub fn append_consumption(
        &self,
        session_id: &str,
        raw: &str,
    ) -> Option<Result<f64, LedgerError>> {
        let mut map = self.sessions.write().ok()?;
        let session = map.get_mut(session_id)?;
        Some(session.consumption.append(raw))
    }

    pub fn get_session(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().ok().and_then(|map| map.get(session_id).cloned())
    }
}

/// Shared handler state: runtime sessions plus the static config.
#[derive(Clone)]
pub struct SharedState {
    pub app: AppState,
    pub config: Config,
}

// Handlers extract `State<AppState>` and/or `State<Config>` via
// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> AppState {
        shared.app.clone()
    }
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Config {
        shared.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_unresolved_and_empty() {
        let state = AppState::new();
        let id = state.create_session();
        let session = state.get_session(&id).unwrap();
        assert!(!session.location.is_resolved());
        assert_eq!(session.hsp, HspStats::ZERO);
        assert!(session.consumption.is_empty());
    }

    #[test]
    fn test_set_resource_replaces_wholesale() {
        let state = AppState::new();
        let id = state.create_session();

        let bogota = Location::at(4.5709, -74.2973);
        let hsp = HspStats { min: 3.5, mean: 4.2, max: 5.0 };
        assert!(state.set_resource(&id, bogota, hsp));

        let madrid = Location::at(40.4168, -3.7038);
        let other = HspStats { min: 2.9, mean: 4.8, max: 6.1 };
        assert!(state.set_resource(&id, madrid, other));

        let session = state.get_session(&id).unwrap();
        assert_eq!(session.location, madrid);
        assert_eq!(session.hsp, other);
    }

    #[test]
    fn test_unknown_session_is_reported() {
        let state = AppState::new();
        assert!(!state.set_resource("nope", Location::UNRESOLVED, HspStats::ZERO));
        assert!(state.append_consumption("nope", "100").is_none());
        assert!(state.get_session("nope").is_none());
    }

    #[test]
    fn test_consumption_accumulates_per_session() {
        let state = AppState::new();
        let a = state.create_session();
        let b = state.create_session();

        state.append_consumption(&a, "300").unwrap().unwrap();
        state.append_consumption(&a, "310").unwrap().unwrap();
        assert!(state.append_consumption(&a, "oops").unwrap().is_err());

        let session_a = state.get_session(&a).unwrap();
        assert_eq!(session_a.consumption.readings(), &[300.0, 310.0]);

        let session_b = state.get_session(&b).unwrap();
        assert!(session_b.consumption.is_empty());
    }
}
