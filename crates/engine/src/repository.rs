//! Collaborator contract for rule and record storage.
//!
//! The engine never performs I/O itself: an implementation of
//! [`CopyrightRepository`] (a database layer, typically) supplies
//! jurisdictions, their ordered rule lists and the work catalogue, and
//! accepts per-jurisdiction status writes. Storage faults surface as
//! [`LapsedError::Repository`] and propagate through the engine
//! unchanged; missing data is an empty sequence, never an error.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lapsed_core::{
    CopyrightRule, CopyrightStatus, Jurisdiction, JurisdictionId, LapsedError, Result, Work,
    WorkId,
};

pub trait CopyrightRepository {
    /// Ordered special-case rules for a jurisdiction (empty if none).
    fn rules_for_jurisdiction(
        &self,
        jurisdiction_id: JurisdictionId,
    ) -> Result<Vec<CopyrightRule>>;

    /// Every known jurisdiction.
    fn all_jurisdictions(&self) -> Result<Vec<Arc<Jurisdiction>>>;

    /// Every known work.
    fn all_works(&self) -> Result<Vec<Arc<Work>>>;

    /// Persist one computed per-jurisdiction status. Returns whether
    /// the write took effect. Called by [`crate::persist_status_map`]
    /// on the caller's behalf, never by the aggregator itself.
    fn set_status_by_jurisdiction(
        &self,
        work_id: WorkId,
        code: &str,
        status: CopyrightStatus,
    ) -> Result<bool>;
}

// ── In-memory repository ────────────────────────────────────────────

/// In-memory [`CopyrightRepository`] for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    jurisdictions: Vec<Arc<Jurisdiction>>,
    rules: HashMap<JurisdictionId, Vec<CopyrightRule>>,
    works: Vec<Arc<Work>>,
    persisted: Mutex<HashMap<(WorkId, String), CopyrightStatus>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a jurisdiction, returning the shared handle works and
    /// rules reference it by.
    pub fn add_jurisdiction(&mut self, jurisdiction: Jurisdiction) -> Arc<Jurisdiction> {
        let jurisdiction = Arc::new(jurisdiction);
        self.jurisdictions.push(Arc::clone(&jurisdiction));
        jurisdiction
    }

    /// Append a rule to its jurisdiction's ordered list.
    pub fn add_rule(&mut self, rule: CopyrightRule) {
        self.rules.entry(rule.jurisdiction_id).or_default().push(rule);
    }

    pub fn add_work(&mut self, work: Work) -> Arc<Work> {
        let work = Arc::new(work);
        self.works.push(Arc::clone(&work));
        work
    }

    /// Look up a status previously written via
    /// [`CopyrightRepository::set_status_by_jurisdiction`].
    pub fn persisted_status(&self, work_id: WorkId, code: &str) -> Option<CopyrightStatus> {
        self.persisted
            .lock()
            .expect("status lock poisoned")
            .get(&(work_id, code.to_string()))
            .copied()
    }
}

impl CopyrightRepository for MemoryRepository {
    fn rules_for_jurisdiction(
        &self,
        jurisdiction_id: JurisdictionId,
    ) -> Result<Vec<CopyrightRule>> {
        Ok(self.rules.get(&jurisdiction_id).cloned().unwrap_or_default())
    }

    fn all_jurisdictions(&self) -> Result<Vec<Arc<Jurisdiction>>> {
        Ok(self.jurisdictions.clone())
    }

    fn all_works(&self) -> Result<Vec<Arc<Work>>> {
        Ok(self.works.clone())
    }

    fn set_status_by_jurisdiction(
        &self,
        work_id: WorkId,
        code: &str,
        status: CopyrightStatus,
    ) -> Result<bool> {
        self.persisted
            .lock()
            .map_err(|e| LapsedError::Repository(e.to_string()))?
            .insert((work_id, code.to_string()), status);
        Ok(true)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
