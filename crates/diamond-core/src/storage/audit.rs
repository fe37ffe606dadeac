//! AuditLog
//!
//! Bounded, append-only history of committed cuts. Sequence numbers keep
//! increasing when old records are evicted, so gaps at the front reveal
//! truncation to off-chain indexers.

use crate::dto::{audit::DiamondCutRecord, cut::FacetCut};
use candid::Principal;
use std::collections::VecDeque;

///
/// AuditLog
///

#[derive(Clone, Debug)]
pub struct AuditLog {
    entries: VecDeque<DiamondCutRecord>,
    next_sequence: u64,
    max_entries: usize,
}

impl AuditLog {
    #[must_use]
    pub const fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            next_sequence: 0,
            max_entries,
        }
    }

    /// Append a record for a committed cut and return it.
    pub fn append(
        &mut self,
        cuts: Vec<FacetCut>,
        init: Principal,
        calldata: Vec<u8>,
    ) -> DiamondCutRecord {
        let record = DiamondCutRecord {
            sequence: self.next_sequence,
            cuts,
            init,
            calldata,
        };
        self.next_sequence += 1;

        while self.entries.len() >= self.max_entries.max(1) {
            self.entries.pop_front();
        }
        self.entries.push_back(record.clone());

        record
    }

    #[must_use]
    pub fn entries(&self) -> Vec<DiamondCutRecord> {
        self.entries.iter().cloned().collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<&DiamondCutRecord> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn next_sequence(&self) -> u64 {
        self.next_sequence
    }
}

///
/// AuditSink
///
/// Receives every committed cut record, in commit order. Sinks run while the
/// writer slot is still held and must not call back into the diamond.
///

pub trait AuditSink: Send + Sync {
    fn record(&self, record: &DiamondCutRecord);
}

impl<F> AuditSink for F
where
    F: Fn(&DiamondCutRecord) + Send + Sync,
{
    fn record(&self, record: &DiamondCutRecord) {
        self(record);
    }
}

///
/// TESTS
///
