//! Read-only report generators
//!
//! Every report is a pure function of the ledger rows and raw voucher
//! collections; nothing here writes. Reports recompute from the row
//! history on every call; there is no materialized balance to go stale.

pub mod cashbook;
pub mod financial;
pub mod partners;
pub mod types;

pub use types::*;

use tokio_util::sync::CancellationToken;

use crate::ledger::store::LedgerStore;
use crate::traits::LedgerStorage;
use crate::types::{LedgerError, LedgerResult};

/// Report generator over a [`LedgerStorage`] backend.
///
/// An optional cancellation token lets callers bound long-running
/// aggregations; a cancelled report returns [`LedgerError::Cancelled`],
/// never truncated data.
pub struct ReportEngine<S: LedgerStorage> {
    pub(crate) store: LedgerStore<S>,
    cancel: Option<CancellationToken>,
}

impl<S: LedgerStorage> ReportEngine<S> {
    /// Create a new report engine over the given storage
    pub fn new(storage: S) -> Self {
        Self {
            store: LedgerStore::new(storage),
            cancel: None,
        }
    }

    /// Attach a caller-supplied cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn check_cancelled(&self) -> LedgerResult<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(LedgerError::Cancelled),
            _ => Ok(()),
        }
    }
}
