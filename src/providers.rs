use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::Result;
use crate::types::{Borrower, BorrowerId, Loan};

/// external collaborator yielding the full borrower set
///
/// fetch failures surface as `UpstreamFetchFailure`; the engine treats them
/// as non-fatal and keeps its last-known-good snapshot.
#[async_trait]
pub trait BorrowerProvider: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Borrower>>;
}

/// external collaborator yielding a borrower's loans
#[async_trait]
pub trait LoanProvider: Send + Sync {
    async fn get_by_borrower(&self, borrower_id: BorrowerId) -> Result<Vec<Loan>>;
}

/// in-memory provider backing demos and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortfolio {
    borrowers: Vec<Borrower>,
    loans: HashMap<BorrowerId, Vec<Loan>>,
}

impl InMemoryPortfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// register a borrower together with its loans
    pub fn insert(&mut self, borrower: Borrower, loans: Vec<Loan>) {
        self.loans.insert(borrower.id, loans);
        self.borrowers.push(borrower);
    }

    pub fn is_empty(&self) -> bool {
        self.borrowers.is_empty()
    }
}

#[async_trait]
impl BorrowerProvider for InMemoryPortfolio {
    async fn get_all(&self) -> Result<Vec<Borrower>> {
        Ok(self.borrowers.clone())
    }
}

#[async_trait]
impl LoanProvider for InMemoryPortfolio {
    async fn get_by_borrower(&self, borrower_id: BorrowerId) -> Result<Vec<Loan>> {
        Ok(self.loans.get(&borrower_id).cloned().unwrap_or_default())
    }
}
