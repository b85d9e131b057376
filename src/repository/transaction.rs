use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::result::Error as DieselError;
use diesel::PgConnection;

use crate::error::{DomainError, DomainResult, ErrorKind};
use crate::repository::TransactionService;

/// Begin/commit/rollback on a Postgres connection. A `begin` on a connection
/// that already has an open transaction opens a savepoint instead, so nested
/// `run_with_transaction` calls roll back only their own work.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgTransactionService;

fn tx_error(err: DieselError) -> DomainError {
    match err {
        DieselError::NotInTransaction => DomainError::new(ErrorKind::TxNotFound),
        other => DomainError::wrap(ErrorKind::TxFailed, other),
    }
}

impl TransactionService<PgConnection> for PgTransactionService {
    fn begin(&self, conn: &mut PgConnection) -> DomainResult<()> {
        AnsiTransactionManager::begin_transaction(conn).map_err(tx_error)
    }

    fn commit(&self, conn: &mut PgConnection) -> DomainResult<()> {
        AnsiTransactionManager::commit_transaction(conn).map_err(tx_error)
    }

    fn rollback(&self, conn: &mut PgConnection) -> DomainResult<()> {
        AnsiTransactionManager::rollback_transaction(conn).map_err(tx_error)
    }
}
