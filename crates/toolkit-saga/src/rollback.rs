use std::fmt::Display;
use std::hash::Hash;

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::CompensationError;
use crate::ledger::ResourceLedger;

/// Deletes one remote resource of a given kind.
///
/// Implementations wrap whatever client performs the actual deletion; any
/// retry behavior belongs to that client, not to the executor.
#[async_trait]
pub trait Compensator: Send + Sync {
    /// Resource kind, used to partition the ledger and label failures.
    type Kind: Copy + Eq + Hash + Display + Send + Sync;

    /// Remote identifier type.
    type Id: Clone + Display + Send + Sync;

    /// Error type for failed deletions.
    type Error: Send;

    /// Delete the resource. Called once per recorded identifier.
    async fn discard(&self, kind: Self::Kind, id: Self::Id) -> Result<(), Self::Error>;
}

/// Executes a best-effort rollback over a [`ResourceLedger`].
///
/// Kinds are processed strictly in the order given to [`run`](Self::run);
/// within one kind every deletion is issued concurrently and the executor
/// waits for all of them before moving to the next kind. A failed deletion
/// never blocks its siblings.
pub struct RollbackExecutor<'a, C> {
    compensator: &'a C,
}

impl<'a, C> RollbackExecutor<'a, C>
where
    C: Compensator,
{
    #[must_use]
    pub fn new(compensator: &'a C) -> Self {
        Self { compensator }
    }

    /// Delete everything recorded in the ledger.
    ///
    /// Returns the errors from every deletion that failed; an empty vector
    /// means the rollback left nothing behind.
    pub async fn run(
        &self,
        ledger: &ResourceLedger<C::Kind, C::Id>,
        order: &[C::Kind],
    ) -> Vec<CompensationError<C::Error>> {
        let mut failures = Vec::new();

        for &kind in order {
            let ids = ledger.ids(kind);
            if ids.is_empty() {
                continue;
            }

            let deletions = ids.iter().cloned().map(|id| async move {
                match self.compensator.discard(kind, id.clone()).await {
                    Ok(()) => None,
                    Err(error) => Some(CompensationError {
                        kind: kind.to_string(),
                        resource: id.to_string(),
                        error,
                    }),
                }
            });

            failures.extend(join_all(deletions).await.into_iter().flatten());
        }

        failures
    }
}
