//! Offloading blocking store calls from async callers

use std::sync::Arc;
use vaultstore_core::{Error, Result};
use vaultstore_vault::VaultManager;

/// Run `work` on the blocking pool, bounded by the configured deadline.
///
/// On timeout the caller gets [`Error::Timeout`]; the blocking work keeps
/// running to completion in the background and its result is discarded.
pub async fn run_blocking<T, F>(
    manager: &Arc<VaultManager>,
    operation: &'static str,
    work: F,
) -> Result<T>
where
    F: FnOnce(Arc<VaultManager>) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let deadline = manager.config().operation_timeout();
    let worker = Arc::clone(manager);
    let handle = tokio::task::spawn_blocking(move || work(worker));

    let joined = match deadline {
        Some(limit) => match tokio::time::timeout(limit, handle).await {
            Ok(joined) => joined,
            Err(_) => {
                log::warn!("vault.operation_timed_out: {} after {:?}", operation, limit);
                return Err(Error::timeout(operation, limit.as_secs()));
            }
        },
        None => handle.await,
    };

    joined.map_err(|e| Error::other(format!("{} task failed: {}", operation, e)))?
}
