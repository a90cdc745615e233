use log::debug;

use crate::error::Result;
use crate::sheets::SheetSession;
use crate::table::Table;

/// Replace the remote sheet's content with `table`, header row first.
///
/// This is a destructive whole-table overwrite, not a diff: anything
/// written remotely since the caller's last load is discarded, and of two
/// concurrent savers the later one wins. If no session can be established
/// the save silently does nothing and still reports `Ok` - the caller
/// cannot detect the skipped write. Errors during the erase or the rewrite
/// itself do propagate.
pub async fn save_inventory(table: &Table) -> Result<()> {
    let session = match SheetSession::connect().await {
        Ok(session) => session,
        Err(e) => {
            debug!("no session for save, skipping: {}", e);
            return Ok(());
        }
    };

    session.clear().await?;
    session.overwrite(&table.to_grid()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Failure injection: without a credential the save is a silent no-op
    // that still reports success.
    #[tokio::test]
    async fn save_without_credentials_is_a_silent_noop() {
        if std::env::var("ESTOQUE_SERVICE_ACCOUNT").is_ok()
            || std::env::var("ESTOQUE_SERVICE_ACCOUNT_FILE").is_ok()
        {
            return;
        }

        let table = Table::empty();
        assert!(save_inventory(&table).await.is_ok());
    }
}
