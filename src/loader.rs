use log::warn;

use crate::error::Result;
use crate::sheets::SheetSession;
use crate::table::Table;

/// Load the full inventory from the remote sheet.
///
/// Fail-soft: every failure mode - no credential configured, session
/// establishment, the fetch itself, a malformed grid - degrades to the
/// canonical empty table. Callers cannot tell a failed load from a
/// genuinely blank sheet; the discarded reason goes to the log instead.
pub async fn load_inventory() -> Table {
    match try_load().await {
        Ok(table) => table,
        Err(e) => {
            warn!("inventory load failed, serving empty table: {}", e);
            Table::empty()
        }
    }
}

async fn try_load() -> Result<Table> {
    let session = SheetSession::connect().await?;
    let grid = session.fetch_grid().await?;

    let mut table = Table::from_grid(grid);
    table.normalize();
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CANONICAL_COLUMNS;

    // Failure injection: with no credential in the environment the session
    // cannot be established, and the load contract says that must surface
    // as the canonical empty table, not as an error.
    #[tokio::test]
    async fn load_without_credentials_is_an_empty_table() {
        if std::env::var("ESTOQUE_SERVICE_ACCOUNT").is_ok()
            || std::env::var("ESTOQUE_SERVICE_ACCOUNT_FILE").is_ok()
        {
            return;
        }

        let table = load_inventory().await;
        assert_eq!(table.columns, CANONICAL_COLUMNS);
        assert!(table.rows.is_empty());
    }
}
