use std::io::Write;

use crate::error::CleanupResult;
use crate::modules::wiper::{
    crud::DocumentStore,
    model::{is_system_collection, CollectionOutcome, DatabaseReport, WipeReport},
};

// A failure on one collection is recorded and the run moves on. Failing to
// list a database's collections aborts the run.
pub async fn wipe<S, W>(store: &S, databases: &[String], out: &mut W) -> CleanupResult<WipeReport>
where
    S: DocumentStore + ?Sized,
    W: Write,
{
    let mut report = WipeReport::default();

    for database in databases {
        writeln!(out, "[{}] Cleaning database...", database)?;
        let db_report = wipe_database(store, database, out).await?;
        report.databases.push(db_report);
    }

    writeln!(out, "Cleanup completed successfully!")?;
    writeln!(
        out,
        "  {} collection(s) cleaned, {} document(s) deleted",
        report.collections_cleaned(),
        report.documents_deleted()
    )?;

    let failures = report.failures().len();
    if failures > 0 {
        writeln!(out, "  {} collection(s) failed", failures)?;
    }

    Ok(report)
}

async fn wipe_database<S, W>(store: &S, database: &str, out: &mut W) -> CleanupResult<DatabaseReport>
where
    S: DocumentStore + ?Sized,
    W: Write,
{
    let mut db_report = DatabaseReport::new(database);
    let collections = store.list_collections(database).await?;

    if collections.is_empty() {
        writeln!(out, "  No collections found (database may not exist)")?;
        return Ok(db_report);
    }

    writeln!(out, "  Found {} collection(s)", collections.len())?;

    for collection in collections {
        if is_system_collection(&collection) {
            tracing::debug!(database, collection = %collection, "skipping system collection");
            db_report.skipped.push(collection);
            continue;
        }

        match clear_collection(store, database, &collection).await {
            Ok(documents) => {
                writeln!(out, "  ✓ Deleted {} document(s) from {}", documents, collection)?;
                db_report
                    .collections
                    .push(CollectionOutcome::Deleted { collection, documents });
            }
            Err(e) => {
                tracing::error!(database, collection = %collection, error = %e, "failed to clean collection");
                writeln!(out, "  ✗ Failed to clean {}: {}", collection, e)?;
                db_report.collections.push(CollectionOutcome::Failed {
                    collection,
                    error: e.to_string(),
                });
            }
        }
    }

    writeln!(out, "  ✓ Database {} cleaned", database)?;
    Ok(db_report)
}

async fn clear_collection<S>(store: &S, database: &str, collection: &str) -> CleanupResult<u64>
where
    S: DocumentStore + ?Sized,
{
    let present = store.count_documents(database, collection).await?;
    let deleted = store.delete_all(database, collection).await?;

    if present != deleted {
        // Writers racing the wipe; the server's figure wins.
        tracing::warn!(database, collection, present, deleted, "document count changed during delete");
    }

    Ok(deleted)
}
