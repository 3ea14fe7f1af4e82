use std::io::Write;

use crate::error::CleanupResult;
use crate::modules::purger::{
    crud::KeyStore,
    model::{KeyPreview, PurgeOutcome, PREVIEW_LIMIT, PROGRESS_INTERVAL},
};
use crate::services::confirm::Confirm;

pub async fn preview<S>(store: &S, keys: &[Vec<u8>]) -> CleanupResult<Vec<KeyPreview>>
where
    S: KeyStore + ?Sized,
{
    let mut previews = Vec::with_capacity(keys.len().min(PREVIEW_LIMIT));
    for key in keys.iter().take(PREVIEW_LIMIT) {
        previews.push(KeyPreview {
            key: String::from_utf8_lossy(key).into_owned(),
            ttl: store.ttl(key).await?,
        });
    }
    Ok(previews)
}

pub async fn purge<S, C, W>(
    store: &S,
    pattern: &str,
    confirm: &mut C,
    out: &mut W,
) -> CleanupResult<PurgeOutcome>
where
    S: KeyStore + ?Sized,
    C: Confirm + ?Sized,
    W: Write,
{
    let keys = store.keys(pattern).await?;

    if keys.is_empty() {
        writeln!(out, "No keys found matching pattern: {}", pattern)?;
        return Ok(PurgeOutcome::NoMatches);
    }

    let total = keys.len();
    writeln!(out, "Found {} keys matching pattern: {}", total, pattern)?;
    writeln!(out)?;
    writeln!(out, "Sample keys (first {}):", PREVIEW_LIMIT)?;
    for entry in preview(store, &keys).await? {
        writeln!(out, "  - {} (TTL: {})", entry.key, entry.ttl)?;
    }
    if total > PREVIEW_LIMIT {
        writeln!(out, "  ... and {} more keys", total - PREVIEW_LIMIT)?;
    }
    writeln!(out)?;
    out.flush()?;

    if !confirm.confirm(&format!("Delete all {} keys?", total))? {
        writeln!(out, "Deletion cancelled")?;
        return Ok(PurgeOutcome::Cancelled { matched: total });
    }

    writeln!(out, "Deleting {} keys...", total)?;
    let mut deleted = 0;
    for key in &keys {
        if !store.delete(key).await? {
            tracing::debug!(key = %String::from_utf8_lossy(key), "key vanished before delete");
        }
        deleted += 1;

        if deleted % PROGRESS_INTERVAL == 0 {
            writeln!(out, "  Deleted {}/{} keys...", deleted, total)?;
        }
    }

    writeln!(out, "Successfully deleted {} keys", deleted)?;
    tracing::info!(pattern, deleted, "purge complete");

    Ok(PurgeOutcome::Purged {
        matched: total,
        deleted,
    })
}
