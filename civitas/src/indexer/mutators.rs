use anyhow::bail;
use civitas_core::{to_decimal, ChainEvent, SourceKind};
use sqlx::{Sqlite, Transaction};

use crate::db;

use super::fetch::DecodedRecord;

/// The dispatch table: one arm per declared (source kind, event kind) pair.
/// Every arm must tolerate seeing the same event twice: inserts are keyed
/// by the event's natural identity and aggregates are re-derived by
/// summation, so reindex converges instead of double-counting.
///
/// A mutator error aborts the window's transaction; the checkpoint must not
/// advance past an event that was not fully applied.
pub async fn apply(
    tx: &mut Transaction<'_, Sqlite>,
    decimals: u32,
    record: &DecodedRecord,
) -> anyhow::Result<()> {
    let block = record.block as i64;
    match (record.kind, &record.event) {
        (
            SourceKind::Fund,
            ChainEvent::DonationReceived {
                donor,
                receipt,
                amount,
            },
        ) => {
            db::member::upsert(&mut *tx, donor, block).await?;
            db::donation::insert(
                &mut *tx,
                receipt,
                donor,
                to_decimal(*amount, decimals),
                block,
                record.blocktime,
                &record.txid,
            )
            .await?;
            db::member::rederive_total_donated(&mut *tx, donor).await?;
        }
        (
            SourceKind::Fund,
            ChainEvent::AllocationSet {
                project_id,
                receipt,
                amount,
            },
        ) => {
            let project_id = *project_id as i64;
            if !db::project::exists(&mut *tx, project_id).await? {
                bail!("allocation references unknown project {project_id}");
            }
            db::allocation::insert(
                &mut *tx,
                project_id,
                receipt,
                to_decimal(*amount, decimals),
                block,
                &record.txid,
                record.log_index as i64,
            )
            .await?;
            db::project::rederive_total_allocated(&mut *tx, project_id).await?;
        }
        (
            SourceKind::Registry,
            ChainEvent::ProjectCreated {
                project_id,
                owner,
                name,
                funding_target,
            },
        ) => {
            db::project::insert(
                &mut *tx,
                *project_id as i64,
                owner,
                name,
                to_decimal(*funding_target, decimals),
                block,
            )
            .await?;
        }
        (
            SourceKind::Voting,
            ChainEvent::RoundStarted {
                round,
                snapshot_block,
                commit_end,
                reveal_end,
            },
        ) => {
            db::round::insert(
                &mut *tx,
                *round as i64,
                *snapshot_block as i64,
                *commit_end as i64,
                *reveal_end as i64,
                block,
            )
            .await?;
        }
        (
            SourceKind::Voting,
            ChainEvent::VoteRevealed {
                voter,
                round,
                ballots,
                weight,
            },
        ) => {
            let weight = to_decimal(*weight, decimals);
            db::member::upsert(&mut *tx, voter, block).await?;
            db::member::set_voting_weight(&mut *tx, voter, weight).await?;
            for (project_id, choice) in ballots {
                db::vote::insert(
                    &mut *tx,
                    *round as i64,
                    voter,
                    *project_id as i64,
                    *choice,
                    weight,
                    block,
                    &record.txid,
                )
                .await?;
            }
        }
        (kind, event) => {
            // Tolerated, not an error: schemas may grow before mutators do.
            tracing::warn!("No mutator for {kind}/{}; skipping", event.name());
        }
    }
    Ok(())
}
