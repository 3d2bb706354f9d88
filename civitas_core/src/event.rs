use serde_json::json;

use super::{AbiData, Address, DecodeError, RawLog, Receipt, SourceKind};

/// A decoded chain event, one variant per declared schema. The variant set
/// is closed on purpose: dispatch from (source kind, event name) to a
/// decoder is a static match, never runtime discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    DonationReceived {
        donor: Address,
        receipt: Receipt,
        amount: u128,
    },
    AllocationSet {
        project_id: u64,
        receipt: Receipt,
        amount: u128,
    },
    ProjectCreated {
        project_id: u64,
        owner: Address,
        name: String,
        funding_target: u128,
    },
    RoundStarted {
        round: u64,
        snapshot_block: u64,
        commit_end: u64,
        reveal_end: u64,
    },
    VoteRevealed {
        voter: Address,
        round: u64,
        /// (project id, choice) pairs revealed in one transaction.
        ballots: Vec<(u64, u8)>,
        weight: u128,
    },
}

impl ChainEvent {
    /// Decode one raw log according to the (source kind, event name) pair.
    /// Unknown pairs are an error here; the caller decides whether that is
    /// fatal (it is not: the fetcher only queries declared kinds, and the
    /// mutator table skips anything it does not recognize).
    pub fn decode(kind: SourceKind, name: &str, log: &RawLog) -> Result<ChainEvent, DecodeError> {
        match (kind, name) {
            (SourceKind::Fund, "DonationReceived") => decode_donation(log),
            (SourceKind::Fund, "AllocationSet") => decode_allocation(log),
            (SourceKind::Registry, "ProjectCreated") => decode_project(log),
            (SourceKind::Voting, "RoundStarted") => decode_round(log),
            (SourceKind::Voting, "VoteRevealed") => decode_vote(log),
            _ => Err(DecodeError::UnknownEvent(format!("{kind}/{name}"))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChainEvent::DonationReceived { .. } => "DonationReceived",
            ChainEvent::AllocationSet { .. } => "AllocationSet",
            ChainEvent::ProjectCreated { .. } => "ProjectCreated",
            ChainEvent::RoundStarted { .. } => "RoundStarted",
            ChainEvent::VoteRevealed { .. } => "VoteRevealed",
        }
    }

    /// The decoded argument mapping archived alongside every event. Amounts
    /// are stringified so values past 2^53 survive JSON round-trips.
    pub fn args(&self) -> serde_json::Value {
        match self {
            ChainEvent::DonationReceived {
                donor,
                receipt,
                amount,
            } => json!({
                "donor": donor.to_string(),
                "receipt": receipt.to_string(),
                "amount": amount.to_string(),
            }),
            ChainEvent::AllocationSet {
                project_id,
                receipt,
                amount,
            } => json!({
                "project_id": project_id,
                "receipt": receipt.to_string(),
                "amount": amount.to_string(),
            }),
            ChainEvent::ProjectCreated {
                project_id,
                owner,
                name,
                funding_target,
            } => json!({
                "project_id": project_id,
                "owner": owner.to_string(),
                "name": name,
                "funding_target": funding_target.to_string(),
            }),
            ChainEvent::RoundStarted {
                round,
                snapshot_block,
                commit_end,
                reveal_end,
            } => json!({
                "round": round,
                "snapshot_block": snapshot_block,
                "commit_end": commit_end,
                "reveal_end": reveal_end,
            }),
            ChainEvent::VoteRevealed {
                voter,
                round,
                ballots,
                weight,
            } => json!({
                "voter": voter.to_string(),
                "round": round,
                "ballots": ballots,
                "weight": weight.to_string(),
            }),
        }
    }
}

fn decode_donation(log: &RawLog) -> Result<ChainEvent, DecodeError> {
    let donor = Address::from_topic(log.topic(1)?)?;
    let data = AbiData::parse(&log.data)?;
    Ok(ChainEvent::DonationReceived {
        donor,
        receipt: Receipt::from(data.bytes32(0)?),
        amount: data.uint(1)?,
    })
}

fn decode_allocation(log: &RawLog) -> Result<ChainEvent, DecodeError> {
    let data = AbiData::parse(&log.data)?;
    Ok(ChainEvent::AllocationSet {
        project_id: data.uint64(0)?,
        receipt: Receipt::from(data.bytes32(1)?),
        amount: data.uint(2)?,
    })
}

fn decode_project(log: &RawLog) -> Result<ChainEvent, DecodeError> {
    let owner = Address::from_topic(log.topic(1)?)?;
    let data = AbiData::parse(&log.data)?;
    Ok(ChainEvent::ProjectCreated {
        project_id: data.uint64(0)?,
        owner,
        name: bytes32_label(data.bytes32(1)?),
        funding_target: data.uint(2)?,
    })
}

fn decode_round(log: &RawLog) -> Result<ChainEvent, DecodeError> {
    let data = AbiData::parse(&log.data)?;
    Ok(ChainEvent::RoundStarted {
        round: data.uint64(0)?,
        snapshot_block: data.uint64(1)?,
        commit_end: data.uint64(2)?,
        reveal_end: data.uint64(3)?,
    })
}

fn decode_vote(log: &RawLog) -> Result<ChainEvent, DecodeError> {
    let voter = Address::from_topic(log.topic(1)?)?;
    let data = AbiData::parse(&log.data)?;
    let round = data.uint64(0)?;
    let projects = data.uint_array(1)?;
    let choices = data.uint_array(2)?;
    let weight = data.uint(3)?;
    if projects.len() != choices.len() {
        return Err(DecodeError::ArityMismatch);
    }
    let ballots = projects
        .into_iter()
        .zip(choices)
        .map(|(p, c)| {
            let project = u64::try_from(p).map_err(|_| DecodeError::Overflow)?;
            let choice = u8::try_from(c).map_err(|_| DecodeError::Overflow)?;
            Ok((project, choice))
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;
    Ok(ChainEvent::VoteRevealed {
        voter,
        round,
        ballots,
        weight,
    })
}

/// Contract-side labels are fixed-width bytes32, NUL-padded.
fn bytes32_label(raw: [u8; 32]) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
