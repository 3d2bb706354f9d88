use std::{fmt::Display, str::FromStr};

use super::DecodeError;

/// The kind of contract a configured source points at. Each kind declares a
/// fixed set of event schemas; the fetcher queries the node once per
/// (source, event) pair and the decoder matches on the pair statically.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde_with::DeserializeFromStr,
    serde_with::SerializeDisplay,
)]
pub enum SourceKind {
    /// Treasury contract: donations in, allocations out.
    Fund,
    /// Project registry contract.
    Registry,
    /// Commit/reveal voting contract.
    Voting,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceKind::Fund => "fund",
            SourceKind::Registry => "registry",
            SourceKind::Voting => "voting",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SourceKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fund" => Ok(SourceKind::Fund),
            "registry" => Ok(SourceKind::Registry),
            "voting" => Ok(SourceKind::Voting),
            _ => Err(DecodeError::UnknownSourceKind(s.to_string())),
        }
    }
}

/// One declared event: the short name used in the archive and dispatch
/// table, and the full signature handed to the node's topic filter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EventSchema {
    pub name: &'static str,
    pub signature: &'static str,
}

const FUND_EVENTS: &[EventSchema] = &[
    EventSchema {
        name: "DonationReceived",
        signature: "DonationReceived(address,bytes32,uint256)",
    },
    EventSchema {
        name: "AllocationSet",
        signature: "AllocationSet(uint256,bytes32,uint256)",
    },
];

const REGISTRY_EVENTS: &[EventSchema] = &[EventSchema {
    name: "ProjectCreated",
    signature: "ProjectCreated(uint256,address,bytes32,uint256)",
}];

const VOTING_EVENTS: &[EventSchema] = &[
    EventSchema {
        name: "RoundStarted",
        signature: "RoundStarted(uint256,uint256,uint256,uint256)",
    },
    EventSchema {
        name: "VoteRevealed",
        signature: "VoteRevealed(address,uint256,uint256[],uint256[],uint256)",
    },
];

impl SourceKind {
    pub fn declared_events(self) -> &'static [EventSchema] {
        match self {
            SourceKind::Fund => FUND_EVENTS,
            SourceKind::Registry => REGISTRY_EVENTS,
            SourceKind::Voting => VOTING_EVENTS,
        }
    }
}
