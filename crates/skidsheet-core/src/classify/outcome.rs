use crate::model::PartId;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Heuristic that flagged a part as packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The part never appears on a skid.
    NoSkid,
    /// The part number contains a packaging marker (PALLET, BOX, ...).
    NamePattern,
    /// Some row gives the part a sub-part other than finished product.
    SubPart,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::NoSkid => write!(f, "no skid"),
            Strategy::NamePattern => write!(f, "name pattern"),
            Strategy::SubPart => write!(f, "sub-part"),
        }
    }
}

/// Parts classified as packaging material rather than product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagingSet(HashSet<PartId>);

impl PackagingSet {
    pub fn contains(&self, part: &PartId) -> bool {
        self.0.contains(part)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PartId> for PackagingSet {
    fn from_iter<I: IntoIterator<Item = PartId>>(iter: I) -> Self {
        PackagingSet(iter.into_iter().collect())
    }
}

/// Why a part ended up in the packaging set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackagingEvidence {
    pub part: PartId,
    /// Strategies that flagged the part, in evaluation order.
    pub strategies: Vec<Strategy>,
}

/// Result of classifying a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    #[serde(skip)]
    pub packaging: PackagingSet,
    /// One entry per packaging part, in first-seen row order.
    pub evidence: Vec<PackagingEvidence>,
    /// Distinct parts seen in the dataset.
    pub parts_seen: usize,
}
