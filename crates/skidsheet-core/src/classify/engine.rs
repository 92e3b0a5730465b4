use crate::classify::outcome::{Classification, PackagingEvidence, PackagingSet, Strategy};
use crate::model::{PartId, RawRow};
use crate::parsing::normalize::{resolve, resolve_part, Field};
use std::collections::HashSet;

/// Substrings that mark a part number as packaging (case-sensitive).
pub const PACKAGING_MARKERS: &[&str] = &[
    "PALLET",
    "BOX",
    "CONTAINER",
    "TOTE",
    "LID",
    "KW16.5X18X24",
];

/// Sub-part value carried by finished product rows.
pub const FINISHED_PRODUCT: &str = "PRODUCTO TERMINADO";

/// Classify every part in the dataset as packaging or product.
///
/// A part is packaging when at least one of three independent heuristics
/// flags it; everything else is product.
pub fn classify_packaging(rows: &[RawRow]) -> Classification {
    let no_skid = parts_without_skid(rows);
    let by_name = parts_with_packaging_names(rows);
    let by_sub_part = parts_with_sub_part(rows);

    let mut seen = HashSet::new();
    let mut evidence = Vec::new();
    for part in rows.iter().filter_map(resolve_part) {
        if !seen.insert(part.clone()) {
            continue;
        }

        let strategies: Vec<Strategy> = [
            (Strategy::NoSkid, &no_skid),
            (Strategy::NamePattern, &by_name),
            (Strategy::SubPart, &by_sub_part),
        ]
        .into_iter()
        .filter(|(_, set)| set.contains(&part))
        .map(|(strategy, _)| strategy)
        .collect();

        if !strategies.is_empty() {
            evidence.push(PackagingEvidence { part, strategies });
        }
    }

    let packaging: PackagingSet = evidence.iter().map(|e| e.part.clone()).collect();

    tracing::debug!(
        parts = seen.len(),
        no_skid = no_skid.len(),
        name_pattern = by_name.len(),
        sub_part = by_sub_part.len(),
        packaging = packaging.len(),
        "classified packaging parts"
    );

    Classification {
        packaging,
        evidence,
        parts_seen: seen.len(),
    }
}

/// Shorthand for the packaging set alone.
pub fn packaging_set(rows: &[RawRow]) -> PackagingSet {
    classify_packaging(rows).packaging
}

/// Parts never seen with a skid anywhere in the dataset.
pub fn parts_without_skid(rows: &[RawRow]) -> HashSet<PartId> {
    let mut all_parts = HashSet::new();
    let mut on_skid = HashSet::new();

    for row in rows {
        let Some(part) = resolve_part(row) else {
            continue;
        };
        if resolve(row, Field::Skid).is_some() {
            on_skid.insert(part.clone());
        }
        all_parts.insert(part);
    }

    all_parts.difference(&on_skid).cloned().collect()
}

/// Parts whose textual identifier contains a packaging marker.
pub fn parts_with_packaging_names(rows: &[RawRow]) -> HashSet<PartId> {
    rows.iter()
        .filter_map(resolve_part)
        .filter(|part| part.as_text().is_some_and(is_packaging_name))
        .collect()
}

pub fn is_packaging_name(part: &str) -> bool {
    PACKAGING_MARKERS.iter().any(|marker| part.contains(marker))
}

/// Parts with at least one row whose sub-part is not the finished-product
/// marker. Rows lacking either field say nothing.
pub fn parts_with_sub_part(rows: &[RawRow]) -> HashSet<PartId> {
    rows.iter()
        .filter_map(|row| {
            let part = resolve_part(row)?;
            let sub_part = resolve(row, Field::SubPart)?;
            (sub_part.as_text() != Some(FINISHED_PRODUCT)).then_some(part)
        })
        .collect()
}
