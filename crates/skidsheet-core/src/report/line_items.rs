use crate::classify::PackagingSet;
use crate::model::{LineItem, PartId, RawRow};
use crate::parsing::normalize::{resolve, resolve_number, resolve_part, resolve_text, Field};
use crate::parsing::values::skid_ordinal;
use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Accumulator for one (skid, part) group.
struct Group {
    skid: String,
    part: PartId,
    client_part: String,
    description: String,
    po: String,
    uom: String,
    origin: String,
    unit_cost: Decimal,
    labor: Decimal,
    unit_weight: Decimal,
    qty: Decimal,
    boxes: HashSet<String>,
}

impl Group {
    /// Open a group, taking its descriptive fields and unit economics from
    /// the first row seen for the key.
    fn open(skid: String, part: PartId, row: &RawRow) -> Self {
        let client_part = resolve_text(row, Field::ClientPart)
            .unwrap_or_else(|| derive_client_part(&part).unwrap_or_default());

        Group {
            skid,
            client_part,
            description: resolve_text(row, Field::Description).unwrap_or_default(),
            po: resolve_text(row, Field::Po).unwrap_or_default(),
            uom: resolve_text(row, Field::Uom).unwrap_or_default(),
            origin: resolve_text(row, Field::Origin).unwrap_or_default(),
            unit_cost: resolve_number(row, Field::UnitCost),
            labor: resolve_number(row, Field::Labor),
            unit_weight: resolve_number(row, Field::UnitWeight),
            qty: Decimal::ZERO,
            boxes: HashSet::new(),
            part,
        }
    }

    fn absorb(&mut self, row: &RawRow) {
        self.qty = self
            .qty
            .saturating_add(resolve_number(row, Field::Quantity));
        if let Some(box_id) = resolve(row, Field::Box) {
            self.boxes.insert(box_id.to_string());
        }
    }

    fn finish(self) -> LineItem {
        LineItem {
            weight: self.unit_weight.saturating_mul(self.qty),
            total_cost: self
                .unit_cost
                .saturating_add(self.labor)
                .saturating_mul(self.qty),
            box_count: self.boxes.len(),
            qty_per_set: Decimal::ZERO,
            part: self.part,
            client_part: self.client_part,
            description: self.description,
            po: self.po,
            qty: self.qty,
            uom: self.uom,
            origin: self.origin,
            unit_cost: self.unit_cost,
            labor: self.labor,
            skid: self.skid,
        }
    }
}

/// Derive the client part number from an internal one: `KWS…` and `KW…`
/// both map to `S…`. Other part numbers have no derivable client part.
pub fn derive_client_part(part: &PartId) -> Option<String> {
    let text = part.as_text()?;
    if let Some(rest) = text.strip_prefix("KWS") {
        Some(format!("S{rest}"))
    } else {
        text.strip_prefix("KW").map(|rest| format!("S{rest}"))
    }
}

/// Build the product line items of a report.
///
/// Rows whose part is packaging, or that lack a skid or a part, are left
/// out. The rest are grouped by (skid text, part); quantities are summed
/// and distinct box identifiers counted. Output is sorted by the numeric
/// value of the skid, then by part number.
pub fn line_items(rows: &[RawRow], packaging: &PackagingSet) -> Vec<LineItem> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<(String, PartId), usize> = HashMap::new();

    for row in rows {
        let Some(part) = resolve_part(row) else {
            continue;
        };
        if packaging.contains(&part) {
            continue;
        }
        let Some(skid) = resolve(row, Field::Skid) else {
            continue;
        };

        let slot = match index.entry((skid.to_string(), part)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let (skid, part) = e.key().clone();
                groups.push(Group::open(skid, part, row));
                *e.insert(groups.len() - 1)
            }
        };
        groups[slot].absorb(row);
    }

    tracing::debug!(groups = groups.len(), "aggregated product rows");

    let mut items: Vec<LineItem> = groups.into_iter().map(Group::finish).collect();
    items.sort_by(|a, b| {
        skid_ordinal(&a.skid)
            .cmp(&skid_ordinal(&b.skid))
            .then_with(|| a.part.as_str().cmp(b.part.as_str()))
    });
    items
}
