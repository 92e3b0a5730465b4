use crate::classify::PackagingSet;
use crate::model::{PackagingItem, PartId, RawRow};
use crate::parsing::normalize::{resolve_number, resolve_part, resolve_text, Field};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Packaging markers and the description they imply, tested in order.
const PACKAGING_DESCRIPTIONS: &[(&[&str], &str)] = &[
    (&["PALLET"], "Standard Wood Pallet"),
    (&["TOTE"], "Standard Plastic Tote"),
    (&["LID"], "Plastic Lid"),
    (&["BOX", "KW16.5X18X24"], "Standard Cardboard Box"),
];

const GENERIC_DESCRIPTION: &str = "Standard Packaging";

/// Describe a packaging part that came without a description.
pub fn describe_packaging(part: &PartId) -> &'static str {
    let Some(text) = part.as_text() else {
        return GENERIC_DESCRIPTION;
    };
    PACKAGING_DESCRIPTIONS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| text.contains(m)))
        .map(|(_, description)| *description)
        .unwrap_or(GENERIC_DESCRIPTION)
}

/// Summarize packaging material quantities, one item per part in
/// first-seen order, closed by a "Total" item. The total is present even
/// when there is no packaging at all.
pub fn packaging_summary(rows: &[RawRow], packaging: &PackagingSet) -> Vec<PackagingItem> {
    let mut items: Vec<PackagingItem> = Vec::new();
    let mut index: HashMap<PartId, usize> = HashMap::new();

    for row in rows {
        let Some(part) = resolve_part(row) else {
            continue;
        };
        if !packaging.contains(&part) {
            continue;
        }

        let slot = match index.get(&part) {
            Some(&slot) => slot,
            None => {
                let description = resolve_text(row, Field::PackagingDescription)
                    .unwrap_or_else(|| describe_packaging(&part).to_string());
                items.push(PackagingItem::new(part.clone(), description));
                index.insert(part, items.len() - 1);
                items.len() - 1
            }
        };
        items[slot].qty = items[slot]
            .qty
            .saturating_add(resolve_number(row, Field::Quantity));
    }

    let total = items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.qty));
    items.push(PackagingItem::total(total));
    items
}
