use crate::model::{Cell, PartId, RawRow};
use crate::parsing::values::parse_number;
use rust_decimal::Decimal;

/// Logical fields of a shipment row.
///
/// Upstream rows name the same concept in several ways (casing, US/MX
/// variants, synonyms). Each field lists its candidate columns in
/// preference order; the first populated one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Part,
    Skid,
    SubPart,
    ClientPart,
    /// Description as shown on product lines.
    Description,
    /// Description as shown in the packaging summary (also accepts the
    /// customs description column).
    PackagingDescription,
    Po,
    Uom,
    Origin,
    Quantity,
    UnitCost,
    Labor,
    UnitWeight,
    Box,
}

impl Field {
    pub const fn candidates(self) -> &'static [&'static str] {
        match self {
            Field::Part => &["PART", "part"],
            Field::Skid => &["SKIDS", "skids"],
            Field::SubPart => &["SUB_PART", "sub_part"],
            Field::ClientPart => &["MX_PART", "mx_part"],
            Field::Description => &["DESCRIPTION", "description"],
            Field::PackagingDescription => &["DESCRIPTION", "DESC_CUMPLE_US", "description"],
            Field::Po => &["LOT_NUM", "LOT", "lot_num", "lot"],
            Field::Uom => &["UM_US", "UM_MX", "um_us", "um_mx"],
            Field::Origin => &["ORIGIN_US", "ORIGIN_MX", "origin_us", "origin_mx"],
            Field::Quantity => &["QTY1", "qty1"],
            Field::UnitCost => &["COST", "US_PRICE", "cost", "us_price"],
            Field::Labor => &["LABOR", "labor"],
            Field::UnitWeight => &[
                "US_WEIGHT",
                "MX_WEIGHT",
                "WEIGHT_UNIT",
                "us_weight",
                "mx_weight",
                "weight_unit",
            ],
            Field::Box => &["CTNS", "ctns", "BOX", "box", "CARTON", "carton"],
        }
    }

    /// Value used when no candidate column is populated.
    pub const fn default_text(self) -> Option<&'static str> {
        match self {
            Field::Uom => Some("PZ"),
            Field::Origin => Some("MX"),
            _ => None,
        }
    }
}

/// Resolve a logical field to the first populated candidate column.
pub fn resolve(row: &RawRow, field: Field) -> Option<&Cell> {
    field
        .candidates()
        .iter()
        .filter_map(|column| row.get(column))
        .find(|cell| cell.is_populated())
}

/// Resolve a field as text, applying its documented default if any.
pub fn resolve_text(row: &RawRow, field: Field) -> Option<String> {
    resolve(row, field)
        .map(Cell::to_string)
        .or_else(|| field.default_text().map(str::to_string))
}

/// Resolve a field as a number; missing or non-numeric values are zero.
pub fn resolve_number(row: &RawRow, field: Field) -> Decimal {
    parse_number(resolve(row, field))
}

pub fn resolve_part(row: &RawRow) -> Option<PartId> {
    resolve(row, Field::Part).map(PartId::from_cell)
}
