use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar value as returned verbatim by the upstream query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Cell {
    /// Whether the cell carries a usable value.
    ///
    /// Null, empty text, `false` and numeric zero all count as unpopulated,
    /// so a synonym column holding one of them falls through to the next.
    pub fn is_populated(&self) -> bool {
        match self {
            Cell::Null => false,
            Cell::Bool(b) => *b,
            Cell::Number(n) => match n.as_f64() {
                Some(f) => f != 0.0 && !f.is_nan(),
                None => true,
            },
            Cell::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "null"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Number(n) => match n.as_f64() {
                // Whole floats print without a fraction: 5.0 and 5 are the same box.
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{n}"),
            },
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(n.into())
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        serde_json::Number::from_f64(f)
            .map(Cell::Number)
            .unwrap_or(Cell::Null)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

/// One row of the upstream query result: column name to scalar value.
///
/// No schema is guaranteed. Column names may come in several casings and
/// synonyms; see [`crate::parsing::normalize`] for how they are resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(BTreeMap<String, Cell>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRow(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Identifier of a physical part or packaging material.
///
/// Keeps track of whether the upstream value was text: the name heuristics
/// and client-part derivation only apply to textual identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartId {
    Text(String),
    /// A non-text scalar (usually a number), kept in its printed form.
    Other(String),
}

impl PartId {
    pub fn from_cell(cell: &Cell) -> Self {
        match cell {
            Cell::Text(s) => PartId::Text(s.clone()),
            other => PartId::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PartId::Text(s) | PartId::Other(s) => s,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PartId::Text(s) => Some(s),
            PartId::Other(_) => None,
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PartId {
    fn from(s: &str) -> Self {
        PartId::Text(s.to_string())
    }
}

impl Serialize for PartId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One product line of the shipment report, keyed by (skid, part).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub part: PartId,
    pub client_part: String,
    pub description: String,
    /// Purchase order / lot number.
    pub po: String,
    pub qty: Decimal,
    pub uom: String,
    /// Number of distinct box identifiers seen for this line.
    pub box_count: usize,
    pub origin: String,
    pub qty_per_set: Decimal,
    /// Unit weight times the aggregated quantity.
    pub weight: Decimal,
    pub unit_cost: Decimal,
    pub labor: Decimal,
    pub total_cost: Decimal,
    pub skid: String,
}

/// Part name of the synthetic row closing the packaging summary.
pub const TOTAL_PART: &str = "Total";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingItem {
    pub part: PartId,
    pub description: String,
    pub qty: Decimal,
    /// Set only on the synthetic row closing the summary; a real part may
    /// also be called "Total".
    #[serde(skip)]
    total: bool,
}

impl PackagingItem {
    pub fn new(part: PartId, description: impl Into<String>) -> Self {
        PackagingItem {
            part,
            description: description.into(),
            qty: Decimal::ZERO,
            total: false,
        }
    }

    pub fn total(qty: Decimal) -> Self {
        PackagingItem {
            part: PartId::Text(TOTAL_PART.to_string()),
            description: String::new(),
            qty,
            total: true,
        }
    }

    pub fn is_total(&self) -> bool {
        self.total
    }
}

/// Aggregates over all line items of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtotals {
    pub quantity: Decimal,
    pub boxes: usize,
    pub weight: Decimal,
    pub total_cost: Decimal,
    /// Number of distinct skids across line items.
    pub skids: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub client_name: String,
    pub from: String,
    pub to: String,
    pub export_date: String,
    pub shipment_number: String,
}

impl ReportHeader {
    pub fn from_declaration(declaration: &Declaration, from: &str, to: &str) -> Self {
        ReportHeader {
            client_name: declaration.company_name.clone(),
            from: from.to_string(),
            to: to.to_string(),
            export_date: declaration.export_at.clone(),
            shipment_number: declaration.visa.clone(),
        }
    }
}

/// A customs declaration as listed by the declaration query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: String,
    pub visa: String,
    pub company_name: String,
    pub trans_type: String,
    pub state: String,
    pub export_at: String,
}

impl Declaration {
    /// Read a declaration from a listing row. Column names are matched in
    /// lowercase first, then uppercase. Returns None when the row has no id.
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let text = |column: &str| {
            row.get(column)
                .filter(|c| c.is_populated())
                .or_else(|| {
                    row.get(&column.to_uppercase())
                        .filter(|c| c.is_populated())
                })
                .map(Cell::to_string)
        };

        Some(Declaration {
            id: text("id")?,
            visa: text("visa").unwrap_or_default(),
            company_name: text("company_name").unwrap_or_default(),
            trans_type: text("trans_type").unwrap_or_default(),
            state: text("state").unwrap_or_default(),
            export_at: text("export_at").unwrap_or_default(),
        })
    }
}

/// The finished shipment report handed to the UI/export layer.
///
/// Line items are addressed by position, so downstream cell overrides stay
/// valid as long as the report is not rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub header: ReportHeader,
    pub line_items: Vec<LineItem>,
    pub packaging_section: Vec<PackagingItem>,
    pub subtotals: Subtotals,
}
