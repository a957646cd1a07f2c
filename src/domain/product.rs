use std::fmt;

/// Selling unit for a fabric article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOfMeasure {
    Meter,
    Roll,
    Piece,
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnitOfMeasure::Meter => "Meter",
            UnitOfMeasure::Roll => "Roll",
            UnitOfMeasure::Piece => "Piece",
        };
        f.write_str(label)
    }
}

/// A fabric article in the mill catalog. Reference data for the billing
/// engine: the cart reads it, never writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub article_code: String,
    pub fabric_description: String,
    pub color: String,
    pub unit_of_measure: UnitOfMeasure,
    /// Sale rate per unit of measure, in rupees. Non-negative.
    pub sale_rate: f64,
    /// Whether GST is levied on sales of this article.
    pub gst_applicable: bool,
    pub current_stock: u32,
    pub min_stock_level: u32,
    /// Storage location (warehouse name).
    pub godown: String,
}

impl Product {
    /// True when current stock has fallen below the reorder threshold.
    pub fn is_below_min_stock(&self) -> bool {
        self.current_stock < self.min_stock_level
    }
}

/// Payload for registering a new article in the catalog.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub article_code: String,
    pub fabric_description: String,
    pub color: String,
    pub unit_of_measure: UnitOfMeasure,
    pub sale_rate: f64,
    pub gst_applicable: bool,
    pub current_stock: u32,
    pub min_stock_level: u32,
    pub godown: String,
}

/// Payload for editing an existing article. Only the fields the billing
/// screen can touch mid-session.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub sale_rate: Option<f64>,
    pub gst_applicable: Option<bool>,
    pub current_stock: Option<u32>,
    pub godown: Option<String>,
}
