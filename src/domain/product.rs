use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Unit a product's price and quantity are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuantityUnit {
    Lb,
    Oz,
    G,
    Kg,
    Pcs,
}

impl QuantityUnit {
    pub const ALL: [QuantityUnit; 5] = [Self::Lb, Self::Oz, Self::G, Self::Kg, Self::Pcs];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lb => "LB",
            Self::Oz => "OZ",
            Self::G => "G",
            Self::Kg => "KG",
            Self::Pcs => "PCS",
        }
    }
}

impl fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantityUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub quantity_unit: QuantityUnit,
    pub image: String,
    pub barcode_id: String,
    pub is_returnable: bool,
    pub category_id: String,
}

/// Every editable product field. Used for both create and update, since the
/// admin form always submits the whole record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub quantity_unit: QuantityUnit,
    pub image: String,
    pub barcode_id: String,
    pub is_returnable: bool,
    pub category_id: String,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}
