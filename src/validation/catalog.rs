use crate::domain::{slugify, ProductFields, QuantityUnit};
use super::{min_len, optional_text, text, FieldErrors, FormData};

pub const NAME_NEEDS_LETTERS: &str = "Name must contain a letter or digit";

/// A name must also yield a usable slug.
fn display_name(errors: &mut FieldErrors, form: &FormData) -> String {
    let name = min_len(errors, form, "name", 1, "Name is required");
    if !name.is_empty() && slugify(&name).is_empty() {
        errors.add("name", NAME_NEEDS_LETTERS);
    }
    name
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForm {
    /// Present when editing; absent creates a new category.
    pub category_id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub product_id: Option<String>,
    pub fields: ProductFields,
}

impl CategoryForm {
    pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = display_name(&mut errors, form);
        let category_id = optional_text(form, "categoryId");
        errors.into_result(|| Self { category_id, name })
    }
}

impl ProductForm {
    pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let product_id = optional_text(form, "productId");
        let name = display_name(&mut errors, form);
        let description = min_len(&mut errors, form, "description", 1, "Description is required");

        let quantity = match text(form, "quantity").parse::<u32>() {
            Ok(quantity) => quantity,
            Err(_) => {
                errors.add("quantity", "Quantity must be at least 0");
                0
            }
        };
        let price = match text(form, "price").parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => price,
            _ => {
                errors.add("price", "Price must be greater than 0");
                0.0
            }
        };

        let image = min_len(&mut errors, form, "image", 1, "Image is required");
        let quantity_unit = text(form, "quantityUnit").parse::<QuantityUnit>().unwrap_or_else(|()| {
            errors.add("quantityUnit", "Quantity Unit is required");
            QuantityUnit::Pcs
        });
        let category_id = min_len(&mut errors, form, "category", 1, "Category is required");
        let barcode_id = min_len(&mut errors, form, "barcodeId", 1, "Barcode ID is required");
        let is_returnable = match text(form, "isReturnable") {
            "true" => true,
            "false" => false,
            _ => {
                errors.add("isReturnable", "Returnable is required");
                false
            }
        };

        errors.into_result(|| Self {
            product_id,
            fields: ProductFields {
                name,
                description,
                price,
                quantity,
                quantity_unit,
                image,
                barcode_id,
                is_returnable,
                category_id,
            },
        })
    }
}
