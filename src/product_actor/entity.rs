use crate::actor_framework::Entity;
use crate::domain::{slugify, Product, ProductFields};
use super::actions::ProductAction;
use super::ProductError;

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductFields;
    type Patch = ProductFields;
    type Action = ProductAction;
    type ActionResult = u32;
    type Error = ProductError;

    const KIND: &'static str = "product";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, fields: ProductFields) -> Result<Self, ProductError> {
        let name = fields.name.trim().to_string();
        let slug = slugify(&name);
        if slug.is_empty() {
            return Err(ProductError::Unsluggable(name));
        }
        Ok(Self {
            id,
            slug,
            name,
            description: fields.description,
            price: fields.price,
            quantity: fields.quantity,
            quantity_unit: fields.quantity_unit,
            image: fields.image,
            barcode_id: fields.barcode_id,
            is_returnable: fields.is_returnable,
            category_id: fields.category_id,
        })
    }

    /// Replaces every editable field; the slug is recomputed from the new name.
    fn on_update(&mut self, fields: ProductFields) -> Result<(), ProductError> {
        let id = std::mem::take(&mut self.id);
        *self = Self::from_create(id, fields)?;
        Ok(())
    }

    /// Slugs address product pages, so two products may not share one.
    fn check_unique(&self, other: &Self) -> Result<(), ProductError> {
        if self.slug == other.slug {
            return Err(ProductError::SlugTaken(self.slug.clone()));
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Errors
    /// Returns an error if attempting to reserve more stock than available.
    fn handle_action(&mut self, action: ProductAction) -> Result<u32, ProductError> {
        match action {
            ProductAction::ReserveStock(amount) => {
                if self.quantity < amount {
                    return Err(ProductError::InsufficientStock {
                        product: self.name.clone(),
                        requested: amount,
                        available: self.quantity,
                    });
                }
                self.quantity -= amount;
                Ok(self.quantity)
            }
            ProductAction::ReleaseStock(amount) => {
                self.quantity = self.quantity.saturating_add(amount);
                Ok(self.quantity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuantityUnit;

    fn fields(name: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            description: "Fresh".to_string(),
            price: 2.5,
            quantity: 4,
            quantity_unit: QuantityUnit::Lb,
            image: "https://img.example/x.jpg".to_string(),
            barcode_id: "1234".to_string(),
            is_returnable: false,
            category_id: "cat".to_string(),
        }
    }

    #[test]
    fn test_slug_follows_name_on_every_write() {
        let mut product = Product::from_create("p1".into(), fields("Green Apples")).unwrap();
        assert_eq!(product.slug, "green-apples");

        product.on_update(fields("Red & Green Apples")).unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(product.slug, "red-and-green-apples");

        product.on_update(fields("Äpfel")).unwrap();
        assert_eq!(product.slug, "apfel");
    }

    #[test]
    fn test_name_without_letters_is_rejected() {
        let err = Product::from_create("p1".into(), fields("!!!")).unwrap_err();
        assert_eq!(err, ProductError::Unsluggable("!!!".into()));
    }

    #[test]
    fn test_reserve_and_release_stock() {
        let mut product = Product::from_create("p1".into(), fields("Milk")).unwrap();

        let err = product.handle_action(ProductAction::ReserveStock(5)).unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock { product: "Milk".into(), requested: 5, available: 4 }
        );
        assert_eq!(product.quantity, 4);

        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(4)),
            Ok(0)
        );
        assert!(product.is_out_of_stock());
        assert_eq!(
            product.handle_action(ProductAction::ReleaseStock(2)),
            Ok(2)
        );
    }
}
