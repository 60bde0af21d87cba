use tracing::{debug, info, instrument};
use crate::domain::{Product, ProductFields};
use crate::product_actor::{ProductAction, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: crate::actor_framework::ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product, products);

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        let slug = slug.to_string();
        self.inner.find(move |product| product.slug == slug).await
    }

    /// Same contract as [`super::CategoryClient::upsert_category`].
    #[instrument(skip(self, fields), fields(product_name = %fields.name))]
    pub async fn upsert_product(&self, id: Option<String>, fields: ProductFields) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = match id {
            Some(id) => self.inner.update(id, fields).await?,
            None => self.inner.create(fields).await?,
        };
        info!(product_id = %product.id, slug = %product.slug, "Product saved");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        self.inner.perform_action(id, ProductAction::ReserveStock(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        self.inner.perform_action(id, ProductAction::ReleaseStock(quantity)).await
    }
}
