use tracing::{debug, info, instrument};
use crate::domain::{Category, CategoryCreate, CategoryPatch};
use crate::category_actor::CategoryError;

/// Client for interacting with the Category actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: crate::actor_framework::ResourceClient<Category>,
}

impl_basic_client!(CategoryClient, Category, CategoryError, category, categories);

impl CategoryClient {
    /// Updates the category `id` names, or creates a new one when `id` is `None`.
    ///
    /// The id only selects the path; new categories always get a server id.
    #[instrument(skip(self))]
    pub async fn upsert_category(&self, id: Option<String>, name: String) -> Result<Category, CategoryError> {
        debug!("Sending request");
        let category = match id {
            Some(id) => self.inner.update(id, CategoryPatch { name }).await?,
            None => self.inner.create(CategoryCreate { name }).await?,
        };
        info!(category_id = %category.id, slug = %category.slug, "Category saved");
        Ok(category)
    }
}
