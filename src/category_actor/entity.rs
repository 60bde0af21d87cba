use crate::actor_framework::Entity;
use crate::domain::{slugify, Category, CategoryCreate, CategoryPatch};
use super::CategoryError;

fn named(name: &str) -> Result<(String, String), CategoryError> {
    let name = name.trim().to_string();
    let slug = slugify(&name);
    if slug.is_empty() {
        return Err(CategoryError::Unsluggable(name));
    }
    Ok((name, slug))
}

impl Entity for Category {
    type Id = String;
    type CreatePayload = CategoryCreate;
    type Patch = CategoryPatch;
    type Action = ();
    type ActionResult = ();
    type Error = CategoryError;

    const KIND: &'static str = "category";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: CategoryCreate) -> Result<Self, CategoryError> {
        let (name, slug) = named(&payload.name)?;
        Ok(Self { id, name, slug })
    }

    /// Renaming always moves the slug along with the name.
    fn on_update(&mut self, patch: CategoryPatch) -> Result<(), CategoryError> {
        (self.name, self.slug) = named(&patch.name)?;
        Ok(())
    }

    fn check_unique(&self, other: &Self) -> Result<(), CategoryError> {
        if self.name.eq_ignore_ascii_case(&other.name) {
            return Err(CategoryError::AlreadyExists(self.name.clone()));
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), CategoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_moves_slug() {
        let mut category = Category::from_create("c1".into(), CategoryCreate { name: " Fruits & Veg ".into() }).unwrap();
        assert_eq!((category.name.as_str(), category.slug.as_str()), ("Fruits & Veg", "fruits-and-veg"));

        category.on_update(CategoryPatch { name: "Obst und Gemüse".into() }).unwrap();
        assert_eq!(category.slug, "obst-und-gemuse");
    }

    #[test]
    fn test_name_without_letters_is_rejected() {
        let err = Category::from_create("c1".into(), CategoryCreate { name: "???".into() }).unwrap_err();
        assert_eq!(err, CategoryError::Unsluggable("???".into()));

        let mut category = Category::from_create("c1".into(), CategoryCreate { name: "Dairy".into() }).unwrap();
        assert!(category.on_update(CategoryPatch { name: "--".into() }).is_err());
        assert_eq!(category.slug, "dairy");
    }
}
