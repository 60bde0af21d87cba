use serde::Serialize;

/// A shelf grouping for products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CategoryPatch {
    pub name: String,
}
