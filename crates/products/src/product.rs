use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{Money, ProductId};

use crate::draft::DEFAULT_IMAGE;

/// Product category.
///
/// This is the single place where categories map to their wire value and to
/// the label shown by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "peliculas")]
    Movies,
    #[serde(rename = "series")]
    Series,
    #[serde(rename = "libros")]
    Books,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Movies, Category::Series, Category::Books];

    /// Value used on the wire and in `?categoria=` queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movies => "peliculas",
            Category::Series => "series",
            Category::Books => "libros",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Movies => "Movies",
            Category::Series => "Series",
            Category::Books => "Books",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peliculas" => Ok(Category::Movies),
            "series" => Ok(Category::Series),
            "libros" => Ok(Category::Books),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// Category selection in the catalog browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Value for the `categoria` query parameter, `None` for the unfiltered listing.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category.as_str()),
        }
    }

    /// Page heading for this selection.
    pub fn title(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All products",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

/// Product as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "precio")]
    pub price: Money,
    #[serde(default)]
    pub stock: u32,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Image to display, falling back to the default placeholder.
    pub fn image_url(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_IMAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_json() -> &'static str {
        r#"{
            "_id": "p1",
            "codigo": "MOV-001",
            "nombre": "Blade Runner",
            "categoria": "peliculas",
            "precio": 12.5,
            "stock": 4,
            "imagen": "",
            "descripcion": "Replicants on the run"
        }"#
    }

    #[test]
    fn decodes_wire_product() {
        let product: Product = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.category, Category::Movies);
        assert_eq!(product.price, Decimal::new(125, 1));
        assert_eq!(product.stock, 4);
        assert!(product.in_stock());
    }

    #[test]
    fn empty_image_falls_back_to_default() {
        let product: Product = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(product.image_url(), DEFAULT_IMAGE);
    }

    #[test]
    fn missing_optional_fields_default() {
        let product: Product = serde_json::from_str(
            r#"{"_id":"p2","codigo":"LIB","nombre":"Dune","categoria":"libros","precio":9}"#,
        )
        .unwrap();
        assert_eq!(product.stock, 0);
        assert!(!product.in_stock());
        assert_eq!(product.image, None);
        assert_eq!(product.description, "");
    }

    #[test]
    fn category_wire_values_and_labels_agree() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        assert_eq!(Category::Books.label(), "Books");
        assert!("comics".parse::<Category>().is_err());
    }

    #[test]
    fn category_filter_query_and_title() {
        assert_eq!(CategoryFilter::All.query_value(), None);
        assert_eq!(CategoryFilter::All.title(), "All products");

        let series = CategoryFilter::Only(Category::Series);
        assert_eq!(series.query_value(), Some("series"));
        assert_eq!(series.title(), "Series");
    }
}
