use serde::{Deserialize, Serialize};

use basecamp_core::{Entity, Money};

/// Identity of a cart line: the `(name, category)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey {
    pub name: String,
    pub category: String,
}

impl LineKey {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, name: &str, category: &str) -> bool {
        self.name == name && self.category == category
    }
}

impl core::fmt::Display for LineKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// A product offered for insertion into the cart (everything but quantity).
///
/// `sku`, `title` and `image` default to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCandidate {
    pub category: String,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
}

impl CartCandidate {
    pub fn new(category: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            price,
            sku: String::new(),
            title: String::new(),
            image: String::new(),
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.name.clone(), self.category.clone())
    }
}

/// One entry in the cart.
///
/// `quantity` is at least 1 for as long as the line exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub(crate) key: LineKey,
    pub(crate) price: Money,
    pub(crate) quantity: u32,
    pub(crate) sku: String,
    pub(crate) title: String,
    pub(crate) image: String,
}

impl CartLineItem {
    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn category(&self) -> &str {
        &self.key.category
    }

    pub fn key(&self) -> &LineKey {
        &self.key
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// `price × quantity` for this line.
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

impl Entity for CartLineItem {
    type Id = LineKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}
