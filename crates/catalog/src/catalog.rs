use serde::Serialize;

use basecamp_cart::CartCandidate;
use basecamp_core::{DomainError, DomainResult, Money};

use crate::slug::slugify;

/// A product as listed in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub name: &'static str,
    pub description: &'static str,
    pub price: Money,
}

impl Product {
    pub fn slug(&self) -> String {
        slugify(self.name)
    }

    /// Cart candidate for this product. The sku is `<category>-<slug>`.
    pub fn to_candidate(&self, category: &str) -> CartCandidate {
        CartCandidate::new(category, self.name, self.price)
            .with_sku(format!("{category}-{}", self.slug()))
            .with_title(self.name)
    }
}

/// Product grouping shown on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub products: &'static [Product],
}

/// Read-only product catalog.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    categories: &'static [Category],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The outdoor-gear catalog the storefront ships with.
    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN,
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    pub fn category(&self, key: &str) -> DomainResult<&'static Category> {
        self.categories
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| DomainError::not_found(format!("category {key}")))
    }

    /// Look up a product by category key and name slug.
    pub fn find_product(&self, category: &str, slug: &str) -> DomainResult<&'static Product> {
        self.category(category)?
            .products
            .iter()
            .find(|p| p.slug() == slug)
            .ok_or_else(|| DomainError::not_found(format!("product {category}/{slug}")))
    }
}

const fn product(name: &'static str, description: &'static str, cents: u64) -> Product {
    Product {
        name,
        description,
        price: Money::from_cents(cents),
    }
}

static BUILTIN: &[Category] = &[
    Category {
        key: "family",
        label: "Family",
        description: "Gear and essentials for family camping adventures.",
        products: &[
            product("Family Tent (6-person)", "Spacious tent for the whole family.", 29999),
            product("Family Sleeping Bag Set", "Warm sleeping bags for all ages.", 14999),
            product("Family Camping Cookware", "Cookware set for group meals.", 8999),
            product("Kids' Hiking Boots", "Durable boots for young adventurers.", 5999),
        ],
    },
    Category {
        key: "men",
        label: "Men's",
        description: "Outdoor apparel and equipment for men.",
        products: &[
            product("Men's Hiking Boots", "Rugged boots for tough terrain.", 12999),
            product("Men's Waterproof Jacket", "Stay dry in any weather.", 10999),
            product("Men's Trekking Pants", "Comfortable and flexible.", 7999),
            product("Men's Base Layer Shirt", "Moisture-wicking base layer.", 3999),
        ],
    },
    Category {
        key: "women",
        label: "Women's",
        description: "Outdoor apparel and equipment for women.",
        products: &[
            product("Women's Hiking Boots", "Supportive boots for women.", 12499),
            product("Women's Insulated Jacket", "Warmth without the weight.", 11999),
            product("Women's Hiking Backpack", "Ergonomic and stylish.", 9999),
            product("Women's Quick-Dry Pants", "Stay cool and dry.", 6999),
        ],
    },
    Category {
        key: "travel",
        label: "Travel",
        description: "Lightweight and portable gear for travel.",
        products: &[
            product("Lightweight Travel Backpack", "Perfect for on-the-go.", 8999),
            product("Packable Rain Jacket", "Easy to pack, keeps you dry.", 5999),
            product("Travel Hammock", "Relax anywhere.", 3999),
            product("Portable Water Filter", "Clean water anywhere.", 2999),
        ],
    },
    Category {
        key: "experiences",
        label: "Experiences",
        description: "Book guided hikes, camping weekends, and more.",
        products: &[
            product("Guided Mountain Hike", "Expert-led adventure.", 19999),
            product("Family Camping Weekend", "Fun for all ages.", 34999),
            product("Desert Survival Course", "Learn essential skills.", 24999),
            product("Kayak Adventure Tour", "Explore by water.", 17999),
        ],
    },
    Category {
        key: "water",
        label: "Water",
        description: "Kayaks, dry bags, and water adventure gear.",
        products: &[
            product("Inflatable Kayak", "Easy to transport.", 24999),
            product("Waterproof Dry Bag", "Keep your gear dry.", 2499),
            product("Water Purification Tablets", "Safe drinking water.", 1499),
            product("Fishing Kit", "All-in-one kit.", 3499),
        ],
    },
    Category {
        key: "desert",
        label: "Desert",
        description: "Gear for desert camping and sun protection.",
        products: &[
            product("Desert Tent", "Designed for hot climates.", 21999),
            product("Sun Protection Hat", "Stay cool and protected.", 1999),
            product("Hydration Pack", "Stay hydrated on the go.", 4499),
            product("Sand-Proof Blanket", "Perfect for the dunes.", 2999),
        ],
    },
    Category {
        key: "mountain",
        label: "Mountain",
        description: "Equipment for mountain and alpine adventures.",
        products: &[
            product("Mountaineering Boots", "For the highest peaks.", 18999),
            product("Crampons", "Essential for ice and snow.", 5999),
            product("Down Sleeping Bag", "Warmth at altitude.", 15999),
            product("Avalanche Safety Kit", "Be prepared.", 9999),
        ],
    },
];
