//! Snack-Datensätze und der unveränderliche Katalog.
//!
//! Der [`Catalog`] wird einmal beim Start geladen und danach nur noch
//! gelesen. Intern hält er die Snacks nach ID sortiert in einem `Vec` und
//! einen Index ID → Position, sodass Katalogposition und aufsteigende ID
//! übereinstimmen.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::context::Diet;
use crate::error::CatalogError;
use crate::SnackId;

/// Kontrolliertes Tag-Vokabular des Katalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    Veg,
    NonVeg,
    Spicy,
    Sweet,
    Savory,
    Healthy,
    Quick,
    Moderate,
}

impl Tag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Veg => "veg",
            Tag::NonVeg => "non-veg",
            Tag::Spicy => "spicy",
            Tag::Sweet => "sweet",
            Tag::Savory => "savory",
            Tag::Healthy => "healthy",
            Tag::Quick => "quick",
            Tag::Moderate => "moderate",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Low,
    Medium,
    High,
}

impl PriceTier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PriceTier::Low => "low",
            PriceTier::Medium => "medium",
            PriceTier::High => "high",
        }
    }
}

/// Ein Katalogeintrag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snack {
    pub id: SnackId,
    pub name: String,
    pub tags: Vec<Tag>,
    pub price: PriceTier,
    pub heavy: bool,
}

impl Snack {
    #[must_use]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Diät-Verträglichkeit über Tag-Präsenz: ein Snack mit beiden Tags
    /// passt zu keiner der beiden Diäten.
    #[must_use]
    pub fn suits(&self, diet: Diet) -> bool {
        match diet {
            Diet::Veg => !self.has_tag(Tag::NonVeg),
            Diet::NonVeg => !self.has_tag(Tag::Veg),
        }
    }
}

/// Unveränderliche Snack-Arena mit O(1)-Lookup über die ID.
#[derive(Debug, Clone)]
pub struct Catalog {
    snacks: Vec<Snack>,
    index: HashMap<SnackId, usize>,
}

impl Catalog {
    /// Baut den Katalog auf; doppelte IDs sind ein Fehler.
    pub fn new(mut snacks: Vec<Snack>) -> Result<Self, CatalogError> {
        snacks.sort_by_key(|s| s.id);
        if let Some(pair) = snacks.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(CatalogError::DuplicateId(pair[0].id));
        }
        let index = snacks.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        Ok(Self { snacks, index })
    }

    /// Liest einen Katalog im JSON-Format `[{id, name, tags, price, heavy}]`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let snacks: Vec<Snack> = serde_json::from_str(json)?;
        Self::new(snacks)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Der mitgelieferte Standardkatalog mit zwölf Snacks.
    #[must_use]
    pub fn builtin() -> Self {
        use PriceTier::{High, Low, Medium};
        use Tag::{Healthy, Moderate, NonVeg, Quick, Savory, Spicy, Sweet, Veg};

        let entry = |id, name: &str, tags: &[Tag], price, heavy| Snack {
            id,
            name: name.to_string(),
            tags: tags.to_vec(),
            price,
            heavy,
        };
        let snacks = vec![
            entry(1, "Masala Popcorn", &[Spicy, Veg, Quick], Low, false),
            entry(2, "Chocolate Bar", &[Sweet, Veg, Quick], Low, false),
            entry(3, "Paneer Sandwich", &[Savory, Veg, Moderate], Medium, true),
            entry(4, "Chicken Wrap", &[Savory, NonVeg, Quick], Medium, true),
            entry(5, "Fruit Salad", &[Healthy, Veg, Moderate], Medium, false),
            entry(6, "Protein Shake", &[Healthy, Veg, Quick], Medium, false),
            entry(7, "Samosa", &[Spicy, Veg, Quick], Low, true),
            entry(8, "Nachos with Salsa", &[Spicy, Veg, Quick], Low, false),
            entry(9, "Almonds & Raisins", &[Healthy, Veg, Quick], Low, false),
            entry(10, "Instant Noodles", &[Savory, Veg, Quick], Low, true),
            entry(11, "Grilled Fish", &[Savory, NonVeg, Moderate], High, true),
            entry(12, "Ice Cream Cup", &[Sweet, Veg, Quick], Medium, false),
        ];
        let index = snacks.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        Self { snacks, index }
    }

    #[must_use]
    pub fn get(&self, id: SnackId) -> Option<&Snack> {
        self.index.get(&id).map(|&i| &self.snacks[i])
    }

    /// Position in der kanonischen Reihenfolge (aufsteigende ID).
    #[must_use]
    pub fn position(&self, id: SnackId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snack> {
        self.snacks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snacks.is_empty()
    }
}
