//! The menu catalog and its compiled-in default.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::category::MenuCategory;
use super::line::{DualLine, MenuLine, MenuOffer, SingleLine, TripleLine};
use crate::product::Product;
use crate::types::ProductId;

/// The full menu: six category collections.
///
/// The JSON form matches what the admin editor saves and what the remote
/// menu endpoint stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCatalog {
    pub fatayer_shami: Vec<SingleLine>,
    pub fatayer_sweet: Vec<SingleLine>,
    pub broast: Vec<SingleLine>,
    pub sandwiches: Vec<DualLine>,
    pub pizzas: Vec<TripleLine>,
    pub juices: Vec<SingleLine>,
}

/// An override that may omit categories.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialCatalog {
    #[serde(default)]
    fatayer_shami: Option<Vec<SingleLine>>,
    #[serde(default)]
    fatayer_sweet: Option<Vec<SingleLine>>,
    #[serde(default)]
    broast: Option<Vec<SingleLine>>,
    #[serde(default)]
    sandwiches: Option<Vec<DualLine>>,
    #[serde(default)]
    pizzas: Option<Vec<TripleLine>>,
    #[serde(default)]
    juices: Option<Vec<SingleLine>>,
}

/// Error returned when a line edit does not fit the category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// No line at that position.
    #[error("no line {index} in {category}")]
    NotFound {
        category: MenuCategory,
        index: usize,
    },
    /// The line's price shape does not belong to the category.
    #[error("{field} is not a field of {category} lines")]
    FieldMismatch {
        category: MenuCategory,
        field: &'static str,
    },
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self {
            fatayer_shami: vec![
                SingleLine::new("مشكلة", 8000),
                SingleLine::new("فراخ", 7000),
                SingleLine::new("هوت دوق", 6000),
                SingleLine::new("لحمة", 6000),
            ],
            fatayer_sweet: vec![
                SingleLine::new("مشكلة", 9000),
                SingleLine::new("قشطة عسل", 8000),
                SingleLine::new("نوتيلا عسل", 8000),
                SingleLine::new("بسبوسة", 8000),
            ],
            broast: vec![
                SingleLine::new("1 قطعة", 3500),
                SingleLine::new("3 قطع", 10500),
                SingleLine::new("6 قطع", 21000),
                SingleLine::new("10 قطع", 35000),
                SingleLine::new("12 قطعة", 42000),
            ],
            sandwiches: vec![
                DualLine::new("كرسبي", 4000, 6000),
                DualLine::new("شاورما", 4000, 6000),
                DualLine::new("هوت دوق", 3000, 5000),
            ],
            pizzas: vec![
                TripleLine::new("مشكلة", 15000, 17000, 24000),
                TripleLine::new("فراخ", 14000, 16000, 23000),
                TripleLine::new("هوت دوق", 13000, 15000, 22000),
                TripleLine::new("لحمة", 14000, 16000, 23000),
            ],
            juices: vec![
                SingleLine::new("مشكل كبير", 5000),
                SingleLine::new("مشكل صغير", 4000),
                SingleLine::new("منقة باللبن", 3500),
                SingleLine::new("منقة", 3000),
                SingleLine::new("فراولة", 3000),
                SingleLine::new("فراولة بالنوتيلا", 5000),
                SingleLine::new("فراولة باللبن", 3500),
                SingleLine::new("فراولة بالأوريو", 5000),
                SingleLine::new("موز باللبن", 2500),
                SingleLine::new("اناناس", 2500),
                SingleLine::new("قريب فروت", 2000),
                SingleLine::new("نص ضربه", 6000),
                SingleLine::new("سوبر ضربه", 7000),
                SingleLine::new("برتقال", 1000),
            ],
        }
    }
}

impl MenuCatalog {
    /// Build a catalog from a stored override.
    ///
    /// Categories missing from `value` (or stored as `null`) are taken from
    /// the default catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not an object or any present category
    /// holds malformed records.
    pub fn from_override(value: JsonValue) -> Result<Self, serde_json::Error> {
        let partial: PartialCatalog = serde_json::from_value(value)?;
        let defaults = Self::default();
        Ok(Self {
            fatayer_shami: partial.fatayer_shami.unwrap_or(defaults.fatayer_shami),
            fatayer_sweet: partial.fatayer_sweet.unwrap_or(defaults.fatayer_sweet),
            broast: partial.broast.unwrap_or(defaults.broast),
            sandwiches: partial.sandwiches.unwrap_or(defaults.sandwiches),
            pizzas: partial.pizzas.unwrap_or(defaults.pizzas),
            juices: partial.juices.unwrap_or(defaults.juices),
        })
    }

    /// Lines of one category, in stored order.
    #[must_use]
    pub fn lines(&self, category: MenuCategory) -> Vec<MenuLine> {
        match category {
            MenuCategory::FatayerShami => singles(&self.fatayer_shami),
            MenuCategory::FatayerSweet => singles(&self.fatayer_sweet),
            MenuCategory::Broast => singles(&self.broast),
            MenuCategory::Juices => singles(&self.juices),
            MenuCategory::Sandwiches => self.sandwiches.iter().cloned().map(MenuLine::Dual).collect(),
            MenuCategory::Pizzas => self.pizzas.iter().cloned().map(MenuLine::Triple).collect(),
        }
    }

    /// The line at `index` in `category`.
    #[must_use]
    pub fn line(&self, category: MenuCategory, index: usize) -> Option<MenuLine> {
        match category {
            MenuCategory::FatayerShami => self.fatayer_shami.get(index).cloned().map(MenuLine::Single),
            MenuCategory::FatayerSweet => self.fatayer_sweet.get(index).cloned().map(MenuLine::Single),
            MenuCategory::Broast => self.broast.get(index).cloned().map(MenuLine::Single),
            MenuCategory::Juices => self.juices.get(index).cloned().map(MenuLine::Single),
            MenuCategory::Sandwiches => self.sandwiches.get(index).cloned().map(MenuLine::Dual),
            MenuCategory::Pizzas => self.pizzas.get(index).cloned().map(MenuLine::Triple),
        }
    }

    /// Number of lines in `category`.
    #[must_use]
    pub fn len(&self, category: MenuCategory) -> usize {
        match category {
            MenuCategory::FatayerShami => self.fatayer_shami.len(),
            MenuCategory::FatayerSweet => self.fatayer_sweet.len(),
            MenuCategory::Broast => self.broast.len(),
            MenuCategory::Juices => self.juices.len(),
            MenuCategory::Sandwiches => self.sandwiches.len(),
            MenuCategory::Pizzas => self.pizzas.len(),
        }
    }

    /// Whether every category is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        MenuCategory::ALL.into_iter().all(|c| self.len(c) == 0)
    }

    /// Append a line to `category`, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::FieldMismatch`] if the line's shape does not
    /// match the category.
    pub fn push_line(&mut self, category: MenuCategory, line: MenuLine) -> Result<usize, LineError> {
        let mismatch = LineError::FieldMismatch {
            category,
            field: shape_name(&line),
        };
        match (category, line) {
            (MenuCategory::Sandwiches, MenuLine::Dual(l)) => Ok(push(&mut self.sandwiches, l)),
            (MenuCategory::Pizzas, MenuLine::Triple(l)) => Ok(push(&mut self.pizzas, l)),
            (MenuCategory::Sandwiches | MenuCategory::Pizzas, _) => Err(mismatch),
            (single, MenuLine::Single(l)) => Ok(push(self.singles_mut(single).ok_or(mismatch)?, l)),
            _ => Err(mismatch),
        }
    }

    /// Replace the line at `index` in `category`.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::NotFound`] if `index` is out of bounds, or
    /// [`LineError::FieldMismatch`] if the line's shape does not match.
    pub fn replace_line(
        &mut self,
        category: MenuCategory,
        index: usize,
        line: MenuLine,
    ) -> Result<(), LineError> {
        let not_found = LineError::NotFound { category, index };
        let mismatch = LineError::FieldMismatch {
            category,
            field: shape_name(&line),
        };
        let replaced = match (category, line) {
            (MenuCategory::Sandwiches, MenuLine::Dual(l)) => replace(&mut self.sandwiches, index, l),
            (MenuCategory::Pizzas, MenuLine::Triple(l)) => replace(&mut self.pizzas, index, l),
            (MenuCategory::Sandwiches | MenuCategory::Pizzas, _) => return Err(mismatch),
            (single, MenuLine::Single(l)) => {
                replace(self.singles_mut(single).ok_or(mismatch)?, index, l)
            }
            _ => return Err(mismatch),
        };
        if replaced { Ok(()) } else { Err(not_found) }
    }

    /// Remove and return the line at `index` in `category`.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::NotFound`] if `index` is out of bounds.
    pub fn remove_line(&mut self, category: MenuCategory, index: usize) -> Result<MenuLine, LineError> {
        let removed = match category {
            MenuCategory::Sandwiches => remove(&mut self.sandwiches, index).map(MenuLine::Dual),
            MenuCategory::Pizzas => remove(&mut self.pizzas, index).map(MenuLine::Triple),
            single => self
                .singles_mut(single)
                .and_then(|lines| remove(lines, index))
                .map(MenuLine::Single),
        };
        removed.ok_or(LineError::NotFound { category, index })
    }

    /// Lines of `category` whose name matches `query`, with their indices.
    #[must_use]
    pub fn search(&self, category: MenuCategory, query: &str) -> Vec<(usize, MenuLine)> {
        self.lines(category)
            .into_iter()
            .enumerate()
            .filter(|(_, line)| line.matches(query))
            .collect()
    }

    /// Every purchasable offer on the menu.
    pub fn offers(&self) -> impl Iterator<Item = MenuOffer> + '_ {
        MenuCategory::ALL.into_iter().flat_map(move |category| {
            self.lines(category)
                .into_iter()
                .flat_map(move |line| line.offers(category))
        })
    }

    /// Look up the product a client asked for by id.
    ///
    /// Only products currently on the menu resolve, so clients cannot set
    /// their own prices.
    #[must_use]
    pub fn find_product(&self, id: &ProductId) -> Option<Product> {
        self.offers()
            .map(|offer| offer.product)
            .find(|product| product.id() == id)
    }

    fn singles_mut(&mut self, category: MenuCategory) -> Option<&mut Vec<SingleLine>> {
        match category {
            MenuCategory::FatayerShami => Some(&mut self.fatayer_shami),
            MenuCategory::FatayerSweet => Some(&mut self.fatayer_sweet),
            MenuCategory::Broast => Some(&mut self.broast),
            MenuCategory::Juices => Some(&mut self.juices),
            MenuCategory::Sandwiches | MenuCategory::Pizzas => None,
        }
    }
}

fn singles(lines: &[SingleLine]) -> Vec<MenuLine> {
    lines.iter().cloned().map(MenuLine::Single).collect()
}

const fn shape_name(line: &MenuLine) -> &'static str {
    match line {
        MenuLine::Single(_) => "price",
        MenuLine::Dual(_) => "regular/jumbo",
        MenuLine::Triple(_) => "small/medium/large",
    }
}

fn push<T>(lines: &mut Vec<T>, line: T) -> usize {
    lines.push(line);
    lines.len() - 1
}

fn replace<T>(lines: &mut [T], index: usize, line: T) -> bool {
    lines.get_mut(index).map(|slot| *slot = line).is_some()
}

fn remove<T>(lines: &mut Vec<T>, index: usize) -> Option<T> {
    (index < lines.len()).then(|| lines.remove(index))
}
