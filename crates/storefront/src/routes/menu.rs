//! Menu route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use pizzeti_core::menu::PriceTier;
use pizzeti_core::{MenuCatalog, MenuCategory, MenuLine, Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Menu search query.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub q: String,
}

/// One purchasable size of a line.
#[derive(Debug, Serialize)]
pub struct OfferView {
    pub tier: PriceTier,
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    /// Price with thousands grouping, as printed on the menu board.
    pub price_display: String,
}

/// A menu line with its offers.
#[derive(Debug, Serialize)]
pub struct LineView {
    pub index: usize,
    pub name: String,
    pub offers: Vec<OfferView>,
}

/// A menu section.
#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub key: MenuCategory,
    pub label: &'static str,
    pub lines: Vec<LineView>,
}

/// The menu as served to visitors.
#[derive(Debug, Serialize)]
pub struct MenuView {
    pub query: String,
    pub categories: Vec<CategoryView>,
}

impl MenuView {
    /// Build the view of `catalog`, keeping only lines whose name matches
    /// `query`.
    #[must_use]
    pub fn build(catalog: &MenuCatalog, query: &str) -> Self {
        let categories = MenuCategory::ALL
            .into_iter()
            .map(|category| CategoryView {
                key: category,
                label: category.label(),
                lines: catalog
                    .search(category, query)
                    .into_iter()
                    .map(|(index, line)| line_view(category, index, &line))
                    .collect(),
            })
            .collect();

        Self {
            query: query.trim().to_string(),
            categories,
        }
    }
}

fn line_view(category: MenuCategory, index: usize, line: &MenuLine) -> LineView {
    let offers = line
        .offers(category)
        .into_iter()
        .map(|offer| OfferView {
            tier: offer.tier,
            product_id: offer.product.id().clone(),
            name: offer.product.name().to_string(),
            price: offer.product.price(),
            price_display: offer.product.price().grouped(),
        })
        .collect();

    LineView {
        index,
        name: line.name().to_string(),
        offers,
    }
}

/// Show the menu, optionally filtered by name.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<MenuView>> {
    let catalog = state.menu().await?;
    Ok(Json(MenuView::build(&catalog, &query.q)))
}
