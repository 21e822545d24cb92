//! Read-only summary of the product list: chart series, details table and slideshow.

pub mod slideshow;

pub use slideshow::*;

use crate::model::Product;
use crate::navigation::Route;

pub const EMPTY_MESSAGE: &str = "No products have been added yet.";

/// One bar of the "Products Added" chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub name: String,
    pub quantity: u32,
}

/// One row of the product details table.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub name: String,
    pub description: String,
    /// Two fraction digits, or `N/A`.
    pub price: String,
    pub quantity: u32,
}

/// The dashboard view model, built from the latest product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    products: Vec<Product>,
}

impl Dashboard {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            products: products.to_vec(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn chart_series(&self) -> Vec<ChartBar> {
        self.products
            .iter()
            .map(|p| ChartBar {
                name: p.name.clone(),
                quantity: p.quantity,
            })
            .collect()
    }

    pub fn price_rows(&self) -> Vec<PriceRow> {
        self.products
            .iter()
            .map(|p| PriceRow {
                name: p.name.clone(),
                description: p.description.clone(),
                price: p.price.formatted(),
                quantity: p.quantity,
            })
            .collect()
    }

    /// Shown in place of the chart when there is nothing to plot.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.products.is_empty().then_some(EMPTY_MESSAGE)
    }

    pub fn go_to_products(&self) -> Route {
        Route::Products
    }

    pub fn go_to_users(&self) -> Route {
        Route::UserManagement
    }
}
