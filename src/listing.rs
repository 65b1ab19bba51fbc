//! Listing view model.

use crate::chain::RawMarketItem;
use crate::error::DashboardError;
use crate::metadata::MetadataDocument;
use crate::units::{format_units, to_safe_integer};
use serde::Serialize;
use std::collections::HashSet;

/// A single listing as displayed on the dashboard. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    token_id: u64,
    price: String,
    seller: String,
    owner: String,
    image: String,
    name: String,
    description: String,
    sold: bool,
}

impl ListingView {
    /// Builds a view from a marketplace record and its metadata.
    pub fn new(
        item: &RawMarketItem,
        metadata: MetadataDocument,
        unit_decimals: u8,
    ) -> Result<Self, DashboardError> {
        Ok(Self {
            token_id: to_safe_integer(item.token_id, "tokenId")?,
            price: format_units(item.price, unit_decimals),
            seller: item.seller.to_string(),
            owner: item.owner.to_string(),
            image: metadata.image,
            name: metadata.name,
            description: metadata.description,
            sold: item.sold,
        })
    }

    pub fn token_id(&self) -> u64 {
        self.token_id
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn seller(&self) -> &str {
        &self.seller
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sold(&self) -> bool {
        self.sold
    }
}

/// The published result of a load: every created listing and the sold subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listings {
    #[serde(rename = "created")]
    all: Vec<ListingView>,
    sold: Vec<ListingView>,
}

impl Listings {
    /// Aggregates resolved listings, preserving order, and derives the sold subset.
    pub fn new(all: Vec<ListingView>) -> Self {
        let sold = all.iter().filter(|listing| listing.sold()).cloned().collect();
        Self { all, sold }
    }

    pub fn all(&self) -> &[ListingView] {
        &self.all
    }

    pub fn sold(&self) -> &[ListingView] {
        &self.sold
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Returns the first token id that occurs more than once, if any.
pub fn find_duplicate_token_id(items: &[RawMarketItem]) -> Option<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .find(|item| !seen.insert(item.token_id))
        .map(|item| item.token_id.to_string())
}
