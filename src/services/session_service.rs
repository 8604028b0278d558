use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    models::{
        cart::{CartItem, CartSnapshot, LedgerChange},
        filter::{FilterState, Selection},
        part::{Part, PartId, Price},
    },
    services::{
        cart_service::{CartError, CartLedger},
        catalog_service::CatalogService,
    },
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("No part with id {0} in the catalog")]
    UnknownPart(PartId),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// One discrete user action, applied in the order received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    Search(String),
    SelectBrand(Selection),
    SelectCategory(Selection),
    ResetFilters,
    AddToCart(PartId),
    SetQuantity(PartId, i64),
    Increment(PartId),
    Decrement(PartId),
    Remove(PartId),
    ClearCart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    FiltersChanged,
    Cart(LedgerChange),
}

/// Filter state and ledger for a single shopper, over a shared catalog.
#[derive(Debug)]
pub struct StorefrontSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    catalog: CatalogService,
    filters: FilterState,
    cart: CartLedger,
}

impl StorefrontSession {
    pub fn new(catalog: CatalogService) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            catalog,
            filters: FilterState::default(),
            cart: CartLedger::new(),
        };
        info!("Started storefront session {}", session.id);
        session
    }

    pub fn dispatch(&mut self, action: StoreAction) -> Result<ActionOutcome, SessionError> {
        debug!("Session {} dispatching {:?}", self.id, action);

        let outcome = match action {
            StoreAction::Search(query) => {
                self.filters.query = query;
                ActionOutcome::FiltersChanged
            }
            StoreAction::SelectBrand(brand) => {
                self.filters.brand = brand;
                ActionOutcome::FiltersChanged
            }
            StoreAction::SelectCategory(category) => {
                self.filters.category = category;
                ActionOutcome::FiltersChanged
            }
            StoreAction::ResetFilters => {
                self.filters.reset();
                ActionOutcome::FiltersChanged
            }
            StoreAction::AddToCart(id) => {
                let part = self.catalog.find(id).ok_or(SessionError::UnknownPart(id))?;
                ActionOutcome::Cart(self.cart.add(part)?)
            }
            StoreAction::SetQuantity(id, quantity) => {
                ActionOutcome::Cart(self.cart.set_quantity(id, quantity))
            }
            StoreAction::Increment(id) => ActionOutcome::Cart(self.cart.adjust_quantity(id, 1)),
            StoreAction::Decrement(id) => ActionOutcome::Cart(self.cart.adjust_quantity(id, -1)),
            StoreAction::Remove(id) => ActionOutcome::Cart(self.cart.remove(id)),
            StoreAction::ClearCart => ActionOutcome::Cart(self.cart.clear()),
        };

        Ok(outcome)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn visible_parts(&self) -> Vec<&Part> {
        self.catalog.filter(&self.filters)
    }

    pub fn brands(&self) -> Vec<Selection> {
        self.catalog.brands()
    }

    pub fn categories(&self) -> Vec<Selection> {
        self.catalog.categories()
    }

    pub fn cart_items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn cart_snapshot(&self) -> CartSnapshot<'_> {
        self.cart.snapshot()
    }

    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    pub fn total_count(&self) -> u64 {
        self.cart.total_count()
    }
}
