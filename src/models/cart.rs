use serde::Serialize;

use crate::models::part::{Part, PartId, Price};

/// A part in the ledger together with the requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub part: Part,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(part: Part) -> Self {
        Self { part, quantity: 1 }
    }

    pub fn id(&self) -> PartId {
        self.part.id
    }

    pub fn line_total(&self) -> Price {
        self.part.price.times(self.quantity)
    }
}

/// Serializable view of a whole cart, used for JSON output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot<'a> {
    pub items: &'a [CartItem],
    pub total_count: u64,
    pub total_price: Price,
}

/// What a ledger operation did to the line for one part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerChange {
    Added { quantity: u32 },
    Updated { quantity: u32 },
    Removed,
    Unchanged,
}

impl std::fmt::Display for LedgerChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerChange::Added { quantity } => write!(f, "added (qty {})", quantity),
            LedgerChange::Updated { quantity } => write!(f, "updated (qty {})", quantity),
            LedgerChange::Removed => write!(f, "removed"),
            LedgerChange::Unchanged => write!(f, "unchanged"),
        }
    }
}
