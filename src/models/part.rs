use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use tracing::warn;
use validator::{Validate, ValidationError};

/// Fractional digits shown when an amount is displayed.
pub const DISPLAY_DP: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PartId(pub u32);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PartId {
    fn from(id: u32) -> Self {
        PartId(id)
    }
}

/// Exact monetary amount in major currency units. Never rounded except by `Display`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Price(amount)
    }

    pub fn from_major(major: u64) -> Self {
        Price(Decimal::from(major))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn times(&self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

/// Rounds half away from zero to two places and groups the major part in
/// threes with a space, the way the storefront renders amounts:
/// `1 234 567`, `450.50`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string();
        let (major, minor) = match rounded.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (rounded.as_str(), None),
        };

        let mut grouped = String::with_capacity(major.len() + major.len() / 3);
        for (i, ch) in major.chars().enumerate() {
            if i > 0 && (major.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        match minor {
            Some(minor) => write!(f, "{}.{:0<2}", grouped, minor),
            None => write!(f, "{}", grouped),
        }
    }
}

lazy_static::lazy_static! {
    static ref ARTICLE_REGEX: Regex = Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} ._/-]*$").unwrap();
}

// raw seed record, as found in the catalog file
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PartRecord {
    pub id: u32,

    #[validate(length(max = 255, message = "Name is longer than 255 characters"))]
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(regex(
        path = "ARTICLE_REGEX",
        message = "Article contains unusual characters"
    ))]
    pub article: String,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,

    #[validate(custom = "validate_not_blank")]
    pub brand: String,

    #[validate(custom = "validate_not_blank")]
    pub category: String,

    #[serde(default)]
    pub image: String,

    pub in_stock: bool,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("must not be blank"));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PartError {
    #[error("Part {id} has a negative price: {price}")]
    NegativePrice { id: u32, price: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub article: String,
    pub price: Price,
    pub brand: String,
    pub category: String,
    pub image: String,
    pub in_stock: bool,
}

impl Part {
    /// Only a negative price is fatal; other oddities in the record are logged.
    pub fn from_record(record: PartRecord) -> Result<Self, PartError> {
        if record.price.is_sign_negative() && !record.price.is_zero() {
            return Err(PartError::NegativePrice {
                id: record.id,
                price: record.price,
            });
        }

        if let Err(issues) = record.validate() {
            warn!("Part {} loaded with data-quality issues: {}", record.id, issues);
        }

        Ok(Self {
            id: PartId(record.id),
            name: record.name.trim().to_string(),
            article: record.article,
            price: Price::new(record.price),
            brand: record.brand.trim().to_string(),
            category: record.category.trim().to_string(),
            image: record.image,
            in_stock: record.in_stock,
        })
    }

    /// Case-insensitive substring match against name or article.
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.article.to_lowercase().contains(needle)
    }
}
