use serde::{Deserialize, Deserializer, Serialize};

use crate::framework::{Draft, DomainViolation, EntityId};

/// Prefix shown in front of formatted prices.
pub const CURRENCY_PREFIX: &str = "M";

/// Display value for prices that cannot be read as a number.
pub const PRICE_UNAVAILABLE: &str = "N/A";

/// Represents a product in the inventory.
///
/// # Framework
/// This struct implements the [`Resource`](crate::framework::Resource) trait,
/// allowing it to be synchronised by a [`SyncController`](crate::framework::SyncController).
///
/// See [`impl Resource for Product`](#impl-Resource-for-Product) for details on:
/// - Payload ([`ProductFields`](crate::model::ProductFields))
/// - Form state ([`ProductDraft`](crate::model::ProductDraft))
/// - Custom actions ([`ProductAction`](crate::product_screen::ProductAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Server-assigned identifier
    /// * `name` - Product name
    /// * `description` - Free text description
    /// * `price` - Price as stored by the server
    /// * `quantity` - Available stock quantity
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// The full create/replace payload for this product.
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            quantity: self.quantity,
        }
    }
}

/// A price exactly as the server stores it: a JSON number, a string, or
/// anything else (`null`, an object) that has no numeric value.
///
/// It is re-serialised in the same shape so a replace call echoes what was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for Price {
    fn default() -> Self {
        Price::Text(String::new())
    }
}

impl Price {
    /// Numeric value, read the way a browser's `parseFloat` reads it.
    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Price::Text(s) => leading_number(s),
            Price::Other(_) => None,
        }
    }

    /// Two fraction digits, or `N/A`.
    pub fn formatted(&self) -> String {
        match self.amount() {
            Some(amount) => two_places(amount),
            None => PRICE_UNAVAILABLE.to_string(),
        }
    }

    /// Formatted price with the currency prefix, or `N/A`.
    pub fn label(&self) -> String {
        match self.amount() {
            Some(amount) => format!("{}{}", CURRENCY_PREFIX, two_places(amount)),
            None => PRICE_UNAVAILABLE.to_string(),
        }
    }

    fn draft_text(&self) -> String {
        match self {
            Price::Number(n) => n.to_string(),
            Price::Text(s) => s.clone(),
            Price::Other(_) => String::new(),
        }
    }
}

/// Fraction digits needed to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Rounds to two fraction digits, resolving exact ties away from zero.
///
/// `{:.2}` breaks ties to even, so the exact decimal expansion is rounded by hand.
fn two_places(amount: f64) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, amount.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        let mut at = digits.len();
        loop {
            if at == 0 {
                digits.insert(0, 1);
                break;
            }
            at -= 1;
            if digits[at] == 9 {
                digits[at] = 0;
            } else {
                digits[at] += 1;
                break;
            }
        }
    }

    let point = digits.len() - 2;
    let mut out = String::with_capacity(digits.len() + 2);
    if amount < 0.0 {
        out.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i == point {
            out.push('.');
        }
        out.push(char::from(b'0' + digit));
    }
    out
}

/// Longest numeric prefix of `raw` (sign, digits, fraction, exponent).
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || has_digits {
            has_digits |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s.get(..end)?.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Accepts a whole JSON number (`2` or `2.0`), a numeric string, or `null` as 0.
fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawQuantity {
        Whole(u32),
        Float(f64),
        Text(String),
    }

    let invalid = |raw: &dyn std::fmt::Debug| -> D::Error {
        serde::de::Error::custom(format!("invalid quantity: {:?}", raw))
    };
    match Option::<RawQuantity>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawQuantity::Whole(n)) => Ok(n),
        Some(RawQuantity::Float(n)) => whole_quantity(n).ok_or_else(|| invalid(&n)),
        Some(RawQuantity::Text(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u32>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_quantity))
                .ok_or_else(|| invalid(&s))
        }
    }
}

fn whole_quantity(n: f64) -> Option<u32> {
    (n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub quantity: u32,
}

/// Product form state; every field is text as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
}

impl ProductDraft {
    pub(crate) fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.draft_text(),
            quantity: product.quantity.to_string(),
        }
    }
}

pub(crate) fn required(field: &'static str, value: &str) -> Result<String, DomainViolation> {
    if value.trim().is_empty() {
        Err(DomainViolation::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

impl Draft for ProductDraft {
    type Fields = ProductFields;

    fn set_field(&mut self, name: &str, value: String) -> Result<(), DomainViolation> {
        let slot = match name {
            "name" => &mut self.name,
            "description" => &mut self.description,
            "price" => &mut self.price,
            "quantity" => &mut self.quantity,
            other => return Err(DomainViolation::UnknownField(other.to_string())),
        };
        *slot = value;
        Ok(())
    }

    fn to_fields(&self) -> Result<ProductFields, DomainViolation> {
        let name = required("name", &self.name)?;
        let description = required("description", &self.description)?;

        let price_text = required("price", &self.price)?.trim().to_string();
        match price_text.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => {}
            _ => {
                return Err(DomainViolation::InvalidField {
                    field: "price",
                    value: price_text,
                })
            }
        }

        let quantity_text = required("quantity", &self.quantity)?;
        let quantity = quantity_text
            .trim()
            .parse::<u32>()
            .map_err(|_| DomainViolation::InvalidField {
                field: "quantity",
                value: quantity_text.clone(),
            })?;

        Ok(ProductFields {
            name,
            description,
            price: Price::Text(price_text),
            quantity,
        })
    }
}
