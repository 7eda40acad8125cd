use std::fmt;
use std::str::FromStr;

use crate::calc;
use crate::error::ParseError;

/// Billing unit of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Hour,
    Day,
    Unit,
    Item,
    Flat,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Unit => "unit",
            Unit::Item => "item",
            Unit::Flat => "flat",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(Unit::Hour),
            "day" => Ok(Unit::Day),
            "unit" => Ok(Unit::Unit),
            "item" => Ok(Unit::Item),
            "flat" => Ok(Unit::Flat),
            _ => Err(ParseError::UnknownUnit(s.to_string())),
        }
    }
}

/// One billable entry on an invoice.
///
/// Quantity and rate are kept as the text the user typed. The amount is
/// derived from them on every call to [`LineItem::amount`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub unit: Unit,
}

impl LineItem {
    pub fn new(description: &str, quantity: &str, rate: &str, unit: Unit) -> Self {
        Self {
            description: description.to_string(),
            quantity: quantity.to_string(),
            rate: rate.to_string(),
            unit,
        }
    }

    /// Amount of this line, formatted with two decimals
    pub fn amount(&self) -> String {
        calc::compute_amount(&self.quantity, &self.rate)
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new("", "1", "0.00", Unit::Hour)
    }
}

impl FromStr for LineItem {
    type Err = ParseError;

    /// Parse `description:quantity:rate[:unit]`.
    ///
    /// Quantity and rate are not validated here; malformed numbers count as
    /// zero when the amount is computed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [description, quantity, rate] => Ok(Self::new(description, quantity, rate, Unit::Hour)),
            [description, quantity, rate, unit] => {
                Ok(Self::new(description, quantity, rate, unit.parse()?))
            }
            _ => Err(ParseError::InvalidLineItem(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_new_row() {
        let item = LineItem::default();
        assert_eq!(item.description, "");
        assert_eq!(item.quantity, "1");
        assert_eq!(item.rate, "0.00");
        assert_eq!(item.unit, Unit::Hour);
        assert_eq!(item.amount(), "0.00");
    }

    #[test]
    fn amount_follows_edits() {
        let mut item = LineItem::new("Design", "3", "10.5", Unit::Hour);
        assert_eq!(item.amount(), "31.50");

        item.quantity = "4".to_string();
        assert_eq!(item.amount(), "42.00");

        item.rate = "abc".to_string();
        assert_eq!(item.amount(), "0.00");
    }

    #[test]
    fn parse_from_argument() {
        let item: LineItem = "Logo design:2:150:flat".parse().unwrap();
        assert_eq!(item.description, "Logo design");
        assert_eq!(item.unit, Unit::Flat);
        assert_eq!(item.amount(), "300.00");

        let item: LineItem = "Consulting:1.5:80".parse().unwrap();
        assert_eq!(item.unit, Unit::Hour);
        assert_eq!(item.amount(), "120.00");
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert_eq!(
            "just text".parse::<LineItem>(),
            Err(ParseError::InvalidLineItem("just text".to_string()))
        );
        assert_eq!(
            "a:1:2:week".parse::<LineItem>(),
            Err(ParseError::UnknownUnit("week".to_string()))
        );
    }

    #[test]
    fn unit_is_case_insensitive() {
        assert_eq!("DAY".parse::<Unit>(), Ok(Unit::Day));
        assert_eq!(Unit::Item.to_string(), "item");
    }
}
