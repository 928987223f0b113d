//! Payment methods and the receipt stamp they produce.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment method as carried by the `payment` radio group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Card,
    Cash,
    Other(String),
}

impl PaymentMethod {
    /// Options offered by the payment step, in display order.
    pub const OFFERED: [Self; 2] = [Self::Card, Self::Cash];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Other(value) => value,
        }
    }

    #[must_use]
    pub const fn is_card(&self) -> bool {
        matches!(self, Self::Card)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Card => "Credit / Debit Card",
            Self::Cash => "Pay at the Lab",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        match value {
            "card" => Self::Card,
            "cash" => Self::Cash,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling tone of the receipt stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StampTone {
    Success,
    Warning,
}

impl StampTone {
    /// CSS custom property the stamp colour and border use.
    #[must_use]
    pub const fn css_var(self) -> &'static str {
        match self {
            Self::Success => "var(--success)",
            Self::Warning => "var(--warning)",
        }
    }
}

/// "PAID" for card payments, "PAY AT LAB" for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStamp {
    Paid,
    PayAtLab,
}

impl PaymentStamp {
    #[must_use]
    pub const fn for_method(method: &PaymentMethod) -> Self {
        if method.is_card() {
            Self::Paid
        } else {
            Self::PayAtLab
        }
    }

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Paid => "PAID",
            Self::PayAtLab => "PAY AT LAB",
        }
    }

    #[must_use]
    pub const fn tone(self) -> StampTone {
        match self {
            Self::Paid => StampTone::Success,
            Self::PayAtLab => StampTone::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_is_paid_everything_else_pays_at_lab() {
        assert_eq!(PaymentStamp::for_method(&PaymentMethod::Card), PaymentStamp::Paid);
        assert_eq!(PaymentStamp::for_method(&PaymentMethod::Cash), PaymentStamp::PayAtLab);
        let other = PaymentMethod::from("insurance");
        assert_eq!(PaymentStamp::for_method(&other), PaymentStamp::PayAtLab);
        assert_eq!(PaymentStamp::Paid.tone(), StampTone::Success);
        assert_eq!(PaymentStamp::PayAtLab.text(), "PAY AT LAB");
    }

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), "\"card\"");
        let parsed: PaymentMethod = serde_json::from_str("\"bank\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Other("bank".into()));
        assert_eq!(parsed.to_string(), "bank");
    }
}
