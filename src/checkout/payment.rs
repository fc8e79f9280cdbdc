//! Payment methods

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::checkout::CheckoutError;

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Bank transfer
    #[serde(rename = "transfer")]
    BankTransfer,

    /// Credit or debit card
    #[serde(rename = "credit-card")]
    CreditCard,

    /// E-wallet
    #[serde(rename = "e-wallet")]
    EWallet,

    /// Cash on delivery
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Every method, in display order.
    pub const ALL: [PaymentMethod; 4] = [
        Self::BankTransfer,
        Self::CreditCard,
        Self::EWallet,
        Self::CashOnDelivery,
    ];

    /// Form value for this method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BankTransfer => "transfer",
            Self::CreditCard => "credit-card",
            Self::EWallet => "e-wallet",
            Self::CashOnDelivery => "cod",
        }
    }

    /// Human readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BankTransfer => "Bank Transfer",
            Self::CreditCard => "Credit Card",
            Self::EWallet => "E-Wallet",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == value)
            .ok_or_else(|| CheckoutError::UnknownPaymentMethod(value.to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn form_values_round_trip() -> TestResult {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>()?, method);
        }

        Ok(())
    }

    #[test]
    fn unknown_value_is_rejected() {
        assert_eq!(
            "bitcoin".parse::<PaymentMethod>(),
            Err(CheckoutError::UnknownPaymentMethod("bitcoin".to_string()))
        );
    }

    #[test]
    fn serde_uses_form_values() -> TestResult {
        assert_eq!(serde_json::to_string(&PaymentMethod::BankTransfer)?, r#""transfer""#);
        assert_eq!(serde_json::to_string(&PaymentMethod::EWallet)?, r#""e-wallet""#);
        assert_eq!(serde_json::to_string(&PaymentMethod::CashOnDelivery)?, r#""cod""#);

        Ok(())
    }
}
