//! Order lifecycle and payment enums.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Order status.
///
/// Orders placed through the storefront start as `Pending`; later states
/// belong to fulfilment, which happens outside this application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Menunggu Pembayaran",
            Self::Paid => "Dibayar",
            Self::Processing => "Diproses",
            Self::Shipped => "Dikirim",
            Self::Delivered => "Diterima",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a payment method value is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct PaymentMethodError(pub String);

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    BankTransfer,
    Ewallet,
    Qris,
}

impl PaymentMethod {
    /// All methods, in the order the checkout page offers them.
    pub const ALL: [Self; 3] = [Self::BankTransfer, Self::Ewallet, Self::Qris];

    /// Form/wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BankTransfer => "bank_transfer",
            Self::Ewallet => "ewallet",
            Self::Qris => "qris",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BankTransfer => "Transfer Bank",
            Self::Ewallet => "E-Wallet",
            Self::Qris => "QRIS",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::BankTransfer => "BCA, BNI, BRI, Mandiri",
            Self::Ewallet => "GoPay, OVO, DANA, ShopeePay",
            Self::Qris => "Scan QR untuk pembayaran",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| PaymentMethodError(s.to_owned()))
    }
}
