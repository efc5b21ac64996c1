use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const RECURRING_PAYMENT: &str = "Recurring payment";
pub const ONE_TIME_PAYMENT: &str = "One-time payment";

/// How a document is paid. Recurring documents have no deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentType {
    #[default]
    OneTime,
    Recurring,
}

impl PaymentType {
    /// Only the exact label `"Recurring payment"` is recurring; anything else,
    /// including an empty selection, is one-time.
    pub fn from_label(label: &str) -> Self {
        if label == RECURRING_PAYMENT {
            Self::Recurring
        } else {
            Self::OneTime
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneTime => ONE_TIME_PAYMENT,
            Self::Recurring => RECURRING_PAYMENT,
        }
    }
}

impl Serialize for PaymentType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PaymentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Document-level payment split.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaymentConfig {
    pub payment_type: PaymentType,
    /// Percent of the total taken up front. Ignored for recurring payments.
    pub deposit_percent: f64,
    pub has_second_payment: bool,
    pub second_payment_percent: f64,
}

impl PaymentConfig {
    /// Percentage shown next to the final payment label, or `None` when the
    /// label carries no percentage (recurring without a second payment).
    pub fn final_payment_percent(&self) -> Option<f64> {
        match (self.payment_type, self.has_second_payment) {
            (PaymentType::Recurring, true) => Some(100.0 - self.second_payment_percent),
            (PaymentType::Recurring, false) => None,
            (PaymentType::OneTime, true) => {
                Some(100.0 - self.deposit_percent - self.second_payment_percent)
            }
            (PaymentType::OneTime, false) => Some(100.0 - self.deposit_percent),
        }
    }
}
