use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fallback currency code for line items with no currency of their own and no
/// document-level currency.
pub const DEFAULT_CURRENCY: &str = "RM";

/// Amounts keyed by currency code.
///
/// Each currency is an independent bucket; amounts in different buckets are
/// never summed or converted. Iteration follows the order in which currencies
/// were first inserted, which for totals is the order they were first seen
/// while scanning line items. Equality ignores that order.
#[derive(Debug, Clone, Default)]
pub struct CurrencyAmountMap {
    entries: Vec<(String, f64)>,
}

impl CurrencyAmountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, currency: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(code, _)| code == currency)
            .map(|(_, amount)| *amount)
    }

    /// Adds `amount` to the bucket for `currency`, creating it at the end if
    /// this is the first time the currency is seen.
    pub fn accumulate(&mut self, currency: &str, amount: f64) {
        match self.entries.iter_mut().find(|(code, _)| code == currency) {
            Some((_, existing)) => *existing += amount,
            None => self.entries.push((currency.to_string(), amount)),
        }
    }

    /// Sets the bucket for `currency`, replacing any previous amount.
    pub fn insert(&mut self, currency: &str, amount: f64) {
        match self.entries.iter_mut().find(|(code, _)| code == currency) {
            Some((_, existing)) => *existing = amount,
            None => self.entries.push((currency.to_string(), amount)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(code, amount)| (code.as_str(), *amount))
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(code, _)| code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `f` to every bucket, keeping keys and order.
    pub fn map_amounts(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(code, amount)| (code.clone(), f(*amount)))
                .collect(),
        }
    }
}

impl PartialEq for CurrencyAmountMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(code, amount)| other.get(code) == Some(amount))
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for CurrencyAmountMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (code, amount) in iter {
            map.insert(code.as_ref(), amount);
        }
        map
    }
}

impl Serialize for CurrencyAmountMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, amount) in &self.entries {
            map.serialize_entry(code, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CurrencyAmountMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Entries are kept in document order.
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = CurrencyAmountMap;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of currency codes to amounts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut map = CurrencyAmountMap::new();
                while let Some((code, amount)) = access.next_entry::<String, f64>()? {
                    map.insert(&code, amount);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(Visitor)
    }
}
