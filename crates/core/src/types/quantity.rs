//! Cart line quantity with a floor of one.

use serde::{Deserialize, Deserializer, Serialize};

/// A positive line-item quantity.
///
/// A cart line always holds at least one unit: dropping to zero is an
/// explicit removal, never a quantity update. Construction clamps to the
/// floor, so the invariant holds by type rather than by caller discipline.
///
/// ## Examples
///
/// ```
/// use night_owl_core::Quantity;
///
/// assert_eq!(Quantity::new(3).get(), 3);
/// assert_eq!(Quantity::new(0).get(), 1); // clamped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// The minimum quantity a cart line can hold.
    pub const MIN: Self = Self(1);

    /// Create a quantity, clamping values below one up to one.
    #[must_use]
    pub const fn new(n: u32) -> Self {
        if n == 0 { Self(1) } else { Self(n) }
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Add another quantity, saturating at `u32::MAX`.
    #[must_use]
    pub const fn plus(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

// Manual impl so that deserialized zeros are clamped like constructed ones.
impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = u32::deserialize(deserializer)?;
        Ok(Self::new(n))
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_clamps_to_one() {
        assert_eq!(Quantity::new(0), Quantity::MIN);
    }

    #[test]
    fn test_positive_preserved() {
        assert_eq!(Quantity::new(5).get(), 5);
    }

    #[test]
    fn test_plus_saturates() {
        let huge = Quantity::new(u32::MAX);
        assert_eq!(huge.plus(Quantity::new(2)).get(), u32::MAX);
    }

    #[test]
    fn test_default_is_one() {
        assert_eq!(Quantity::default().get(), 1);
    }

    #[test]
    fn test_deserialize_clamps_zero() {
        let parsed: Quantity = serde_json::from_str("0").unwrap();
        assert_eq!(parsed.get(), 1);

        let parsed: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(parsed.get(), 4);
    }
}
