//! Cache key generators for consistent key naming.

/// Prefix for customer entries.
const CUSTOMER_PREFIX: &str = "customer";

/// Generate the cache key for a customer by name.
///
/// Names are used verbatim: lookups are exact, so keys are too.
#[must_use]
pub fn customer_by_name(name: &str) -> String {
    format!("{CUSTOMER_PREFIX}-{name}")
}
