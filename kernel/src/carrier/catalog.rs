//! The fixed ratio catalog: every gear ratio a single stage may select.
//!
//! Catalog order is normative. Options are enumerated in this order and the
//! main-sequence merge relies on values increasing with label order.

use crate::error::KernelError;

/// A single catalog entry: display label and numeric ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioEntry {
    /// Display label, e.g. `"3:2"`.
    pub label: &'static str,
    /// Ratio value, strictly positive.
    pub value: f64,
}

impl RatioEntry {
    #[must_use]
    pub const fn new(label: &'static str, value: f64) -> Self {
        Self { label, value }
    }
}

impl std::fmt::Display for RatioEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

/// The default process-wide catalog, sorted by value.
pub const RATIO_CATALOG: [RatioEntry; 7] = [
    RatioEntry::new("1:1", 1.0),
    RatioEntry::new("6:5", 1.2),
    RatioEntry::new("3:2", 1.5),
    RatioEntry::new("9:5", 1.8),
    RatioEntry::new("2:1", 2.0),
    RatioEntry::new("5:2", 2.5),
    RatioEntry::new("3:1", 3.0),
];

/// Read-only view over a validated catalog.
#[derive(Debug, Clone, Copy)]
pub struct RatioCatalog {
    entries: &'static [RatioEntry],
}

impl RatioCatalog {
    /// Wrap a static entry table after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::NonPositiveRatio`] for a zero, negative or
    /// non-finite value and [`KernelError::CatalogNotMonotone`] when values
    /// do not strictly increase.
    pub fn new(entries: &'static [RatioEntry]) -> Result<Self, KernelError> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The default seven-entry catalog.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            entries: &RATIO_CATALOG,
        }
    }

    /// Check positivity and strict monotonicity.
    ///
    /// # Errors
    ///
    /// See [`RatioCatalog::new`].
    pub fn validate(&self) -> Result<(), KernelError> {
        let mut previous: Option<f64> = None;
        for entry in self.entries {
            if !entry.value.is_finite() || entry.value <= 0.0 {
                return Err(KernelError::NonPositiveRatio {
                    label: entry.label.to_string(),
                    value: entry.value,
                });
            }
            if let Some(prev) = previous {
                if entry.value <= prev {
                    return Err(KernelError::CatalogNotMonotone {
                        label: entry.label.to_string(),
                        value: entry.value,
                        previous: prev,
                    });
                }
            }
            previous = Some(entry.value);
        }
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &'static [RatioEntry] {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its display label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<RatioEntry> {
        self.entries.iter().copied().find(|e| e.label == label)
    }

    /// Look up an entry by label, failing with a typed error.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownRatioLabel`] if the label is absent.
    pub fn require(&self, label: &str) -> Result<RatioEntry, KernelError> {
        self.get(label).ok_or_else(|| KernelError::UnknownRatioLabel {
            label: label.to_string(),
        })
    }
}

impl Default for RatioCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
