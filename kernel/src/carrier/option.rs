//! Single-stage gearbox options.
//!
//! A stage selects between two distinct catalog ratios via a boolean switch
//! (Off → `off`, On → `on`). Its orientation decides whether the selected
//! ratio multiplies or divides the chain's running product.

use crate::carrier::catalog::{RatioCatalog, RatioEntry};
use crate::error::KernelError;

/// Whether a stage multiplies (`Toward`) or divides (`Away`) by its ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    Toward,
    Away,
}

impl Orientation {
    /// Both orientations in enumeration order.
    pub const ALL: [Orientation; 2] = [Orientation::Toward, Orientation::Away];

    /// Orientation-adjusted factor for a catalog value.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Toward => value,
            Self::Away => 1.0 / value,
        }
    }

    /// Stable lowercase tag used in report artifacts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toward => "toward",
            Self::Away => "away",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toward => f.write_str("TOWARD"),
            Self::Away => f.write_str("AWAY"),
        }
    }
}

/// One immutable stage configuration.
///
/// Construct via [`GearboxOption::new`] or [`GearboxOption::from_labels`];
/// both reject an option whose two switch states select the same ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearboxOption {
    orientation: Orientation,
    off: RatioEntry,
    on: RatioEntry,
}

impl GearboxOption {
    /// Build an option from two catalog entries.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DegenerateOption`] if `off` and `on` share a label.
    pub fn new(
        orientation: Orientation,
        off: RatioEntry,
        on: RatioEntry,
    ) -> Result<Self, KernelError> {
        if off.label == on.label {
            return Err(KernelError::DegenerateOption {
                label: off.label.to_string(),
            });
        }
        Ok(Self {
            orientation,
            off,
            on,
        })
    }

    /// Build an option by looking up labels in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownRatioLabel`] for a label outside the
    /// catalog and [`KernelError::DegenerateOption`] for equal labels.
    pub fn from_labels(
        catalog: &RatioCatalog,
        orientation: Orientation,
        off_label: &str,
        on_label: &str,
    ) -> Result<Self, KernelError> {
        let off = catalog.require(off_label)?;
        let on = catalog.require(on_label)?;
        Self::new(orientation, off, on)
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Ratio selected when the switch is Off.
    #[must_use]
    pub fn off(&self) -> RatioEntry {
        self.off
    }

    /// Ratio selected when the switch is On.
    #[must_use]
    pub fn on(&self) -> RatioEntry {
        self.on
    }

    /// Effective multiplicative factor for a switch state.
    #[must_use]
    pub fn factor(&self, is_on: bool) -> f64 {
        let entry = if is_on { self.on } else { self.off };
        self.orientation.apply(entry.value)
    }
}

impl std::fmt::Display for GearboxOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (OFF:{}, ON:{})",
            self.orientation, self.off.label, self.on.label
        )
    }
}

/// Number of options produced from a catalog of `m` entries: `2 * C(m, 2)`.
#[must_use]
pub fn option_count(m: usize) -> usize {
    m * m.saturating_sub(1)
}

/// Enumerate every single-stage option.
///
/// Pairs are taken `(i, j)` with `i < j` in catalog order; each pair yields
/// `Toward` then `Away`. Output order is stable and drives tie-breaking in
/// the ranker.
#[must_use]
pub fn generate_options(catalog: &RatioCatalog) -> Vec<GearboxOption> {
    let entries = catalog.entries();
    let mut options = Vec::with_capacity(option_count(entries.len()));
    for (i, off) in entries.iter().enumerate() {
        for on in &entries[i + 1..] {
            for orientation in Orientation::ALL {
                options.push(GearboxOption {
                    orientation,
                    off: *off,
                    on: *on,
                });
            }
        }
    }
    options
}
