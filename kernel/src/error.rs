//! Typed kernel errors.
//!
//! Every kernel error is a construction-time failure: catalogs, options and
//! chains are validated once and are immutable afterwards.

/// Failure constructing a kernel value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// A ratio label is not present in the catalog.
    #[error("unknown ratio label: {label}")]
    UnknownRatioLabel { label: String },

    /// A gearbox option was built with the same ratio in both switch states.
    #[error("gearbox option needs two distinct ratios, got {label} twice")]
    DegenerateOption { label: String },

    /// A chain was built with zero stages.
    #[error("chain must contain at least one stage")]
    EmptyChain,

    /// A chain has more stages than the kernel can expand.
    #[error("chain of {len} stages exceeds the limit of {max}")]
    ChainTooLong { len: usize, max: usize },

    /// A catalog entry is zero, negative or not finite.
    #[error("catalog ratio {label} must be strictly positive, got {value}")]
    NonPositiveRatio { label: String, value: f64 },

    /// Catalog values are not strictly increasing in label order.
    #[error("catalog is not strictly increasing at {label} ({value} <= {previous})")]
    CatalogNotMonotone {
        label: String,
        value: f64,
        previous: f64,
    },
}
