//! Per-result views: summary statistics and the gear table of one chain.

use ratiochain_kernel::carrier::chain::Chain;
use ratiochain_kernel::carrier::expand::{detailed_ratios, StateSample};
use ratiochain_kernel::carrier::sequence::{main_sequence, partition_main_sequence};

use crate::export::export_code;

/// Summary of a chain's usable gears.
///
/// All fields are computed over the main sequence. An empty sequence yields
/// all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResultStats {
    pub min: f64,
    pub max: f64,
    /// Arithmetic mean of consecutive ratio quotients.
    pub avg_step: f64,
    pub gear_count: usize,
}

impl ResultStats {
    /// Statistics over the main sequence of ascending distinct `ratios`.
    #[must_use]
    pub fn from_ratios(ratios: &[f64]) -> Self {
        let seq = main_sequence(ratios);
        let (Some(&min), Some(&max)) = (seq.first(), seq.last()) else {
            return Self::default();
        };
        Self {
            min,
            max,
            avg_step: mean_step(&seq).unwrap_or(0.0),
            gear_count: seq.len(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean_step(seq: &[f64]) -> Option<f64> {
    if seq.len() < 2 {
        return None;
    }
    let sum: f64 = seq.windows(2).map(|w| w[1] / w[0]).sum();
    Some(sum / (seq.len() - 1) as f64)
}

/// Gear table of a chain: which switch combinations are used and which are
/// redundant.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationDetail {
    /// Kept gears, ascending by ratio.
    pub main_sequence: Vec<StateSample>,
    /// Samples within 2% of a kept gear, ascending by ratio.
    pub left_out: Vec<StateSample>,
    /// `None` with fewer than two gears.
    pub avg_step_multiplier: Option<f64>,
    pub export_code: String,
}

impl ConfigurationDetail {
    #[must_use]
    pub fn from_chain(chain: &Chain) -> Self {
        let (main_sequence, left_out) = partition_main_sequence(&detailed_ratios(chain));
        let ratios: Vec<f64> = main_sequence.iter().map(|s| s.ratio).collect();
        Self {
            avg_step_multiplier: mean_step(&ratios),
            export_code: export_code(&main_sequence),
            main_sequence,
            left_out,
        }
    }

    /// Number of usable gears.
    #[must_use]
    pub fn gear_count(&self) -> usize {
        self.main_sequence.len()
    }
}
