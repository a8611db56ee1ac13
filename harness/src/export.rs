//! Export codes: one character per main-sequence gear.
//!
//! Each gear's switch vector is read LSB-first (bit `i` is stage `i`) and
//! mapped onto a 64-symbol alphabet, so chains of up to six stages encode
//! losslessly. Wider switch vectors encode as `?`.

use ratiochain_kernel::carrier::expand::StateSample;

/// Symbol table, indexed by switch-vector value.
pub const EXPORT_ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz+/";

/// Placeholder for switch vectors that do not fit the alphabet.
pub const UNREPRESENTABLE: char = '?';

/// Error decoding an export code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportDecodeError {
    /// The character is not part of [`EXPORT_ALPHABET`].
    #[error("unknown export symbol {symbol:?} at position {position}")]
    UnknownSymbol { symbol: char, position: usize },

    /// A `?` placeholder carries no recoverable state.
    #[error("unrepresentable gear at position {position}")]
    Unrepresentable { position: usize },
}

/// Encode one sample by its [`StateSample::code`].
#[must_use]
pub fn encode_state(sample: &StateSample) -> char {
    usize::try_from(sample.code())
        .ok()
        .and_then(|value| EXPORT_ALPHABET.get(value))
        .map_or(UNREPRESENTABLE, |symbol| char::from(*symbol))
}

/// Encode a gear sequence, one character per sample, in order.
#[must_use]
pub fn export_code(samples: &[StateSample]) -> String {
    samples.iter().map(encode_state).collect()
}

/// Decode an export code back to switch-vector values.
///
/// # Errors
///
/// Fails on the first character outside the alphabet or on a `?`.
pub fn decode_export_code(code: &str) -> Result<Vec<u8>, ExportDecodeError> {
    code.chars()
        .enumerate()
        .map(|(position, symbol)| {
            if symbol == UNREPRESENTABLE {
                return Err(ExportDecodeError::Unrepresentable { position });
            }
            EXPORT_ALPHABET
                .iter()
                .position(|b| char::from(*b) == symbol)
                .and_then(|v| u8::try_from(v).ok())
                .ok_or(ExportDecodeError::UnknownSymbol { symbol, position })
        })
        .collect()
}

/// Expand a decoded value into a switch vector of `chain_length` stages.
#[must_use]
pub fn states_from_value(value: u8, chain_length: usize) -> Vec<bool> {
    (0..chain_length)
        .map(|i| i < 8 && (value >> i) & 1 == 1)
        .collect()
}
