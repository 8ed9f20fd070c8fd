//! Error types for rendering.

/// Why an entity span was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeViolation {
    /// `start >= end`.
    #[error("span is empty")]
    Empty,
    /// `end` lies past the end of the text.
    #[error("span exceeds text length {len}")]
    OutOfBounds {
        /// Text length in bytes.
        len: usize,
    },
    /// An offset splits a multi-byte character.
    #[error("offset is not on a character boundary")]
    NotCharBoundary,
    /// The span starts before the previous entity ended.
    #[error("span overlaps previous entity ending at {previous_end}")]
    Overlaps {
        /// End offset of the preceding entity.
        previous_end: usize,
    },
}

/// Error from [`Autolinker`](crate::Autolinker) render calls.
///
/// Entity lists are validated before any output is produced, so an error
/// means no HTML was generated for the input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// An entity span is out of range, malformed, or out of order.
    #[error("invalid range {start}..{end} for entity {index}: {reason}")]
    InvalidEntityRange {
        /// Position of the entity in the input list.
        index: usize,
        /// Entity start offset.
        start: usize,
        /// Entity end offset.
        end: usize,
        /// Violated precondition.
        reason: RangeViolation,
    },
}
