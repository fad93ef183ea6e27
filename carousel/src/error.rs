use thiserror::Error;

/// A keyline state could not be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum BuildError {
    #[error("item size must be finite and positive, got {0}")]
    InvalidItemSize(f32),
    #[error("viewport extent must be finite and positive, got {0}")]
    InvalidViewportExtent(f32),
    #[error("keyline state has no focal keyline")]
    NoFocalKeyline,
    #[error("keyline {index} has mask {mask} outside [0, 1]")]
    MaskOutOfRange { index: usize, mask: f32 },
    #[error("anchor keyline at {index} is not the first or last keyline")]
    MisplacedAnchor { index: usize },
    #[error("non-focal keyline at {index} sits between focal keylines")]
    NonContiguousFocal { index: usize },
    #[error("focal keyline at {index} has masked size {found}, expected {expected}")]
    FocalSizeMismatch {
        index: usize,
        expected: f32,
        found: f32,
    },
    #[error("focal keyline at {index} has mask {mask}, expected 0")]
    FocalMaskNonZero { index: usize, mask: f32 },
    #[error("keyline at {index} breaks masking order around the focal range")]
    NonMonotonicMask { index: usize },
    #[error("keyline at {index} is placed before its predecessor")]
    UnsortedKeylines { index: usize },
}

/// Two keyline states cannot be interpolated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LerpError {
    #[error("keyline counts differ ({from} vs {to})")]
    KeylineCountMismatch { from: usize, to: usize },
    #[error("focal ranges differ ({from_first}..={from_last} vs {to_first}..={to_last})")]
    FocalRangeMismatch {
        from_first: usize,
        from_last: usize,
        to_first: usize,
        to_last: usize,
    },
    #[error("anchor flags differ at keyline {index}")]
    AnchorMismatch { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum CarouselError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Lerp(#[from] LerpError),
}
