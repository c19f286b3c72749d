/// Default usable payload length of a fresh line buffer, in bytes.
pub const DEFAULT_LINE_MAX: usize = 4096;

/// Whether a [`LineBuffer`](crate::LineBuffer) may reallocate when a line
/// does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GrowthMode {
    /// Capacity is fixed. A line longer than the buffer is an error.
    Bounded,
    /// Capacity roughly doubles every time a line does not fit.
    #[default]
    Growable,
}

/// Configuration for the line reversal engine.
///
/// # Examples
///
/// ```rust
/// use linerev::{GrowthMode, LineReverser, ReverseOptions};
///
/// let options = ReverseOptions {
///     line_max: 80,
///     growth: GrowthMode::Bounded,
///     ..Default::default()
/// };
/// let reverser = LineReverser::new(options).unwrap();
/// assert_eq!(reverser.buffer().line_max(), 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReverseOptions {
    /// Longest payload, terminator excluded, that fits in the buffer without
    /// growing. Values below 1 are raised to 1.
    ///
    /// In bounded mode this is the hard limit reported by
    /// [`ReverseError::LineTooLong`](crate::ReverseError::LineTooLong). In
    /// growable mode it is only the starting size.
    ///
    /// # Default
    ///
    /// [`DEFAULT_LINE_MAX`]
    pub line_max: usize,

    /// Whether the buffer may grow past `line_max`.
    ///
    /// # Default
    ///
    /// [`GrowthMode::Growable`]
    pub growth: GrowthMode,

    /// Byte that ends a line. It is kept in place and never reversed into the
    /// payload.
    ///
    /// # Default
    ///
    /// `b'\n'`
    pub terminator: u8,
}

impl Default for ReverseOptions {
    fn default() -> Self {
        Self {
            line_max: DEFAULT_LINE_MAX,
            growth: GrowthMode::default(),
            terminator: b'\n',
        }
    }
}
