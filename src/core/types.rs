use serde::{Deserialize, Serialize};

/// Outer drawing size of one chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Which of the two value axes a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValueAxisSide {
    #[default]
    Left,
    Right,
}

impl ValueAxisSide {
    /// Both sides in layout order (left first).
    pub const ALL: [ValueAxisSide; 2] = [ValueAxisSide::Left, ValueAxisSide::Right];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Per-side storage for values that exist once per value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PerSide<T> {
    pub left: T,
    pub right: T,
}

impl<T> PerSide<T> {
    #[must_use]
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn get(&self, side: ValueAxisSide) -> &T {
        match side {
            ValueAxisSide::Left => &self.left,
            ValueAxisSide::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: ValueAxisSide) -> &mut T {
        match side {
            ValueAxisSide::Left => &mut self.left,
            ValueAxisSide::Right => &mut self.right,
        }
    }
}
