use crate::{LayoutError, Size};
use serde::{Deserialize, Serialize};

/// Card sizes and gaps used by the tree layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Width of one person card
    pub node_width: f32,

    /// Height of one person card
    pub node_height: f32,

    /// Horizontal gap between the two cards of a couple
    pub couple_gap: f32,

    /// Horizontal gap between sibling subtrees (and between root trees)
    pub sibling_gap: f32,

    /// Vertical gap between two generations
    pub generation_gap: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 80.0,
            couple_gap: 40.0,
            sibling_gap: 60.0,
            generation_gap: 120.0,
        }
    }
}

impl Metrics {
    /// Size of one person card
    pub fn node_size(&self) -> Size {
        Size {
            width: self.node_width,
            height: self.node_height,
        }
    }

    /// Width of a couple block: two cards and the gap between them
    pub fn couple_width(&self) -> f32 {
        self.node_width * 2.0 + self.couple_gap
    }

    /// Vertical distance between the tops of two consecutive generations
    pub fn row_height(&self) -> f32 {
        self.node_height + self.generation_gap
    }

    /// Horizontal offset of the spouse card relative to the primary one
    pub fn spouse_offset(&self) -> f32 {
        self.node_width + self.couple_gap
    }

    /// Combined width of sibling subtrees laid side by side
    pub fn siblings_width(&self, subtree_widths: impl IntoIterator<Item = f32>) -> f32 {
        let mut total = 0.0;
        let mut count = 0usize;
        for width in subtree_widths {
            total += width;
            count += 1;
        }
        total + count.saturating_sub(1) as f32 * self.sibling_gap
    }

    /// # Errors
    /// Returns an error if a metric is not finite or negative, or if a card
    /// would have no area
    pub fn validate(&self) -> Result<(), LayoutError> {
        let checks = [
            ("node_width", self.node_width, false),
            ("node_height", self.node_height, false),
            ("couple_gap", self.couple_gap, true),
            ("sibling_gap", self.sibling_gap, true),
            ("generation_gap", self.generation_gap, true),
        ];
        for (name, value, zero_allowed) in checks {
            let valid = value.is_finite() && (value > 0.0 || (zero_allowed && value == 0.0));
            if !valid {
                return Err(LayoutError::InvalidMetric { name, value });
            }
        }
        Ok(())
    }
}
