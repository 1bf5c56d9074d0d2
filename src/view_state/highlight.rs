//! Highlighted byte shared by the hex and text columns

/// Index (0-based within the current chunk) of the emphasized byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightState {
    selected: Option<usize>,
}

/// What the presentation layer must repaint after a highlight change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTransition {
    /// Previously highlighted index to restore to its plain appearance.
    pub deselect: Option<usize>,
    /// Newly highlighted index.
    pub select: usize,
}

impl HighlightState {
    /// Currently highlighted index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Highlight `index`, replacing any previous highlight.
    ///
    /// The index is not checked against the current chunk.
    pub fn select(&mut self, index: usize) -> HighlightTransition {
        let deselect = self.selected.replace(index);
        HighlightTransition {
            deselect,
            select: index,
        }
    }

    /// Drop the highlight, returning the index that was highlighted.
    pub fn clear(&mut self) -> Option<usize> {
        self.selected.take()
    }

    /// Index reached by moving `dx` columns and `dy` rows on a grid of `cols`
    /// columns holding `len` glyphs. Starts from index 0 when nothing is
    /// highlighted. Returns `None` for an empty chunk.
    pub fn moved(&self, dx: i64, dy: i64, cols: u16, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let Some(current) = self.selected else {
            return Some(0);
        };

        let cols = i64::from(cols);
        let last = i64::try_from(len - 1).unwrap_or(i64::MAX);
        let current = i64::try_from(current).unwrap_or(last).min(last);
        let target = current
            .saturating_add(dx)
            .saturating_add(dy.saturating_mul(cols));

        // Vertical moves that would leave the grid stay put.
        let target = if dy != 0 && !(0..=last).contains(&target) {
            current
        } else {
            target.clamp(0, last)
        };
        usize::try_from(target).ok()
    }
}
