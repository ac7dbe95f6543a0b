//! Component color assignment.

/// Colors handed out to new components
pub const DEFAULT_PALETTE: &[&str] = &[
    "#2196f3", "#e91e63", "#4caf50", "#ff9800", "#9c27b0", "#00bcd4", "#795548", "#607d8b",
    "#f44336", "#3f51b5", "#cddc39", "#009688",
];

/// Stroke color used when no palette is configured
pub const FALLBACK_COLOR: &str = "#000000";

/// Picks visually distinct colors from a fixed palette.
///
/// The picker is deterministic: it returns the palette entry used by the fewest
/// existing components, ties broken by palette order.
#[derive(Debug, Clone, Copy)]
pub struct ColorPicker<'a> {
    palette: &'a [String],
}

impl<'a> ColorPicker<'a> {
    pub fn new(palette: &'a [String]) -> Self {
        Self { palette }
    }

    /// Choose the least used color given the colors currently in use
    pub fn pick<'b>(&self, in_use: impl IntoIterator<Item = &'b str>) -> String {
        let mut counts = vec![0usize; self.palette.len()];
        for color in in_use {
            if let Some(index) = self.palette.iter().position(|c| c.eq_ignore_ascii_case(color)) {
                counts[index] += 1;
            }
        }

        counts
            .iter()
            .enumerate()
            .min_by_key(|(index, count)| (**count, *index))
            .map(|(index, _)| self.palette[index].clone())
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }
}

/// Owned copy of [`DEFAULT_PALETTE`]
pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_prefers_unused_colors() {
        let palette = default_palette();
        let picker = ColorPicker::new(&palette);

        assert_eq!(picker.pick(std::iter::empty()), "#2196f3");
        assert_eq!(picker.pick(["#2196f3"]), "#e91e63");
        assert_eq!(picker.pick(["#2196f3", "#e91e63"]), "#4caf50");
    }

    #[test]
    fn test_pick_wraps_when_every_color_is_used() {
        let palette = vec!["#111111".to_string(), "#222222".to_string()];
        let picker = ColorPicker::new(&palette);

        assert_eq!(picker.pick(["#111111", "#222222", "#222222"]), "#111111");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let picker = ColorPicker::new(&[]);
        assert_eq!(picker.pick(["#2196f3"]), FALLBACK_COLOR);
    }
}
