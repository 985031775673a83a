use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 15.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent estimate: display columns times a per-column advance.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let mut line_count = 0usize;
        let mut max_columns = 0usize;
        for line in text.split('\n') {
            line_count += 1;
            max_columns = max_columns.max(line.width());
        }

        TextMetrics {
            width: max_columns as f64 * font_size * char_width_factor,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_columns_and_font_size() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle {
            font_size: 10.0,
            ..TextStyle::default()
        };
        let metrics = m.measure("4.5", &style);
        assert!((metrics.width - 18.0).abs() < 1e-9);
        assert!((metrics.height - 12.0).abs() < 1e-9);
        assert_eq!(metrics.line_count, 1);
    }

    #[test]
    fn wide_glyphs_count_double() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::default();
        let narrow = m.measure("ab", &style).width;
        let wide = m.measure("表", &style).width;
        assert_eq!(narrow, wide);
    }

    #[test]
    fn longer_ids_measure_wider() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::default();
        let widths: Vec<f64> = ["7", "42", "12345"]
            .iter()
            .map(|t| m.measure(t, &style).width)
            .collect();
        assert!((widths[0] - 9.0).abs() < 1e-9);
        assert!((widths[2] - 45.0).abs() < 1e-9);
        assert!(widths[0] < widths[1] && widths[1] < widths[2]);
    }
}
