//! Overlay hooks for the rendering shell
//!
//! Analyzers describe what to draw; the shell decides how.

use serde::Serialize;

use crate::physics::Point;

/// Role of a guide line, so the shell can pick colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideLine {
    /// Estimated ground plane (full frame width)
    Floor,
    /// Vertical drop from hip center to floor
    HipToFloor,
    /// Shoulder center to hip center
    Spine,
}

/// Drawing callback supplied by the shell
pub trait AnnotationSink {
    /// Line in pixel coordinates
    fn line(&mut self, from: Point, to: Point, role: GuideLine);

    /// Headline text, `row` counts from the top of the frame
    fn text(&mut self, row: usize, text: &str);
}

/// Sink that keeps every call, for shells that draw after the fact
///
/// Texts are stored in row order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnnotationBuffer {
    pub lines: Vec<(Point, Point, GuideLine)>,
    pub texts: Vec<String>,
}

impl AnnotationBuffer {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.texts.clear();
    }
}

impl AnnotationSink for AnnotationBuffer {
    fn line(&mut self, from: Point, to: Point, role: GuideLine) {
        self.lines.push((from, to, role));
    }

    fn text(&mut self, row: usize, text: &str) {
        if row >= self.texts.len() {
            self.texts.resize(row + 1, String::new());
        }
        self.texts[row] = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_orders_texts_by_row() {
        let mut buffer = AnnotationBuffer::default();
        buffer.text(1, "second");
        buffer.text(0, "first");
        buffer.line((0.0, 0.0), (1.0, 1.0), GuideLine::Spine);
        assert_eq!(buffer.texts, vec!["first", "second"]);
        assert_eq!(buffer.lines.len(), 1);

        buffer.clear();
        assert!(buffer.texts.is_empty() && buffer.lines.is_empty());
    }
}
