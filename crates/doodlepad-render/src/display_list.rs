//! Backend-independent draw commands for one frame.

use kurbo::{BezPath, Cap, Join, Point, Stroke};
use peniko::Color;

/// A single drawing operation, in logical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Paint the whole surface.
    Clear { color: Color },
    Fill { path: BezPath, color: Color },
    Stroke {
        path: BezPath,
        stroke: Stroke,
        color: Color,
    },
    /// Glyph outlines of one text run, filled.
    Text { outline: BezPath, color: Color },
}

/// Ordered draw commands; later commands paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list for one freehand segment, as painted while dragging.
    pub fn segment(from: Point, to: Point, color: Color, width: f64) -> Self {
        let mut list = Self::new();
        list.stroke_polyline(&[from, to], color, width);
        list
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Round-capped, round-joined polyline. Fewer than two points draw nothing.
    pub fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        let stroke = Stroke::new(width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        self.push(DrawCommand::Stroke {
            path,
            stroke,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Extend<DrawCommand> for DisplayList {
    fn extend<T: IntoIterator<Item = DrawCommand>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}

impl IntoIterator for DisplayList {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_single_point_draws_nothing() {
        let mut list = DisplayList::new();
        list.stroke_polyline(&[Point::new(1.0, 1.0)], Color::BLACK, 5.0);
        list.stroke_polyline(&[], Color::BLACK, 5.0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_polyline_is_round() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let mut list = DisplayList::new();
        list.stroke_polyline(&points, Color::from_rgba8(255, 0, 0, 255), 5.0);

        let DrawCommand::Stroke { path, stroke, .. } = &list.commands()[0] else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.width, 5.0);
        assert_eq!(stroke.join, Join::Round);
        assert_eq!(stroke.start_cap, Cap::Round);
        assert_eq!(stroke.end_cap, Cap::Round);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(points[0]),
                PathEl::LineTo(points[1]),
                PathEl::LineTo(points[2]),
            ]
        );
    }

    #[test]
    fn test_segment() {
        let list = DisplayList::segment(
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Color::BLACK,
            2.0,
        );
        assert_eq!(list.len(), 1);
    }
}
