use indexmap::IndexMap;
use tracing::warn;

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{
    Color, LabelStyle, LinePrimitive, ObjectId, RectPrimitive, RenderFrame, Rotation, Stroke,
    Surface, TextPrimitive,
};

/// State of one object held by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Line {
        stroke: Stroke,
        /// `None` until the line is first positioned.
        limits: Option<[f64; 4]>,
    },
    Label {
        style: LabelStyle,
        x: f64,
        y: f64,
        text: String,
        rotation: Option<Rotation>,
    },
    Rect {
        fill: Color,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// In-memory surface that records object state in paint order.
///
/// Used for headless rendering and tests; `frame` materializes the current
/// scene so any [`crate::render::Renderer`] can draw it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    next_id: u64,
    /// Insertion order is paint order.
    objects: IndexMap<ObjectId, SceneObject>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Object handles from back to front.
    pub fn paint_order(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// Position of an object in paint order, `None` once removed.
    #[must_use]
    pub fn paint_index(&self, id: ObjectId) -> Option<usize> {
        self.objects.get_index_of(&id)
    }

    /// Text of a label object.
    #[must_use]
    pub fn label_text(&self, id: ObjectId) -> Option<&str> {
        match self.objects.get(&id)? {
            SceneObject::Label { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Builds a validated frame of everything currently visible.
    ///
    /// Lines that were never positioned and labels with empty text paint
    /// nothing and are left out.
    pub fn frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.viewport());
        for object in self.objects.values() {
            frame = match object {
                SceneObject::Line {
                    stroke,
                    limits: Some([x1, y1, x2, y2]),
                } => frame.with_line(LinePrimitive::new(
                    *x1,
                    *y1,
                    *x2,
                    *y2,
                    stroke.width,
                    stroke.color,
                )),
                SceneObject::Line { limits: None, .. } => frame,
                SceneObject::Label { text, .. } if text.is_empty() => frame,
                SceneObject::Label {
                    style,
                    x,
                    y,
                    text,
                    rotation,
                } => frame.with_text(
                    TextPrimitive::new(text.clone(), *x, *y, style).with_rotation(*rotation),
                ),
                SceneObject::Rect {
                    fill,
                    x,
                    y,
                    width,
                    height,
                } => frame.with_rect(RectPrimitive::new(*x, *y, *width, *height, *fill)),
            };
        }
        frame.validate()?;
        Ok(frame)
    }

    fn insert(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);
        id
    }

    fn object_mut(&mut self, id: ObjectId, operation: &'static str) -> Option<&mut SceneObject> {
        let object = self.objects.get_mut(&id);
        if object.is_none() {
            warn!(id = id.0, operation, "surface object not found");
        }
        object
    }
}

impl Surface for RecordingSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn create_line(&mut self, stroke: Stroke) -> ObjectId {
        self.insert(SceneObject::Line {
            stroke,
            limits: None,
        })
    }

    fn create_label(&mut self, style: LabelStyle) -> ObjectId {
        self.insert(SceneObject::Label {
            style,
            x: 0.0,
            y: 0.0,
            text: String::new(),
            rotation: None,
        })
    }

    fn create_rect(&mut self, fill: Color) -> ObjectId {
        self.insert(SceneObject::Rect {
            fill,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        })
    }

    fn set_line_limits(&mut self, id: ObjectId, x1: f64, y1: f64, x2: f64, y2: f64) {
        if let Some(SceneObject::Line { limits, .. }) = self.object_mut(id, "set_line_limits") {
            *limits = Some([x1, y1, x2, y2]);
        }
    }

    fn set_position(&mut self, id: ObjectId, new_x: f64, new_y: f64) {
        match self.object_mut(id, "set_position") {
            Some(SceneObject::Label { x, y, .. }) | Some(SceneObject::Rect { x, y, .. }) => {
                *x = new_x;
                *y = new_y;
            }
            Some(SceneObject::Line { .. }) => {
                warn!(id = id.0, "set_position ignored for line; use set_line_limits");
            }
            None => {}
        }
    }

    fn set_dimensions(&mut self, id: ObjectId, new_width: f64, new_height: f64) {
        if let Some(SceneObject::Rect { width, height, .. }) = self.object_mut(id, "set_dimensions")
        {
            *width = new_width;
            *height = new_height;
        }
    }

    fn set_text(&mut self, id: ObjectId, new_text: &str) {
        if let Some(SceneObject::Label { text, .. }) = self.object_mut(id, "set_text") {
            new_text.clone_into(text);
        }
    }

    fn set_stroke(&mut self, id: ObjectId, new_stroke: Stroke) {
        if let Some(SceneObject::Line { stroke, .. }) = self.object_mut(id, "set_stroke") {
            *stroke = new_stroke;
        }
    }

    fn set_fill(&mut self, id: ObjectId, color: Color) {
        match self.object_mut(id, "set_fill") {
            Some(SceneObject::Rect { fill, .. }) => *fill = color,
            Some(SceneObject::Label { style, .. }) => style.color = color,
            _ => {}
        }
    }

    fn rotate(&mut self, id: ObjectId, pivot_x: f64, pivot_y: f64, degrees: f64) {
        if let Some(SceneObject::Label { rotation, .. }) = self.object_mut(id, "rotate") {
            *rotation = Some(Rotation {
                pivot_x,
                pivot_y,
                degrees,
            });
        }
    }

    fn remove_object(&mut self, id: ObjectId) {
        if self.objects.shift_remove(&id).is_none() {
            warn!(id = id.0, "remove_object on unknown surface object");
        }
    }

    fn bring_to_front(&mut self, id: ObjectId) {
        if let Some(object) = self.objects.shift_remove(&id) {
            self.objects.insert(id, object);
        } else {
            warn!(id = id.0, "bring_to_front on unknown surface object");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RecordingSurface;
    use crate::render::{BaselineShift, Color, LabelStyle, Stroke, Surface, TextHAlign};

    fn label_style() -> LabelStyle {
        LabelStyle {
            font_family: "Arial".to_owned(),
            font_size_px: 10.0,
            color: Color::BLACK,
            h_align: TextHAlign::Center,
            baseline: BaselineShift::Baseline,
        }
    }

    #[test]
    fn bring_to_front_moves_object_to_end_of_paint_order() {
        let mut surface = RecordingSurface::new();
        let line = surface.create_line(Stroke::new(1.0, Color::BLACK));
        let rect = surface.create_rect(Color::DARK_RED);
        assert_eq!(surface.paint_index(line), Some(0));

        surface.bring_to_front(line);
        assert_eq!(surface.paint_index(rect), Some(0));
        assert_eq!(surface.paint_index(line), Some(1));
    }

    #[test]
    fn frame_skips_unpositioned_lines_and_empty_labels() {
        let mut surface = RecordingSurface::new();
        surface.set_size(100.0, 50.0);
        let _hidden_line = surface.create_line(Stroke::new(1.0, Color::BLACK));
        let _empty_label = surface.create_label(label_style());
        let label = surface.create_label(label_style());
        surface.set_text(label, "42");

        let frame = surface.frame().expect("valid frame");
        assert_eq!(frame.lines().count(), 0);
        assert_eq!(frame.texts().count(), 1);
    }

    #[test]
    fn removed_objects_leave_the_scene() {
        let mut surface = RecordingSurface::new();
        let rect = surface.create_rect(Color::GOLD);
        surface.remove_object(rect);
        assert_eq!(surface.object_count(), 0);
        // Ignored rather than panicking.
        surface.set_position(rect, 1.0, 2.0);
    }
}
