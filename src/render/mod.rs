mod frame;
mod null_renderer;
mod primitives;
mod recording_surface;

pub use frame::{FramePrimitive, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    BaselineShift, Color, LabelStyle, LinePrimitive, RectPrimitive, Rotation, Stroke, TextHAlign,
    TextPrimitive,
};
pub use recording_surface::{RecordingSurface, SceneObject};

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Opaque handle to one object living on a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Retained-mode graphical-primitive factory driven by the chart.
///
/// Objects stay on the surface until removed and are painted in creation
/// order; `bring_to_front` moves an object to the end of that order. Calls
/// with a handle that was already removed are ignored.
pub trait Surface {
    /// Sets the outer drawing size in pixels.
    fn set_size(&mut self, width: f64, height: f64);

    fn create_line(&mut self, stroke: Stroke) -> ObjectId;
    fn create_label(&mut self, style: LabelStyle) -> ObjectId;
    fn create_rect(&mut self, fill: Color) -> ObjectId;

    /// Sets both end points of a line.
    fn set_line_limits(&mut self, id: ObjectId, x1: f64, y1: f64, x2: f64, y2: f64);
    /// Moves a label anchor or a rectangle's top-left corner.
    fn set_position(&mut self, id: ObjectId, x: f64, y: f64);
    fn set_dimensions(&mut self, id: ObjectId, width: f64, height: f64);
    fn set_text(&mut self, id: ObjectId, text: &str);
    fn set_stroke(&mut self, id: ObjectId, stroke: Stroke);
    fn set_fill(&mut self, id: ObjectId, color: Color);
    /// Rotates a label around a pivot point; replaces any previous rotation.
    fn rotate(&mut self, id: ObjectId, pivot_x: f64, pivot_y: f64, degrees: f64);

    fn remove_object(&mut self, id: ObjectId);
    fn bring_to_front(&mut self, id: ObjectId);
}

/// Contract implemented by any rasterizing backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart layout logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
