//! Canvas that tessellates draw calls into vertices
//!
//! Shapes become triangles for the GPU pipeline. Text is collected separately
//! and handed to whatever the host uses for font rendering.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::shapes;
use crate::Color;
use crate::platform::{Canvas, TextStyle};
use crate::sim::Rect;

/// Triangle segments per circle
const CIRCLE_SEGMENTS: u32 = 24;

/// Flat-colored vertex, positioned in screen space until the pipeline maps it to NDC
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A text draw call
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

/// Everything needed to display one frame, in screen coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub clear: Color,
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextItem>,
}

#[derive(Debug, Default)]
pub struct VertexCanvas {
    current: Frame,
    presented: Option<Frame>,
}

impl VertexCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently presented frame, if not taken yet
    pub fn take_presented(&mut self) -> Option<Frame> {
        self.presented.take()
    }
}

impl Canvas for VertexCanvas {
    fn clear(&mut self, color: Color) {
        self.current = Frame {
            clear: color,
            ..Frame::default()
        };
    }

    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.current.vertices.extend(shapes::rect(bounds, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.current
            .vertices
            .extend(shapes::circle(center, radius, color, CIRCLE_SEGMENTS));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.current.texts.push(TextItem {
            text: text.to_string(),
            pos,
            style: style.clone(),
        });
    }

    fn present(&mut self) {
        self.presented = Some(std::mem::take(&mut self.current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_hands_over_frame() {
        let mut canvas = VertexCanvas::new();
        canvas.clear([0.0, 0.0, 0.0, 1.0]);
        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), [1.0; 4]);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 3.0, [1.0; 4]);
        let style = TextStyle {
            font: "Arial".into(),
            size: 20.0,
            color: [1.0; 4],
            centered: true,
        };
        canvas.draw_text("READY!", Vec2::new(400.0, 300.0), &style);
        canvas.present();

        let frame = canvas.take_presented().unwrap();
        assert_eq!(frame.vertices.len(), 6 + CIRCLE_SEGMENTS as usize * 3);
        assert_eq!(frame.texts.len(), 1);
        assert_eq!(frame.texts[0].text, "READY!");
        assert!(canvas.take_presented().is_none());
    }

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }
}
