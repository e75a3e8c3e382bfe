use glam::DVec2;
use simview_common::Rgb;
use std::f64::consts::TAU;
use std::fmt::Write;

use crate::{DrawCommand, PixelSize};

#[derive(Debug, Clone)]
enum Segment {
    Circle { center: DVec2, radius: f64 },
    Polyline(Vec<DVec2>),
}

/// Replays recorded draw commands into an SVG document in logical units.
///
/// Full-circle arcs become `<circle>`, move/line runs become `<polygon>`
/// (or `<polyline>` when stroked open). A clear that covers the whole
/// surface discards everything drawn before it.
#[derive(Debug, Clone)]
pub struct SvgFrame {
    size: PixelSize,
    elements: Vec<String>,
    path: Vec<Segment>,
    fill: Rgb,
    stroke: Rgb,
    line_width: f64,
}

impl SvgFrame {
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            elements: Vec::new(),
            path: Vec::new(),
            fill: Rgb::new(0, 0, 0),
            stroke: Rgb::new(0, 0, 0),
            line_width: 1.0,
        }
    }

    /// Render `commands` onto a fresh document of `size`.
    pub fn from_commands(commands: &[DrawCommand], size: PixelSize) -> String {
        let mut frame = Self::new(size);
        for command in commands {
            frame.apply(command);
        }
        frame.finish()
    }

    pub fn apply(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Scale { .. } => {}
            DrawCommand::ClearRect {
                x,
                y,
                width,
                height,
            } => {
                let covers = *x <= 0.0
                    && *y <= 0.0
                    && x + width >= f64::from(self.size.width)
                    && y + height >= f64::from(self.size.height);
                if covers {
                    self.elements.clear();
                }
            }
            DrawCommand::BeginPath => self.path.clear(),
            DrawCommand::MoveTo { point } => self.path.push(Segment::Polyline(vec![*point])),
            DrawCommand::LineTo { point } => match self.path.last_mut() {
                Some(Segment::Polyline(points)) => points.push(*point),
                _ => self.path.push(Segment::Polyline(vec![*point])),
            },
            DrawCommand::Arc {
                center,
                radius,
                start,
                end,
            } => {
                if (end - start).abs() >= TAU {
                    self.path.push(Segment::Circle {
                        center: *center,
                        radius: *radius,
                    });
                } else {
                    // Partial arcs are approximated by their chord points.
                    let steps: u32 = 16;
                    let points = (0..=steps)
                        .map(|i| {
                            let t = start + (end - start) * f64::from(i) / f64::from(steps);
                            *center + DVec2::new(t.cos(), t.sin()) * *radius
                        })
                        .collect();
                    self.path.push(Segment::Polyline(points));
                }
            }
            DrawCommand::SetFillColor { color } => self.fill = *color,
            DrawCommand::Fill => {
                let attrs = format!(r#"fill="{}""#, self.fill);
                self.emit(&attrs, true);
            }
            DrawCommand::SetStrokeColor { color } => self.stroke = *color,
            DrawCommand::SetLineWidth { width } => self.line_width = *width,
            DrawCommand::Stroke => {
                let attrs = format!(
                    r#"fill="none" stroke="{}" stroke-width="{}""#,
                    self.stroke, self.line_width
                );
                self.emit(&attrs, false);
            }
        }
    }

    pub fn finish(self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.size.width,
            h = self.size.height
        );
        for element in &self.elements {
            let _ = writeln!(out, "  {element}");
        }
        out.push_str("</svg>\n");
        out
    }

    fn emit(&mut self, attrs: &str, closed: bool) {
        for segment in &self.path {
            let element = match segment {
                Segment::Circle { center, radius } => format!(
                    r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" {attrs}/>"#,
                    center.x, center.y, radius
                ),
                Segment::Polyline(points) => {
                    let tag = if closed { "polygon" } else { "polyline" };
                    let points = points
                        .iter()
                        .map(|p| format!("{:.3},{:.3}", p.x, p.y))
                        .collect::<Vec<_>>()
                        .join(" ");
                    format!(r#"<{tag} points="{points}" {attrs}/>"#)
                }
            };
            self.elements.push(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> PixelSize {
        PixelSize::new(100, 50)
    }

    #[test]
    fn empty_frame_is_bare_document() {
        let svg = SvgFrame::from_commands(&[], size());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn filled_full_arc_becomes_circle() {
        let commands = [
            DrawCommand::BeginPath,
            DrawCommand::Arc {
                center: DVec2::new(10.0, 20.0),
                radius: 0.5,
                start: 0.0,
                end: TAU,
            },
            DrawCommand::SetFillColor {
                color: Rgb::new(0, 225, 0),
            },
            DrawCommand::Fill,
        ];
        let svg = SvgFrame::from_commands(&commands, size());
        assert!(svg.contains(
            r#"<circle cx="10.000" cy="20.000" r="0.500" fill="rgb(0, 225, 0)"/>"#
        ));
    }

    #[test]
    fn stroked_path_becomes_outline() {
        let commands = [
            DrawCommand::BeginPath,
            DrawCommand::MoveTo {
                point: DVec2::new(0.0, 0.0),
            },
            DrawCommand::LineTo {
                point: DVec2::new(5.0, 0.0),
            },
            DrawCommand::LineTo {
                point: DVec2::new(0.0, 5.0),
            },
            DrawCommand::Fill,
            DrawCommand::Stroke,
        ];
        let svg = SvgFrame::from_commands(&commands, size());
        assert!(svg.contains(r#"<polygon points="0.000,0.000 5.000,0.000 0.000,5.000""#));
        let outline = r#"<polyline points="0.000,0.000 5.000,0.000 0.000,5.000" fill="none""#;
        assert!(svg.contains(outline));
    }

    #[test]
    fn full_clear_discards_earlier_shapes() {
        let commands = [
            DrawCommand::BeginPath,
            DrawCommand::Arc {
                center: DVec2::ZERO,
                radius: 1.0,
                start: 0.0,
                end: TAU,
            },
            DrawCommand::Fill,
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 50.0,
            },
        ];
        let svg = SvgFrame::from_commands(&commands, size());
        assert!(!svg.contains("<circle"));
    }
}
