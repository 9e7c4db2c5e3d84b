//! Shape generation for 2D primitives
//!
//! All helpers emit triangle lists in screen pixel coordinates; the pipeline
//! maps them to NDC at upload time.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle.
pub fn quad(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    rotated_quad(center, size, 0.0, color)
}

/// Filled rectangle rotated by `degrees` about its center.
pub fn rotated_quad(center: Vec2, size: Vec2, degrees: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    let half = size / 2.0;

    let rotate = |p: Vec2| -> Vec2 {
        center + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
    };
    let a = rotate(Vec2::new(-half.x, -half.y));
    let b = rotate(Vec2::new(half.x, -half.y));
    let c = rotate(Vec2::new(half.x, half.y));
    let d = rotate(Vec2::new(-half.x, half.y));

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Single filled triangle.
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Filled circle as a triangle fan. Low segment counts give the lumpy
/// polygon look used for meteors.
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    polygon(center, radius, color, segments, 0.0)
}

/// Filled regular polygon with a phase angle, so a spinning shape actually
/// looks like it spins.
pub fn polygon(
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
    phase_deg: f32,
) -> Vec<Vertex> {
    let phase = phase_deg.to_radians();
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = phase + (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = phase + ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Ring (hollow circle).
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + inner_radius * Vec2::new(theta1.cos(), theta1.sin());
        let outer1 = center + outer_radius * Vec2::new(theta1.cos(), theta1.sin());
        let inner2 = center + inner_radius * Vec2::new(theta2.cos(), theta2.sin());
        let outer2 = center + outer_radius * Vec2::new(theta2.cos(), theta2.sin());

        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Rectangle outline built from four thin quads.
pub fn rect_outline(center: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    let mut vertices = Vec::with_capacity(24);
    // Top and bottom bars span the full width, sides fill between them
    vertices.extend(quad(
        center + Vec2::new(0.0, -half.y + thickness / 2.0),
        Vec2::new(size.x, thickness),
        color,
    ));
    vertices.extend(quad(
        center + Vec2::new(0.0, half.y - thickness / 2.0),
        Vec2::new(size.x, thickness),
        color,
    ));
    let side_h = size.y - 2.0 * thickness;
    vertices.extend(quad(
        center + Vec2::new(-half.x + thickness / 2.0, 0.0),
        Vec2::new(thickness, side_h),
        color,
    ));
    vertices.extend(quad(
        center + Vec2::new(half.x - thickness / 2.0, 0.0),
        Vec2::new(thickness, side_h),
        color,
    ));
    vertices
}

// Seven-segment digit rendering for the score display.
//
// Segment layout, bit per segment:
//    0
//  5   1
//    6
//  4   2
//    3
const DIGIT_SEGMENTS: [u8; 10] = [
    0b0111111, // 0
    0b0000110, // 1
    0b1011011, // 2
    0b1001111, // 3
    0b1100110, // 4
    0b1101101, // 5
    0b1111101, // 6
    0b0000111, // 7
    0b1111111, // 8
    0b1101111, // 9
];

/// One seven-segment digit. `top_left` is the digit cell's corner; the cell
/// is `height * 0.6` wide.
pub fn digit(value: u8, top_left: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    debug_assert!(value < 10);
    let segs = DIGIT_SEGMENTS[value as usize];
    let w = height * 0.6;
    let t = height * 0.12;
    let half_h = height / 2.0;

    let horiz = Vec2::new(w, t);
    let vert = Vec2::new(t, half_h - t / 2.0);

    // Segment centers relative to top_left
    let centers = [
        Vec2::new(w / 2.0, t / 2.0),                       // 0 top
        Vec2::new(w - t / 2.0, half_h / 2.0 + t / 4.0),    // 1 top-right
        Vec2::new(w - t / 2.0, height - half_h / 2.0 - t / 4.0), // 2 bottom-right
        Vec2::new(w / 2.0, height - t / 2.0),              // 3 bottom
        Vec2::new(t / 2.0, height - half_h / 2.0 - t / 4.0), // 4 bottom-left
        Vec2::new(t / 2.0, half_h / 2.0 + t / 4.0),        // 5 top-left
        Vec2::new(w / 2.0, half_h),                        // 6 middle
    ];

    let mut vertices = Vec::new();
    for (i, c) in centers.iter().enumerate() {
        if segs & (1 << i) == 0 {
            continue;
        }
        let size = if i == 0 || i == 3 || i == 6 { horiz } else { vert };
        vertices.extend(quad(top_left + *c, size, color));
    }
    vertices
}

/// A whole number, centered horizontally on `center_x` with its top at `y`.
pub fn number(value: u32, center_x: f32, y: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let digits: Vec<u8> = {
        let mut v = value;
        let mut ds = Vec::new();
        loop {
            ds.push((v % 10) as u8);
            v /= 10;
            if v == 0 {
                break;
            }
        }
        ds.reverse();
        ds
    };

    let cell_w = height * 0.6;
    let spacing = height * 0.25;
    let total_w = digits.len() as f32 * cell_w + (digits.len() - 1) as f32 * spacing;
    let mut x = center_x - total_w / 2.0;

    let mut vertices = Vec::new();
    for d in digits {
        vertices.extend(digit(d, Vec2::new(x, y), height, color));
        x += cell_w + spacing;
    }
    vertices
}
