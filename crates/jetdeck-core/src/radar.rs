// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use std::f64::consts::{FRAC_PI_2, TAU};
use thiserror::Error;

/// Radial fraction of a vertex whose normalized value is 0.
pub const RADAR_FLOOR: f64 = 0.08;

#[derive(Error, Debug, PartialEq)]
pub enum RadarError {
    #[error("expected {expected} values, got {actual}")]
    AxisMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Screen-space radar layout (y grows downward, so increasing angle is clockwise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarLayout {
    pub axes: usize,
    pub radius: f64,
    pub center: Point,
}

impl RadarLayout {
    /// Layout centered in a `size` x `size` square with a margin for labels.
    pub fn square(axes: usize, size: f64, margin: f64) -> Self {
        let half = size / 2.0;
        Self {
            axes,
            radius: (half - margin).max(0.0),
            center: Point { x: half, y: half },
        }
    }

    /// Axis 0 points straight up; the rest follow clockwise at equal spacing.
    pub fn axis_angle(&self, axis: usize) -> f64 {
        if self.axes == 0 {
            return -FRAC_PI_2;
        }
        -FRAC_PI_2 + TAU * axis as f64 / self.axes as f64
    }

    fn at(&self, axis: usize, fraction: f64) -> Point {
        let angle = self.axis_angle(axis);
        let r = self.radius * fraction;
        Point {
            x: self.center.x + r * angle.cos(),
            y: self.center.y + r * angle.sin(),
        }
    }

    pub fn axis_end(&self, axis: usize) -> Point {
        self.at(axis, 1.0)
    }

    /// Where an axis label goes, `offset` units beyond the axis end.
    pub fn label_anchor(&self, axis: usize, offset: f64) -> Point {
        if self.radius <= 0.0 {
            return self.center;
        }
        self.at(axis, 1.0 + offset / self.radius)
    }

    /// Grid ring at `fraction` of the full radius.
    pub fn ring(&self, fraction: f64) -> Vec<Point> {
        (0..self.axes).map(|i| self.at(i, fraction)).collect()
    }

    pub fn vertex(&self, axis: usize, normalized: f64) -> Point {
        let value = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        self.at(axis, RADAR_FLOOR + value * (1.0 - RADAR_FLOOR))
    }

    /// One vertex per axis for a normalized vector.
    pub fn polygon(&self, values: &[f64]) -> Result<Vec<Point>, RadarError> {
        if values.len() != self.axes {
            return Err(RadarError::AxisMismatch {
                expected: self.axes,
                actual: values.len(),
            });
        }
        Ok(values
            .iter()
            .enumerate()
            .map(|(axis, v)| self.vertex(axis, *v))
            .collect())
    }
}

/// SVG `points` attribute for a polygon.
pub fn svg_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
