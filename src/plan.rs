use kurbo::Point;

use crate::error::{RoundelError, RoundelResult};
use crate::geometry::{self, ShapeKind};

/// Dimensions of one decoded input, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// One compositing step: clip to `extent`, paint input `image`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub extent: f64,
    pub image: usize,
}

#[derive(Clone, Debug)]
/// Backend-agnostic description of a whole run, executable against any
/// surface with the same semantics.
pub struct StepPlan {
    /// Side of the square canvas, the largest dimension over all inputs.
    pub canvas_size: u32,
    /// Shared center of every clip shape.
    pub center: Point,
    pub steps: Vec<Step>,
}

/// Strictly decreasing extents `start, start - gap, ...`, one per step,
/// while the extent is strictly greater than `floor`.
#[derive(Clone, Copy, Debug)]
pub struct ExtentSchedule {
    next: f64,
    gap: f64,
    floor: f64,
}

pub fn extent_schedule(start: f64, gap: f64, floor: f64) -> ExtentSchedule {
    ExtentSchedule {
        next: start,
        gap,
        floor,
    }
}

impl Iterator for ExtentSchedule {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next > self.floor {
            let current = self.next;
            self.next -= self.gap;
            Some(current)
        } else {
            None
        }
    }
}

/// Plans the full run: canvas sizing over all inputs, the extent schedule
/// anchored to the first input, and cyclic image selection.
pub fn plan_steps(
    shape: ShapeKind,
    images: &[ImageInfo],
    gap: u32,
    floor: f64,
) -> RoundelResult<StepPlan> {
    let first = images
        .first()
        .ok_or_else(|| RoundelError::config("at least one input image must be specified"))?;
    if gap == 0 {
        return Err(RoundelError::config("gap must be a positive pixel count"));
    }

    let canvas_size = images
        .iter()
        .fold(0, |acc, info| acc.max(info.width).max(info.height));
    let center = Point::new(f64::from(canvas_size) / 2.0, f64::from(canvas_size) / 2.0);

    let start = geometry::initial_extent(shape, first.width, first.height);
    let steps = extent_schedule(start, f64::from(gap), floor)
        .enumerate()
        .map(|(i, extent)| Step {
            extent,
            image: i % images.len(),
        })
        .collect();

    Ok(StepPlan {
        canvas_size,
        center,
        steps,
    })
}
