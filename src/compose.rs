use crate::assets::ImageSet;
use crate::config::RunConfig;
use crate::error::RoundelResult;
use crate::geometry;
use crate::plan;
use crate::render::{Canvas, PreparedSource};

/// What a finished run produced, for logging and tests.
#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    pub canvas_size: u32,
    pub steps: usize,
}

/// Runs the whole composite: validates the config, plans the steps, then
/// clips and paints each one onto a single shared surface and finalizes
/// it to the output path.
///
/// Steps are not resumable: once the surface is partially clipped and
/// painted, any failure aborts the run.
pub fn compose(config: &RunConfig, images: &ImageSet) -> RoundelResult<RunSummary> {
    config.validate()?;

    let plan = plan::plan_steps(config.shape, &images.infos(), config.gap, config.floor)?;
    tracing::info!(
        canvas = plan.canvas_size,
        steps = plan.steps.len(),
        shape = ?config.shape,
        "planned composite"
    );

    let canvas = Canvas::create(config.format, &config.out, plan.canvas_size)?;
    let sources = images
        .iter()
        .map(PreparedSource::new)
        .collect::<RoundelResult<Vec<_>>>()?;

    for (i, step) in plan.steps.iter().enumerate() {
        let image = images.get(step.image);
        tracing::debug!(
            step = i,
            extent = step.extent,
            image = %image.path.display(),
            "clipping and painting"
        );
        canvas.clip(&geometry::clip_path(config.shape, plan.center, step.extent))?;
        let (x, y) = centering_offset(plan.canvas_size, image.width, image.height);
        canvas.paint(&sources[step.image], x, y)?;
    }

    canvas.finish()?;

    Ok(RunSummary {
        canvas_size: plan.canvas_size,
        steps: plan.steps.len(),
    })
}

/// Offset that centers an image on the square canvas, on both axes.
fn centering_offset(canvas_size: u32, width: u32, height: u32) -> (f64, f64) {
    (
        (f64::from(canvas_size) - f64::from(width)) / 2.0,
        (f64::from(canvas_size) - f64::from(height)) / 2.0,
    )
}
