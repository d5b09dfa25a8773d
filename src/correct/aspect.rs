use crate::foundation::core::OutputFormat;
use crate::foundation::error::{AspectError, AspectResult};
use crate::foundation::math::is_positive_finite;
use crate::geometry::bounds::Bounds;
use crate::geometry::keyframe::Keyframe;

/// Aspect ratios for one correction: the clip's pixel shape and the wanted frame aspect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectContext {
    /// Width-to-height ratio of one source pixel.
    pub source_pixel_aspect: f64,
    /// Displayed width/height the corrected region must present.
    pub target_aspect: f64,
}

impl AspectContext {
    /// Both ratios must be positive and finite.
    pub fn new(source_pixel_aspect: f64, target_aspect: f64) -> AspectResult<Self> {
        if !is_positive_finite(source_pixel_aspect) {
            return Err(AspectError::invalid_geometry(format!(
                "source pixel aspect must be positive and finite, got {source_pixel_aspect}"
            )));
        }
        if !is_positive_finite(target_aspect) {
            return Err(AspectError::invalid_geometry(format!(
                "target aspect must be positive and finite, got {target_aspect}"
            )));
        }
        Ok(Self {
            source_pixel_aspect,
            target_aspect,
        })
    }

    /// Context targeting the displayed aspect of `output`.
    pub fn for_output(source_pixel_aspect: f64, output: &OutputFormat) -> AspectResult<Self> {
        Self::new(source_pixel_aspect, output.output_aspect())
    }
}

/// Which axis a correction rescaled, and by how much.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisFit {
    /// X coordinates scaled about the center; Y untouched.
    ScaleX(f64),
    /// Y coordinates scaled about the center; X untouched.
    ScaleY(f64),
}

impl AxisFit {
    /// A region narrower than the target loses height, anything else loses width.
    ///
    /// An exact match takes the X branch with factor 1.
    pub fn choose(current_aspect: f64, target_aspect: f64) -> Self {
        if current_aspect < target_aspect {
            Self::ScaleY(current_aspect / target_aspect)
        } else {
            Self::ScaleX(target_aspect / current_aspect)
        }
    }

    /// The scale factor applied to the chosen axis.
    pub fn factor(self) -> f64 {
        match self {
            Self::ScaleX(f) | Self::ScaleY(f) => f,
        }
    }
}

fn upright_aspect(upright: &Bounds, source_pixel_aspect: f64) -> AspectResult<f64> {
    let (width, height) = upright.axis_extents();
    if !is_positive_finite(width) || !is_positive_finite(height) {
        return Err(AspectError::invalid_geometry(format!(
            "degenerate bounds: width {width}, height {height}"
        )));
    }
    let aspect = source_pixel_aspect * width / height;
    if !is_positive_finite(aspect) {
        return Err(AspectError::transform_failure(format!(
            "aspect of {width}x{height} at pixel aspect {source_pixel_aspect} is out of range"
        )));
    }
    Ok(aspect)
}

/// Displayed aspect of `bounds` once `rotation` is undone, for pixels shaped `source_pixel_aspect`.
pub fn measure_aspect(
    bounds: &Bounds,
    rotation: f64,
    source_pixel_aspect: f64,
) -> AspectResult<f64> {
    if !is_positive_finite(source_pixel_aspect) {
        return Err(AspectError::invalid_geometry(format!(
            "source pixel aspect must be positive and finite, got {source_pixel_aspect}"
        )));
    }
    let mut kf = Keyframe::new(*bounds, rotation);
    kf.rotate_by(-rotation);
    upright_aspect(&kf.bounds, source_pixel_aspect)
}

/// Corrected copy of `bounds`; the input is never modified.
pub fn correct_bounds(bounds: &Bounds, rotation: f64, ctx: AspectContext) -> AspectResult<Bounds> {
    let mut kf = Keyframe::new(*bounds, rotation);
    correct_keyframe(&mut kf, ctx)?;
    Ok(kf.bounds)
}

/// Reshape `keyframe` in place so its displayed aspect equals `ctx.target_aspect`.
///
/// Center and rotation are preserved and exactly one axis of the upright rectangle is
/// rescaled. On error the keyframe is left exactly as it was passed in.
pub fn correct_keyframe(keyframe: &mut Keyframe, ctx: AspectContext) -> AspectResult<AxisFit> {
    let snapshot = *keyframe;
    match apply(keyframe, ctx) {
        Ok(fit) => Ok(fit),
        Err(err) => {
            *keyframe = snapshot;
            Err(err)
        }
    }
}

fn apply(keyframe: &mut Keyframe, ctx: AspectContext) -> AspectResult<AxisFit> {
    // Re-check so hand-built contexts cannot slip past `AspectContext::new`.
    let ctx = AspectContext::new(ctx.source_pixel_aspect, ctx.target_aspect)?;
    if !keyframe.bounds.is_finite() || !keyframe.rotation.is_finite() {
        return Err(AspectError::invalid_geometry(
            "keyframe has non-finite corners or rotation",
        ));
    }

    let rotation = keyframe.rotation;
    keyframe.rotate_by(-rotation);

    let current = upright_aspect(&keyframe.bounds, ctx.source_pixel_aspect)?;
    let center = keyframe.center();
    let fit = AxisFit::choose(current, ctx.target_aspect);
    keyframe.bounds = match fit {
        AxisFit::ScaleX(f) => keyframe.bounds.scale_x_about(f, center.x),
        AxisFit::ScaleY(f) => keyframe.bounds.scale_y_about(f, center.y),
    };

    keyframe.rotate_by(rotation);

    if !keyframe.bounds.is_finite() {
        return Err(AspectError::transform_failure(format!(
            "rescale by {} produced non-finite corners",
            fit.factor()
        )));
    }

    tracing::debug!(
        frame = keyframe.frame.0,
        current_aspect = current,
        target_aspect = ctx.target_aspect,
        ?fit,
        "matched keyframe aspect"
    );
    Ok(fit)
}

#[cfg(test)]
#[path = "../../tests/unit/correct/aspect.rs"]
mod tests;
