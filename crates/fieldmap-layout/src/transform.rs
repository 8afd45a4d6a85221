//! Coordinate transform from field units ("sm") to canvas pixels.
//!
//! Every drawing routine goes through [`LayoutConfig::to_pixels`] and
//! [`LayoutConfig::place`], so a field-native point always lands on the
//! same pixel no matter which routine draws it. The margin is added after
//! scaling and is never scaled itself.

use serde::{Deserialize, Serialize};

use crate::types::{LayoutError, Point};

/// Field units per pixel.
pub const SM_PER_PX: f64 = 4.0;

/// Side length of the square field, in field units.
pub const FIELD_EXTENT: f64 = 2300.0;

/// Grid spacing in field units.
pub const GRID_STEP: f64 = 115.0;

/// Number of grid cells along each axis.
pub const GRID_CELLS: usize = 20;

/// Canvas margin around the field, in pixels.
pub const MARGIN_PX: f64 = 30.0;

/// Geometry of the rendered canvas.
///
/// Defaults reproduce the standard competition field. The CLI can load
/// an override from JSON; run [`LayoutConfig::validate`] on anything not
/// built from the defaults.
///
/// Only the pixel scale and the margin are free. The grid
/// (`field_extent`, `grid_step`) must stay at [`FIELD_EXTENT`] and
/// [`GRID_STEP`], since encoded points name cells of that grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Field units per pixel.
    pub sm_per_px: f64,
    /// Side length of the square field, in field units.
    pub field_extent: f64,
    /// Grid spacing in field units.
    pub grid_step: f64,
    /// Margin added on both axes, in pixels.
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sm_per_px: SM_PER_PX,
            field_extent: FIELD_EXTENT,
            grid_step: GRID_STEP,
            margin: MARGIN_PX,
        }
    }
}

impl LayoutConfig {
    /// Check that the geometry can be drawn.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] if `sm_per_px` is not a
    /// finite positive number, `margin` is negative or not finite, or the
    /// grid differs from the one encoded points refer to.
    #[allow(clippy::float_cmp)]
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.sm_per_px.is_finite() && self.sm_per_px > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "sm_per_px must be finite and positive, got {}",
                self.sm_per_px
            )));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "margin must be finite and non-negative, got {}",
                self.margin
            )));
        }
        if self.field_extent != FIELD_EXTENT || self.grid_step != GRID_STEP {
            return Err(LayoutError::InvalidConfig(format!(
                "grid must be {FIELD_EXTENT} units in steps of {GRID_STEP}, got {} in steps of {}",
                self.field_extent, self.grid_step
            )));
        }
        Ok(())
    }

    /// Convert a field-native length to pixels.
    #[must_use]
    pub fn to_pixels(&self, sm: f64) -> f64 {
        sm / self.sm_per_px
    }

    /// Map a field-native point to its canvas pixel.
    #[must_use]
    pub fn place(&self, point: Point) -> Point {
        Point::new(
            self.margin + self.to_pixels(point.x),
            self.margin + self.to_pixels(point.y),
        )
    }

    /// Pixel size of the field itself, border included.
    #[must_use]
    pub fn field_size_px(&self) -> f64 {
        self.to_pixels(self.field_extent) + 1.0
    }

    /// Canvas side length in pixels: margin plus field.
    #[must_use]
    pub fn canvas_side_px(&self) -> f64 {
        self.margin + self.field_size_px()
    }

    /// Grid spacing in pixels.
    #[must_use]
    pub fn grid_step_px(&self) -> f64 {
        self.to_pixels(self.grid_step)
    }

    /// Number of whole grid cells along one axis.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn grid_cells(&self) -> usize {
        (self.field_extent / self.grid_step).floor().max(0.0) as usize
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn to_pixels_divides_by_four() {
        let config = LayoutConfig::default();
        for sm in [0.0, 1.0, 115.0, 230.0, 2300.0, 12345.5] {
            assert_eq!(config.to_pixels(sm), sm / 4.0);
        }
    }

    #[test]
    fn margin_is_added_not_scaled() {
        let config = LayoutConfig::default();
        assert_eq!(config.place(Point::new(0.0, 0.0)), Point::new(30.0, 30.0));
        assert_eq!(
            config.place(Point::new(460.0, 805.0)),
            Point::new(145.0, 231.25)
        );
    }

    #[test]
    fn canvas_side_matches_field_plus_margin() {
        let config = LayoutConfig::default();
        assert_eq!(config.field_size_px(), 576.0);
        assert_eq!(config.canvas_side_px(), 606.0);
    }

    #[test]
    fn default_grid_has_twenty_cells() {
        let config = LayoutConfig::default();
        assert_eq!(config.grid_cells(), GRID_CELLS);
        assert_eq!(config.grid_step_px(), 28.75);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
        let scaled = LayoutConfig {
            sm_per_px: 2.0,
            margin: 0.0,
            ..LayoutConfig::default()
        };
        assert!(scaled.validate().is_ok());
    }

    #[test]
    fn degenerate_scale_is_rejected() {
        for sm_per_px in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            let config = LayoutConfig {
                sm_per_px,
                ..LayoutConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(LayoutError::InvalidConfig(_))),
                "{sm_per_px}"
            );
        }
    }

    #[test]
    fn negative_margin_is_rejected() {
        let config = LayoutConfig {
            margin: -1.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn grid_must_match_encoded_cells() {
        // A finer grid would need more letters than A..T and would not
        // match the cells named by encoded points.
        let grids = [
            (FIELD_EXTENT, 10.0),
            (FIELD_EXTENT, 0.0),
            (4600.0, GRID_STEP),
        ];
        for (field_extent, grid_step) in grids {
            let config = LayoutConfig {
                field_extent,
                grid_step,
                ..LayoutConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("grid"), "{err}");
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"margin": 10}"#).unwrap();
        assert_eq!(config.margin, 10.0);
        assert_eq!(config.sm_per_px, SM_PER_PX);
    }
}
