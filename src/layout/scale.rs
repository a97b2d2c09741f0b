use std::f32::consts::{FRAC_PI_2, TAU};

/// Linear map from `[0, max_value]` onto `[0, radius]`. Values outside the
/// domain extrapolate rather than clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    pub max_value: f32,
    pub radius: f32,
}

impl RadiusScale {
    pub fn new(max_value: f32, radius: f32) -> Self {
        Self { max_value, radius }
    }

    pub fn scale(&self, value: f32) -> f32 {
        value / self.max_value * self.radius
    }
}

/// Angular layout of the spokes: axis 0 points up, the rest follow clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarGrid {
    pub total: usize,
    pub angle_slice: f32,
    pub scale: RadiusScale,
}

impl PolarGrid {
    pub fn new(total: usize, scale: RadiusScale) -> Self {
        Self {
            total,
            angle_slice: TAU / total.max(1) as f32,
            scale,
        }
    }

    /// Screen angle of axis `index`, measured from the positive x axis with y
    /// pointing down.
    pub fn axis_angle(&self, index: usize) -> f32 {
        self.angle_slice * index as f32 - FRAC_PI_2
    }

    pub fn project(&self, index: usize, value: f32) -> (f32, f32) {
        let r = self.scale.scale(value);
        let angle = self.axis_angle(index);
        (r * angle.cos(), r * angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn scale_maps_domain_ends_to_range_ends() {
        let scale = RadiusScale::new(0.55, 225.0);
        assert_eq!(scale.scale(0.0), 0.0);
        assert!(close(scale.scale(0.55), 225.0));
        assert!(scale.scale(1.1) > 225.0);
    }

    #[test]
    fn axis_zero_points_straight_up() {
        let grid = PolarGrid::new(4, RadiusScale::new(1.0, 100.0));
        let (x, y) = grid.project(0, 1.0);
        assert!(close(x, 0.0));
        assert!(close(y, -100.0));
        let (x, y) = grid.project(1, 1.0);
        assert!(close(x, 100.0));
        assert!(close(y, 0.0));
    }

    #[test]
    fn axis_angles_are_evenly_spaced() {
        let grid = PolarGrid::new(6, RadiusScale::new(1.0, 1.0));
        for i in 0..6 {
            let expected = i as f32 * (TAU / 6.0) - FRAC_PI_2;
            assert!(close(grid.axis_angle(i), expected));
        }
    }
}
