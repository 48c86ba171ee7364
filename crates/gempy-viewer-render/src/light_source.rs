//! Hillshading of elevation rasters.

use gempy_viewer_core::{DVec3, Image2D};

/// A directional light at infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    /// Azimuth in degrees, clockwise from north.
    pub azdeg: f64,
    /// Altitude above the horizon in degrees.
    pub altdeg: f64,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            azdeg: 315.0,
            altdeg: 45.0,
        }
    }
}

impl LightSource {
    #[must_use]
    pub fn new(azdeg: f64, altdeg: f64) -> Self {
        Self { azdeg, altdeg }
    }

    /// Unit vector pointing towards the light.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        let az = (90.0 - self.azdeg).to_radians();
        let alt = self.altdeg.to_radians();
        DVec3::new(az.cos() * alt.cos(), az.sin() * alt.cos(), alt.sin())
    }

    /// Illumination in `[0, 1]` of every sample of `elevation`, whose samples
    /// are `dx` and `dy` apart. The result is stretched to the full range
    /// unless the surface is flat.
    #[must_use]
    pub fn hillshade(&self, elevation: &Image2D, dx: f64, dy: f64, vert_exag: f64) -> Image2D {
        let light = self.direction();
        let (w, h) = (elevation.width(), elevation.height());
        let raw = Image2D::from_fn(w, h, |col, row| {
            let (gx, gy) = elevation.gradient(col, row);
            let normal = DVec3::new(-gx * vert_exag / dx, -gy * vert_exag / dy, 1.0).normalize();
            normal.dot(light)
        });

        match raw.finite_range() {
            Some((lo, hi)) if hi - lo > 1e-12 => raw.map(|v| (v - lo) / (hi - lo)),
            _ => raw.map(|v| v.clamp(0.0, 1.0)),
        }
    }
}
