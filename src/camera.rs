use std::f64::consts::PI;
use std::fmt;

use ultraviolet::DVec3;

/// Rotation between successive lens samples, in radians (about 137.5°).
pub fn golden_angle() -> f64 {
    PI * (3.0 - 5.0_f64.sqrt())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthOfField {
    /// World space radius of the lens.
    pub aperture_radius: f64,
    pub aperture_samples: usize,
}

/// View and sampling configuration.
///
/// The length of `up` is the world space distance between neighbouring
/// pixels on the image plane, so it sets the field of view together with
/// the eye to center distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    image_width: usize,
    image_height: usize,
    supersamples: usize,
    up: DVec3,
    eye: DVec3,
    center: DVec3,
    depth_of_field: Option<DepthOfField>,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            image_width: 400,
            image_height: 400,
            supersamples: 1,
            up: DVec3::new(0.0, 1.0, 0.0),
            eye: DVec3::new(0.0, 1.0, 0.0),
            center: DVec3::zero(),
            depth_of_field: None,
        }
    }
}

impl Camera {
    pub fn new(up: DVec3, eye: DVec3, center: DVec3) -> Self {
        Camera {
            up,
            eye,
            center,
            ..Default::default()
        }
    }

    /// `supersamples` is the number of sub-samples per axis. Zero renders one
    /// centred ray per pixel without reflections.
    pub fn with_image(mut self, width: usize, height: usize, supersamples: usize) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.supersamples = supersamples;
        self
    }

    /// `aperture` is measured in pixels and converted with the length of `up`.
    pub fn with_depth_of_field(mut self, aperture: f64, samples: usize) -> Self {
        self.depth_of_field = Some(DepthOfField {
            aperture_radius: aperture * self.up.mag(),
            aperture_samples: samples,
        });
        self
    }

    pub fn image_width(&self) -> usize {
        self.image_width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    pub fn supersamples(&self) -> usize {
        self.supersamples
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Depth of field with at least one lens sample, if configured.
    pub fn depth_of_field(&self) -> Option<DepthOfField> {
        self.depth_of_field
            .filter(|dof| dof.aperture_samples > 0)
    }

    /// Derive the image plane basis used for every ray of a render.
    pub fn view_plane(&self) -> ViewPlane {
        let pixel_size = self.up.mag();
        let forward = (self.center - self.eye).normalized();
        let right = forward.cross(self.up).normalized();
        let true_up = right.cross(forward).normalized();

        let h = right * pixel_size;
        let v = true_up * pixel_size;
        let origin = self.center
            - h * (self.image_width as f64 / 2.0)
            - v * (self.image_height as f64 / 2.0);

        let subdivisions = self.supersamples.max(1) as f64;

        ViewPlane {
            eye: self.eye,
            up: self.up,
            forward,
            right,
            true_up,
            pixel_size,
            h,
            v,
            origin,
            offset_h: h / subdivisions,
            offset_v: v / subdivisions,
            width: self.image_width,
            height: self.image_height,
            supersamples: self.supersamples,
            depth_of_field: self.depth_of_field(),
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Camera")?;
        writeln!(
            f,
            "    image: {}x{} ({} supersamples)",
            self.image_width, self.image_height, self.supersamples
        )?;
        writeln!(f, "    up: {:?}", self.up)?;
        writeln!(f, "    eye: {:?}", self.eye)?;
        writeln!(f, "    center: {:?}", self.center)?;
        match self.depth_of_field() {
            Some(dof) => write!(
                f,
                "    depth of field: radius {} with {} samples",
                dof.aperture_radius, dof.aperture_samples
            ),
            None => write!(f, "    depth of field disabled"),
        }
    }
}

/// Image plane in world space, computed once per render and shared
/// read-only by every worker.
#[derive(Clone, Copy, Debug)]
pub struct ViewPlane {
    pub eye: DVec3,
    pub up: DVec3,
    /// G
    pub forward: DVec3,
    /// A
    pub right: DVec3,
    /// B
    pub true_up: DVec3,
    pub pixel_size: f64,
    pub h: DVec3,
    pub v: DVec3,
    /// World position of the bottom left image corner.
    pub origin: DVec3,
    pub offset_h: DVec3,
    pub offset_v: DVec3,
    pub width: usize,
    pub height: usize,
    pub supersamples: usize,
    pub depth_of_field: Option<DepthOfField>,
}

impl ViewPlane {
    /// Lower left corner of pixel (x, y). Row 0 is the top of the image.
    pub fn pixel_corner(&self, x: usize, y: usize) -> DVec3 {
        self.origin + self.h * x as f64 + self.v * (self.height - 1 - y) as f64
    }

    pub fn pixel_center(&self, x: usize, y: usize) -> DVec3 {
        self.pixel_corner(x, y) + (self.h + self.v) * 0.5
    }

    /// Centre of sub-cell (i, j) of pixel (x, y).
    pub fn sample_point(&self, x: usize, y: usize, i: usize, j: usize) -> DVec3 {
        let des = self.pixel_corner(x, y) + self.offset_h * i as f64 + self.offset_v * j as f64;
        des + self.offset_h / 2.0 + self.offset_v / 2.0
    }

    /// Eye position for lens sample `k`, spread on a golden angle spiral.
    pub fn lens_eye(&self, dof: &DepthOfField, k: usize) -> DVec3 {
        let c = dof.aperture_radius / (self.pixel_size * (dof.aperture_samples as f64).sqrt());
        let r = c * (k as f64).sqrt();
        let theta = k as f64 * golden_angle();

        self.eye + self.right * (r * theta.cos()) + self.up * (r * theta.sin())
    }

    /// Samples averaged into every pixel.
    pub fn samples_per_pixel(&self) -> usize {
        if self.supersamples == 0 {
            return 1;
        }
        let grid = self.supersamples * self.supersamples;
        match self.depth_of_field {
            Some(dof) => grid * dof.aperture_samples,
            None => grid,
        }
    }
}
