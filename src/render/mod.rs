//! Turns a scene and camera into an image.
//!
//! Rows of the image are claimed one at a time from an atomic counter by a
//! fixed set of worker threads plus the calling thread. Each row belongs to
//! exactly one worker, so pixels are written without any locking. The only
//! lock guards progress reporting, and is taken at most once per row.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Instant;

use log::{debug, info, warn};
use ultraviolet::DVec3;

use crate::{
    camera::{Camera, ViewPlane},
    error::RenderError,
    primatives::Ray,
    render_image::Image,
    scene::Scene,
};

pub use self::shading::{FlatShadingModel, PhongShadingModel, ShadingModel};

pub mod shading;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    pub shadows: bool,
    pub reflection_depth: usize,
    pub background: DVec3,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            shadows: false,
            reflection_depth: 0,
            background: DVec3::zero(),
        }
    }
}

/// Notified as rows get claimed during a render.
pub trait RenderObserver: Send + Sync {
    /// Called at most once per whole percent, with strictly increasing
    /// values. May be called from any worker thread, but never concurrently.
    fn progress(&self, percent: usize);
}

pub struct RenderModel<S = PhongShadingModel> {
    shading: S,
    settings: RenderSettings,
    scene: Option<Arc<Scene>>,
    camera: Camera,
    observer: Option<Arc<dyn RenderObserver>>,
}

impl<S: ShadingModel + Default> Default for RenderModel<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: ShadingModel> RenderModel<S> {
    pub fn new(shading: S) -> Self {
        RenderModel {
            shading,
            settings: RenderSettings::default(),
            scene: None,
            camera: Camera::default(),
            observer: None,
        }
    }

    pub fn shading(&self) -> &S {
        &self.shading
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn shadows(&self) -> bool {
        self.settings.shadows
    }

    pub fn enable_shadows(&mut self) {
        self.settings.shadows = true;
    }

    pub fn disable_shadows(&mut self) {
        self.settings.shadows = false;
    }

    pub fn reflection_depth(&self) -> usize {
        self.settings.reflection_depth
    }

    pub fn set_reflection_depth(&mut self, depth: usize) {
        self.settings.reflection_depth = depth;
    }

    pub fn background(&self) -> DVec3 {
        self.settings.background
    }

    pub fn set_background(&mut self, color: DVec3) {
        self.settings.background = color;
    }

    /// Scenes are shared, several models may render the same one.
    pub fn scene(&self) -> Option<&Arc<Scene>> {
        self.scene.as_ref()
    }

    pub fn set_scene(&mut self, scene: Arc<Scene>) {
        self.scene = Some(scene);
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn set_observer(&mut self, observer: Arc<dyn RenderObserver>) {
        self.observer = Some(observer);
    }

    /// Render on the calling thread only.
    pub fn render(&self) -> Result<Image, RenderError> {
        self.render_with_workers(0)
    }

    /// Render with `thread_count` spawned workers helping the calling thread.
    /// The result is identical to [`RenderModel::render`].
    pub fn render_threaded(&self, thread_count: usize) -> Result<Image, RenderError> {
        if thread_count == 0 {
            return Err(RenderError::InvalidThreadCount);
        }
        self.render_with_workers(thread_count)
    }

    fn render_with_workers(&self, workers: usize) -> Result<Image, RenderError> {
        let scene = self.scene.as_deref().ok_or(RenderError::NoScene)?;
        let (width, height) = (self.camera.image_width(), self.camera.image_height());
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidImageSize { width, height });
        }
        if scene.shapes().is_empty() {
            warn!("rendering a scene without shapes");
        }

        debug!("{}", self.camera);
        debug!("rendering {}x{} with {} extra threads", width, height, workers);

        let mut image = Image::new(width, height);
        let job = RenderJob {
            scene,
            plane: self.camera.view_plane(),
            settings: &self.settings,
            shading: &self.shading,
            next_row: AtomicUsize::new(0),
            last_percent: Mutex::new(0),
            observer: self.observer.as_deref(),
        };

        let start_time = Instant::now();
        let rows = thread::scope(|scope| {
            let handles = (0..workers)
                .map(|_| scope.spawn(|| job.run()))
                .collect::<Vec<_>>();

            let mut rows = job.run();
            for handle in handles {
                match handle.join() {
                    Ok(mut rendered) => rows.append(&mut rendered),
                    // A failing worker takes the whole render down with it.
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            rows
        });

        for (y, pixels) in rows {
            image.row_mut(y).copy_from_slice(&pixels);
        }

        info!(
            "render completed in {:.2} seconds",
            start_time.elapsed().as_secs_f64()
        );
        Ok(image)
    }
}

/// Shared read-only state of one render call plus the row counter.
struct RenderJob<'a, S> {
    scene: &'a Scene,
    plane: ViewPlane,
    settings: &'a RenderSettings,
    shading: &'a S,
    next_row: AtomicUsize,
    last_percent: Mutex<usize>,
    observer: Option<&'a dyn RenderObserver>,
}

impl<S: ShadingModel> RenderJob<'_, S> {
    /// Worker loop: claim a row, render it, repeat until none are left.
    fn run(&self) -> Vec<(usize, Vec<DVec3>)> {
        let mut rendered = Vec::new();
        while let Some(y) = self.claim_row() {
            let row = (0..self.plane.width)
                .map(|x| self.render_pixel(x, y))
                .collect::<Vec<_>>();
            rendered.push((y, row));
        }
        rendered
    }

    fn claim_row(&self) -> Option<usize> {
        let y = self.next_row.fetch_add(1, Ordering::Relaxed);
        if y >= self.plane.height {
            return None;
        }
        self.report_progress(y + 1);
        Some(y)
    }

    fn report_progress(&self, claimed: usize) {
        let Some(observer) = self.observer else {
            return;
        };
        let percent = claimed * 100 / self.plane.height;
        let mut last = self
            .last_percent
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if percent > *last {
            *last = percent;
            observer.progress(percent);
        }
    }

    fn trace(&self, ray: &Ray, reflections_left: usize) -> DVec3 {
        self.shading
            .trace(self.scene, self.settings, ray, reflections_left)
    }

    fn render_pixel(&self, x: usize, y: usize) -> DVec3 {
        let plane = &self.plane;

        if plane.supersamples == 0 {
            let ray = Ray::through(plane.eye, plane.pixel_center(x, y));
            return self.trace(&ray, 0);
        }

        let mut average = DVec3::zero();
        match plane.depth_of_field {
            Some(dof) => {
                for k in 0..dof.aperture_samples {
                    let eye = plane.lens_eye(&dof, k);
                    self.supersample(eye, x, y, &mut average);
                }
            }
            None => self.supersample(plane.eye, x, y, &mut average),
        }
        average / plane.samples_per_pixel() as f64
    }

    fn supersample(&self, eye: DVec3, x: usize, y: usize, average: &mut DVec3) {
        let samples = self.plane.supersamples;
        for i in 0..samples {
            for j in 0..samples {
                let des = self.plane.sample_point(x, y, i, j);
                *average += self.trace(&Ray::through(eye, des), self.settings.reflection_depth);
            }
        }
    }
}
