//! Whitted style ray tracer: Phong shading, hard shadows, mirror reflections,
//! supersampling and depth of field, rendered across worker threads.

pub mod camera;
pub mod error;
pub mod materials;
pub mod model_loader;
pub mod primatives;
pub mod render;
pub mod render_image;
pub mod render_objects;
pub mod scene;

pub use camera::Camera;
pub use error::RenderError;
pub use materials::{Material, MaterialId};
pub use primatives::Ray;
pub use render::{
    FlatShadingModel, PhongShadingModel, RenderModel, RenderObserver, RenderSettings,
    ShadingModel,
};
pub use render_image::Image;
pub use render_objects::{Hit, Hittable, Shape};
pub use scene::{PointLight, Scene};
