mod camera;
mod mode;
mod scene;

pub use camera::*;
pub use mode::*;
pub use scene::*;
