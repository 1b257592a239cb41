pub mod fill;
pub mod model;
pub mod motion;
pub mod pixels;
pub mod propagate;
