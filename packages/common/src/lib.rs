pub mod error;
pub mod geometry;
pub mod html_elements;
pub mod ids;
pub mod palette;

pub use error::*;
pub use geometry::*;
pub use ids::*;
pub use palette::*;
