pub mod labels;
pub mod style;

pub use labels::LabelPlacer;
pub use style::{LabelStyle, OutlineStyle};
