pub mod render;
pub mod style;

pub use render::{MessageFormat, render_message};
pub use style::{ColorChoice, apply_color_choice};
