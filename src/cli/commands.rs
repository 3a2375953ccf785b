pub mod render;
pub mod serve;

pub use render::{RenderOptions, render};
pub use serve::serve;
