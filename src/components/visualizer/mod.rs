mod component;
mod session;

pub use component::ParseVisualizer;
pub use session::SessionSource;
