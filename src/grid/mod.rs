pub mod placement;
pub mod resolver;
