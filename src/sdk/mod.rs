pub mod config;
pub mod pipeline;
pub mod presenter;
pub mod render;
pub mod routing;
pub mod util;
