pub mod binding;
pub mod logging;
pub mod monitor;
pub mod screen;
