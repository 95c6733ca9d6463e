pub mod headless;

#[cfg(feature = "screenshot")]
pub mod screenshot;
