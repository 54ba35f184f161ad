pub mod impl_fake;
pub mod impl_file;
#[cfg(feature = "webcam")]
pub mod impl_webcam;
pub mod interface;
