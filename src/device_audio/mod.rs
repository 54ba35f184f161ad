pub mod impl_console;
#[cfg(test)]
pub mod impl_fake;
#[cfg(feature = "audio")]
pub mod impl_rodio;
pub mod interface;
