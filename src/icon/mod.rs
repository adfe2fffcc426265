pub mod encoder;
pub mod store;

pub use encoder::{decode_image, encode_icon, IconArtifact};
pub use store::{CleanupFailure, IconStore};
