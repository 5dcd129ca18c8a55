//! # Encoding Module
//!
//! This module contains the external-collaborator boundary of a search: the
//! encoder trait the loop drives, the WebP implementation, and the file
//! decode/naming helpers around it.

pub mod webp;

// Re-export commonly used types for convenience
pub use webp::{
    decode_image, output_name, AttemptEncoder, EncodedArtifact, WebpEncoder, WEBP_EXTENSION,
    WEBP_MIME,
};
