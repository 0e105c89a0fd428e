//! Artwork resolution: choosing an image variant and naming the saved file.

mod filename;
mod preview;
mod variant;

pub use filename::{
    derive_file_name, sanitize_file_name, sanitize_file_stem, ArtworkOwner, DEFAULT_EXTENSION,
    FALLBACK_FILE_NAME,
};
pub use preview::{DownloadOption, PreviewArtwork, Previewable};
pub use variant::{select_variant, ImageVariant, SizeClass, VariantRequest};
