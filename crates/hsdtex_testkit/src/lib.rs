//! Shared test helpers for workspace crates.
//!
//! Builders here emit byte-exact HSD archives, scene data segments and LZSS
//! streams so tests never depend on game data.

/// Relocatable archive builder.
pub mod archive;
/// Literal-only LZSS stream builders.
pub mod lzss;
/// Scene node data-segment builder.
pub mod scene;

pub use archive::{ArchiveBuilder, patch_header_word, scene_archive};
pub use scene::{SceneData, TextureObject};
