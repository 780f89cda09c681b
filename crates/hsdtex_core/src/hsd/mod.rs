mod archive;
mod bytes;
mod compression;
mod error;
mod file;
mod fsys;
mod gtx;
mod gx;
mod lzss;
mod pkx;
mod scene;
mod texture;

/// Archive header, layout, and symbol tables.
pub use archive::{ArchiveHeader, ArchiveLayout, HsdArchive, Symbol, SymbolTable};
/// Compression detection result.
pub use compression::{Compression, decode_bytes};
/// Error and result aliases.
pub use error::{HsdError, Result, SizeKind};
/// Scene file loading.
pub use file::SceneFile;
/// FSYS package listing.
pub use fsys::{FsysArchive, FsysEntry, FsysFileKind};
/// Standalone GTX texture header.
pub use gtx::parse_gtx;
/// GX enumerations.
pub use gx::{ImageFormat, PaletteFormat, WrapMode};
/// LZSS decompression entry points.
pub use lzss::{LzssVariant, WINDOW_SIZE, WINDOW_START, decompress, decompress_with};
/// PKX wrapper helpers.
pub use pkx::pkx_scene_slice;
/// Scene traversal types and entry points.
pub use scene::{ExtractOptions, ExtractResult, ExtractStats, JointFlags, MAX_TEXTURE_DIMENSION, NodeKind, SCENE_SYMBOL, extract_textures, extract_textures_with};
/// Texture descriptors and decoder hand-off.
pub use texture::{Palette, TextureBlockDecoder, TextureDescriptor, TextureKey, TextureSource, decode_texture};
