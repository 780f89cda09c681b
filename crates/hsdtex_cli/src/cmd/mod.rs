/// LZSS decompression command.
pub mod decompress;
/// FSYS package listing and extraction command.
pub mod fsys;
/// Archive header and symbol command.
pub mod info;
/// Texture listing command.
pub mod textures;
/// Shared output helpers.
pub(crate) mod util;
