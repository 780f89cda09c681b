//! Public library API for recovering textures from HSD scene archives.

/// Archive linking, scene traversal, LZSS decompression, and GX format helpers.
pub mod hsd;
