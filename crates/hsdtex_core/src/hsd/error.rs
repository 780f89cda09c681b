use thiserror::Error;

use crate::hsd::NodeKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, HsdError>;

/// Which declared size disagreed with the observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
	/// Archive header `file_size` versus the buffer length.
	File,
	/// Compressed-size field versus the input length.
	Compressed,
	/// Decompressed-size field versus the produced output length.
	Decompressed,
}

impl SizeKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::File => "file",
			Self::Compressed => "compressed",
			Self::Decompressed => "decompressed",
		}
	}
}

impl std::fmt::Display for SizeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors produced while linking, traversing, and decompressing HSD data.
#[derive(Debug, Error)]
pub enum HsdError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Leading magic did not match the expected format.
	#[error("invalid magic: expected {expected:?}, got {got:?}")]
	InvalidMagic {
		/// Expected magic bytes.
		expected: &'static [u8],
		/// Up to four leading bytes of the input.
		got: [u8; 4],
	},
	/// A declared size disagreed with the actual one.
	#[error("{kind} size mismatch: declared {declared}, actual {actual}")]
	SizeMismatch {
		/// Which size field failed.
		kind: SizeKind,
		/// Value stored in the header.
		declared: u64,
		/// Observed value.
		actual: u64,
	},
	/// Computed archive region boundary disagreed with the stream.
	#[error("archive layout mismatch in {region}: expected boundary {expected}, got {actual}")]
	LayoutMismatch {
		/// Region whose boundary failed the check.
		region: &'static str,
		/// Boundary computed from header counts.
		expected: u64,
		/// Cursor position or buffer length observed.
		actual: u64,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Required public symbol is absent.
	#[error("symbol not found: {name}")]
	MissingSymbol {
		/// Requested symbol name.
		name: String,
	},
	/// Texture object carries no image descriptor.
	#[error("texture object at 0x{offset:08x} has no image data")]
	MissingImageData {
		/// Texture object offset.
		offset: u32,
	},
	/// Paletted texture object carries no palette descriptor.
	#[error("texture object at 0x{offset:08x} requires a palette for {format:?} but has none")]
	MissingPalette {
		/// Texture object offset.
		offset: u32,
		/// Paletted pixel format.
		format: crate::hsd::ImageFormat,
	},
	/// Image dimensions exceed the sanity bound.
	#[error("texture object at 0x{offset:08x} is {width}x{height}, larger than {max}x{max}")]
	DimensionOverflow {
		/// Texture object offset.
		offset: u32,
		/// Declared width.
		width: u32,
		/// Declared height.
		height: u32,
		/// Largest accepted extent.
		max: u32,
	},
	/// Palette entry count exceeds what the pixel format can index.
	#[error("texture object at 0x{offset:08x} has {entries} palette entries, max for {format:?} is {max}")]
	PaletteOverflow {
		/// Texture object offset.
		offset: u32,
		/// Paletted pixel format.
		format: crate::hsd::ImageFormat,
		/// Declared entry count.
		entries: u32,
		/// Largest entry count for the format.
		max: u32,
	},
	/// Node uses a custom class implementation.
	#[error("{kind} at 0x{offset:08x} has unsupported class name offset 0x{class_name:08x}")]
	UnsupportedClass {
		/// Node kind being read.
		kind: NodeKind,
		/// Node offset.
		offset: u32,
		/// Non-zero class name offset.
		class_name: u32,
	},
	/// Joint flags request both particle and spline sub-objects.
	#[error("joint at 0x{offset:08x} is flagged as both particle and spline (flags=0x{flags:08x})")]
	InvalidFlagCombination {
		/// Joint offset.
		offset: u32,
		/// Raw joint flags.
		flags: u32,
	},
	/// Node offset recurred within one traversal.
	#[error("{kind} cycle detected at 0x{offset:08x}")]
	Cycle {
		/// Node kind being traversed.
		kind: NodeKind,
		/// Offset seen twice.
		offset: u32,
	},
	/// Raw GX image format code is not known.
	#[error("unknown image format code 0x{code:x}")]
	UnknownImageFormat {
		/// Raw format code.
		code: u32,
	},
	/// Raw GX palette format code is not known.
	#[error("unknown palette format code 0x{code:x}")]
	UnknownPaletteFormat {
		/// Raw format code.
		code: u32,
	},
	/// Raw GX wrap mode is not known.
	#[error("unknown wrap mode {code}")]
	UnknownWrapMode {
		/// Raw wrap mode.
		code: u32,
	},
	/// PKX header marker is not a supported layout.
	#[error("unsupported pkx header marker 0x{marker:x}")]
	UnsupportedPkxHeader {
		/// Marker at offset 0x1A.
		marker: u16,
	},
}
