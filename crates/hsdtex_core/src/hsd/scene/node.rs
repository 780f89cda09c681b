use bitflags::bitflags;

use crate::hsd::bytes::Cursor;
use crate::hsd::{HsdError, NodeKind, Result};

bitflags! {
	/// Joint flag bits relevant to traversal.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct JointFlags: u32 {
		/// Sub-object is a particle emitter.
		const PARTICLE = 0x20;
		/// Child joint is a shared render target, not an owned subtree.
		const INSTANCE = 0x1000;
		/// Sub-object is a spline.
		const SPLINE = 0x4000;
	}
}

/// Joint fields read during traversal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct JointNode {
	pub flags: JointFlags,
	pub child: u32,
	pub next: u32,
	pub subobject: u32,
}

impl JointNode {
	pub fn read(data: &[u8], offset: u32) -> Result<Self> {
		let mut cursor = node_cursor(data, offset, NodeKind::Joint)?;
		let raw_flags = cursor.read_u32_be()?;
		Ok(Self {
			flags: JointFlags::from_bits_retain(raw_flags),
			child: cursor.read_u32_be()?,
			next: cursor.read_u32_be()?,
			subobject: cursor.read_u32_be()?,
		})
	}
}

/// Draw object fields read during traversal. The mesh pointer is skipped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DrawObjectNode {
	pub next: u32,
	pub material: u32,
}

impl DrawObjectNode {
	pub fn read(data: &[u8], offset: u32) -> Result<Self> {
		let mut cursor = node_cursor(data, offset, NodeKind::DrawObject)?;
		Ok(Self {
			next: cursor.read_u32_be()?,
			material: cursor.read_u32_be()?,
		})
	}
}

/// Material fields read during traversal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MaterialNode {
	pub texture: u32,
}

impl MaterialNode {
	pub fn read(data: &[u8], offset: u32) -> Result<Self> {
		let mut cursor = node_cursor(data, offset, NodeKind::Material)?;
		let _render_mode = cursor.read_u32_be()?;
		Ok(Self {
			texture: cursor.read_u32_be()?,
		})
	}
}

/// Texture object fields read during traversal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextureObjectNode {
	pub next: u32,
	pub id: i32,
	pub wrap_s: u32,
	pub wrap_t: u32,
	pub repeat_s: u8,
	pub repeat_t: u8,
	pub image: u32,
	pub palette: u32,
}

impl TextureObjectNode {
	// src word plus rotation, scale and translation vectors.
	const TRANSFORM_LEN: usize = 4 + 9 * 4;
	// flags, blending and magnification filter.
	const FILTER_LEN: usize = 3 * 4;

	/// Texture objects do not carry the must-be-zero class check.
	pub fn read(data: &[u8], offset: u32) -> Result<Self> {
		let mut cursor = Cursor::at(data, offset as usize)?;
		let _class_name = cursor.read_u32_be()?;
		let next = cursor.read_u32_be()?;
		let id = cursor.read_i32_be()?;
		cursor.skip(Self::TRANSFORM_LEN)?;
		let wrap_s = cursor.read_u32_be()?;
		let wrap_t = cursor.read_u32_be()?;
		let repeat_s = cursor.read_u8()?;
		let repeat_t = cursor.read_u8()?;
		let _padding = cursor.read_u16_be()?;
		cursor.skip(Self::FILTER_LEN)?;
		let image = cursor.read_u32_be()?;
		let palette = cursor.read_u32_be()?;

		Ok(Self {
			next,
			id,
			wrap_s,
			wrap_t,
			repeat_s,
			repeat_t,
			image,
			palette,
		})
	}
}

/// Image descriptor fields.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ImageNode {
	pub data: u32,
	pub width: u32,
	pub height: u32,
	pub format: u32,
}

impl ImageNode {
	pub fn read(data: &[u8], offset: u32) -> Result<Self> {
		let mut cursor = Cursor::at(data, offset as usize)?;
		Ok(Self {
			data: cursor.read_u32_be()?,
			width: u32::from(cursor.read_u16_be()?),
			height: u32::from(cursor.read_u16_be()?),
			format: cursor.read_u32_be()?,
		})
	}
}

/// Palette (TLUT) descriptor fields.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PaletteNode {
	pub data: u32,
	pub format: u32,
	pub entries: u32,
}

impl PaletteNode {
	pub fn read(data: &[u8], offset: u32) -> Result<Self> {
		let mut cursor = Cursor::at(data, offset as usize)?;
		let palette_data = cursor.read_u32_be()?;
		let format = cursor.read_u32_be()?;
		let _name = cursor.read_u32_be()?;
		Ok(Self {
			data: palette_data,
			format,
			entries: u32::from(cursor.read_u16_be()?),
		})
	}
}

/// Position a cursor after a node's class name, which must be zero.
fn node_cursor(data: &[u8], offset: u32, kind: NodeKind) -> Result<Cursor<'_>> {
	let mut cursor = Cursor::at(data, offset as usize)?;
	let class_name = cursor.read_u32_be()?;
	if class_name != 0 {
		return Err(HsdError::UnsupportedClass { kind, offset, class_name });
	}
	Ok(cursor)
}
