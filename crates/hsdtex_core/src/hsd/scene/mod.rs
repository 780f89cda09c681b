use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, trace};

mod node;

pub use node::JointFlags;

use crate::hsd::bytes::{read_u32_be_at, slice_at};
use crate::hsd::scene::node::{DrawObjectNode, ImageNode, JointNode, MaterialNode, PaletteNode, TextureObjectNode};
use crate::hsd::{HsdArchive, HsdError, ImageFormat, Palette, PaletteFormat, Result, TextureDescriptor, TextureKey, WrapMode};

/// Public symbol pointing at the scene's model array.
pub const SCENE_SYMBOL: &str = "scene_data";
/// Largest accepted texture extent on either axis.
pub const MAX_TEXTURE_DIMENSION: u32 = 2048;

/// Scene node kind, known from the referencing field rather than the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// Joint (`JObj`).
	Joint,
	/// Draw object (`DObj`).
	DrawObject,
	/// Material (`MObj`).
	Material,
	/// Texture object (`TObj`).
	TextureObject,
}

impl NodeKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Joint => "joint",
			Self::DrawObject => "draw object",
			Self::Material => "material",
			Self::TextureObject => "texture object",
		}
	}
}

impl std::fmt::Display for NodeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Scene extraction knobs.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
	/// Public symbol holding the model array pointer.
	pub root_symbol: Arc<str>,
	/// Largest accepted texture width or height.
	pub max_dimension: u32,
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			root_symbol: Arc::<str>::from(SCENE_SYMBOL),
			max_dimension: MAX_TEXTURE_DIMENSION,
		}
	}
}

/// Node visit counters from one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
	/// Model entries walked.
	pub models: usize,
	/// Joints visited.
	pub joints: usize,
	/// Draw objects visited.
	pub draw_objects: usize,
	/// Materials visited.
	pub materials: usize,
	/// Texture objects visited.
	pub texture_objects: usize,
	/// Texture objects skipped as repeats of an earlier texture.
	pub duplicates: usize,
}

/// Unique textures in first-discovery order plus visit counters.
#[derive(Debug, Clone)]
pub struct ExtractResult {
	/// Deduplicated textures.
	pub textures: Vec<TextureDescriptor>,
	/// Visit counters.
	pub stats: ExtractStats,
}

/// Extract textures using default options.
pub fn extract_textures(archive: &HsdArchive) -> Result<ExtractResult> {
	extract_textures_with(archive, &ExtractOptions::default())
}

/// Walk every model under the root symbol and collect unique textures.
pub fn extract_textures_with(archive: &HsdArchive, options: &ExtractOptions) -> Result<ExtractResult> {
	let root = archive.require_public(&options.root_symbol)?;

	let mut extractor = Extractor {
		data: archive.data(),
		options,
		seen: HashSet::new(),
		textures: Vec::new(),
		stats: ExtractStats::default(),
	};
	extractor.models(root)?;

	debug!(textures = extractor.textures.len(), stats = ?extractor.stats, "scene extracted");
	Ok(ExtractResult {
		textures: extractor.textures,
		stats: extractor.stats,
	})
}

/// BFS work queue that rejects an offset seen twice.
struct NodeQueue {
	kind: NodeKind,
	pending: VecDeque<u32>,
	visited: HashSet<u32>,
}

impl NodeQueue {
	fn new(kind: NodeKind, start: u32) -> Result<Self> {
		let mut queue = Self {
			kind,
			pending: VecDeque::new(),
			visited: HashSet::new(),
		};
		queue.push(start)?;
		Ok(queue)
	}

	fn push(&mut self, offset: u32) -> Result<()> {
		if !self.visited.insert(offset) {
			return Err(HsdError::Cycle { kind: self.kind, offset });
		}
		self.pending.push_back(offset);
		Ok(())
	}

	fn pop(&mut self) -> Option<u32> {
		self.pending.pop_front()
	}
}

struct Extractor<'a> {
	data: &'a [u8],
	options: &'a ExtractOptions,
	seen: HashSet<TextureKey>,
	textures: Vec<TextureDescriptor>,
	stats: ExtractStats,
}

impl Extractor<'_> {
	fn models(&mut self, root: u32) -> Result<()> {
		let array = read_u32_be_at(self.data, root)?;
		if array == 0 {
			return Ok(());
		}

		let mut slot = array;
		loop {
			let model = read_u32_be_at(self.data, slot)?;
			if model == 0 {
				return Ok(());
			}

			self.stats.models += 1;
			let joint = read_u32_be_at(self.data, model)?;
			trace!(model, joint, "model");
			if joint != 0 {
				self.joints(joint)?;
			}

			slot = slot.checked_add(4).ok_or(HsdError::UnexpectedEof {
				at: slot as usize,
				need: 4,
				rem: 0,
			})?;
		}
	}

	fn joints(&mut self, start: u32) -> Result<()> {
		let mut queue = NodeQueue::new(NodeKind::Joint, start)?;
		while let Some(offset) = queue.pop() {
			let joint = JointNode::read(self.data, offset)?;
			self.stats.joints += 1;
			trace!(offset, flags = joint.flags.bits(), "joint");

			if joint.child != 0 && !joint.flags.contains(JointFlags::INSTANCE) {
				queue.push(joint.child)?;
			}
			if joint.next != 0 {
				queue.push(joint.next)?;
			}

			if joint.subobject == 0 {
				continue;
			}

			let particle = joint.flags.contains(JointFlags::PARTICLE);
			let spline = joint.flags.contains(JointFlags::SPLINE);
			match (particle, spline) {
				(false, false) => self.draw_objects(joint.subobject)?,
				(true, true) => {
					return Err(HsdError::InvalidFlagCombination {
						offset,
						flags: joint.flags.bits(),
					});
				}
				// Particle and spline sub-objects hold no texture references.
				_ => {}
			}
		}
		Ok(())
	}

	fn draw_objects(&mut self, start: u32) -> Result<()> {
		let mut queue = NodeQueue::new(NodeKind::DrawObject, start)?;
		while let Some(offset) = queue.pop() {
			let dobj = DrawObjectNode::read(self.data, offset)?;
			self.stats.draw_objects += 1;
			trace!(offset, "draw object");

			if dobj.next != 0 {
				queue.push(dobj.next)?;
			}
			if dobj.material != 0 {
				self.material(dobj.material)?;
			}
		}
		Ok(())
	}

	fn material(&mut self, offset: u32) -> Result<()> {
		let mobj = MaterialNode::read(self.data, offset)?;
		self.stats.materials += 1;
		trace!(offset, "material");

		if mobj.texture != 0 {
			self.texture_objects(mobj.texture)?;
		}
		Ok(())
	}

	fn texture_objects(&mut self, start: u32) -> Result<()> {
		let mut queue = NodeQueue::new(NodeKind::TextureObject, start)?;
		while let Some(offset) = queue.pop() {
			let tobj = TextureObjectNode::read(self.data, offset)?;
			self.stats.texture_objects += 1;
			trace!(offset, "texture object");

			if tobj.next != 0 {
				queue.push(tobj.next)?;
			}
			self.texture(offset, &tobj)?;
		}
		Ok(())
	}

	fn texture(&mut self, offset: u32, tobj: &TextureObjectNode) -> Result<()> {
		if tobj.image == 0 {
			return Err(HsdError::MissingImageData { offset });
		}

		let image = ImageNode::read(self.data, tobj.image)?;
		let max = self.options.max_dimension;
		if image.width > max || image.height > max {
			return Err(HsdError::DimensionOverflow {
				offset,
				width: image.width,
				height: image.height,
				max,
			});
		}

		let format = ImageFormat::from_code(image.format)?;
		let palette = if format.is_paletted() {
			if tobj.palette == 0 {
				return Err(HsdError::MissingPalette { offset, format });
			}

			let tlut = PaletteNode::read(self.data, tobj.palette)?;
			let max = format.max_palette_entries();
			if tlut.entries > max {
				return Err(HsdError::PaletteOverflow {
					offset,
					format,
					entries: tlut.entries,
					max,
				});
			}
			Some(tlut)
		} else {
			None
		};

		let key = TextureKey {
			width: image.width,
			height: image.height,
			format,
			palette_format: match &palette {
				Some(tlut) => PaletteFormat::from_code(tlut.format)?,
				None => PaletteFormat::default(),
			},
			data_offset: image.data,
			palette_offset: palette.as_ref().map_or(0, |tlut| tlut.data),
		};

		if !self.seen.insert(key) {
			self.stats.duplicates += 1;
			trace!(offset, "texture already collected");
			return Ok(());
		}

		let palette = match palette {
			Some(tlut) => Some(Palette {
				format: key.palette_format,
				entry_count: tlut.entries,
				data_offset: tlut.data,
				data: slice_at(self.data, tlut.data, tlut.entries as usize * PaletteFormat::ENTRY_SIZE)?.to_vec(),
			}),
			None => None,
		};

		let descriptor = TextureDescriptor {
			width: image.width,
			height: image.height,
			format,
			data_offset: image.data,
			palette,
			wrap_s: WrapMode::from_code(tobj.wrap_s)?,
			wrap_t: WrapMode::from_code(tobj.wrap_t)?,
			repeat_s: tobj.repeat_s,
			repeat_t: tobj.repeat_t,
			texture_id: tobj.id,
			source_offset: offset,
		};
		debug!(offset, width = descriptor.width, height = descriptor.height, format = format.as_str(), "texture collected");
		self.textures.push(descriptor);
		Ok(())
	}
}

#[cfg(test)]
mod tests;
