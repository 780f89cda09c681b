/// Joint flag: child is a shared render target.
pub const JOINT_INSTANCE: u32 = 0x1000;
/// Joint flag: sub-object is a spline.
pub const JOINT_SPLINE: u32 = 0x4000;
/// Joint flag: sub-object is a particle emitter.
pub const JOINT_PARTICLE: u32 = 0x20;

/// Texture object fields that matter for extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureObject {
	/// Next texture object offset.
	pub next: u32,
	/// Texture id word.
	pub id: i32,
	/// Raw S wrap mode.
	pub wrap_s: u32,
	/// Raw T wrap mode.
	pub wrap_t: u32,
	/// S repeat count.
	pub repeat_s: u8,
	/// T repeat count.
	pub repeat_t: u8,
	/// Image descriptor offset.
	pub image: u32,
	/// Palette descriptor offset.
	pub palette: u32,
}

/// Growable data segment with node writers.
///
/// The first word is reserved so no node lands on offset zero.
#[derive(Debug, Clone)]
pub struct SceneData {
	bytes: Vec<u8>,
}

impl Default for SceneData {
	fn default() -> Self {
		Self::new()
	}
}

impl SceneData {
	/// Empty segment with the reserved leading word.
	pub fn new() -> Self {
		Self { bytes: vec![0; 4] }
	}

	/// Offset the next write lands at.
	pub fn offset(&self) -> u32 {
		self.bytes.len() as u32
	}

	/// Append big-endian words, returning their offset.
	pub fn push_words(&mut self, words: &[u32]) -> u32 {
		let at = self.offset();
		for word in words {
			self.bytes.extend_from_slice(&word.to_be_bytes());
		}
		at
	}

	/// Append raw bytes padded to a word boundary, returning their offset.
	pub fn push_bytes(&mut self, bytes: &[u8]) -> u32 {
		let at = self.offset();
		self.bytes.extend_from_slice(bytes);
		while self.bytes.len() % 4 != 0 {
			self.bytes.push(0);
		}
		at
	}

	/// Overwrite the word at `at`.
	pub fn patch_word(&mut self, at: u32, value: u32) {
		let at = at as usize;
		self.bytes[at..at + 4].copy_from_slice(&value.to_be_bytes());
	}

	/// Joint node: class, flags, child, next, sub-object.
	pub fn joint(&mut self, flags: u32, child: u32, next: u32, dobj: u32) -> u32 {
		self.push_words(&[0, flags, child, next, dobj])
	}

	/// Joint node with a custom class name offset.
	pub fn joint_with_class(&mut self, class_name: u32, flags: u32, child: u32, next: u32, dobj: u32) -> u32 {
		self.push_words(&[class_name, flags, child, next, dobj])
	}

	/// Draw object node: class, next, material, mesh.
	pub fn draw_object(&mut self, next: u32, mobj: u32) -> u32 {
		self.push_words(&[0, next, mobj, 0])
	}

	/// Material node: class, render mode, texture object.
	pub fn material(&mut self, tobj: u32) -> u32 {
		self.push_words(&[0, 0, tobj])
	}

	/// Texture object node, 92 bytes.
	pub fn texture_object(&mut self, tobj: TextureObject) -> u32 {
		let at = self.push_words(&[0, tobj.next, tobj.id as u32, 0]);
		let scale = 1.0_f32.to_bits();
		self.push_words(&[0, 0, 0, scale, scale, scale, 0, 0, 0]);
		self.push_words(&[tobj.wrap_s, tobj.wrap_t]);
		self.bytes.extend_from_slice(&[tobj.repeat_s, tobj.repeat_t, 0, 0]);
		self.push_words(&[0, 1.0_f32.to_bits(), 0, tobj.image, tobj.palette, 0, 0]);
		at
	}

	/// Image descriptor: data, width, height, format, mipmap, lod range.
	pub fn image(&mut self, data: u32, width: u16, height: u16, format: u32) -> u32 {
		let at = self.push_words(&[data]);
		self.bytes.extend_from_slice(&width.to_be_bytes());
		self.bytes.extend_from_slice(&height.to_be_bytes());
		self.push_words(&[format, 0, 0, 0]);
		at
	}

	/// Palette descriptor: data, format, name, entry count.
	pub fn palette(&mut self, data: u32, format: u32, entries: u16) -> u32 {
		let at = self.push_words(&[data, format, 0]);
		self.bytes.extend_from_slice(&entries.to_be_bytes());
		self.bytes.extend_from_slice(&[0, 0]);
		at
	}

	/// One model entry per joint plus a zero-terminated array of them.
	pub fn models(&mut self, joints: &[u32]) -> u32 {
		let entries: Vec<u32> = joints.iter().map(|joint| self.push_words(&[*joint])).collect();
		let array = self.push_words(&entries);
		self.push_words(&[0]);
		array
	}

	/// Word holding the model array offset; the `scene_data` target.
	pub fn scene_root(&mut self, model_array: u32) -> u32 {
		self.push_words(&[model_array])
	}

	/// Finish and return the segment bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}
}
