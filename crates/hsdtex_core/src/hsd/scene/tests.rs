use std::collections::HashSet;
use std::sync::Arc;

use hsdtex_testkit::scene::{JOINT_INSTANCE, JOINT_PARTICLE, JOINT_SPLINE};
use hsdtex_testkit::{ArchiveBuilder, SceneData, TextureObject, scene_archive};

use crate::hsd::{
	ExtractOptions, HsdArchive, HsdError, ImageFormat, NodeKind, PaletteFormat, WrapMode, extract_textures, extract_textures_with,
};

const RGB5A3: u32 = 0x05;
const C4: u32 = 0x08;
const C8: u32 = 0x09;
const CMPR: u32 = 0x0E;

/// Material -> texture object chain for one image/palette pair.
fn material(data: &mut SceneData, image: u32, palette: u32) -> u32 {
	let tobj = data.texture_object(TextureObject {
		image,
		palette,
		wrap_s: 1,
		wrap_t: 2,
		repeat_s: 2,
		repeat_t: 3,
		id: 7,
		..TextureObject::default()
	});
	data.material(tobj)
}

/// Joint whose draw object references `image`.
fn textured_joint(data: &mut SceneData, flags: u32, child: u32, next: u32, image: u32, palette: u32) -> u32 {
	let mobj = material(data, image, palette);
	let dobj = data.draw_object(0, mobj);
	data.joint(flags, child, next, dobj)
}

fn link(mut data: SceneData, joints: &[u32]) -> HsdArchive {
	let models = data.models(joints);
	let root = data.scene_root(models);
	let bytes = scene_archive(data, root);
	HsdArchive::read(&bytes).expect("archive links")
}

fn assert_unique(textures: &[crate::hsd::TextureDescriptor]) {
	let keys: HashSet<_> = textures.iter().map(|texture| texture.key()).collect();
	assert_eq!(keys.len(), textures.len(), "duplicate texture keys in output");
}

#[test]
fn single_joint_chain_yields_descriptor() {
	let mut data = SceneData::new();
	let pixels = data.push_bytes(&[0x11; 64]);
	let image = data.image(pixels, 8, 4, RGB5A3);
	let joint = textured_joint(&mut data, 0, 0, 0, image, 0);
	let archive = link(data, &[joint]);

	let result = extract_textures(&archive).expect("extract succeeds");
	assert_eq!(result.textures.len(), 1);

	let texture = &result.textures[0];
	assert_eq!((texture.width, texture.height), (8, 4));
	assert_eq!(texture.format, ImageFormat::RGB5A3);
	assert_eq!(texture.data_offset, pixels);
	assert!(texture.palette.is_none());
	assert_eq!(texture.wrap_s, WrapMode::Repeat);
	assert_eq!(texture.wrap_t, WrapMode::Mirror);
	assert_eq!((texture.repeat_s, texture.repeat_t), (2, 3));
	assert_eq!(texture.texture_id, 7);
	assert_eq!(texture.encoded_size(), 64);
	assert_eq!(texture.source(archive.data()).expect("pixels in range").raw, &[0x11; 64]);

	assert_eq!(result.stats.models, 1);
	assert_eq!(result.stats.joints, 1);
	assert_eq!(result.stats.draw_objects, 1);
	assert_eq!(result.stats.materials, 1);
	assert_eq!(result.stats.texture_objects, 1);
	assert_eq!(result.stats.duplicates, 0);
}

#[test]
fn paletted_texture_reads_two_bytes_per_entry() {
	let mut data = SceneData::new();
	let colours = data.push_bytes(&(0..12).collect::<Vec<u8>>());
	let pixels = data.push_bytes(&[0; 32]);
	let tlut = data.palette(colours, 1, 6);
	let image = data.image(pixels, 8, 4, C8);
	let joint = textured_joint(&mut data, 0, 0, 0, image, tlut);
	let archive = link(data, &[joint]);

	let result = extract_textures(&archive).expect("extract succeeds");
	let palette = result.textures[0].palette.as_ref().expect("palette present");
	assert_eq!(palette.format, PaletteFormat::RGB565);
	assert_eq!(palette.entry_count, 6);
	assert_eq!(palette.data_offset, colours);
	assert_eq!(palette.data, (0..12).collect::<Vec<u8>>());
}

#[test]
fn repeated_references_are_collapsed_in_discovery_order() {
	let mut data = SceneData::new();
	let pixels_a = data.push_bytes(&[0; 32]);
	let pixels_b = data.push_bytes(&[0; 32]);
	let image_a = data.image(pixels_a, 8, 8, CMPR);
	let image_a_copy = data.image(pixels_a, 8, 8, CMPR);
	let image_b = data.image(pixels_b, 8, 8, CMPR);

	let third = data.texture_object(TextureObject {
		image: image_b,
		..TextureObject::default()
	});
	let second = data.texture_object(TextureObject {
		image: image_a_copy,
		next: third,
		..TextureObject::default()
	});
	let first = data.texture_object(TextureObject {
		image: image_a,
		next: second,
		..TextureObject::default()
	});
	let mobj = data.material(first);
	let dobj = data.draw_object(0, mobj);
	let joint = data.joint(0, 0, 0, dobj);
	let archive = link(data, &[joint]);

	let result = extract_textures(&archive).expect("extract succeeds");
	assert_eq!(result.textures.len(), 2);
	assert_eq!(result.textures[0].data_offset, pixels_a);
	assert_eq!(result.textures[0].source_offset, first);
	assert_eq!(result.textures[1].data_offset, pixels_b);
	assert_eq!(result.stats.texture_objects, 3);
	assert_eq!(result.stats.duplicates, 1);
	assert_unique(&result.textures);
}

#[test]
fn same_pixels_with_different_palettes_stay_distinct() {
	let mut data = SceneData::new();
	let pixels = data.push_bytes(&[0; 32]);
	let colours_a = data.push_bytes(&[1; 32]);
	let colours_b = data.push_bytes(&[2; 32]);
	let tlut_a = data.palette(colours_a, 2, 16);
	let tlut_b = data.palette(colours_b, 2, 16);
	let image = data.image(pixels, 8, 8, C4);
	let joint_b = textured_joint(&mut data, 0, 0, 0, image, tlut_b);
	let joint_a = textured_joint(&mut data, 0, 0, joint_b, image, tlut_a);
	let archive = link(data, &[joint_a]);

	let result = extract_textures(&archive).expect("extract succeeds");
	assert_eq!(result.textures.len(), 2);
	assert_unique(&result.textures);
}

#[test]
fn models_sharing_a_skeleton_extract_once() {
	let mut data = SceneData::new();
	let pixels = data.push_bytes(&[0; 32]);
	let image = data.image(pixels, 8, 8, CMPR);
	let joint = textured_joint(&mut data, 0, 0, 0, image, 0);
	let archive = link(data, &[joint, joint]);

	let result = extract_textures(&archive).expect("extract succeeds");
	assert_eq!(result.stats.models, 2);
	assert_eq!(result.textures.len(), 1);
	assert_eq!(result.stats.duplicates, 1);
}

#[test]
fn joints_are_visited_breadth_first() {
	let mut data = SceneData::new();
	let pixels: Vec<u32> = (0..4).map(|_| data.push_bytes(&[0; 32])).collect();
	let images: Vec<u32> = pixels.iter().map(|pixels| data.image(*pixels, 8, 8, CMPR)).collect();

	// root -> child (-> grandchild), root -> next
	let grandchild = textured_joint(&mut data, 0, 0, 0, images[3], 0);
	let child = textured_joint(&mut data, 0, grandchild, 0, images[1], 0);
	let next = textured_joint(&mut data, 0, 0, 0, images[2], 0);
	let root = textured_joint(&mut data, 0, child, next, images[0], 0);
	let archive = link(data, &[root]);

	let result = extract_textures(&archive).expect("extract succeeds");
	let order: Vec<u32> = result.textures.iter().map(|texture| texture.data_offset).collect();
	assert_eq!(order, pixels);
}

#[test]
fn instance_child_is_never_visited() {
	let mut data = SceneData::new();
	let poisoned = data.joint_with_class(0xDEAD, 0, 0, 0, 0);
	let pixels = data.push_bytes(&[0; 32]);
	let image = data.image(pixels, 8, 8, CMPR);
	let joint = textured_joint(&mut data, JOINT_INSTANCE, poisoned, 0, image, 0);
	let archive = link(data, &[joint]);

	let result = extract_textures(&archive).expect("instance child skipped");
	assert_eq!(result.stats.joints, 1);
	assert_eq!(result.textures.len(), 1);
}

#[test]
fn owned_child_with_custom_class_is_rejected() {
	let mut data = SceneData::new();
	let poisoned = data.joint_with_class(0xDEAD, 0, 0, 0, 0);
	let joint = data.joint(0, poisoned, 0, 0);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("custom class unsupported");
	assert!(matches!(
		err,
		HsdError::UnsupportedClass {
			kind: NodeKind::Joint,
			class_name: 0xDEAD,
			..
		}
	));
}

#[test]
fn draw_object_with_custom_class_is_rejected() {
	let mut data = SceneData::new();
	let dobj = data.push_words(&[0xDEAD, 0, 0, 0]);
	let joint = data.joint(0, 0, 0, dobj);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("custom class unsupported");
	assert!(matches!(
		err,
		HsdError::UnsupportedClass {
			kind: NodeKind::DrawObject,
			class_name: 0xDEAD,
			offset,
		} if offset == dobj
	));
}

#[test]
fn material_with_custom_class_is_rejected() {
	let mut data = SceneData::new();
	let mobj = data.push_words(&[0xDEAD, 0, 0]);
	let dobj = data.draw_object(0, mobj);
	let joint = data.joint(0, 0, 0, dobj);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("custom class unsupported");
	assert!(matches!(
		err,
		HsdError::UnsupportedClass {
			kind: NodeKind::Material,
			class_name: 0xDEAD,
			offset,
		} if offset == mobj
	));
}

#[test]
fn particle_and_spline_subobjects_are_skipped() {
	let mut data = SceneData::new();
	let garbage = data.push_words(&[0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF]);
	let spline = data.joint(JOINT_SPLINE, 0, 0, garbage);
	let particle = data.joint(JOINT_PARTICLE, 0, spline, garbage);
	let archive = link(data, &[particle]);

	let result = extract_textures(&archive).expect("sub-objects ignored");
	assert_eq!(result.stats.joints, 2);
	assert_eq!(result.stats.draw_objects, 0);
	assert!(result.textures.is_empty());
}

#[test]
fn particle_plus_spline_is_invalid() {
	let mut data = SceneData::new();
	let dobj = data.draw_object(0, 0);
	let joint = data.joint(JOINT_PARTICLE | JOINT_SPLINE, 0, 0, dobj);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("conflicting flags");
	assert!(matches!(err, HsdError::InvalidFlagCombination { offset, flags } if offset == joint && flags == 0x4020));
}

#[test]
fn particle_plus_spline_without_subobject_is_accepted() {
	let mut data = SceneData::new();
	let joint = data.joint(JOINT_PARTICLE | JOINT_SPLINE, 0, 0, 0);
	let archive = link(data, &[joint]);
	assert!(extract_textures(&archive).expect("nothing to dispatch").textures.is_empty());
}

#[test]
fn dimension_bound_is_inclusive() {
	for (width, height, ok) in [(2048, 2048, true), (2049, 8, false), (8, 2049, false)] {
		let mut data = SceneData::new();
		let image = data.image(0x100, width, height, CMPR);
		let joint = textured_joint(&mut data, 0, 0, 0, image, 0);
		let archive = link(data, &[joint]);

		let result = extract_textures(&archive);
		if ok {
			assert_eq!(result.expect("2048 accepted").textures[0].width, 2048);
		} else {
			assert!(matches!(result, Err(HsdError::DimensionOverflow { max: 2048, .. })));
		}
	}
}

#[test]
fn custom_dimension_bound_applies() {
	let mut data = SceneData::new();
	let image = data.image(0x100, 64, 64, CMPR);
	let joint = textured_joint(&mut data, 0, 0, 0, image, 0);
	let archive = link(data, &[joint]);

	let options = ExtractOptions {
		max_dimension: 32,
		..ExtractOptions::default()
	};
	let err = extract_textures_with(&archive, &options).expect_err("64 exceeds 32");
	assert!(matches!(err, HsdError::DimensionOverflow { width: 64, height: 64, max: 32, .. }));
}

#[test]
fn missing_image_descriptor_is_fatal() {
	let mut data = SceneData::new();
	let joint = textured_joint(&mut data, 0, 0, 0, 0, 0);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("image required");
	assert!(matches!(err, HsdError::MissingImageData { .. }));
}

#[test]
fn paletted_format_without_palette_is_fatal() {
	let mut data = SceneData::new();
	let image = data.image(0x100, 8, 8, C4);
	let joint = textured_joint(&mut data, 0, 0, 0, image, 0);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("palette required");
	assert!(matches!(err, HsdError::MissingPalette { format: ImageFormat::C4, .. }));
}

#[test]
fn palette_larger_than_index_range_is_fatal() {
	let mut data = SceneData::new();
	let colours = data.push_bytes(&[0; 34]);
	let tlut = data.palette(colours, 0, 17);
	let image = data.image(0x100, 8, 8, C4);
	let joint = textured_joint(&mut data, 0, 0, 0, image, tlut);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("17 entries exceed C4");
	assert!(matches!(err, HsdError::PaletteOverflow { entries: 17, max: 16, .. }));
}

#[test]
fn missing_scene_symbol_fails_before_reading_nodes() {
	let bytes = ArchiveBuilder::new(Vec::new()).public("camera", 0).build();
	let archive = HsdArchive::read(&bytes).expect("archive links");

	let err = extract_textures(&archive).expect_err("scene_data absent");
	assert!(matches!(err, HsdError::MissingSymbol { ref name } if name == "scene_data"));
}

#[test]
fn custom_root_symbol_is_honoured() {
	let mut data = SceneData::new();
	let models = data.models(&[]);
	let root = data.scene_root(models);
	let bytes = ArchiveBuilder::new(data.into_bytes()).public("map_data", root).build();
	let archive = HsdArchive::read(&bytes).expect("archive links");

	assert!(extract_textures(&archive).is_err());
	let options = ExtractOptions {
		root_symbol: Arc::<str>::from("map_data"),
		..ExtractOptions::default()
	};
	assert!(extract_textures_with(&archive, &options).expect("map root").textures.is_empty());
}

#[test]
fn null_model_array_yields_nothing() {
	let mut data = SceneData::new();
	let root = data.scene_root(0);
	let archive = HsdArchive::read(&scene_archive(data, root)).expect("archive links");

	let result = extract_textures(&archive).expect("empty scene");
	assert!(result.textures.is_empty());
	assert_eq!(result.stats.models, 0);
}

#[test]
fn texture_object_self_loop_is_a_cycle() {
	let mut data = SceneData::new();
	let image = data.image(0x100, 8, 8, CMPR);
	let tobj = data.texture_object(TextureObject {
		image,
		..TextureObject::default()
	});
	// next field sits one word into the node
	data.patch_word(tobj + 4, tobj);
	let mobj = data.material(tobj);
	let dobj = data.draw_object(0, mobj);
	let joint = data.joint(0, 0, 0, dobj);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("self loop");
	assert!(matches!(err, HsdError::Cycle { kind: NodeKind::TextureObject, offset } if offset == tobj));
}

#[test]
fn draw_object_self_loop_is_a_cycle() {
	let mut data = SceneData::new();
	let dobj = data.draw_object(0, 0);
	data.patch_word(dobj + 4, dobj);
	let joint = data.joint(0, 0, 0, dobj);
	let archive = link(data, &[joint]);

	let err = extract_textures(&archive).expect_err("self loop");
	assert!(matches!(err, HsdError::Cycle { kind: NodeKind::DrawObject, .. }));
}

#[test]
fn joint_sibling_loop_is_a_cycle() {
	let mut data = SceneData::new();
	let second = data.joint(0, 0, 0, 0);
	let first = data.joint(0, 0, second, 0);
	// second.next -> first
	data.patch_word(second + 12, first);
	let archive = link(data, &[first]);

	let err = extract_textures(&archive).expect_err("two-node loop");
	assert!(matches!(err, HsdError::Cycle { kind: NodeKind::Joint, offset } if offset == first));
}

#[test]
fn child_pointing_back_at_parent_is_a_cycle() {
	let mut data = SceneData::new();
	let child = data.joint(0, 0, 0, 0);
	let parent = data.joint(0, child, 0, 0);
	data.patch_word(child + 8, parent);
	let archive = link(data, &[parent]);

	assert!(matches!(extract_textures(&archive), Err(HsdError::Cycle { kind: NodeKind::Joint, .. })));
}

#[test]
fn node_offset_past_segment_end_is_eof() {
	let mut data = SceneData::new();
	let joint = data.joint(0, 0x7FFF_0000, 0, 0);
	let archive = link(data, &[joint]);

	assert!(matches!(extract_textures(&archive), Err(HsdError::UnexpectedEof { .. })));
}
