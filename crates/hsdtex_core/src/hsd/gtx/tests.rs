use crate::hsd::{HsdError, ImageFormat, PaletteFormat, WrapMode, parse_gtx};

fn gtx(width: u16, height: u16, format: u32, palette_format: u32, palette_offset: u32) -> Vec<u8> {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&width.to_be_bytes());
	bytes.extend_from_slice(&height.to_be_bytes());
	bytes.extend_from_slice(&[0, 1, 0, 0]);
	for word in [format, palette_format, 1, 2] {
		bytes.extend_from_slice(&word.to_be_bytes());
	}
	bytes.resize(0x28, 0);
	bytes.extend_from_slice(&0x60_u32.to_be_bytes());
	bytes.resize(0x48, 0);
	bytes.extend_from_slice(&palette_offset.to_be_bytes());
	bytes.resize(0x60, 0);
	bytes
}

#[test]
fn direct_colour_texture_has_no_palette() {
	let mut bytes = gtx(4, 4, 0x45, 0, 0);
	bytes.resize(0x60 + 64, 0xEE);

	let texture = parse_gtx(&bytes).expect("gtx parses");
	assert_eq!(texture.format, ImageFormat::RGBA32);
	assert_eq!((texture.width, texture.height), (4, 4));
	assert_eq!(texture.data_offset, 0x60);
	assert_eq!(texture.wrap_s, WrapMode::Repeat);
	assert_eq!(texture.wrap_t, WrapMode::Mirror);
	assert!(texture.palette.is_none());
	assert_eq!(texture.source(&bytes).expect("pixels in range").raw.len(), 64);
}

#[test]
fn c4_texture_reads_full_sixteen_entry_palette() {
	let mut bytes = gtx(8, 8, 0x00, 0x03, 0x80);
	bytes.resize(0x80, 0);
	bytes.extend((0..32).map(|idx| idx as u8));

	let texture = parse_gtx(&bytes).expect("gtx parses");
	let palette = texture.palette.expect("paletted");
	assert_eq!(texture.format, ImageFormat::C4);
	assert_eq!(palette.format, PaletteFormat::RGB5A3);
	assert_eq!(palette.entry_count, 16);
	assert_eq!(palette.data.len(), 32);
	assert_eq!(palette.data[31], 31);
}

#[test]
fn c14x2_texture_reads_1024_entry_palette() {
	let mut bytes = gtx(4, 4, 0x30, 0x01, 0x80);
	bytes.resize(0x80 + 0x800, 0x5A);

	let texture = parse_gtx(&bytes).expect("gtx parses");
	assert_eq!(texture.format, ImageFormat::C14X2);
	let palette = texture.palette.expect("paletted");
	assert_eq!(palette.format, PaletteFormat::IA8);
	assert_eq!(palette.entry_count, 0x400);
	assert_eq!(palette.data.len(), 0x800);
}

#[test]
fn unknown_gtx_format_is_rejected() {
	let bytes = gtx(4, 4, 0x77, 0, 0);
	assert!(matches!(parse_gtx(&bytes), Err(HsdError::UnknownImageFormat { code: 0x77 })));
}
