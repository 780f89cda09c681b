/// Encode `payload` as literal tokens only: one `0xFF` control byte per eight bytes.
pub fn literal_tokens(payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(payload.len() + payload.len().div_ceil(8));
	for chunk in payload.chunks(8) {
		out.push(0xFF);
		out.extend_from_slice(chunk);
	}
	out
}

/// Headerless stream: little-endian decompressed size then tokens.
pub fn headerless(payload: &[u8]) -> Vec<u8> {
	let mut out = (payload.len() as u32).to_le_bytes().to_vec();
	out.extend_from_slice(&literal_tokens(payload));
	out
}

/// `LZSS` stream: big-endian sizes, compressed size counts the whole buffer.
pub fn gs(payload: &[u8]) -> Vec<u8> {
	let tokens = literal_tokens(payload);
	let mut out = Vec::with_capacity(16 + tokens.len());
	out.extend_from_slice(b"LZSS");
	out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
	out.extend_from_slice(&((16 + tokens.len()) as u32).to_be_bytes());
	out.extend_from_slice(&[0; 4]);
	out.extend_from_slice(&tokens);
	out
}

/// `LzS` stream: little-endian sizes, compressed size excludes the header.
pub fn lzs(payload: &[u8]) -> Vec<u8> {
	let tokens = literal_tokens(payload);
	let mut out = Vec::with_capacity(16 + tokens.len());
	out.extend_from_slice(b"LzS\x01");
	out.extend_from_slice(&[0; 4]);
	out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
	out.extend_from_slice(&(tokens.len() as u32).to_le_bytes());
	out.extend_from_slice(&tokens);
	out
}
