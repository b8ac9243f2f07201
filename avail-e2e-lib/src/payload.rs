use rand::RngCore;

use crate::primitives::encode_prefixed_hex;

/// `size` random bytes rendered as lowercase hex text. The submission is the
/// text itself, so it reads back as printable characters.
pub fn random_hex_payload(size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes).into_bytes()
}

/// Renders call arguments the way the block scan decodes them.
pub fn join_call_args<'a>(args: impl IntoIterator<Item = &'a [u8]>) -> String {
    args.into_iter()
        .map(encode_prefixed_hex)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Turns a hex string back into text, one character per byte.
///
/// A single leading `0x` is skipped. Chunks are two characters wide, with a
/// trailing odd character read on its own. Each chunk maps to the code point
/// of its value; chunks that are not hex map to `U+0000`.
pub fn decode_hex_argument(hex: &str) -> String {
    let digits: Vec<char> = hex.strip_prefix("0x").unwrap_or(hex).chars().collect();
    digits
        .chunks(2)
        .map(|chunk| {
            if !chunk.iter().all(char::is_ascii_hexdigit) {
                return '\0';
            }
            let chunk: String = chunk.iter().collect();
            u8::from_str_radix(&chunk, 16)
                .map(char::from)
                .unwrap_or('\0')
        })
        .collect()
}
