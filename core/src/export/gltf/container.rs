//! GLB container assembly and `.gltf` buffer embedding

use gltf_json as json;

use crate::error::ForgeResult;

/// GLB magic, "glTF" in little-endian
pub const GLB_MAGIC: u32 = 0x4654_6C67;
/// Chunk type "JSON"
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// Chunk type "BIN\0"
pub const CHUNK_BIN: u32 = 0x004E_4942;

/// Prefix of an embedded `.gltf` buffer URI
pub const DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

/// Assemble GLB binary from JSON and buffer data
///
/// The JSON chunk is padded with spaces and the BIN chunk with zeros so both
/// chunk lengths are multiples of 4. The BIN chunk is omitted for an empty
/// buffer.
pub fn assemble_glb(root: &json::Root, buffer_data: &[u8]) -> ForgeResult<Vec<u8>> {
    let json_string = json::serialize::to_string(root)?;
    let json_bytes = json_string.as_bytes();

    // Pad JSON to 4-byte alignment
    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let json_chunk_length = json_bytes.len() + json_padding;

    // Pad buffer to 4-byte alignment
    let buffer_padding = (4 - (buffer_data.len() % 4)) % 4;
    let buffer_chunk_length = buffer_data.len() + buffer_padding;
    let bin_chunk_total = if buffer_data.is_empty() {
        0
    } else {
        8 + buffer_chunk_length
    };

    // Total file length
    let total_length = 12 + 8 + json_chunk_length + bin_chunk_total;

    let mut glb = Vec::with_capacity(total_length);

    // GLB header
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&2u32.to_le_bytes()); // version
    glb.extend_from_slice(&(total_length as u32).to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&(json_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    glb.extend_from_slice(json_bytes);
    glb.extend(std::iter::repeat_n(b' ', json_padding));

    // Binary chunk
    if !buffer_data.is_empty() {
        glb.extend_from_slice(&(buffer_chunk_length as u32).to_le_bytes());
        glb.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        glb.extend_from_slice(buffer_data);
        glb.extend(std::iter::repeat_n(0u8, buffer_padding));
    }

    Ok(glb)
}

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard base64 with `=` padding (only needed for embedded buffers)
pub fn base64_encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;

        out.push(BASE64_ALPHABET[(triple >> 18) as usize & 0x3F] as char);
        out.push(BASE64_ALPHABET[(triple >> 12) as usize & 0x3F] as char);
        if chunk.len() > 1 {
            out.push(BASE64_ALPHABET[(triple >> 6) as usize & 0x3F] as char);
        } else {
            out.push('=');
        }
        if chunk.len() > 2 {
            out.push(BASE64_ALPHABET[triple as usize & 0x3F] as char);
        } else {
            out.push('=');
        }
    }

    out
}

/// Encode a buffer as a self-contained `data:` URI
pub fn data_uri(buffer_data: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{}", base64_encode(buffer_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_known_vectors() {
        assert_eq!(base64_encode(b""), "");
        assert_eq!(base64_encode(b"f"), "Zg==");
        assert_eq!(base64_encode(b"fo"), "Zm8=");
        assert_eq!(base64_encode(b"foo"), "Zm9v");
        assert_eq!(base64_encode(b"foobar"), "Zm9vYmFy");
        assert_eq!(base64_encode(&[1, 2, 3]), "AQID");
        assert_eq!(base64_encode(&[0xFF, 0xFE]), "//4=");
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(
            data_uri(&[1, 2, 3]),
            "data:application/octet-stream;base64,AQID"
        );
    }

    #[test]
    fn test_magic_spells_gltf() {
        assert_eq!(&GLB_MAGIC.to_le_bytes(), b"glTF");
        assert_eq!(&CHUNK_JSON.to_le_bytes(), b"JSON");
        assert_eq!(&CHUNK_BIN.to_le_bytes(), b"BIN\0");
    }
}
