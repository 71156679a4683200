//! Base32 codec for TOTP shared secrets.
//!
//! Uses the RFC 4648 alphabet without padding, which is what authenticator apps
//! expect in `otpauth://` URIs. Decoding is lenient: anything outside the
//! alphabet (spaces, dashes, `=` padding) is skipped instead of rejected.

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Encode raw bytes as unpadded Base32 text
pub fn encode(input: &[u8]) -> String {
    let mut output = String::with_capacity((input.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for &byte in input {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;

        while bits >= 5 {
            let index = (buffer >> (bits - 5)) & 0x1F;
            output.push(ALPHABET[index as usize] as char);
            bits -= 5;
        }
        // keep only the bits still pending
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        let index = (buffer << (5 - bits)) & 0x1F;
        output.push(ALPHABET[index as usize] as char);
    }

    output
}

/// Decode Base32 text, ignoring case and any character outside the alphabet
pub fn decode(input: &str) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for c in input.chars() {
        let Some(value) = symbol_value(c.to_ascii_uppercase()) else {
            continue;
        };

        buffer = (buffer << 5) | value;
        bits += 5;

        if bits >= 8 {
            output.push(((buffer >> (bits - 8)) & 0xFF) as u8);
            bits -= 8;
            buffer &= (1 << bits) - 1;
        }
    }

    output
}

fn symbol_value(c: char) -> Option<u32> {
    match c {
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        '2'..='7' => Some(c as u32 - '2' as u32 + 26),
        _ => None,
    }
}
