use crate::error::DerError;

pub(crate) fn decode_array_uint8(mut bytes: &[u8]) -> Result<u64, DerError> {
    // Check if MSB is set *before* leading zeroes
    if is_highest_bit_set(bytes) {
        return Err(DerError::IntegerNegative);
    }

    if bytes.len() > 9 {
        return Err(DerError::IntegerTooLarge);
    } else if bytes.len() == 9 {
        if bytes[0] != 0 {
            return Err(DerError::IntegerTooLarge);
        }
        bytes = &bytes[1..];
    }

    // Input has leading zeroes removed, so we need to add them back
    let mut output = [0u8; 8];
    output[8_usize.saturating_sub(bytes.len())..].copy_from_slice(bytes);
    Ok(u64::from_be_bytes(output))
}

pub(crate) fn decode_array_uint4(mut bytes: &[u8]) -> Result<u32, DerError> {
    if is_highest_bit_set(bytes) {
        return Err(DerError::IntegerNegative);
    }

    if bytes.len() > 5 {
        return Err(DerError::IntegerTooLarge);
    } else if bytes.len() == 5 {
        if bytes[0] != 0 {
            return Err(DerError::IntegerTooLarge);
        }
        bytes = &bytes[1..];
    }

    let mut output = [0u8; 4];
    output[4_usize.saturating_sub(bytes.len())..].copy_from_slice(bytes);
    Ok(u32::from_be_bytes(output))
}

pub(crate) fn decode_array_int8(input: &[u8]) -> Result<i64, DerError> {
    let i_len = input.len();
    if i_len == 0 {
        return Err(DerError::InvalidLength);
    }
    if i_len > 8 {
        return Err(DerError::IntegerTooLarge);
    }

    let mut output = [0x00u8; 8];
    output[..i_len].copy_from_slice(input);

    let result = i64::from_be_bytes(output);

    // arithmetic shift extends the sign
    Ok(result.wrapping_shr((8_u32 - (i_len as u32)) << 3))
}

pub(crate) fn decode_array_int4(input: &[u8]) -> Result<i32, DerError> {
    let i_len = input.len();
    if i_len == 0 {
        return Err(DerError::InvalidLength);
    }
    if i_len > 4 {
        return Err(DerError::IntegerTooLarge);
    }

    let mut output = [0x00u8; 4];
    output[..i_len].copy_from_slice(input);

    let result = i32::from_be_bytes(output);

    Ok(result.wrapping_shr((4_u32 - (i_len as u32)) << 3))
}

/// Is the highest bit of the first byte in the slice 1? (if present)
#[inline]
pub(crate) fn is_highest_bit_set(bytes: &[u8]) -> bool {
    bytes
        .get(0)
        .map(|byte| byte & 0b1000_0000 != 0)
        .unwrap_or(false)
}

/// Test if the two's complement content is the shortest possible (X.690 8.3.2)
pub(crate) fn is_minimal(bytes: &[u8]) -> bool {
    match bytes {
        [] => false,
        [0x00, next, ..] => next & 0x80 != 0,
        [0xff, next, ..] => next & 0x80 == 0,
        _ => true,
    }
}

/// Remove redundant leading octets of a two's complement integer
///
/// An empty input is the integer 0.
pub(crate) fn trim_integer(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < bytes.len() {
        let redundant = match bytes[start] {
            0x00 => bytes[start + 1] & 0x80 == 0,
            0xff => bytes[start + 1] & 0x80 != 0,
            _ => false,
        };
        if !redundant {
            break;
        }
        start += 1;
    }
    &bytes[start..]
}

/// Minimal two's complement encoding of a signed integer
pub(crate) fn encode_i64(value: i64) -> Vec<u8> {
    trim_integer(&value.to_be_bytes()).to_vec()
}

/// Minimal two's complement encoding of an unsigned integer
pub(crate) fn encode_u64(value: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(9);
    bytes.push(0);
    bytes.extend_from_slice(&value.to_be_bytes());
    trim_integer(&bytes).to_vec()
}
