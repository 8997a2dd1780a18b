// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! DER encoding of ECDSA signatures.
//!
//! The device emits R and S as fixed-width 48-byte big-endian values. A
//! DER INTEGER is two's-complement, so a value whose first byte has the top
//! bit set gets a `0x00` prefix to stay non-negative. Layout:
//!
//! ```text
//! 0x30 len  0x02 len_r [0x00] r  0x02 len_s [0x00] s
//! ```
//!
//! Every length fits the single-byte short form; see the assertion below.

use crate::raw_signature::fixed_width;
use crate::{SignatureError, SCALAR_LEN, TASK_INFO_LEN};

/// DER SEQUENCE tag.
pub const SEQUENCE_TAG: u8 = 0x30;

/// DER INTEGER tag.
pub const INTEGER_TAG: u8 = 0x02;

const SIGN_PADDING: u8 = 0x00;
const HIGH_BIT: u8 = 0x80;
const MAX_SHORT_FORM_LEN: usize = 0x7f;

// Two tag bytes + two length bytes + two padded scalars.
const _: () = assert!(4 + 2 * (SCALAR_LEN + 1) <= MAX_SHORT_FORM_LEN);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerSignature(Vec<u8>);

impl DerSignature {
    /// Encode fixed-width R and S.
    pub fn from_scalars(r: &[u8; SCALAR_LEN], s: &[u8; SCALAR_LEN]) -> Self {
        let len_r = integer_content_len(r);
        let len_s = integer_content_len(s);
        let body_len = 4 + len_r + len_s;

        let mut out = Vec::with_capacity(2 + body_len);
        out.push(SEQUENCE_TAG);
        out.push(body_len as u8);
        push_integer(&mut out, r);
        push_integer(&mut out, s);
        Self(out)
    }

    /// Wrap DER bytes produced elsewhere. Structure is checked on use.
    pub fn from_bytes(der: impl Into<Vec<u8>>) -> Self {
        Self(der.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decode back to fixed-width 48-byte big-endian R and S.
    ///
    /// Accepts the fixed-width form produced by [`DerSignature::from_scalars`]
    /// as well as minimal INTEGER encodings. Only short-form lengths are
    /// supported; a P-384 signature never needs more.
    pub fn scalars(&self) -> Result<([u8; SCALAR_LEN], [u8; SCALAR_LEN]), SignatureError> {
        let (body, rest) = read_tlv(&self.0, SEQUENCE_TAG)?;
        if !rest.is_empty() {
            return Err(SignatureError::MalformedDer("trailing bytes after SEQUENCE"));
        }

        let (r, body) = read_tlv(body, INTEGER_TAG)?;
        let (s, body) = read_tlv(body, INTEGER_TAG)?;
        if !body.is_empty() {
            return Err(SignatureError::MalformedDer("trailing bytes inside SEQUENCE"));
        }

        Ok((integer_to_scalar(r)?, integer_to_scalar(s)?))
    }
}

impl AsRef<[u8]> for DerSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Slice form of the encoder, for callers holding unsized fields.
///
/// Fails with [`SignatureError::FieldWidth`] unless task-info is 36 bytes and
/// R and S are 48 bytes each. Task-info is not encoded; its width is a
/// precondition of the format.
pub fn encode_der_signature(task_info: &[u8], r: &[u8], s: &[u8]) -> Result<DerSignature, SignatureError> {
    fixed_width::<TASK_INFO_LEN>(task_info, "task-info")?;
    let r = fixed_width::<SCALAR_LEN>(r, "r")?;
    let s = fixed_width::<SCALAR_LEN>(s, "s")?;
    Ok(DerSignature::from_scalars(r, s))
}

fn needs_sign_padding(value: &[u8; SCALAR_LEN]) -> bool {
    value[0] & HIGH_BIT != 0
}

fn integer_content_len(value: &[u8; SCALAR_LEN]) -> usize {
    if needs_sign_padding(value) {
        SCALAR_LEN + 1
    } else {
        SCALAR_LEN
    }
}

fn push_integer(out: &mut Vec<u8>, value: &[u8; SCALAR_LEN]) {
    out.push(INTEGER_TAG);
    out.push(integer_content_len(value) as u8);
    if needs_sign_padding(value) {
        out.push(SIGN_PADDING);
    }
    out.extend_from_slice(value);
}

fn read_tlv(input: &[u8], tag: u8) -> Result<(&[u8], &[u8]), SignatureError> {
    let [actual_tag, len, rest @ ..] = input else {
        return Err(SignatureError::MalformedDer("truncated header"));
    };
    if *actual_tag != tag {
        return Err(SignatureError::MalformedDer("unexpected tag"));
    }

    let len = *len as usize;
    if len > MAX_SHORT_FORM_LEN {
        return Err(SignatureError::MalformedDer("long-form length"));
    }
    if rest.len() < len {
        return Err(SignatureError::MalformedDer("truncated content"));
    }
    Ok(rest.split_at(len))
}

fn integer_to_scalar(content: &[u8]) -> Result<[u8; SCALAR_LEN], SignatureError> {
    let Some(first) = content.first() else {
        return Err(SignatureError::MalformedDer("empty INTEGER"));
    };
    if first & HIGH_BIT != 0 {
        return Err(SignatureError::MalformedDer("negative INTEGER"));
    }

    let leading_zeros = content.iter().take_while(|b| **b == 0).count();
    let magnitude = &content[leading_zeros..];
    if magnitude.len() > SCALAR_LEN {
        return Err(SignatureError::MalformedDer("INTEGER wider than a P-384 scalar"));
    }

    let mut out = [0u8; SCALAR_LEN];
    out[SCALAR_LEN - magnitude.len()..].copy_from_slice(magnitude);
    Ok(out)
}
