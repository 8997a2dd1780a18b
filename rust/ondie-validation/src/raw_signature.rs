// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Raw OnDie signature layout.

use crate::der::DerSignature;
use crate::signed_data::adjust_signed_data;
use crate::SignatureError;

/// Width of the task-info prefix.
pub const TASK_INFO_LEN: usize = 36;

/// Width of each of R and S (the byte length of the P-384 group order).
pub const SCALAR_LEN: usize = 48;

/// Shortest blob that carries task-info, R and S.
pub const MIN_SIGNATURE_LEN: usize = TASK_INFO_LEN + 2 * SCALAR_LEN;

/// Borrowed view over the fields of a raw OnDie signature.
///
/// Field offsets are `[0, 36)`, `[36, 84)` and `[84, 132)`. Bytes past
/// offset 132 carry nothing this format uses and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSignature<'a> {
    pub task_info: &'a [u8; TASK_INFO_LEN],
    pub r: &'a [u8; SCALAR_LEN],
    pub s: &'a [u8; SCALAR_LEN],
}

impl<'a> RawSignature<'a> {
    /// Split `signature` into its fields.
    ///
    /// Anything shorter than [`MIN_SIGNATURE_LEN`] is rejected before any
    /// field is read.
    pub fn parse(signature: &'a [u8]) -> Result<Self, SignatureError> {
        if signature.len() < MIN_SIGNATURE_LEN {
            return Err(SignatureError::TooShort {
                actual: signature.len(),
                required: MIN_SIGNATURE_LEN,
            });
        }

        let (task_info, rest) = signature.split_at(TASK_INFO_LEN);
        let (r, rest) = rest.split_at(SCALAR_LEN);
        let s = &rest[..SCALAR_LEN];

        Ok(Self {
            task_info: fixed_width(task_info, "task-info")?,
            r: fixed_width(r, "r")?,
            s: fixed_width(s, "s")?,
        })
    }

    /// DER `SEQUENCE { INTEGER r, INTEGER s }` for the raw scalars.
    pub fn to_der(&self) -> DerSignature {
        DerSignature::from_scalars(self.r, self.s)
    }

    /// The bytes the device actually signed: `task-info || payload`.
    pub fn signed_data(&self, payload: &[u8]) -> Vec<u8> {
        adjust_signed_data(self.task_info, payload)
    }
}

pub(crate) fn fixed_width<'a, const N: usize>(
    bytes: &'a [u8],
    field: &'static str,
) -> Result<&'a [u8; N], SignatureError> {
    bytes.try_into().map_err(|_| SignatureError::FieldWidth {
        field,
        actual: bytes.len(),
        expected: N,
    })
}
