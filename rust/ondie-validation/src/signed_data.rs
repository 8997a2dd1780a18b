// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::TASK_INFO_LEN;

/// Rebuild the byte stream the device signed.
///
/// The signed-data format is `[ task-info | nonce (optional) | data ]`. Any
/// nonce is already part of `payload`; only task-info is carried in the
/// signature blob and has to be put back in front.
pub fn adjust_signed_data(task_info: &[u8; TASK_INFO_LEN], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(TASK_INFO_LEN + payload.len());
    out.extend_from_slice(task_info);
    out.extend_from_slice(payload);
    out
}
