// SPDX-License-Identifier: MIT

pub mod cover;
pub mod watermark;
