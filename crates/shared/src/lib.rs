//! Wire types shared between the status client and its front ends.

pub mod domain;
pub mod protocol;
