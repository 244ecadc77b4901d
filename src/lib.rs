#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use ix_introspect as introspect;
pub use ix_utils as utils;
