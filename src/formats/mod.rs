//! Container format decoders.

pub mod dat;
