//! # fluentlibc-core
//!
//! Safe Rust implementations of the fluentlibc string utilities.
//!
//! Strings are modelled as borrowed `&[u8]` slices whose logical end is the
//! first NUL byte (or the end of the slice). A missing C string is `None`.
//! No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod string;
