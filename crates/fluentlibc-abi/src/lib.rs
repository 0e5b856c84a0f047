// Every extern "C" export accepts raw pointers from C callers and documents its
// contract on the function itself.
#![allow(clippy::missing_safety_doc)]
//! # fluentlibc-abi
//!
//! ABI-compatible extern "C" boundary layer for fluentlibc.
//!
//! This crate produces a `cdylib` exposing the fluentlibc string utilities as
//! unmangled C symbols. Each entry point handles NULL and NUL-termination at the
//! pointer level, then delegates to the safe implementations in `fluentlibc-core`.
//!
//! # Architecture
//!
//! ```text
//! C caller -> ABI entry (this crate) -> bounded scan -> Core impl -> return
//! ```
//!
//! The exported names do not collide with host libc symbols, so the string
//! module stays available in test builds.

#[macro_use]
mod macros;

pub mod string_abi;
pub mod util;
