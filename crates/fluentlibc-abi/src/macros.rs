//! Helper macros for ABI function generation.
//!
//! Provides the `abi_fn!` macro that generates `#[unsafe(no_mangle)] pub unsafe extern "C" fn`
//! wrappers around a body that runs in an `unsafe` context.

/// Generate an ABI-compatible extern "C" function.
///
/// # Usage
///
/// ```ignore
/// abi_fn! {
///     /// Doc comment for the function.
///     fn my_func(arg1: Type1, arg2: Type2) -> ReturnType {
///         // implementation body
///     }
/// }
/// ```
///
/// This expands to a `#[unsafe(no_mangle)] pub unsafe extern "C" fn` with the given
/// signature and body. The body is responsible for NULL checks and bounded reads.
macro_rules! abi_fn {
    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? ) -> $ret:ty
        $body:block
    ) => {
        $(#[$meta])*
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name( $($arg : $argty),* ) -> $ret {
            unsafe { $body }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use abi_fn;
