//! Mouse-driven hue rotation for shell images.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{format, string::String};

/// Images the effect applies to.
pub const SHELL_IMAGES: &str = ":is(#Shell, #Restrictive) img";

/// Hue rotation in degrees for a pointer at `(client_x, client_y)`:
/// `x / 2 + y / 3`, truncated toward zero.
///
/// Matches double-tilde truncation: values outside `i32` wrap, NaN maps to 0.
pub fn hue_degrees(client_x: f64, client_y: f64) -> i32 {
    to_int32(client_x / 2.0 + client_y / 3.0)
}

/// CSS `filter` value for a pointer position, e.g. `hue-rotate(83deg)`.
#[cfg(feature = "alloc")]
pub fn filter_value(client_x: f64, client_y: f64) -> String {
    format!("hue-rotate({}deg)", hue_degrees(client_x, client_y))
}

/// ECMAScript ToInt32.
fn to_int32(v: f64) -> i32 {
    if !v.is_finite() {
        return 0;
    }
    const TWO_32: f64 = 4_294_967_296.0;
    let mut m = num_traits::Float::trunc(v) % TWO_32;
    if m < 0.0 {
        m += TWO_32;
    }
    m as u32 as i32
}
