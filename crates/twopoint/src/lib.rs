#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use twopoint_linalg as linalg;

#[doc(inline)]
pub use twopoint_calib as calib;
