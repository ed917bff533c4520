//! Individual gates. Each one is a pure function that either passes or returns a [`Denial`].
//!
//! [`Denial`]: crate::Denial

pub mod code;
pub mod geofence;
pub mod identity;
pub mod overrides;
pub mod scope;
pub mod window;
