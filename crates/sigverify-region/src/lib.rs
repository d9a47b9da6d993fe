//! sigverify-region - Foreground region analysis
//!
//! Finds connected components of ink in binary (1 bpp) images and
//! reports their bounding boxes.

pub mod conncomp;
pub mod error;

pub use sigverify_core;

pub use conncomp::{
    ConnectedComponent, ConnectivityType, find_connected_components, foreground_bounding_box,
    label_connected_components,
};
pub use error::{RegionError, RegionResult};
