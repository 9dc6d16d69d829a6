#[macro_use]
extern crate tracing;

pub mod animation;
pub mod article;
pub mod input;
pub mod overscroll;
pub mod policy;
pub mod reader;
pub mod replay;
pub mod rubber_band;
pub mod scroll;
