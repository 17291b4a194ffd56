//! Circular slider widget core.
//!
//! Pointer positions become values through [`AngleValueMapper`], values become
//! draw commands through [`ArcRenderer`], and [`Slider`] ties both to the
//! host's frame clock for eased taps. Nothing here depends on a toolkit; the
//! host paints the [`Scene`] and implements [`FrameScheduler`].

pub mod animation;
pub mod color;
pub mod config;
pub mod geometry;
pub mod mapper;
pub mod render;
pub mod slider;

pub use animation::{FrameScheduler, FrameTime, InterpolationDriver};
pub use color::Color;
pub use config::{ArcSpan, SliderConfig, SliderError, SliderMode, WrapPolicy};
pub use geometry::{ArcGeometry, Point};
pub use mapper::AngleValueMapper;
pub use render::{ArcRenderer, DrawCommand, LineCap, LinearGradient, Scene};
pub use slider::{ListenerId, PointerEvent, Slider, SliderAction};
