//! Rendering module
//!
//! Canvas 2D drawing of `FrameSnapshot`s in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPresenter;
