//! Browser platform layer
//!
//! Binds the engine to the page:
//! - `web_canvas`: `Canvas` over `CanvasRenderingContext2d`
//! - `web_host`: `Host` over `requestAnimationFrame` and DOM listeners
//! - `mount`: JS-facing mount/unmount entry points
//!
//! Native builds drive scenes headlessly through `RecordingHost` instead.

#[cfg(target_arch = "wasm32")]
pub mod mount;
#[cfg(target_arch = "wasm32")]
pub mod web_canvas;
#[cfg(target_arch = "wasm32")]
pub mod web_host;

#[cfg(target_arch = "wasm32")]
pub use mount::{MountError, SceneHandle, mount_page, mount_scene};
#[cfg(target_arch = "wasm32")]
pub use web_canvas::WebCanvas;
#[cfg(target_arch = "wasm32")]
pub use web_host::WebHost;
