//! Canvas rendering module
//!
//! Painters take scene state and issue 2D drawing calls through [`Canvas`].
//! Every frame is a full clear and redraw.

pub mod canvas;
pub mod color;
pub mod draw_list;
pub mod painters;
pub mod shapes;

pub use canvas::{Canvas, Font, Paint, Path, PathSeg, Stroke};
pub use color::{Rgba, colors};
pub use draw_list::{DrawList, DrawOp};
