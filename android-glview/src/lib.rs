//! Surface-view glue between an Android `GLSurfaceView`-style host and a
//! native renderer.
//!
//! The crate is an event-forwarding adapter: each platform callback (touch,
//! key, lifecycle, surface geometry) is translated into exactly one call on a
//! [`Renderer`], marshalled onto a dedicated render thread through a strictly
//! FIFO queue. It also selects an EGL framebuffer configuration for the
//! surface and drives soft-keyboard show/hide by mirroring the renderer's
//! editable text into a hidden edit-widget proxy.
//!
//! The renderer itself - drawing, scene management, everything behind the
//! hooks on the [`Renderer`] trait - is external to this crate.
//!
//! The core (event model, queue, EGL chooser heuristic, IME proxy) is
//! platform-neutral so it can be exercised on any host; the JNI/NDK pieces
//! live in the [`android`] module and only build for Android targets.

mod egl;
mod error;
mod ime;
pub mod input;
mod queue;
mod renderer;
mod view;

#[cfg(target_os = "android")]
pub mod android;

pub use egl::{choose_framebuffer_config, ConfigQuery, RenderableType};
pub use error::{GlueError, Result};
pub use ime::{EditCommand, ImeRequest, SoftInput, SoftKeyboardHandle, TextEditProxy};
pub use queue::RenderThread;
pub use renderer::Renderer;
pub use view::GlSurfaceView;
