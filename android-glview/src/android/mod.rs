//! Android-only glue: the JNI-backed input-method service and NDK window
//! helpers.

mod soft_input;

pub use soft_input::ActivitySoftInput;

use ndk::native_window::NativeWindow;

use crate::renderer::Renderer;
use crate::view::GlSurfaceView;

/// Forwards a native window's current dimensions into the view, as when the
/// platform (re)creates the backing surface.
pub fn attach_window<R: Renderer>(view: &GlSurfaceView<R>, window: &NativeWindow) {
    view.on_surface_changed(window.width(), window.height());
}
