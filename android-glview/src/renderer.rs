use crate::input::{Keycode, Pointer};

/// The native rendering engine this surface view forwards into.
///
/// The implementation is moved onto the render thread when the view is
/// created, and every hook runs there, serially, in submission order. None of
/// the hooks return anything to the view; the one exception is
/// [`content_text`], which the view round-trips when the engine asks for the
/// soft keyboard so the edit-widget proxy can be seeded with the engine's
/// current editable text.
///
/// [`content_text`]: Renderer::content_text
pub trait Renderer: Send + 'static {
    /// The surface has been resumed and rendering may continue.
    fn on_resume(&mut self);

    /// The surface is being paused; rendering should stop.
    fn on_pause(&mut self);

    /// The surface dimensions changed. Delivered before the first frame so
    /// the engine sees correct dimensions from the start.
    fn set_surface_size(&mut self, width: i32, height: i32);

    /// A pointer went down at the given surface coordinates.
    fn pointer_down(&mut self, id: i32, x: f32, y: f32);

    /// A pointer went up at the given surface coordinates.
    fn pointer_up(&mut self, id: i32, x: f32, y: f32);

    /// One or more pointers moved; `pointers` holds the full set of active
    /// pointers for the gesture.
    fn pointers_moved(&mut self, pointers: &[Pointer]);

    /// The gesture was aborted; `pointers` holds the full set of active
    /// pointers at the time of cancellation.
    fn pointers_cancelled(&mut self, pointers: &[Pointer]);

    /// A key the view consumes (back, menu) went down.
    fn key_down(&mut self, keycode: Keycode);

    /// The soft keyboard committed `text` into the engine's editable field.
    fn insert_text(&mut self, text: &str);

    /// The soft keyboard deleted one character backwards.
    fn delete_backward(&mut self);

    /// The engine's current editable text, used to seed the hidden edit
    /// widget when the soft keyboard opens.
    fn content_text(&mut self) -> String;
}
