//! The surface-view adapter: platform callbacks in, renderer calls out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use log::{debug, error, trace};

use crate::egl::{choose_framebuffer_config, ConfigQuery};
use crate::error::Result;
use crate::ime::{EditCommand, ImeRequest, SoftInput, SoftKeyboardHandle, TextEditProxy};
use crate::input::{Keycode, MotionAction, MotionEvent, Pointer};
use crate::queue::RenderThread;
use crate::renderer::Renderer;

/// Bridges a platform GL surface view to a [`Renderer`].
///
/// The view lives on the UI thread; every platform callback method translates
/// into at most one call queued onto the render thread owning the renderer.
/// One instance per surface - there are no statics; the engine side talks
/// back through the explicit [`SoftKeyboardHandle`].
pub struct GlSurfaceView<R: Renderer> {
    render: RenderThread<R>,

    /// Touch callbacks keep arriving while backgrounded if a drag is in
    /// flight when the home key is pressed; this gate drops them between
    /// pause and resume.
    handle_touches: AtomicBool,

    ime_tx: mpsc::Sender<ImeRequest>,
    ime_rx: mpsc::Receiver<ImeRequest>,
    editor: TextEditProxy,
}

impl<R: Renderer> GlSurfaceView<R> {
    /// Moves `renderer` onto a freshly spawned render thread and wraps it in
    /// a view.
    pub fn new(renderer: R) -> Self {
        let (ime_tx, ime_rx) = mpsc::channel();
        Self {
            render: RenderThread::spawn(renderer),
            handle_touches: AtomicBool::new(true),
            ime_tx,
            ime_rx,
            editor: TextEditProxy::new(),
        }
    }

    /// Selects the EGL framebuffer configuration for this surface.
    ///
    /// Called once when the platform creates the backing surface. Any error
    /// is fatal to surface initialization (see
    /// [`choose_framebuffer_config`]).
    pub fn on_surface_created<Q: ConfigQuery>(&self, egl: &Q) -> Result<Q::Config> {
        choose_framebuffer_config(egl)
    }

    /// The surface dimensions changed.
    ///
    /// Delivered before the engine's first frame, so it sees correct
    /// dimensions from the start.
    pub fn on_surface_changed(&self, width: i32, height: i32) {
        trace!("surface changed: {width}x{height}");
        self.render
            .queue_event(move |r| r.set_surface_size(width, height));
    }

    /// The host activity resumed.
    pub fn on_resume(&self) {
        debug!("resume");
        self.render.queue_event(|r| r.on_resume());
        self.handle_touches.store(true, Ordering::Relaxed);
    }

    /// The host activity paused.
    pub fn on_pause(&self) {
        debug!("pause");
        self.render.queue_event(|r| r.on_pause());
        self.handle_touches.store(false, Ordering::Relaxed);
    }

    /// A touch callback from the platform.
    ///
    /// Down/up actions forward the single changed pointer; move and cancel
    /// forward the full pointer set. Always returns `true`: the view owns the
    /// gesture, including while paused (when events are consumed but
    /// dropped).
    pub fn on_touch_event(&self, event: &MotionEvent) -> bool {
        if !self.handle_touches.load(Ordering::Relaxed) {
            return true;
        }

        match event.action() {
            MotionAction::Down | MotionAction::PointerDown => {
                if let Some(pointer) = event.changed_pointer() {
                    self.render
                        .queue_event(move |r| r.pointer_down(pointer.id, pointer.x, pointer.y));
                } else {
                    error!(
                        "dropping {:?} with out-of-range pointer index {}",
                        event.action(),
                        event.pointer_index()
                    );
                }
            }
            MotionAction::Up | MotionAction::PointerUp => {
                if let Some(pointer) = event.changed_pointer() {
                    self.render
                        .queue_event(move |r| r.pointer_up(pointer.id, pointer.x, pointer.y));
                } else {
                    error!(
                        "dropping {:?} with out-of-range pointer index {}",
                        event.action(),
                        event.pointer_index()
                    );
                }
            }
            MotionAction::Move => {
                let pointers = event.pointers().to_vec();
                self.render.queue_event(move |r| r.pointers_moved(&pointers));
            }
            MotionAction::Cancel => {
                let pointers = event.pointers().to_vec();
                self.render
                    .queue_event(move |r| r.pointers_cancelled(&pointers));
            }
            MotionAction::Outside => {}
        }

        true
    }

    /// A touch callback delivered as the platform's raw packed action word
    /// plus the per-pointer data.
    ///
    /// Action codes this crate does not model are consumed without
    /// forwarding, like `Outside`; the view owns the gesture either way.
    pub fn on_raw_touch_event(&self, raw_action: u32, pointers: Vec<Pointer>) -> bool {
        match MotionEvent::from_raw(raw_action, pointers) {
            Some(event) => self.on_touch_event(&event),
            None => true,
        }
    }

    /// A key-down callback from the platform. Back and menu are consumed and
    /// forwarded; everything else is left to the platform.
    pub fn on_key_down(&self, keycode: Keycode) -> bool {
        match keycode {
            Keycode::Back | Keycode::Menu => {
                self.render.queue_event(move |r| r.key_down(keycode));
                true
            }
            _ => false,
        }
    }

    /// Commits `text` into the engine's editable field.
    pub fn insert_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.render.queue_event(move |r| r.insert_text(&text));
    }

    /// Deletes one character backwards from the engine's editable field.
    pub fn delete_backward(&self) {
        self.render.queue_event(|r| r.delete_backward());
    }

    /// A handle for the engine side to request keyboard show/hide.
    pub fn soft_keyboard_handle(&self) -> SoftKeyboardHandle {
        SoftKeyboardHandle::new(self.ime_tx.clone())
    }

    /// Requests the soft keyboard be shown over the engine's current
    /// editable text.
    ///
    /// The text is fetched from the renderer with the queue's one round-trip;
    /// [`GlueError::RenderThreadGone`] is the only possible error.
    ///
    /// [`GlueError::RenderThreadGone`]: crate::GlueError::RenderThreadGone
    pub fn open_soft_keyboard(&self) -> Result<()> {
        let text = self.render.query(|r| r.content_text())?;
        let _ = self.ime_tx.send(ImeRequest::Open { text });
        Ok(())
    }

    /// Requests the soft keyboard be hidden.
    pub fn close_soft_keyboard(&self) {
        let _ = self.ime_tx.send(ImeRequest::Close);
    }

    /// Drains pending keyboard requests on the UI thread, driving the
    /// platform input-method service and the hidden edit widget.
    pub fn process_ime_requests<S: SoftInput + ?Sized>(&mut self, soft_input: &mut S) {
        while let Ok(request) = self.ime_rx.try_recv() {
            match request {
                ImeRequest::Open { text } => {
                    self.editor.begin_session(&text);
                    soft_input.show_soft_input();
                    debug!("showSoftInput");
                }
                ImeRequest::Close => {
                    self.editor.end_session();
                    soft_input.hide_soft_input();
                    debug!("hideSoftInput");
                }
            }
        }
    }

    /// The hidden edit widget's text was rewritten by the IME.
    pub fn ime_text_changed(&mut self, new_text: &str) {
        let commands = self.editor.text_changed(new_text);
        self.apply_edits(commands);
    }

    /// The IME's done/enter action was tapped: a newline is committed and the
    /// keyboard is asked to close.
    pub fn ime_editor_done(&mut self) {
        let commands = self.editor.editor_action_done();
        self.apply_edits(commands);
        let _ = self.ime_tx.send(ImeRequest::Close);
    }

    /// The hidden edit widget mirror, for hosts that need to reflect its
    /// state into a real platform widget.
    pub fn text_edit_proxy(&self) -> &TextEditProxy {
        &self.editor
    }

    fn apply_edits(&self, commands: Vec<EditCommand>) {
        for command in commands {
            match command {
                EditCommand::Insert(text) => self.insert_text(text),
                EditCommand::DeleteBackward => self.delete_backward(),
            }
        }
    }
}
