//! The render worker thread and its event queue.
//!
//! The queue mirrors the serial event queue of a platform GL surface view:
//! one producer side (the UI thread), one consumer thread that owns the
//! graphics context and the [`Renderer`], strict FIFO order, and no
//! acknowledgment back to the caller once a job has been submitted.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use log::{error, trace};

use crate::error::{GlueError, Result};
use crate::renderer::Renderer;

type Job<R> = Box<dyn FnOnce(&mut R) + Send>;

/// Handle to the render thread owning a [`Renderer`].
///
/// Dropping the handle closes the queue; the thread drains any remaining jobs
/// and exits, and the drop joins it.
pub struct RenderThread<R: Renderer> {
    tx: mpsc::Sender<Job<R>>,
    join: Option<JoinHandle<()>>,
}

impl<R: Renderer> RenderThread<R> {
    /// Moves `renderer` onto a newly spawned render thread and returns the
    /// queue handle for it.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn the thread; without its render
    /// thread the view cannot operate at all.
    pub fn spawn(mut renderer: R) -> Self {
        let (tx, rx) = mpsc::channel::<Job<R>>();

        let join = thread::Builder::new()
            .name("glview-render".into())
            .spawn(move || {
                trace!("render thread running");
                while let Ok(job) = rx.recv() {
                    job(&mut renderer);
                }
                trace!("render queue closed, render thread exiting");
            })
            .expect("failed to spawn render thread");

        Self {
            tx,
            join: Some(join),
        }
    }

    /// Queues `job` to run on the render thread, after all previously queued
    /// jobs. Fire-and-forget: nothing is reported back to the caller.
    ///
    /// If the render thread has already exited the job is dropped with an
    /// error log; there is nobody left to run it.
    pub fn queue_event<F>(&self, job: F)
    where
        F: FnOnce(&mut R) + Send + 'static,
    {
        if self.tx.send(Box::new(job)).is_err() {
            error!("render thread is gone; dropping queued event");
        }
    }

    /// Runs `f` on the render thread and blocks for its result.
    ///
    /// This is the one round-trip on the queue, used for the editable-text
    /// query when the soft keyboard opens. Ordering with previously queued
    /// events is preserved.
    pub fn query<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut R) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(Box::new(move |renderer: &mut R| {
                // The reply channel may be gone if the caller gave up; the
                // result is simply discarded then.
                let _ = reply_tx.send(f(renderer));
            }))
            .map_err(|_| GlueError::RenderThreadGone)?;

        reply_rx.recv().map_err(|_| GlueError::RenderThreadGone)
    }
}

impl<R: Renderer> Drop for RenderThread<R> {
    fn drop(&mut self) {
        // Closing the sender lets the thread drain and exit.
        let (closed_tx, _) = mpsc::channel();
        drop(std::mem::replace(&mut self.tx, closed_tx));
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::{Keycode, Pointer};
    use std::sync::{Arc, Mutex};
    use std::thread::ThreadId;

    struct ThreadProbe {
        seen: Arc<Mutex<Vec<(usize, ThreadId)>>>,
    }

    impl Renderer for ThreadProbe {
        fn on_resume(&mut self) {}
        fn on_pause(&mut self) {}
        fn set_surface_size(&mut self, _width: i32, _height: i32) {}
        fn pointer_down(&mut self, _id: i32, _x: f32, _y: f32) {}
        fn pointer_up(&mut self, _id: i32, _x: f32, _y: f32) {}
        fn pointers_moved(&mut self, _pointers: &[Pointer]) {}
        fn pointers_cancelled(&mut self, _pointers: &[Pointer]) {}
        fn key_down(&mut self, _keycode: Keycode) {}
        fn insert_text(&mut self, _text: &str) {}
        fn delete_backward(&mut self) {}
        fn content_text(&mut self) -> String {
            String::new()
        }
    }

    #[test]
    fn jobs_run_fifo_on_one_thread() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let render = RenderThread::spawn(ThreadProbe { seen: seen.clone() });

        for i in 0..32 {
            render.queue_event(move |r: &mut ThreadProbe| {
                r.seen.lock().unwrap().push((i, thread::current().id()));
            });
        }
        // The query rides the same queue, so it also acts as a barrier.
        render.query(|_| ()).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 32);
        assert!(seen.windows(2).all(|w| w[0].0 < w[1].0));
        let worker = seen[0].1;
        assert!(seen.iter().all(|&(_, id)| id == worker));
        assert_ne!(worker, thread::current().id());
    }

    #[test]
    fn query_round_trips_a_value() {
        let render = RenderThread::spawn(ThreadProbe {
            seen: Arc::new(Mutex::new(Vec::new())),
        });
        render.queue_event(|r: &mut ThreadProbe| {
            r.seen.lock().unwrap().push((1, thread::current().id()));
        });
        let count = render.query(|r| r.seen.lock().unwrap().len()).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn dead_render_thread_drops_events_and_fails_queries() {
        let render = RenderThread::spawn(ThreadProbe {
            seen: Arc::new(Mutex::new(Vec::new())),
        });
        render.queue_event(|_r: &mut ThreadProbe| panic!("renderer fault"));

        // The panicking job runs before anything queued after it, so the
        // worker is gone (or going) by the time the query job would run.
        assert!(matches!(
            render.query(|_| ()),
            Err(GlueError::RenderThreadGone)
        ));

        // Fire-and-forget submission must not panic either.
        render.queue_event(|_r: &mut ThreadProbe| {});
    }

    #[test]
    fn drop_joins_after_draining() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let render = RenderThread::spawn(ThreadProbe { seen: seen.clone() });
            for i in 0..8 {
                render.queue_event(move |r: &mut ThreadProbe| {
                    r.seen.lock().unwrap().push((i, thread::current().id()));
                });
            }
        }
        assert_eq!(seen.lock().unwrap().len(), 8);
    }
}
