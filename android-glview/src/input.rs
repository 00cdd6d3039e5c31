//! Input event types mirroring the Android motion/key event model.
//!
//! Motion events arrive from the platform as a raw action word that packs the
//! masked action together with the index of the pointer that changed, plus a
//! parallel array of per-pointer data. [`MotionEvent`] keeps that shape so the
//! host callback can hand its data over without reinterpretation.

use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};

/// Bits of the raw action word holding the masked [`MotionAction`].
const ACTION_MASK: u32 = 0x00ff;
/// Bits of the raw action word holding the changed-pointer index.
const ACTION_POINTER_INDEX_MASK: u32 = 0xff00;
const ACTION_POINTER_INDEX_SHIFT: u32 = 8;

/// A masked motion action.
///
/// See [the MotionEvent docs](https://developer.android.com/reference/android/view/MotionEvent#getActionMasked())
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum MotionAction {
    /// A pressed gesture has started with the first pointer.
    Down = 0,
    /// The last pointer has gone up; the gesture is finished.
    Up = 1,
    /// A change during a pressed gesture; all pointers may have moved.
    Move = 2,
    /// The gesture has been aborted; the pointers should be treated as ups
    /// but no action should be performed.
    Cancel = 3,
    /// A movement outside the bounds of the surface.
    Outside = 4,
    /// A non-primary pointer has gone down.
    PointerDown = 5,
    /// A non-primary pointer has gone up.
    PointerUp = 6,
}

/// A key code delivered with a key-down callback.
///
/// # Android Extensible Enum
///
/// This is a runtime extensible enum and should be handled similar to a
/// `#[non_exhaustive]` enum to maintain forwards compatibility: key codes
/// this crate has no name for decode as [`Keycode::__Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[non_exhaustive]
#[repr(u32)]
pub enum Keycode {
    Home = 3,
    Back = 4,
    VolumeUp = 24,
    VolumeDown = 25,
    Menu = 82,

    #[doc(hidden)]
    #[num_enum(catch_all)]
    __Unknown(u32),
}

/// Per-pointer data for one pointer of a motion event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Stable identifier of the pointer for the duration of the gesture.
    /// Pointer ids do not change when other pointers go up or down.
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

/// A motion event.
///
/// For general discussion of motion events in Android, see [the relevant
/// javadoc](https://developer.android.com/reference/android/view/MotionEvent).
#[derive(Debug, Clone)]
pub struct MotionEvent {
    action: MotionAction,
    pointer_index: usize,
    pointers: Vec<Pointer>,
}

impl MotionEvent {
    /// Builds an event from an already-decomposed action.
    ///
    /// `pointer_index` is only meaningful for the `Down`/`Up` and
    /// `PointerDown`/`PointerUp` actions.
    pub fn new(action: MotionAction, pointer_index: usize, pointers: Vec<Pointer>) -> Self {
        Self {
            action,
            pointer_index,
            pointers,
        }
    }

    /// Decomposes a raw platform action word (masked action in the low byte,
    /// changed-pointer index in the next) together with the per-pointer data
    /// of the callback.
    ///
    /// Returns `None` for action codes this crate does not model; a host
    /// holding a [`GlSurfaceView`] can pass the raw word to
    /// [`GlSurfaceView::on_raw_touch_event`], which consumes such events
    /// without forwarding.
    ///
    /// [`GlSurfaceView`]: crate::GlSurfaceView
    /// [`GlSurfaceView::on_raw_touch_event`]: crate::GlSurfaceView::on_raw_touch_event
    pub fn from_raw(raw_action: u32, pointers: Vec<Pointer>) -> Option<Self> {
        let action = MotionAction::try_from(raw_action & ACTION_MASK).ok()?;
        let pointer_index =
            ((raw_action & ACTION_POINTER_INDEX_MASK) >> ACTION_POINTER_INDEX_SHIFT) as usize;
        Some(Self {
            action,
            pointer_index,
            pointers,
        })
    }

    /// The masked motion action of this event.
    #[inline]
    pub fn action(&self) -> MotionAction {
        self.action
    }

    /// The index of the pointer that went up or down, for the actions where
    /// that has a meaning.
    ///
    /// Pointer indices can change per motion event. For an identifier that
    /// stays the same, see [`Pointer::id`].
    #[inline]
    pub fn pointer_index(&self) -> usize {
        self.pointer_index
    }

    /// The number of pointers in this event.
    #[inline]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// All pointers of this event, in platform index order.
    #[inline]
    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    /// The pointer this event is about (at [`pointer_index`]), if the encoded
    /// index is in range.
    ///
    /// [`pointer_index`]: Self::pointer_index
    #[inline]
    pub fn changed_pointer(&self) -> Option<Pointer> {
        self.pointers.get(self.pointer_index).copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn raw_action_decomposition() {
        let pointers = vec![
            Pointer {
                id: 7,
                x: 1.0,
                y: 2.0,
            },
            Pointer {
                id: 3,
                x: 10.0,
                y: 20.0,
            },
        ];

        // POINTER_DOWN with pointer index 1 encoded in bits 8..16
        let raw = 5 | (1 << 8);
        let event = MotionEvent::from_raw(raw, pointers.clone()).unwrap();
        assert_eq!(event.action(), MotionAction::PointerDown);
        assert_eq!(event.pointer_index(), 1);
        assert_eq!(event.changed_pointer().unwrap().id, 3);

        let event = MotionEvent::from_raw(0, pointers).unwrap();
        assert_eq!(event.action(), MotionAction::Down);
        assert_eq!(event.pointer_index(), 0);
        assert_eq!(event.changed_pointer().unwrap().id, 7);
    }

    #[test]
    fn unknown_raw_action_is_rejected() {
        assert!(MotionEvent::from_raw(0x42, vec![]).is_none());
    }

    #[test]
    fn out_of_range_pointer_index() {
        let event = MotionEvent::from_raw(6 | (4 << 8), vec![Pointer { id: 0, x: 0.0, y: 0.0 }])
            .unwrap();
        assert_eq!(event.pointer_index(), 4);
        assert!(event.changed_pointer().is_none());
    }

    #[test]
    fn keycode_catch_all() {
        assert_eq!(Keycode::from(4u32), Keycode::Back);
        assert_eq!(Keycode::from(82u32), Keycode::Menu);
        assert_eq!(Keycode::from(1000u32), Keycode::__Unknown(1000));
    }
}
