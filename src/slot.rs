//! Write-once cell backing lazily initialized singletons.
//!
//! A [`Slot<T>`] starts empty and is filled at most once, by the first
//! [`get_or_init`](Slot::get_or_init) call that wins the race. There is no way
//! to replace or take the value afterwards, which is what lets a `static Slot`
//! hand out `&'static T` references that all point at the same object.

use core::cell::UnsafeCell;
use core::sync::atomic::Ordering;
use core::{fmt, mem};

use super::state::SlotState;

/// A thread-safe cell that is filled exactly once and never changes afterwards.
///
/// ```rust
/// use pcse_chair::Slot;
///
/// static GREETING: Slot<String> = Slot::new();
///
/// assert!(GREETING.get().is_none());
/// let first = GREETING.get_or_init(|| "hello".to_string());
/// let second = GREETING.get_or_init(|| unreachable!());
/// assert!(core::ptr::eq(first, second));
/// ```
pub struct Slot<T> {
   value: UnsafeCell<mem::MaybeUninit<T>>,
   state: SlotState,
}

impl<T> Slot<T> {
   /// Creates an empty slot. Usable in `static` items.
   #[inline]
   #[must_use]
   pub const fn new() -> Self {
      Self {
         value: UnsafeCell::new(mem::MaybeUninit::uninit()),
         state: SlotState::new(),
      }
   }

   /// Returns `true` once the slot holds a value. Never blocks.
   #[inline]
   pub fn is_filled(&self) -> bool {
      self.state.is_filled(Ordering::Acquire)
   }

   /// Returns the value if the slot is filled.
   ///
   /// Returns `None` while the slot is empty or still being initialized.
   /// Never blocks and never runs an initializer.
   #[inline]
   pub fn get(&self) -> Option<&T> {
      if self.is_filled() {
         // SAFETY: the acquire load in is_filled() observed FILLED.
         Some(unsafe { self.get_unchecked() })
      } else {
         None
      }
   }

   /// Returns the value, filling the slot with `f()` first if it is empty.
   ///
   /// Concurrent callers block until the one running `f` commits, so `f`
   /// runs at most once per successful fill. If `f` panics the slot stays
   /// empty and the next caller runs its own initializer.
   ///
   /// Calling `get_or_init` on the same slot from inside `f` deadlocks.
   #[inline]
   pub fn get_or_init<F>(&self, f: F) -> &T
   where
      F: FnOnce() -> T,
   {
      if let Some(value) = self.get() {
         return value;
      }
      self.fill(f);
      // SAFETY: fill() only returns once the slot is filled.
      unsafe { self.get_unchecked() }
   }

   #[cold]
   fn fill<F>(&self, f: F)
   where
      F: FnOnce() -> T,
   {
      let Some(guard) = self.state.lock() else {
         return;
      };
      // A panic in f() drops the guard, which resets the slot to empty.
      let value = f();
      // SAFETY: holding the guard gives exclusive write access, and nothing
      // has been written because FILLED was never set.
      unsafe { (*self.value.get()).write(value) };
      guard.commit();
   }

   /// # Safety
   ///
   /// The slot must be filled.
   #[inline]
   unsafe fn get_unchecked(&self) -> &T {
      debug_assert!(self.is_filled(), "get_unchecked called on an empty Slot");
      // SAFETY: the caller guarantees the value is initialized; it is never
      // written again once filled.
      unsafe { (*self.value.get()).assume_init_ref() }
   }
}

// SAFETY: shared access hands out `&T` (needs `T: Sync`), and the value may be
// written by one thread and dropped by another (needs `T: Send`). The fill
// itself is serialized by `SlotState`.
unsafe impl<T: Send + Sync> Sync for Slot<T> {}
// SAFETY: moving the slot moves the owned `T`.
unsafe impl<T: Send> Send for Slot<T> {}

impl<T> Default for Slot<T> {
   #[inline]
   fn default() -> Self {
      Self::new()
   }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      let mut d = f.debug_tuple("Slot");
      match self.get() {
         Some(v) => d.field(v),
         None => d.field(&format_args!("<empty>")),
      };
      d.finish()
   }
}

impl<T> Drop for Slot<T> {
   fn drop(&mut self) {
      if self.is_filled() {
         // SAFETY: exclusive access, and the value is initialized.
         unsafe { self.value.get_mut().assume_init_drop() };
      }
   }
}
