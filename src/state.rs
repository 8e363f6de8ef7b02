//! Fill state of a [`Slot`](crate::Slot).
//!
//! The state is packed into a single `AtomicU8`:
//! - Bit 0: FILLED - the slot holds a value
//! - Bit 1: LOCKED - one thread is running the initializer
//! - Bit 2: WAITING - at least one thread is parked on the state
//!
//! Readers of a filled slot only ever perform an acquire load. Threads that
//! lose the race for the lock park on the address of the atomic through
//! `parking_lot_core` until the winner commits or gives up.

use core::mem;
use core::sync::atomic::{AtomicU8, Ordering};

use parking_lot_core::{DEFAULT_PARK_TOKEN, DEFAULT_UNPARK_TOKEN};

#[repr(transparent)]
pub(crate) struct SlotState(AtomicU8);

impl SlotState {
   const FILLED: u8 = 1;
   const LOCKED: u8 = 2;
   const WAITING: u8 = 4;

   /// Creates the state of an empty slot.
   #[inline]
   pub(crate) const fn new() -> Self {
      Self(AtomicU8::new(0))
   }

   #[inline]
   pub(crate) fn is_filled(&self, ordering: Ordering) -> bool {
      self.0.load(ordering) & Self::FILLED != 0
   }

   #[inline]
   fn key(&self) -> usize {
      self.0.as_ptr() as usize
   }

   fn unpark_all(&self) {
      // SAFETY: the key is the address of our own atomic, the same one `park` uses.
      unsafe {
         parking_lot_core::unpark_all(self.key(), DEFAULT_UNPARK_TOKEN);
      }
   }

   /// Parks the calling thread while the state still equals `expected`.
   fn park(&self, expected: u8) {
      // SAFETY: see `unpark_all`. The validation closure runs under the
      // bucket lock, so a release between our load and the park is not lost.
      unsafe {
         let _ = parking_lot_core::park(
            self.key(),
            || self.0.load(Ordering::Acquire) == expected,
            || {},
            |_, _| {},
            DEFAULT_PARK_TOKEN,
            None,
         );
      }
      // Wake-ups may be spurious; the caller re-reads the state.
   }

   /// Leaves the locked state, either filled or back to empty, and wakes
   /// parked threads if any registered themselves.
   fn release(&self, filled: bool) {
      let next = if filled { Self::FILLED } else { 0 };
      // Release pairs with the acquire loads in `is_filled` and `lock`, so
      // the value written under the lock is visible once FILLED is.
      let prev = self.0.swap(next, Ordering::Release);
      debug_assert!(prev & Self::LOCKED != 0, "released a slot that was not locked");
      if prev & Self::WAITING != 0 {
         self.unpark_all();
      }
   }

   /// Acquires the right to fill the slot, blocking while another thread holds it.
   ///
   /// Returns `None` once the slot is filled, whether it was already filled or
   /// another thread filled it while we waited.
   pub(crate) fn lock(&self) -> Option<FillGuard<'_>> {
      loop {
         let state = self.0.load(Ordering::Acquire);
         if state & Self::FILLED != 0 {
            return None;
         }

         if state & Self::LOCKED == 0 {
            match self.0.compare_exchange_weak(
               state,
               state | Self::LOCKED,
               Ordering::Acquire,
               Ordering::Relaxed,
            ) {
               Ok(_) => return Some(FillGuard { state: self }),
               Err(_) => {
                  core::hint::spin_loop();
                  continue;
               }
            }
         }

         let waiting = state | Self::WAITING;
         if state & Self::WAITING == 0
            && self
               .0
               .compare_exchange_weak(state, waiting, Ordering::Relaxed, Ordering::Relaxed)
               .is_err()
         {
            core::hint::spin_loop();
            continue;
         }
         self.park(waiting);
      }
   }
}

/// Exclusive right to fill a slot.
///
/// Must be [`commit`](FillGuard::commit)ted after the value is written.
/// Dropping it instead (an initializer panicked) returns the slot to empty.
pub(crate) struct FillGuard<'a> {
   state: &'a SlotState,
}

impl FillGuard<'_> {
   /// Marks the slot as filled and wakes waiters.
   #[inline]
   pub(crate) fn commit(self) {
      self.state.release(true);
      mem::forget(self);
   }
}

impl Drop for FillGuard<'_> {
   #[inline]
   fn drop(&mut self) {
      self.state.release(false);
   }
}
