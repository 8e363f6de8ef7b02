//! The lazily initialized chair.
//!
//! The instance lives in a [`Slot`] that stays empty until the first
//! [`LazyChair::get_instance`] call. Concurrent first calls are serialized by
//! the slot, so the chair is constructed once.
//!
//! Outside this module there is no way to build or copy one:
//!
//! ```rust,compile_fail
//! use pcse_chair::LazyChair;
//!
//! let other = LazyChair::new();
//! ```
//!
//! ```rust,compile_fail
//! use pcse_chair::LazyChair;
//!
//! let other = LazyChair { name: "Someone Else" };
//! ```
//!
//! ```rust,compile_fail
//! use pcse_chair::LazyChair;
//!
//! let copy: LazyChair = LazyChair::get_instance().clone();
//! ```
//!
//! ```rust,compile_fail
//! use pcse_chair::LazyChair;
//!
//! let other: LazyChair = Default::default();
//! ```

use core::fmt;

use tracing::debug;

use crate::singleton::{Initialization, Singleton};
use crate::slot::Slot;
use crate::DISPLAY_NAME;

/// A chair whose single instance is created on first access.
#[derive(Debug)]
pub struct LazyChair {
   name: &'static str,
}

static INSTANCE: Slot<LazyChair> = Slot::new();

impl LazyChair {
   fn new() -> Self {
      debug!(name = DISPLAY_NAME, "constructing lazy chair");
      Self { name: DISPLAY_NAME }
   }

   /// Returns the shared instance, creating it on the first call.
   #[inline]
   pub fn get_instance() -> &'static Self {
      INSTANCE.get_or_init(Self::new)
   }
}

impl fmt::Display for LazyChair {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.name)
   }
}

impl Singleton for LazyChair {
   const INITIALIZATION: Initialization = Initialization::Lazy;

   #[inline]
   fn get_instance() -> &'static Self {
      INSTANCE.get_or_init(Self::new)
   }

   #[inline]
   fn peek() -> Option<&'static Self> {
      INSTANCE.get()
   }
}
