//! The eagerly initialized chair.
//!
//! The instance is a `static` evaluated at compile time, so it exists before
//! any code runs and [`EagerChair::get_instance`] does no work at all.
//!
//! The only constructor is private:
//!
//! ```rust,compile_fail
//! use pcse_chair::EagerChair;
//!
//! let other = EagerChair { name: "Someone Else" };
//! ```
//!
//! and the instance cannot be copied out of its slot:
//!
//! ```rust,compile_fail
//! use pcse_chair::EagerChair;
//!
//! let copy: EagerChair = EagerChair::get_instance().clone();
//! ```
//!
//! nor conjured from a default:
//!
//! ```rust,compile_fail
//! use pcse_chair::EagerChair;
//!
//! let other: EagerChair = Default::default();
//! ```

use core::fmt;

use crate::singleton::{Initialization, Singleton};
use crate::DISPLAY_NAME;

/// A chair whose single instance exists from program start.
#[derive(Debug)]
pub struct EagerChair {
   name: &'static str,
}

static INSTANCE: EagerChair = EagerChair::new();

impl EagerChair {
   const fn new() -> Self {
      Self { name: DISPLAY_NAME }
   }

   /// Returns the shared instance.
   #[inline]
   pub fn get_instance() -> &'static Self {
      &INSTANCE
   }
}

impl fmt::Display for EagerChair {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.name)
   }
}

impl Singleton for EagerChair {
   const INITIALIZATION: Initialization = Initialization::Eager;

   #[inline]
   fn get_instance() -> &'static Self {
      &INSTANCE
   }

   #[inline]
   fn peek() -> Option<&'static Self> {
      Some(&INSTANCE)
   }
}
