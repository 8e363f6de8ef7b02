//! Two singleton chairs and a verifier for the singleton contract.
//!
//! - [`EagerChair`]: the instance is a `static` that exists before any access.
//! - [`LazyChair`]: the instance is created by the first
//!   [`get_instance`](LazyChair::get_instance) call and cached in a [`Slot`].
//!
//! Both display as [`DISPLAY_NAME`], and every `get_instance()` call returns
//! the same reference.
//!
//! # Examples
//!
//! ```rust
//! use pcse_chair::{EagerChair, LazyChair};
//!
//! let chair = EagerChair::get_instance();
//! assert_eq!(chair.to_string(), "Anton Riedl");
//! assert!(core::ptr::eq(chair, EagerChair::get_instance()));
//!
//! let chair = LazyChair::get_instance();
//! assert!(core::ptr::eq(chair, LazyChair::get_instance()));
//! ```
//!
//! ## Verifying a singleton
//!
//! ```rust
//! use pcse_chair::{Check, EagerChair, Verifier};
//!
//! let report = Verifier::<EagerChair>::new().report();
//! assert!(report.is_conformant());
//! assert_eq!(report.outcomes().len(), Check::ALL.len());
//! ```

mod eager;
mod error;
mod lazy;
mod singleton;

/// Write-once cell implementation.
mod slot;

/// Internal fill state of a slot.
mod state;

mod verify;

pub use eager::EagerChair;
pub use error::{Category, Nonconformance};
pub use lazy::LazyChair;
pub use singleton::{Initialization, Singleton};
pub use slot::Slot;
pub use verify::{Check, Report, Verifier};

/// The name every chair displays as.
pub const DISPLAY_NAME: &str = "Anton Riedl";
