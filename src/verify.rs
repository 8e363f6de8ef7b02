//! Runtime conformance checks for [`Singleton`] types.
//!
//! Visibility rules (private slot, private constructor, no copies) are
//! already enforced by the compiler. The [`Verifier`] covers what only shows
//! up at runtime: whether the instance exists when it should, whether every
//! accessor call yields the same object, and what it displays as.
//!
//! For a lazy singleton, [`Check::SlotBeforeAccess`] only passes if nothing
//! in the process has called `get_instance()` yet, so run the verifier
//! before touching the type.

use core::marker::PhantomData;
use core::{any, fmt, mem, ptr};

use tracing::{debug, trace};

use crate::error::Nonconformance;
use crate::singleton::{Initialization, Singleton};
use crate::DISPLAY_NAME;

/// One verification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
   /// The type is not zero-sized.
   Layout,
   /// The slot is filled (eager) or empty (lazy) before any accessor call.
   SlotBeforeAccess,
   /// Two accessor calls yield the same reference.
   Identity,
   /// The slot holds the instance the accessor returns.
   SlotAfterAccess,
   /// The instance displays as the expected name.
   DisplayName,
}

impl Check {
   /// Every check, in the order [`Verifier::verify`] runs them.
   pub const ALL: [Check; 5] = [
      Check::Layout,
      Check::SlotBeforeAccess,
      Check::Identity,
      Check::SlotAfterAccess,
      Check::DisplayName,
   ];

   /// Short kebab-case name, used in logs and reports.
   pub const fn name(self) -> &'static str {
      match self {
         Check::Layout => "layout",
         Check::SlotBeforeAccess => "slot-before-access",
         Check::Identity => "identity",
         Check::SlotAfterAccess => "slot-after-access",
         Check::DisplayName => "display-name",
      }
   }
}

impl fmt::Display for Check {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.pad(self.name())
   }
}

/// Outcome of running every check independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
   outcomes: Vec<(Check, Result<(), Nonconformance>)>,
}

impl Report {
   /// Each check with its result, in run order.
   pub fn outcomes(&self) -> &[(Check, Result<(), Nonconformance>)] {
      &self.outcomes
   }

   /// The checks that failed, with their errors.
   pub fn failures(&self) -> impl Iterator<Item = (Check, &Nonconformance)> + '_ {
      self
         .outcomes
         .iter()
         .filter_map(|(check, result)| result.as_ref().err().map(|e| (*check, e)))
   }

   /// Returns `true` if every check passed.
   pub fn is_conformant(&self) -> bool {
      self.outcomes.iter().all(|(_, result)| result.is_ok())
   }
}

/// Checks a [`Singleton`] type against the singleton contract.
///
/// ```rust
/// use pcse_chair::{EagerChair, Verifier};
///
/// Verifier::<EagerChair>::new().verify().unwrap();
/// ```
pub struct Verifier<S: Singleton> {
   expected_name: &'static str,
   /// Instance observed by the first successful slot check.
   first_seen: Option<&'static S>,
   _marker: PhantomData<fn() -> S>,
}

impl<S: Singleton> Verifier<S> {
   /// Creates a verifier expecting the chair display name.
   pub fn new() -> Self {
      Self::with_expected_name(DISPLAY_NAME)
   }

   /// Creates a verifier expecting the instance to display as `expected_name`.
   pub fn with_expected_name(expected_name: &'static str) -> Self {
      Self {
         expected_name,
         first_seen: None,
         _marker: PhantomData,
      }
   }

   #[inline]
   fn type_name() -> &'static str {
      any::type_name::<S>()
   }

   /// Runs all checks in order, stopping at the first failure.
   pub fn verify(&mut self) -> Result<(), Nonconformance> {
      for check in Check::ALL {
         self.run(check)?;
      }
      Ok(())
   }

   /// Runs all checks, each one regardless of the others' results.
   pub fn report(&mut self) -> Report {
      let outcomes = Check::ALL
         .into_iter()
         .map(|check| (check, self.run(check)))
         .collect();
      Report { outcomes }
   }

   /// Runs a single check.
   pub fn run(&mut self, check: Check) -> Result<(), Nonconformance> {
      let result = match check {
         Check::Layout => self.check_layout(),
         Check::SlotBeforeAccess => self.check_slot_before_access(),
         Check::Identity => self.check_identity(),
         Check::SlotAfterAccess => self.check_slot_after_access(),
         Check::DisplayName => self.check_display_name(),
      };
      match &result {
         Ok(()) => trace!(ty = Self::type_name(), %check, "check passed"),
         Err(err) => debug!(
            ty = Self::type_name(),
            %check,
            category = ?err.category(),
            %err,
            "check failed"
         ),
      }
      result
   }

   fn check_layout(&self) -> Result<(), Nonconformance> {
      if mem::size_of::<S>() == 0 {
         return Err(Nonconformance::ZeroSized {
            type_name: Self::type_name(),
         });
      }
      Ok(())
   }

   fn check_slot_before_access(&mut self) -> Result<(), Nonconformance> {
      let type_name = Self::type_name();
      match (S::INITIALIZATION, S::peek()) {
         (Initialization::Eager, Some(instance)) => self.remember(instance),
         (Initialization::Eager, None) => Err(Nonconformance::NotEagerlyInitialized { type_name }),
         (Initialization::Lazy, None) => Ok(()),
         (Initialization::Lazy, Some(_)) => Err(Nonconformance::NotLazilyInitialized { type_name }),
      }
   }

   fn check_identity(&self) -> Result<(), Nonconformance> {
      let one = S::get_instance();
      let two = S::get_instance();
      if !ptr::eq(one, two) {
         return Err(Nonconformance::NotSameInstance {
            type_name: Self::type_name(),
         });
      }
      Ok(())
   }

   fn check_slot_after_access(&mut self) -> Result<(), Nonconformance> {
      let type_name = Self::type_name();
      let instance = S::get_instance();
      let Some(stored) = S::peek() else {
         return Err(Nonconformance::NotMemoized { type_name });
      };
      if !ptr::eq(stored, instance) {
         return Err(Nonconformance::InstanceChanged { type_name });
      }
      self.remember(stored)
   }

   fn check_display_name(&self) -> Result<(), Nonconformance> {
      let found = S::get_instance().to_string();
      if found != self.expected_name {
         return Err(Nonconformance::WrongDisplayName {
            type_name: Self::type_name(),
            expected: self.expected_name,
            found,
         });
      }
      Ok(())
   }

   /// Records the first instance seen and rejects any later, different one.
   fn remember(&mut self, instance: &'static S) -> Result<(), Nonconformance> {
      match self.first_seen {
         None => {
            self.first_seen = Some(instance);
            Ok(())
         }
         Some(seen) if ptr::eq(seen, instance) => Ok(()),
         Some(_) => Err(Nonconformance::InstanceChanged {
            type_name: Self::type_name(),
         }),
      }
   }
}

impl<S: Singleton> Default for Verifier<S> {
   fn default() -> Self {
      Self::new()
   }
}

impl<S: Singleton> fmt::Debug for Verifier<S> {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("Verifier")
         .field("type", &Self::type_name())
         .field("expected_name", &self.expected_name)
         .field("seen", &self.first_seen.is_some())
         .finish()
   }
}
