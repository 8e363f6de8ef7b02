//! Verification failures.

use thiserror::Error;

/// Broad class of a [`Nonconformance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
   /// The shape of the type is wrong.
   Structural,
   /// The type has the right shape but misbehaves at runtime.
   Behavioral,
}

/// A way in which a type fails the singleton contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Nonconformance {
   /// The type has no size, so references to it cannot be told apart.
   #[error("'{type_name}' is zero-sized, so its instances have no identity")]
   ZeroSized { type_name: &'static str },

   /// An eager singleton has no instance before the first access.
   #[error("instance of '{type_name}' is not eagerly initialized")]
   NotEagerlyInitialized { type_name: &'static str },

   /// A lazy singleton already has an instance before the first access.
   #[error("instance of '{type_name}' should be lazily initialized")]
   NotLazilyInitialized { type_name: &'static str },

   /// The slot is still empty after `get_instance()` returned.
   #[error("instance of '{type_name}' is not stored after get_instance()")]
   NotMemoized { type_name: &'static str },

   /// The slot holds a different object than the one seen earlier.
   #[error("unique instance of '{type_name}' changed after initialization")]
   InstanceChanged { type_name: &'static str },

   /// Two `get_instance()` calls returned different objects.
   #[error("'{type_name}::get_instance()' should return the same object")]
   NotSameInstance { type_name: &'static str },

   /// The instance displays as something other than the expected name.
   #[error("'{type_name}' displays as {found:?}, expected {expected:?}")]
   WrongDisplayName {
      type_name: &'static str,
      expected: &'static str,
      found: String,
   },
}

impl Nonconformance {
   /// Whether the failure is about the shape of the type or its behavior.
   pub fn category(&self) -> Category {
      match self {
         Nonconformance::ZeroSized { .. } => Category::Structural,
         _ => Category::Behavioral,
      }
   }

   /// Name of the offending type.
   pub fn type_name(&self) -> &'static str {
      match self {
         Nonconformance::ZeroSized { type_name }
         | Nonconformance::NotEagerlyInitialized { type_name }
         | Nonconformance::NotLazilyInitialized { type_name }
         | Nonconformance::NotMemoized { type_name }
         | Nonconformance::InstanceChanged { type_name }
         | Nonconformance::NotSameInstance { type_name }
         | Nonconformance::WrongDisplayName { type_name, .. } => type_name,
      }
   }
}
