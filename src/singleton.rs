use core::fmt;

/// When a singleton's instance comes into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Initialization {
   /// Built before any access, as part of the program image.
   Eager,
   /// Built by the first `get_instance()` call and memoized.
   Lazy,
}

impl fmt::Display for Initialization {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(match self {
         Initialization::Eager => "eager",
         Initialization::Lazy => "lazy",
      })
   }
}

/// A type with exactly one process-wide instance.
///
/// Implementors keep their instance in a module-private `static` and expose
/// no public constructor, so [`get_instance`](Singleton::get_instance) is the
/// only way to reach a value of the type.
pub trait Singleton: fmt::Display + Sync + 'static {
   /// How the instance is created.
   const INITIALIZATION: Initialization;

   /// Returns the shared instance. Every call returns the same reference.
   fn get_instance() -> &'static Self;

   /// Returns the instance if it already exists, without creating it.
   fn peek() -> Option<&'static Self>;
}
