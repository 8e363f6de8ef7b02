//! Shows both chairs and what the verifier makes of them.
//!
//! ```bash
//! RUST_LOG=pcse_chair=trace cargo run --example chairs
//! ```

use pcse_chair::{EagerChair, LazyChair, Singleton, Verifier};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
   tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
      .init();

   // The lazy verifier has to run before anything touches LazyChair
   let lazy = Verifier::<LazyChair>::new().report();
   let eager = Verifier::<EagerChair>::new().report();

   info!(chair = %EagerChair::get_instance(), "eager chair");
   info!(present = LazyChair::peek().is_some(), "lazy slot after verification");
   info!(chair = %LazyChair::get_instance(), "lazy chair");

   for (name, report) in [("EagerChair", &eager), ("LazyChair", &lazy)] {
      for (check, outcome) in report.outcomes() {
         match outcome {
            Ok(()) => println!("{name:<10} {check:<18} ok"),
            Err(err) => println!("{name:<10} {check:<18} FAILED: {err}"),
         }
      }
   }

   assert!(eager.is_conformant() && lazy.is_conformant());
}
