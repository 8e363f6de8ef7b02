//! Races threads on the empty lazy slot. Exactly one test per binary, so
//! nothing fills the slot before the barrier opens.

use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use pcse_chair::{LazyChair, Singleton, Slot};

const THREADS: usize = 8;

fn address<T>(value: &T) -> usize {
   value as *const T as usize
}

#[test]
fn test_concurrent_first_access() {
   assert!(
      LazyChair::peek().is_none(),
      "instance should be lazily initialized"
   );

   let barrier = Arc::new(Barrier::new(THREADS));
   let threads: Vec<_> = (0..THREADS)
      .map(|_| {
         let barrier = Arc::clone(&barrier);
         thread::spawn(move || {
            barrier.wait();
            address(LazyChair::get_instance())
         })
      })
      .collect();
   let addresses: Vec<usize> = threads.into_iter().map(|t| t.join().unwrap()).collect();

   let stored = LazyChair::peek().expect("instance should be stored after get_instance()");
   for seen in &addresses {
      assert_eq!(*seen, address(stored));
   }
   assert!(ptr::eq(stored, LazyChair::get_instance()));

   // Same race on a local slot, counting how often the initializer runs
   let slot = Arc::new(Slot::new());
   let constructed = Arc::new(AtomicUsize::new(0));
   let barrier = Arc::new(Barrier::new(THREADS));
   let threads: Vec<_> = (0..THREADS)
      .map(|_| {
         let slot = Arc::clone(&slot);
         let constructed = Arc::clone(&constructed);
         let barrier = Arc::clone(&barrier);
         thread::spawn(move || {
            barrier.wait();
            address(slot.get_or_init(|| {
               constructed.fetch_add(1, Ordering::SeqCst);
               // Hold the lock so the other threads park on it
               thread::sleep(Duration::from_millis(20));
               LazyChair::get_instance().to_string()
            }))
         })
      })
      .collect();
   let addresses: Vec<usize> = threads.into_iter().map(|t| t.join().unwrap()).collect();

   assert_eq!(constructed.load(Ordering::SeqCst), 1);
   let value = slot.get().expect("slot filled after the race");
   assert_eq!(value, "Anton Riedl");
   for seen in &addresses {
      assert_eq!(*seen, address(value));
   }
}
