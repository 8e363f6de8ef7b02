use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pcse_chair::Slot;

#[test]
fn test_new_is_empty() {
   let slot: Slot<i32> = Slot::new();
   assert!(!slot.is_filled());
   assert_eq!(slot.get(), None);
}

#[test]
fn test_default_is_empty() {
   let slot: Slot<String> = Slot::default();
   assert!(!slot.is_filled());
}

#[test]
fn test_get_or_init() {
   let slot: Slot<i32> = Slot::new();
   let counter = AtomicUsize::new(0);
   let value = slot.get_or_init(|| {
      counter.fetch_add(1, Ordering::SeqCst);
      42
   });
   assert_eq!(value, &42);
   assert!(slot.is_filled());
   assert_eq!(counter.load(Ordering::SeqCst), 1);

   // Second call must not run the initializer
   let value = slot.get_or_init(|| {
      counter.fetch_add(1, Ordering::SeqCst);
      panic!("Should not be called")
   });
   assert_eq!(value, &42);
   assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_get_or_init_returns_same_reference() {
   let slot: Slot<String> = Slot::new();
   let one = slot.get_or_init(|| "chair".to_string());
   let two = slot.get_or_init(|| "other".to_string());
   assert!(std::ptr::eq(one, two));
   assert!(std::ptr::eq(one, slot.get().unwrap()));
   assert_eq!(two, "chair");
}

#[test]
fn test_panicking_init_leaves_slot_empty() {
   let slot: Slot<i32> = Slot::new();
   let result = panic::catch_unwind(AssertUnwindSafe(|| {
      slot.get_or_init(|| panic!("init failed"));
   }));
   assert!(result.is_err());
   assert!(!slot.is_filled());

   // The slot is usable again after the failed attempt
   assert_eq!(slot.get_or_init(|| 7), &7);
   assert!(slot.is_filled());
}

#[test]
fn test_multi_thread_get_or_init() {
   let slot = Arc::new(Slot::new());
   let init_counter = Arc::new(AtomicUsize::new(0));
   let threads: Vec<_> = (0..10)
      .map(|_| {
         let slot = Arc::clone(&slot);
         let counter = Arc::clone(&init_counter);
         thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            let value = slot.get_or_init(|| {
               counter.fetch_add(1, Ordering::SeqCst);
               // Keep the lock long enough for others to park on it
               thread::sleep(Duration::from_millis(20));
               42
            });
            (*value, value as *const i32 as usize)
         })
      })
      .collect();

   let mut addresses = Vec::new();
   for handle in threads {
      let (value, address) = handle.join().unwrap();
      assert_eq!(value, 42);
      addresses.push(address);
   }
   addresses.dedup();
   assert_eq!(addresses.len(), 1);
   assert_eq!(slot.get(), Some(&42));
   assert_eq!(init_counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_waiters_retry_after_panicking_init() {
   let slot = Arc::new(Slot::new());
   let attempts = Arc::new(AtomicUsize::new(0));
   let threads: Vec<_> = (0..8)
      .map(|_| {
         let slot = Arc::clone(&slot);
         let attempts = Arc::clone(&attempts);
         thread::spawn(move || {
            panic::catch_unwind(AssertUnwindSafe(|| {
               *slot.get_or_init(|| {
                  thread::sleep(Duration::from_millis(5));
                  // Only the first attempt fails
                  if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                     panic!("first init fails");
                  }
                  99
               })
            }))
         })
      })
      .collect();

   let mut failures = 0;
   for handle in threads {
      match handle.join().unwrap() {
         Ok(value) => assert_eq!(value, 99),
         Err(_) => failures += 1,
      }
   }
   assert_eq!(failures, 1);
   assert_eq!(slot.get(), Some(&99));
   assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_static_slot() {
   static NAME: Slot<String> = Slot::new();
   assert!(NAME.get().is_none());
   let name: &'static String = NAME.get_or_init(|| "Anton Riedl".to_string());
   assert_eq!(name, "Anton Riedl");
}

#[test]
fn test_debug() {
   let slot: Slot<i32> = Slot::new();
   assert_eq!(format!("{slot:?}"), "Slot(<empty>)");
   slot.get_or_init(|| 5);
   assert_eq!(format!("{slot:?}"), "Slot(5)");
}

#[test]
fn test_drop_runs_once() {
   struct Counted(Arc<AtomicUsize>);
   impl Drop for Counted {
      fn drop(&mut self) {
         self.0.fetch_add(1, Ordering::SeqCst);
      }
   }

   let drops = Arc::new(AtomicUsize::new(0));
   {
      let slot = Slot::new();
      slot.get_or_init(|| Counted(Arc::clone(&drops)));
      assert_eq!(drops.load(Ordering::SeqCst), 0);
   }
   assert_eq!(drops.load(Ordering::SeqCst), 1);

   // Empty slots drop nothing
   {
      let _slot: Slot<Counted> = Slot::new();
   }
   assert_eq!(drops.load(Ordering::SeqCst), 1);
}
