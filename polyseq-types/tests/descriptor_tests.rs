//! Tests for descriptors built outside the crate

use polyseq_types::*;
use std::cell::Cell;
use std::mem::MaybeUninit;

#[derive(Debug, Clone, PartialEq, PartialOrd)]
struct Celsius(f64);

impl std::fmt::Display for Celsius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}C", self.0)
    }
}

static CELSIUS: TypeDescriptor = DescriptorBuilder::<Celsius>::new("Celsius")
    .equal()
    .less_than()
    .show()
    .build();

impl Element for Celsius {
    fn descriptor() -> &'static TypeDescriptor {
        &CELSIUS
    }
}

thread_local! {
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

#[derive(Clone)]
struct Tracked(#[allow(dead_code)] u32);

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPS.with(|d| d.set(d.get() + 1));
    }
}

static TRACKED: TypeDescriptor = DescriptorBuilder::<Tracked>::new("Tracked").build();

#[test]
fn test_user_descriptor_capabilities() {
    assert_eq!(CELSIUS.name(), "Celsius");
    assert_eq!(CELSIUS.size(), 8);
    assert!(CELSIUS.supports(Capability::Equal));
    assert!(CELSIUS.supports(Capability::LessThan));
    assert!(CELSIUS.supports(Capability::Show));
    assert!(!CELSIUS.supports(Capability::ToInt));
    assert!(CELSIUS.is::<Celsius>());
    assert!(!CELSIUS.is::<f64>());
}

#[test]
fn test_dispatch_through_user_descriptor() {
    let cold = Celsius(-3.5);
    let warm = Celsius(21.0);

    let cold_ref = ElementRef::new(&cold);
    let warm_ref = ElementRef::new(&warm);

    assert!(dispatch::less_than(cold_ref, warm_ref).unwrap());
    assert!(!dispatch::less_than(warm_ref, cold_ref).unwrap());
    assert!(dispatch::equal(cold_ref, cold_ref).unwrap());
    assert_eq!(warm_ref.to_string(), "21C");
    assert!(matches!(
        dispatch::to_int(warm_ref),
        Err(Error::MissingCapability {
            type_name: "Celsius",
            capability: Capability::ToInt
        })
    ));
}

#[test]
fn test_clone_assign_destruct() {
    DROPS.with(|d| d.set(0));

    let source = Tracked(7);
    let mut slot = MaybeUninit::<Tracked>::uninit();
    let dst = slot.as_mut_ptr().cast::<u8>();
    let src = (&source as *const Tracked).cast::<u8>();

    unsafe {
        TRACKED.clone_into(src, dst);
        // assign over an initialized payload releases the old value
        TRACKED.assign(src, dst);
    }
    assert_eq!(DROPS.with(|d| d.get()), 1);

    unsafe { TRACKED.destruct(dst) };
    assert_eq!(DROPS.with(|d| d.get()), 2);

    drop(source);
    assert_eq!(DROPS.with(|d| d.get()), 3);
}

#[test]
fn test_index_keys() {
    let key = 4u8;
    assert_eq!(key.to_index().unwrap(), 4);
    assert_eq!((&key).to_index().unwrap(), 4);

    let boxed = 9i32;
    assert_eq!(ElementRef::from(&boxed).to_index().unwrap(), 9);

    let huge = f64::INFINITY;
    assert!(matches!(
        ElementRef::new(&huge).to_index(),
        Err(Error::InvalidIndex(_))
    ));
}

#[test]
fn test_error_messages() {
    let err = Error::from(OutOfBounds::Index { index: 5, len: 2 });
    assert_eq!(err.to_string(), "Index '5' out of bounds for Array of size 2.");
    assert!(err.is_out_of_bounds());

    let err = Error::from(OutOfBounds::Empty);
    assert_eq!(err.to_string(), "Cannot pop. Array is empty!");

    let err = Error::OutOfMemory { slots: 12 };
    assert_eq!(
        err.to_string(),
        "Cannot allocate storage for 12 slots, out of memory!"
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_json_capabilities() {
    let value = 42i64;
    let json = dispatch::to_json(ElementRef::new(&value)).unwrap();
    assert_eq!(json, serde_json::json!(42));

    let mut slot = MaybeUninit::<String>::uninit();
    unsafe {
        dispatch::from_json(
            String::descriptor(),
            &serde_json::json!("hej"),
            slot.as_mut_ptr().cast(),
        )
        .unwrap();
        assert_eq!(slot.assume_init(), "hej");
    }
}
