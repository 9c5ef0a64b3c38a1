//! Element lifecycle bookkeeping
//!
//! `Tracked` counts its live instances per thread, so every test can check
//! that the array destructs exactly what it constructed.

use polyseq::{Array, DescriptorBuilder, Element, Error, TypeDescriptor};
use std::cell::Cell;
use std::fmt;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static ASSIGNS: Cell<usize> = const { Cell::new(0) };
}

fn live() -> isize {
    LIVE.with(|l| l.get())
}

#[derive(Debug, PartialEq, PartialOrd)]
struct Tracked(u32);

impl Tracked {
    fn new(value: u32) -> Self {
        LIVE.with(|l| l.set(l.get() + 1));
        Tracked(value)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Tracked::new(self.0)
    }

    fn clone_from(&mut self, source: &Self) {
        ASSIGNS.with(|a| a.set(a.get() + 1));
        self.0 = source.0;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|l| l.set(l.get() - 1));
    }
}

impl fmt::Display for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static TRACKED: TypeDescriptor = DescriptorBuilder::<Tracked>::new("Tracked")
    .equal()
    .less_than()
    .show()
    .build();

impl Element for Tracked {
    fn descriptor() -> &'static TypeDescriptor {
        &TRACKED
    }
}

fn tracked(values: &[u32]) -> Vec<Tracked> {
    values.iter().map(|v| Tracked::new(*v)).collect()
}

fn shown(a: &Array) -> String {
    a.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(" ")
}

#[test]
fn test_drop_destructs_every_element() {
    let source = tracked(&[1, 2, 3]);
    assert_eq!(live(), 3);

    let a = Array::from_slice(&source).unwrap();
    assert_eq!(live(), 6);

    drop(a);
    assert_eq!(live(), 3);
    drop(source);
    assert_eq!(live(), 0);
}

#[test]
fn test_pop_remove_clear_destruct() {
    let mut a = Array::from_slice(&tracked(&[1, 2, 3, 4, 5])).unwrap();
    assert_eq!(live(), 5);

    a.pop().unwrap();
    assert_eq!(live(), 4);

    a.remove(0).unwrap();
    assert_eq!(live(), 3);
    assert_eq!(shown(&a), "#2 #3 #4");

    a.remove_value(&Tracked::new(3)).unwrap();
    assert_eq!(live(), 2);

    a.clear();
    assert_eq!(live(), 0);
}

#[test]
fn test_set_assigns_over_existing() {
    let mut a = Array::from_slice(&tracked(&[1, 2])).unwrap();
    ASSIGNS.with(|c| c.set(0));

    let replacement = Tracked::new(9);
    a.set(0, &replacement).unwrap();
    assert_eq!(ASSIGNS.with(|c| c.get()), 1);
    assert_eq!(live(), 3);
    assert_eq!(shown(&a), "#9 #2");

    drop(replacement);
    drop(a);
    assert_eq!(live(), 0);
}

#[test]
fn test_moves_do_not_clone() {
    let mut a = Array::from_slice(&tracked(&[5, 3, 1, 4, 2])).unwrap();
    assert_eq!(live(), 5);

    a.sort().unwrap();
    a.reverse();
    a.swap(0, 4).unwrap();
    a.insert(2, &Tracked::new(7)).unwrap();
    assert_eq!(live(), 6);
    assert_eq!(shown(&a), "#1 #4 #7 #3 #2 #5");

    drop(a);
    assert_eq!(live(), 0);
}

#[test]
fn test_assign_from_and_copy() {
    let mut a = Array::from_slice(&tracked(&[1, 2, 3])).unwrap();
    let b = Array::from_slice(&tracked(&[8])).unwrap();
    assert_eq!(live(), 4);

    a.assign_from(&b).unwrap();
    assert_eq!(live(), 2);

    let c = a.copy().unwrap();
    assert_eq!(live(), 3);
    assert_eq!(c, a);

    drop((a, b, c));
    assert_eq!(live(), 0);
}

#[test]
fn test_failed_assign_keeps_contents() {
    let mut a = Array::from_slice(&tracked(&[1, 2])).unwrap();
    assert!(matches!(
        a.assign_from(&[1i64]),
        Err(Error::TypeMismatch { .. })
    ));
    assert_eq!(live(), 2);
    assert_eq!(shown(&a), "#1 #2");
}

#[test]
fn test_nested_drop() {
    let inner = Array::from_slice(&tracked(&[1, 2])).unwrap();
    let mut outer = Array::of::<Array>();
    outer.push(&inner).unwrap();
    outer.push(&inner).unwrap();
    assert_eq!(live(), 6);

    outer.pop().unwrap();
    assert_eq!(live(), 4);

    drop(outer);
    drop(inner);
    assert_eq!(live(), 0);
}
