use crate::{Interner, Symbol};

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("hello");
    let b = interner.intern("hello");
    let c = interner.intern("world");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
}

#[test]
fn resolve_roundtrip() {
    let mut interner = Interner::new();

    let sym = interner.intern("call");
    assert_eq!(interner.resolve(sym), "call");
}

#[test]
fn intern_owned_matches_borrowed() {
    let mut interner = Interner::new();

    let a = interner.intern("yes");
    let b = interner.intern_owned("yes".to_string());

    assert_eq!(a, b);
    assert_eq!(interner.len(), 1);
}

#[test]
fn get_does_not_intern() {
    let mut interner = Interner::new();
    interner.intern("no");

    assert!(interner.get("maybe").is_none());
    assert_eq!(interner.len(), 1);
    assert_eq!(interner.get("no"), Some(Symbol::from_raw(0)));
}

#[test]
fn try_resolve_foreign_symbol() {
    let interner = Interner::new();
    assert!(interner.try_resolve(Symbol::from_raw(3)).is_none());
}

#[test]
fn symbol_ordering_is_insertion_order() {
    let mut interner = Interner::new();

    let z = interner.intern("z");
    let a = interner.intern("a");

    assert!(z < a);
}

#[test]
fn iter_in_insertion_order() {
    let mut interner = Interner::new();
    interner.intern("one");
    interner.intern("two");

    let all: Vec<_> = interner.iter().map(|(sym, s)| (sym.as_u32(), s)).collect();
    assert_eq!(all, vec![(0, "one"), (1, "two")]);
}
