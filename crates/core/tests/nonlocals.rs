//! Level addressing, reads and writes through the nonlocals accessor.

mod common;

use common::{RecordingObserver, chain, globals};
use dynscope_api::{Namespace, Value};
use dynscope_core::{DynamicScope, Nonlocals, ScopeError};

#[test]
fn test_level_zero_is_equivalent_but_distinct() {
    let (_root, mid, leaf) = chain();
    mid.declare("c", 3);
    let observer = RecordingObserver::default();

    let nl = Nonlocals::new(&*leaf, Some(&observer));
    let same = nl.at_level(0).unwrap();

    assert_eq!(nl.to_string(), same.to_string());
    assert_eq!(nl.get("c").unwrap(), same.get("c").unwrap());
    assert_eq!(nl.contains("c"), same.contains("c"));

    // The new accessor stands on its own once the original is gone.
    drop(nl);
    same.set("c", 4).unwrap();
    assert_eq!(same.get("c").unwrap(), Value::Int(4));
    assert_eq!(same.to_string(), "Nonlocals[Leaf]");
    assert!(same.get("missing").is_err());

    // Both accessors share the observer.
    assert_eq!(observer.count(), 3);
}

#[test]
fn test_at_level_rejects_bad_levels() {
    let (_root, _mid, leaf) = chain();
    let nl = Nonlocals::new(&*leaf, None);

    assert!(nl.at_level(2).is_ok());
    assert!(matches!(nl.at_level(3), Err(ScopeError::InvalidLevel { .. })));
    assert!(matches!(nl.at_level(-1), Err(ScopeError::InvalidLevel { .. })));

    let err = nl.at_level(7).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid nonlocal scope level 7: the scope level is out of range"
    );
}

#[test]
fn test_levels_compose() {
    let (root, _mid, leaf) = chain();
    root.declare("who", "root");
    let nl = Nonlocals::new(&*leaf, None);

    let up = nl.at_level(1).unwrap().at_level(1).unwrap();
    assert_eq!(up.to_string(), "Nonlocals[Root]");
    assert_eq!(up.get("who").unwrap(), Value::from("root"));
    assert!(up.at_level(1).is_err());
}

#[test]
fn test_get_skips_nodes_below_anchor() {
    let (root, mid, leaf) = chain();
    leaf.declare("v", "leaf");
    mid.declare("v", "mid");
    root.declare("v", "root");
    let observer = RecordingObserver::default();
    let nl = Nonlocals::new(&*leaf, Some(&observer));

    assert_eq!(nl.get("v").unwrap(), Value::from("leaf"));
    assert_eq!(nl.at_level(1).unwrap().get("v").unwrap(), Value::from("mid"));
    assert_eq!(nl.at_level(2).unwrap().get("v").unwrap(), Value::from("root"));

    let owners: Vec<String> = observer.events().into_iter().map(|e| e.0).collect();
    assert_eq!(owners, vec!["Leaf", "Mid", "Root"]);
}

#[test]
fn test_get_ignores_local_tiers() {
    let (_root, _mid, leaf) = chain();
    let identifiers: Namespace = [("a", 1)].into_iter().collect();
    let mut overrides: Namespace = [("o", 1)].into_iter().collect();
    let globals = globals(&[("b", 2)]);

    let scope = DynamicScope::new(&*leaf, &identifiers, &mut overrides, &globals, None);
    let nl = scope.nonlocals();
    for name in ["a", "o", "b", "len"] {
        assert!(scope.contains(name));
        assert!(!nl.contains(name));
        assert!(matches!(nl.get(name), Err(ScopeError::NameNotFound(_))));
    }
}

#[test]
fn test_set_stops_at_first_accepting_owner() {
    let (root, mid, leaf) = chain();
    mid.declare("z", 0);
    root.declare("z", 0);
    let observer = RecordingObserver::default();
    let nl = Nonlocals::new(&*leaf, Some(&observer));

    nl.set("z", 5).unwrap();
    assert!(leaf.attr("z").is_none());
    assert_eq!(mid.attr("z"), Some(Value::Int(5)));
    assert_eq!(root.attr("z"), Some(Value::Int(0)));
    assert_eq!(observer.count(), 0);
}

#[test]
fn test_set_skips_readonly_owner() {
    let (root, mid, leaf) = chain();
    mid.declare_readonly("z", 0);
    root.declare("z", 0);
    let nl = Nonlocals::new(&*leaf, None);

    nl.set("z", 5).unwrap();
    assert_eq!(mid.attr("z"), Some(Value::Int(0)));
    assert_eq!(root.attr("z"), Some(Value::Int(5)));
}

#[test]
fn test_set_without_accepting_owner_fails() {
    let (root, _mid, leaf) = chain();
    root.declare_readonly("z", 0);
    let nl = Nonlocals::new(&*leaf, None);

    assert!(matches!(nl.set("z", 5), Err(ScopeError::NameNotFound(_))));
    assert!(matches!(
        nl.set("nowhere", 5),
        Err(ScopeError::NameNotFound(_))
    ));
    assert_eq!(root.attr("z"), Some(Value::Int(0)));
}

#[test]
fn test_contains_is_silent() {
    let (root, _mid, leaf) = chain();
    root.declare("r", 1);
    let observer = RecordingObserver::default();
    let nl = Nonlocals::new(&*leaf, Some(&observer));

    assert!(nl.contains("r"));
    assert!(!nl.contains("missing"));
    assert!(nl.contains_key(&Value::from("r")));
    assert!(!nl.contains_key(&Value::Int(1)));
    assert_eq!(observer.count(), 0);
}
