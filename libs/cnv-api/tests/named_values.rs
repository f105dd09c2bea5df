use cnv_api::value::{Convertible, Kind, Repr};
use cnv_api::NamedValues;

#[derive(Debug, Clone, Copy, PartialEq, NamedValues)]
enum Change {
    No,
    Up,
    #[cnv(name = "dn")]
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, NamedValues)]
enum Level {
    #[cnv(name = "LOW")]
    Low,
    #[cnv(name = "HIGH")]
    High,
}

#[test]
fn derived_tables_follow_declaration_order() {
    assert_eq!(Change::NAMES, &["no", "up", "dn"]);
    assert_eq!(Change::VALUES, &[Change::No, Change::Up, Change::Down]);
    assert_eq!(Level::NAMES, &["LOW", "HIGH"]);
}

#[test]
fn derived_types_are_convertible() {
    assert_eq!(Change::kind(), Kind::Named(&["no", "up", "dn"]));
    assert_eq!(Change::Down.into_repr(), Repr::Named(2));
    assert_eq!(Change::from_repr(Repr::Named(1)), Some(Change::Up));
    assert_eq!(Level::from_name("HIGH"), Some(Level::High));
    assert_eq!(Level::from_name("high"), None);
    assert_eq!(Level::Low.name(), Some("LOW"));
}
