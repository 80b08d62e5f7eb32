use steel_ledger_core::{DateChoice, Direction, OptionalField, Transaction};

#[test]
fn transaction_serializes_with_uppercase_direction() {
    let tx = Transaction::new(
        "Acme",
        Direction::Out,
        &DateChoice::Custom("2024-01-05".to_string()),
        "1000",
        "CAR-7",
    )
    .with_towards_party(OptionalField::included("Zenith"));

    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["direction"], "OUT");
    assert_eq!(json["towards_party"]["include"], true);
    assert_eq!(json["towards_party"]["text"], "Zenith");
    assert_eq!(json["description"]["include"], false);

    let decoded: Transaction = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, tx);
}

#[test]
fn custom_date_is_kept_verbatim() {
    let tx = Transaction::new(
        "Acme",
        Direction::In,
        &DateChoice::Custom("05/01/2024".to_string()),
        "1000",
        "CAR-7",
    );

    assert_eq!(tx.date, "05/01/2024");
    assert!(tx.validate().is_ok());
}

#[test]
fn blank_custom_date_fails_validation() {
    let tx = Transaction::new(
        "Acme",
        Direction::In,
        &DateChoice::Custom(String::new()),
        "1000",
        "CAR-7",
    );

    assert!(tx.validate().is_err());
}

#[test]
fn weight_is_not_parsed() {
    let tx = Transaction::new(
        "Acme",
        Direction::In,
        &DateChoice::Current,
        "about two tonnes",
        "CAR-7",
    );

    assert!(tx.validate().is_ok());
    assert_eq!(tx.direction_ledger_row()[2], "about two tonnes");
}
