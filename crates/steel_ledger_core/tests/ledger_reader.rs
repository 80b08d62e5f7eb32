use steel_ledger_core::{
    CsvLedgerRepository, DateChoice, Direction, LedgerKind, LedgerReader, Party, Transaction,
    TransactionRecorder, ViewError, PARTY_LEDGER_HEADER,
};
use tempfile::TempDir;

#[test]
fn view_before_any_transaction_is_not_found() {
    let dir = TempDir::new().unwrap();
    let reader = LedgerReader::new(CsvLedgerRepository::new(dir.path()));

    let err = reader.view("Bravo").unwrap_err();
    assert!(matches!(err, ViewError::NotFound(ref name) if name == "Bravo"));
}

#[test]
fn view_returns_rows_exactly_as_stored() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path());
    let recorder = TransactionRecorder::new(&repo);
    let reader = LedgerReader::new(&repo);

    for (direction, car) in [(Direction::Out, "CAR-2"), (Direction::In, "CAR-1")] {
        let tx = Transaction::new(
            "Bravo",
            direction,
            &DateChoice::Custom("2024-03-01".to_string()),
            "12.5 t",
            car,
        );
        recorder.submit(&tx).unwrap();
    }

    let rows = reader.view("Bravo").unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], PARTY_LEDGER_HEADER.map(String::from).to_vec());
    assert_eq!(rows[1][0], "OUT");
    assert_eq!(rows[1][2], "12.5 t");
    assert_eq!(rows[2][3], "CAR-1");
}

#[test]
fn view_reflects_writes_made_after_a_previous_view() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path());
    let recorder = TransactionRecorder::new(&repo);
    let reader = LedgerReader::new(&repo);
    let tx = Transaction::new(
        "Acme",
        Direction::In,
        &DateChoice::Current,
        "1000",
        "CAR-7",
    );

    recorder.submit(&tx).unwrap();
    assert_eq!(reader.view("IN").unwrap().len(), 2);
    recorder.submit(&tx).unwrap();
    assert_eq!(reader.view("IN").unwrap().len(), 3);
}

#[test]
fn ledger_menu_lists_directions_then_parties() {
    let dir = TempDir::new().unwrap();
    let reader = LedgerReader::new(CsvLedgerRepository::new(dir.path()));
    let parties = vec![Party::parse("Zenith").unwrap(), Party::parse("Acme").unwrap()];

    let menu = reader.ledger_menu(&parties).unwrap();

    let names: Vec<&str> = menu.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["IN", "OUT", "Zenith", "Acme"]);
    assert_eq!(menu[1].kind, LedgerKind::DirectionLedger);
    assert_eq!(menu[2].kind, LedgerKind::PartyLedger);
}

#[test]
fn ledger_menu_without_parties_is_refused() {
    let dir = TempDir::new().unwrap();
    let reader = LedgerReader::new(CsvLedgerRepository::new(dir.path()));

    assert!(matches!(
        reader.ledger_menu(&[]),
        Err(ViewError::NoParties)
    ));
}

#[test]
fn unreadable_table_surfaces_store_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("OUT_ledger.csv"), [0xff, 0xfe, b',', b'\n']).unwrap();
    let reader = LedgerReader::new(CsvLedgerRepository::new(dir.path()));

    assert!(matches!(reader.view("OUT"), Err(ViewError::Store(_))));
}
