use steel_ledger_core::{
    CsvLedgerRepository, LedgerKind, LedgerRepository, StoreError, DIRECTION_LEDGER_HEADER,
    PARTY_LEDGER_HEADER,
};
use tempfile::TempDir;

fn row(values: [&str; 6]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn header(values: [&str; 6]) -> Vec<String> {
    row(values)
}

#[test]
fn first_append_creates_table_with_header() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path());
    assert!(!repo.exists("IN"));

    let data_rows = repo
        .append(
            "IN",
            LedgerKind::DirectionLedger,
            &row(["Acme", "2024-01-05", "1000", "CAR-7", "N/A", "N/A"]),
        )
        .unwrap();

    assert_eq!(data_rows, 1);
    assert!(repo.exists("IN"));
    assert!(dir.path().join("IN_ledger.csv").is_file());
    let rows = repo.read_all("IN").unwrap().unwrap();
    assert_eq!(rows[0], header(DIRECTION_LEDGER_HEADER));
    assert_eq!(
        rows[1],
        row(["Acme", "2024-01-05", "1000", "CAR-7", "N/A", "N/A"])
    );
}

#[test]
fn read_after_n_appends_returns_header_and_n_rows_in_order() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path());

    for i in 0..5 {
        let weight = format!("{}", 100 * (i + 1));
        let car = format!("CAR-{i}");
        repo.append(
            "Acme",
            LedgerKind::PartyLedger,
            &row(["OUT", "2024-02-01", &weight, &car, "N/A", "N/A"]),
        )
        .unwrap();
    }

    let rows = repo.read_all("Acme").unwrap().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0], header(PARTY_LEDGER_HEADER));
    let cars: Vec<&str> = rows[1..].iter().map(|r| r[3].as_str()).collect();
    assert_eq!(cars, vec!["CAR-0", "CAR-1", "CAR-2", "CAR-3", "CAR-4"]);
}

#[test]
fn read_missing_table_returns_none() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path());

    assert!(repo.read_all("Bravo").unwrap().is_none());
    assert!(!repo.exists("Bravo"));
}

#[test]
fn header_is_not_rewritten_for_a_different_schema() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path());
    repo.append(
        "OUT",
        LedgerKind::DirectionLedger,
        &row(["Acme", "2024-01-05", "1000", "CAR-7", "N/A", "N/A"]),
    )
    .unwrap();

    let err = repo
        .append(
            "OUT",
            LedgerKind::PartyLedger,
            &row(["OUT", "2024-01-05", "1000", "CAR-7", "N/A", "N/A"]),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::HeaderMismatch {
            expected: LedgerKind::PartyLedger,
            ..
        }
    ));
    assert_eq!(repo.read_all("OUT").unwrap().unwrap().len(), 2);
}

#[test]
fn row_width_must_match_schema() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path());

    let err = repo
        .append("IN", LedgerKind::DirectionLedger, &["Acme".to_string()])
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::RowWidth {
            expected: 6,
            actual: 1,
            ..
        }
    ));
    assert!(!repo.exists("IN"));
}

#[test]
fn party_names_with_path_separators_stay_in_data_dir() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path());

    repo.append(
        "../Acme/Steel",
        LedgerKind::PartyLedger,
        &row(["IN", "2024-01-05", "1", "C", "N/A", "N/A"]),
    )
    .unwrap();

    let path = repo.table_path("../Acme/Steel").unwrap();
    assert_eq!(path.parent().unwrap(), dir.path());
    assert!(path.is_file());
    assert_eq!(repo.read_all("../Acme/Steel").unwrap().unwrap().len(), 2);
}

#[test]
fn empty_existing_file_gets_header_on_append() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("IN_ledger.csv"), b"").unwrap();
    let repo = CsvLedgerRepository::new(dir.path());

    repo.append(
        "IN",
        LedgerKind::DirectionLedger,
        &row(["Acme", "2024-01-05", "1000", "CAR-7", "N/A", "N/A"]),
    )
    .unwrap();

    let rows = repo.read_all("IN").unwrap().unwrap();
    assert_eq!(rows[0], header(DIRECTION_LEDGER_HEADER));
    assert_eq!(rows.len(), 2);
}

#[test]
fn missing_data_dir_surfaces_io_error() {
    let dir = TempDir::new().unwrap();
    let repo = CsvLedgerRepository::new(dir.path().join("not-created"));

    let err = repo
        .append(
            "IN",
            LedgerKind::DirectionLedger,
            &row(["Acme", "2024-01-05", "1000", "CAR-7", "N/A", "N/A"]),
        )
        .unwrap_err();

    assert!(matches!(err, StoreError::Io { .. }));
}
