use chrono::NaiveDate;
use cspa::bulletin::BulletinSourceError;
use cspa::{BulletinCell, BulletinRow, BulletinTable, Category, Country};

const FAMILY_A: &str = include_str!("../../../data/family_a.csv");

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn sample_bulletin_indexes_every_category_and_country() {
    let table = BulletinTable::from_reader(FAMILY_A.as_bytes()).expect("sample bulletin loads");

    assert_eq!(table.categories(), Category::ALL.to_vec());
    for category in Category::ALL {
        for country in Country::ALL {
            assert!(
                table.lookup(category, country).is_some(),
                "{category}/{country} should resolve"
            );
        }
    }

    assert_eq!(
        table.lookup(Category::F4, Country::Other),
        Some(date(2007, 3, 22))
    );
    assert_eq!(
        table.lookup(Category::F4, Country::India),
        Some(date(2005, 9, 15))
    );
    assert_eq!(
        table.lookup(Category::F2B, Country::Mexico),
        Some(date(2001, 6, 1))
    );
}

#[test]
fn lookup_returns_what_each_row_supplied() {
    let rows = cspa::bulletin::read_rows(FAMILY_A.as_bytes()).expect("rows parse");
    let table = BulletinTable::new(rows.clone());

    for row in &rows {
        for country in Country::ALL {
            let expected = NaiveDate::parse_from_str(row.date_text(country), "%m/%d/%Y")
                .expect("sample cells are dates");
            assert_eq!(table.lookup(row.category, country), Some(expected));
        }
    }
}

#[test]
fn uncovered_category_is_not_found() {
    let table = BulletinTable::new(vec![BulletinRow {
        category: Category::F1,
        other: "12/01/2014".to_string(),
        china: "12/01/2014".to_string(),
        india: "12/01/2014".to_string(),
        mexico: "04/01/2001".to_string(),
        philippines: "03/01/2012".to_string(),
    }]);

    assert!(!table.is_empty());
    assert_eq!(table.lookup(Category::F3, Country::Other), None);
    assert_eq!(table.cell(Category::F3, Country::Other), &BulletinCell::Missing);
}

#[test]
fn empty_input_builds_an_empty_table() {
    let table = BulletinTable::new(Vec::new());
    assert_eq!(table, BulletinTable::empty());

    let header_only =
        BulletinTable::from_reader("preference,other,china,india,mexico,philippines\n".as_bytes())
            .expect("header-only data loads");
    assert!(header_only.is_empty());
    assert!(header_only.lookup(Category::F1, Country::Other).is_none());
}

#[test]
fn current_marker_cells_do_not_resolve() {
    let csv = "preference,other,china,india,mexico,philippines\n\
F2A,C,C,C,11/01/2018,C\n";

    let table = BulletinTable::from_reader(csv.as_bytes()).expect("bulletin loads");

    assert_eq!(table.lookup(Category::F2A, Country::Other), None);
    assert_eq!(
        table.lookup(Category::F2A, Country::Mexico),
        Some(date(2018, 11, 1))
    );
}

#[test]
fn ragged_rows_are_reported_as_csv_errors() {
    let csv = "preference,other,china,india,mexico,philippines\nF1,12/01/2014\n";
    let err = BulletinTable::from_reader(csv.as_bytes()).expect_err("ragged row fails");
    assert!(matches!(err, BulletinSourceError::Csv(_)));
}
