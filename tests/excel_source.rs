#![cfg(feature = "excel_test_writer")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use scalar_data::assembly::{PayloadBuilder, PayloadOptions};
use scalar_data::ingestion::excel::read_excel_table_from_path;
use scalar_data::ingestion::FileSource;
use scalar_data::types::Value;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("scalar-data-{name}-{nanos}.xlsx"))
}

fn write_schema_xlsx(path: &PathBuf) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Countries").unwrap();

    let header = ["attribute_key", "display_label", "data_type", "logic_type", "is_folded"];
    for (c, h) in header.iter().enumerate() {
        ws.write_string(0, c as u16, *h).unwrap();
    }
    let rows = [
        ["name", "Country", "STRING", "TARGET"],
        ["population", "Population", "INT", "HIGHER_LOWER"],
        ["GDP", "GDP", "CURRENCY", "HIGHER_LOWER"],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            ws.write_string(r as u32 + 1, c as u16, *cell).unwrap();
        }
    }
    ws.write_boolean(3, 4, true).unwrap();

    wb.save(path).unwrap();
}

fn write_data_xlsx(path: &PathBuf) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();

    // A leading sheet that should be ignored when a sheet name is given.
    let notes = wb.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "exported from the countries sheet").unwrap();

    let ws = wb.add_worksheet();
    ws.set_name("Countries").unwrap();
    ws.write_string(0, 0, "ID").unwrap();
    ws.write_string(0, 1, "name").unwrap();
    ws.write_string(0, 2, "population").unwrap();
    ws.write_string(0, 3, "GDP").unwrap();

    ws.write_string(1, 0, "FRA").unwrap();
    ws.write_string(1, 1, "France").unwrap();
    ws.write_number(1, 2, 67_391_582).unwrap();
    ws.write_number(1, 3, 2_715_518_000_000.456).unwrap();

    ws.write_string(2, 0, "AND").unwrap();
    ws.write_string(2, 1, "Andorra").unwrap();
    ws.write_string(2, 2, "77,265").unwrap();
    ws.write_number(2, 3, -1).unwrap();

    wb.save(path).unwrap();
}

#[test]
fn excel_reader_renders_integral_numbers_without_fraction() {
    let path = tmp_file("data");
    write_data_xlsx(&path);

    let t = read_excel_table_from_path(&path, Some("Countries")).unwrap();
    assert_eq!(t.headers, vec!["ID", "name", "population", "GDP"]);
    assert_eq!(t.get(0, "population"), Some("67391582"));
    assert_eq!(t.get(1, "GDP"), Some("-1"));

    let first = read_excel_table_from_path(&path, None).unwrap();
    assert_eq!(first.headers, vec!["exported from the countries sheet"]);
    assert_eq!(first.row_count(), 0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn workbook_category_assembles_like_csv() {
    let schema_path = tmp_file("schema");
    let data_path = tmp_file("countries");
    write_schema_xlsx(&schema_path);
    write_data_xlsx(&data_path);

    let src = FileSource::new("countries", &schema_path, &data_path).with_sheet("Countries");
    let report = PayloadBuilder::new()
        .with_category("countries", src)
        .build(&PayloadOptions::default());
    assert!(report.is_complete(), "skipped: {:?}", report.skipped);

    let countries = &report.payload.categories["countries"];
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].id, "FRA");
    assert_eq!(countries[0].get("population"), Some(&Value::Int(67_391_582)));
    assert_eq!(countries[0].get("GDP"), Some(&Value::Float(2_715_518_000_000.46)));
    assert_eq!(countries[1].get("population"), Some(&Value::Int(77_265)));
    assert!(countries[1].get("GDP").is_none());
    assert!(report.payload.schema_config["countries"][2].is_folded);

    let _ = std::fs::remove_file(&schema_path);
    let _ = std::fs::remove_file(&data_path);
}

#[test]
fn missing_sheet_skips_the_category() {
    let data_path = tmp_file("no-sheet");
    write_data_xlsx(&data_path);

    let src = FileSource::new("countries", &data_path, &data_path).with_sheet("Elements");
    let report = PayloadBuilder::new()
        .with_category("countries", src)
        .build(&PayloadOptions::default());
    assert_eq!(report.skipped.len(), 1);
    assert!(report.payload.categories.is_empty());

    let _ = std::fs::remove_file(&data_path);
}
