//! Binning and assembly benchmarks.
//!
//! Measures quantile fitting, full-column enrichment and entity assembly over synthetic columns.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scalar_data::assembly::EntityAssembler;
use scalar_data::binning::enrich::country_category_plan;
use scalar_data::binning::{enrich_table, quantile_labels, RangeStyle};
use scalar_data::schema::SchemaRegistry;
use scalar_data::types::{DataType, RawTable, SchemaField};

/// Skewed positive values with roughly one sentinel in twenty.
fn generate_column(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            if i % 20 == 7 {
                -1.0
            } else {
                ((i * 7_919) % 10_007) as f64 * 1_000.0 + (i % 13) as f64
            }
        })
        .collect()
}

fn generate_country_table(rows: usize) -> RawTable {
    let headers = [
        "id",
        "name",
        "population",
        "area",
        "GDP",
        "gdp_per_capita",
        "pop_density",
        "Armed Forces size",
        "timezone_count",
        "unesco_sites",
        "Latitude",
        "Longitude",
    ];
    let body = (0..rows)
        .map(|r| {
            let v = ((r * 104_729) % 99_991) as f64;
            vec![
                format!("C{r:05}"),
                format!("Country {r}"),
                format!("{}", v * 3_000.0),
                format!("{}", v * 7.5),
                format!("${}", v * 1.0e7),
                format!("{}", v / 3.0),
                format!("{:.1}", v / 97.0),
                if r % 11 == 0 { "-1".to_string() } else { format!("{}", (r * 31) % 900_000) },
                format!("{}", 1 + r % 12),
                format!("{}", r % 40),
                format!("{}", (r % 140) as f64 - 60.0),
                format!("{}", (r % 360) as f64 - 180.0),
            ]
        })
        .collect();
    RawTable::new(headers.iter().map(|h| h.to_string()).collect(), body)
}

fn bench_quantile_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantile_labels");

    for n in [1_000, 10_000, 100_000].iter() {
        let values = generate_column(*n);
        group.throughput(Throughput::Elements(*n as u64));
        group.bench_with_input(BenchmarkId::new("values", n), &values, |b, values| {
            b.iter(|| black_box(quantile_labels(values, 7, RangeStyle::Compact.label_fn()).unwrap()))
        });
    }

    group.finish();
}

fn bench_country_enrichment(c: &mut Criterion) {
    let mut group = c.benchmark_group("country_enrichment");
    let plan = country_category_plan();

    for rows in [250, 5_000].iter() {
        let table = generate_country_table(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| black_box(enrich_table(table, &plan).unwrap()))
        });
    }

    group.finish();
}

fn bench_assembly(c: &mut Criterion) {
    let registry = SchemaRegistry::new(vec![
        SchemaField::new("name", DataType::String).with_logic("TARGET"),
        SchemaField::new("population", DataType::Int),
        SchemaField::new("area", DataType::Float),
        SchemaField::new("GDP", DataType::Currency),
        SchemaField::new("timezone_count", DataType::Int),
    ])
    .unwrap();
    let table = generate_country_table(5_000);

    c.bench_function("assemble_5000_rows", |b| {
        let asm = EntityAssembler::new(&registry);
        b.iter(|| black_box(asm.assemble(&table)))
    });
}

criterion_group!(benches, bench_quantile_labels, bench_country_enrichment, bench_assembly);
criterion_main!(benches);
