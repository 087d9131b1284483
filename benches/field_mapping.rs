use criterion::{Criterion, black_box, criterion_group, criterion_main};
use crm_importer::app::models::CsvRow;
use crm_importer::app::services::field_mapper::{FieldMapper, SynonymTable};
use crm_importer::app::services::row_parser::{RowParser, SegmentKeywords};

fn typical_headers() -> Vec<String> {
    [
        "Company Name",
        "Primary Contact",
        "Email Address",
        "Telephone",
        "Street Address",
        "City",
        "State",
        "Zip",
        "Tier",
        "Account Type",
        "Website",
        "Notes",
        "Last Order Date",
        "Sales Rep",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect()
}

fn bench_map_headers(c: &mut Criterion) {
    let mapper = FieldMapper::new(SynonymTable::builtin());
    let headers = typical_headers();

    c.bench_function("field_mapper.map_headers.typical", |b| {
        b.iter(|| mapper.map_headers(black_box(&headers)));
    });
}

fn bench_parse_rows(c: &mut Criterion) {
    let headers = typical_headers();
    let mappings = FieldMapper::new(SynonymTable::builtin()).map_headers(&headers);
    let parser = RowParser::new(&mappings, SegmentKeywords::builtin());

    let rows: Vec<CsvRow> = (1..=500)
        .map(|n| {
            CsvRow::from_pairs(
                n,
                [
                    ("Company Name", format!("Harbor Grill {}", n)),
                    ("Primary Contact", "Lopez, Maria".to_string()),
                    ("Email Address", format!("maria{}@harbor.example", n)),
                    ("City", "Portland".to_string()),
                    ("Tier", "b".to_string()),
                ],
            )
        })
        .collect();

    c.bench_function("row_parser.parse_all.500_rows", |b| {
        b.iter(|| parser.parse_all(black_box(&rows)));
    });
}

criterion_group!(benches, bench_map_headers, bench_parse_rows);
criterion_main!(benches);
