//! Month analysis performance benchmarks.
//!
//! Measures parsing, per-month metrics and workbook consolidation on
//! generated staffing sheets.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tace::{Analyzer, GridParser, RawGrid};

/// Serial date of 2025-10-01.
const OCT_1: u32 = 45931;

/// Generate a month export with `people` rows and every day of October 2025.
fn generate_month(people: usize) -> String {
    let profiles = ["DEV FRONT", "DEV BACK", "CdP", "GRAPHISTE"];
    let expertise = ["E-commerce", "Sur mesure"];
    let cells = [
        "Boutique", "Portail", "Absence", "Non-Aff", "Prévision", "Interne", "OUT", "", "Intranet",
    ];

    let padding = "\t".repeat(4 + 62);
    let mut data = String::new();
    data.push_str(&format!("Planning{padding}\n"));
    data.push_str(&format!("Nom{padding}\n"));

    data.push_str("\t\t\t\t");
    for day in 0..31 {
        data.push_str(&format!("\t{}\t{}", OCT_1 + day, OCT_1 + day));
    }
    data.push('\n');

    for row in 0..people {
        let category = if row % 7 == 0 { "Régie" } else { "CDS" };
        data.push_str(&format!(
            "\tPerson {}\t{}\t{}\t{}",
            row,
            expertise[row % expertise.len()],
            profiles[row % profiles.len()],
            category
        ));
        for slot in 0..62 {
            data.push('\t');
            data.push_str(cells[(row * 3 + slot) % cells.len()]);
        }
        data.push('\n');
    }

    data
}

fn parse(data: &str) -> RawGrid {
    GridParser::new().parse_text(data.as_bytes()).unwrap()
}

/// Benchmark delimited text parsing.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_month");

    for people in [10, 50, 200].iter() {
        let data = generate_month(*people);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("people", people), &data, |b, data| {
            b.iter(|| black_box(parse(data)))
        });
    }

    group.finish();
}

/// Benchmark the full per-month pipeline.
fn bench_analyze_month(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_month");
    let analyzer = Analyzer::new();

    for people in [10, 50, 200].iter() {
        let grid = parse(&generate_month(*people));
        group.bench_with_input(BenchmarkId::new("people", people), &grid, |b, grid| {
            b.iter(|| black_box(analyzer.analyze_month("Octobre 2025", grid).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark a twelve-sheet workbook, all sheets sharing one grid.
fn bench_workbook(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    let grid = parse(&generate_month(50));
    // Only the October sheet has matching dates; the others are skipped.
    let sheets: Vec<(String, RawGrid)> = tace::calendar::FRENCH_MONTHS
        .iter()
        .map(|name| (format!("{name} 2025"), grid.clone()))
        .collect();

    c.bench_function("analyze_workbook_12_sheets", |b| {
        b.iter(|| black_box(analyzer.analyze_workbook(&sheets).unwrap()))
    });
}

criterion_group!(benches, bench_parse, bench_analyze_month, bench_workbook);
criterion_main!(benches);
