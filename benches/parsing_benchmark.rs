use std::io::Cursor;

use msagfa::msa::{msa_to_gfa, AlignmentMatrix, MsaConfig};
use msagfa::parser::parse_gfa;
use msagfa::writer::gfa_string;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const BASES: [u8; 4] = *b"ACGT";

/// A deterministic alignment where every row differs from the first
/// at a few columns, some of them gaps.
fn generate_alignment(rows: usize, columns: usize) -> AlignmentMatrix {
    let reference: Vec<u8> = (0..columns).map(|i| BASES[(i * 7 + i / 3) % 4]).collect();
    let data = (0..rows).map(|r| {
        let mut row = reference.clone();
        for col in (r % 11..columns).step_by(13 + r % 5) {
            row[col] = if (col + r) % 4 == 0 { b'-' } else { BASES[(col + r) % 4] };
        }
        (format!("seq{}", r), row)
    });
    match AlignmentMatrix::new(data) {
        Ok(msa) => msa,
        Err(err) => panic!("generated alignment is ragged: {}", err),
    }
}

fn convert_benches(c: &mut Criterion) {
    for &(rows, columns) in [(8, 1000), (32, 5000)].iter() {
        let msa = generate_alignment(rows, columns);
        let id = format!("{}x{}", rows, columns);
        c.bench_with_input(BenchmarkId::new("msa_to_gfa", &id), &msa, |b, msa| {
            b.iter(|| {
                let mut msa = msa.clone();
                msa_to_gfa(&mut msa, &MsaConfig::default()).unwrap()
            });
        });
    }
}

fn parse_benches(c: &mut Criterion) {
    for &(rows, columns) in [(8, 1000), (32, 5000)].iter() {
        let mut msa = generate_alignment(rows, columns);
        let gfa = msa_to_gfa(&mut msa, &MsaConfig::default()).unwrap();
        let text = gfa_string(&gfa).unwrap();
        let id = format!("{}x{}", rows, columns);
        c.bench_with_input(BenchmarkId::new("parse_gfa", &id), &text, |b, text| {
            b.iter(|| parse_gfa(Cursor::new(text.as_bytes())).unwrap());
        });
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(25);
    targets = convert_benches, parse_benches
);

criterion_main!(benches);
