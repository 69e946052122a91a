use criterion::{black_box, criterion_group, criterion_main, Criterion};
use primerpair::{dimer, NearestNeighborTm, PrimerDesignInput, PrimerPairFinder, Range, TmModel};

const TEMPLATE: &str = "ATGCCCTTCAGCAAAGCATGGCGGAGTGCCGTTTATCCTGATTTTAGGGAGCAGGGCGCGTATATTAACTACAAGGCAACGAAAGATACTTTGCATCGCATGAAGGAAGATATCGCGAACCCTGCAACGCCAGATGAATTGTACAATTCGCTGCTCATGCAAAAGGCAACTGTGTATAAGTGGTGTGAAAACAAGGTGAAGGAATTGCAAATGATGGCAGAAGCCCTCATGAAGGCATCGGATTACCTCTCAGAAGAAGAGACACCTACTAATATGAGTATGGTATTCAGTATGGTGGGGAGTAGTGAAGCGAAGTATCTTCCACCCAGTGATGCGAGGCGCGTGGCAGATGCAATCACGTATGAACTACTGCGTTTTGTTGAATGCCGTAATCTGAACACAGACACAATTGAGCACATTATTGCGCGTATGTATCGCTACGCCGTGCTCGGACCCACCGGCGATCGGTGGAAGAATATTAACAAGGAAT";

fn input() -> PrimerDesignInput {
    let mut input = PrimerDesignInput::new(TEMPLATE);
    input.amplicon_size_range = Range::new(485, 490);
    input.primer_size_range = Range::new(20, 25);
    input.tm_range = Range::new(55.0, 85.0);
    input
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("find_primer_pairs 490bp", |b| {
        b.iter(|| {
            let finder = PrimerPairFinder::new(black_box(input()));
            black_box(finder.find_primer_pairs().map(|o| o.into_pairs().len()).unwrap_or(0));
        })
    });

    c.bench_function("find_primer_pairs 490bp window 10", |b| {
        b.iter(|| {
            let finder = PrimerPairFinder::new(black_box(input())).with_window_half_width(10);
            black_box(finder.find_primer_pairs().map(|o| o.into_pairs().len()).unwrap_or(0));
        })
    });

    let tm = NearestNeighborTm::default();
    c.bench_function("nearest neighbour tm 25-mer", |b| {
        b.iter(|| black_box(tm.compute(black_box(&TEMPLATE.as_bytes()[..25]), 1.0)))
    });

    c.bench_function("dimer score 25x25", |b| {
        b.iter(|| black_box(dimer::score(black_box(&TEMPLATE.as_bytes()[..25]), black_box(&TEMPLATE.as_bytes()[465..]))))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
