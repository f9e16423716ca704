use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wordtracker::index::Indexer;
use wordtracker::model::OrderedTree;

const TREE_SIZES: &[u64] = &[1_000, 4_000];

const SYLLABLES: &[&str] = &[
    "ka", "ke", "ki", "ko", "ku", "ma", "mo", "na", "po", "ra", "ri", "ta", "tu", "wa", "we",
];

/// Deterministic text of `num_lines` lines with a few thousand distinct words.
fn synthetic_text(num_lines: usize) -> Vec<String> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    (0..num_lines)
        .map(|_| {
            (0..12)
                .map(|_| {
                    let len = 1 + (next() % 3) as usize;
                    (0..len)
                        .map(|_| SYLLABLES[(next() % SYLLABLES.len() as u64) as usize])
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn ingestion(c: &mut Criterion) {
    let lines = synthetic_text(2_000);
    c.bench_function("ingest_2k_lines", |b| {
        b.iter(|| {
            let mut indexer = Indexer::new();
            indexer.ingest("synthetic.txt", black_box(&lines));
            indexer
        });
    });

    let mut warm = Indexer::new();
    warm.ingest("synthetic.txt", &lines);
    c.bench_function("reingest_2k_lines", |b| {
        b.iter_batched(
            || warm.clone(),
            |mut indexer| {
                indexer.ingest("synthetic.txt", black_box(&lines));
                indexer
            },
            BatchSize::LargeInput,
        );
    });
}

fn insertion_order(c: &mut Criterion) {
    for &n in TREE_SIZES {
        // Multiplying by a unit modulo n scatters the keys
        let scattered: Vec<u64> = (0..n).map(|i| (i * 7919) % n).collect();
        let sorted: Vec<u64> = (0..n).collect();

        c.bench_function(&format!("insert_scattered_{n}"), |b| {
            b.iter(|| black_box(&scattered).iter().copied().collect::<OrderedTree<u64>>());
        });
        c.bench_function(&format!("insert_sorted_{n}"), |b| {
            b.iter(|| black_box(&sorted).iter().copied().collect::<OrderedTree<u64>>());
        });
    }
}

criterion_group!(regression, ingestion);
criterion_group! {
    name = degenerate;
    config = Criterion::default().sample_size(10);
    targets = insertion_order
}
criterion_main!(regression, degenerate);
