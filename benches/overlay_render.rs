//! Overlay Render Benchmarks
//!
//! Measures segment rendering for realistic widget sizes: a few kilobytes
//! of text with hundreds of overlapping annotations. A render should fit
//! comfortably inside one UI frame.
//!
//! Run with: `cargo bench --bench overlay_render`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use span_annotator::annotations::Annotation;
use span_annotator::overlay::render;

/// Build a text of roughly `chars` characters
fn create_text(chars: usize) -> String {
    let sentence = "The quick brown fox jumps over the lazy dog. ";
    sentence.repeat(chars / sentence.len() + 1)[..chars].to_string()
}

/// Deterministic spread of overlapping annotations
fn create_annotations(count: usize, text_len: usize) -> Vec<Annotation> {
    (0..count)
        .map(|i| {
            let start = (i * 37) % (text_len - 1);
            let end = (start + 5 + (i * 13) % 120).min(text_len);
            Annotation {
                id: format!("ann-{}", i),
                start,
                end,
                text: String::new(),
                note: String::new(),
            }
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay_render");
    let text = create_text(4_000);

    for count in [10, 100, 500] {
        let annotations = create_annotations(count, 4_000);
        group.bench_with_input(BenchmarkId::from_parameter(count), &annotations, |b, anns| {
            b.iter(|| render(black_box(&text), black_box(anns)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
