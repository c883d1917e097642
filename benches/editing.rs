//! Benchmarks for editing, style toggles and auto-save serialization.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use inkpad::document::{Document, InlineStyle, RawDocument, toggle_inline_style};

fn large_document() -> Document {
    let text = (0..2_000)
        .map(|i| format!("Paragraph {i} with some ordinary words to style."))
        .collect::<Vec<_>>()
        .join("\n");
    Document::from_plain_text(&text)
}

fn bench_typing(c: &mut Criterion) {
    c.bench_function("type_1k_chars", |b| {
        b.iter(|| {
            let mut doc = Document::empty();
            for ch in "lorem ipsum dolor sit amet ".chars().cycle().take(1_000) {
                doc.insert_char(black_box(ch));
            }
            doc
        });
    });
}

fn bench_toggle_large(c: &mut Criterion) {
    let mut doc = large_document();
    doc.select_all();
    c.bench_function("toggle_bold_2k_blocks", |b| {
        b.iter(|| toggle_inline_style(black_box(&doc), InlineStyle::Bold));
    });
}

fn bench_serialize(c: &mut Criterion) {
    let mut doc = large_document();
    doc.select_all();
    let doc = toggle_inline_style(&doc, InlineStyle::Italic);
    c.bench_function("raw_document_to_json", |b| {
        b.iter(|| RawDocument::from_document(black_box(&doc)).to_json().unwrap());
    });
    let json = RawDocument::from_document(&doc).to_json().unwrap();
    c.bench_function("raw_document_from_json", |b| {
        b.iter(|| RawDocument::from_json(black_box(&json)).unwrap().to_document());
    });
}

criterion_group!(benches, bench_typing, bench_toggle_large, bench_serialize);
criterion_main!(benches);
