// ABOUTME: Criterion benchmarks for the document renderer
// ABOUTME: Measures block classification, inline tokenization, and placeholder resolution

use criterion::{Criterion, criterion_group, criterion_main};
use postgen_cli::renderer::{ImagePool, render};
use std::hint::black_box;

fn sample_post() -> String {
    let mut post = String::new();
    for index in 0..50 {
        post.push_str(&format!("# 섹션 {}\n", index));
        post.push_str("본문에는 **굵은 글씨**와 *기울임*과 `코드`가 섞여 있습니다.\n");
        post.push_str("- 첫 번째 항목\n");
        post.push_str("- 두 번째 항목 ~~취소선~~\n");
        post.push_str("1. 번호 항목 [링크](https://example.com)\n");
        post.push_str("> 인용문 한 줄\n");
        post.push_str("{missing_image.png} 뒤에 오는 텍스트\n");
        post.push_str("---\n\n");
    }
    post
}

fn bench_render(c: &mut Criterion) {
    let post = sample_post();
    let pool = ImagePool::new();

    c.bench_function("render_50_sections", |b| {
        b.iter(|| render(black_box(&post), black_box(&pool)))
    });
}

fn bench_render_single_line(c: &mut Criterion) {
    let pool = ImagePool::new();
    let line = "본문 **굵게** *기울임* `코드` ~~취소~~ [링크](https://example.com)";

    c.bench_function("render_single_line", |b| {
        b.iter(|| render(black_box(line), black_box(&pool)))
    });
}

criterion_group!(benches, bench_render, bench_render_single_line);
criterion_main!(benches);
