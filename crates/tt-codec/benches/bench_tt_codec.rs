use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tt_codec::{huffman_decode, huffman_encode, lossless_decode, lossless_encode};
use tt_core::FileMeta;

const SNIPPETS: &[&str] = &[
    "    let conn = pool.acquire().await?;\n",
    "    conn.execute(QUERY, &[&id]).await?;\n",
    "    tracing::debug!(id, \"row updated\");\n",
    "    Ok(())\n",
    "}\n\n",
    "impl Handler for Service {\n",
    "    fn handle(&self, req: Request) -> Response {\n",
];

fn generate_source(size_kb: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut text = String::with_capacity(size_kb * 1024);
    let mut i = 0;
    while text.len() < size_kb * 1024 {
        if rng.gen_bool(0.2) {
            text.push_str(&format!("pub async fn handler_{i}(pool: &Pool) -> Result<()> {{\n"));
            i += 1;
        }
        text.push_str(SNIPPETS[rng.gen_range(0..SNIPPETS.len())]);
    }
    text
}

fn bench_huffman(c: &mut Criterion) {
    for &kb in &[1usize, 10, 100] {
        let text = generate_source(kb);
        c.bench_function(&format!("huffman_encode_{kb}kb"), |b| {
            b.iter(|| black_box(huffman_encode(black_box(&text))))
        });
        let enc = huffman_encode(&text);
        c.bench_function(&format!("huffman_decode_{kb}kb"), |b| {
            b.iter(|| black_box(huffman_decode(black_box(&enc.encoded_bits), &enc.code_table).unwrap()))
        });
    }
}

fn bench_lossless(c: &mut Criterion) {
    for &kb in &[1usize, 10, 100] {
        let text = generate_source(kb);
        c.bench_function(&format!("lossless_encode_{kb}kb"), |b| {
            b.iter(|| black_box(lossless_encode(black_box(&text), FileMeta::default())))
        });
        let enc = lossless_encode(&text, FileMeta::default());
        c.bench_function(&format!("lossless_decode_{kb}kb"), |b| {
            b.iter(|| black_box(lossless_decode(black_box(&enc)).unwrap()))
        });
    }
}

criterion_group!(benches, bench_huffman, bench_lossless);
criterion_main!(benches);
