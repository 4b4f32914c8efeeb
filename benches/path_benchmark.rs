use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use xmlpath::parser::Tokenizer;
use xmlpath::{XmlPath, parse};

const PATHS: &[(&str, &str)] = &[
    ("simple", "shopping.category.item.name"),
    ("indexed", "shopping.category[1].item[0].price"),
    ("attribute", "shopping.category.@type"),
    (
        "find",
        "shopping.category.find { it.@type == 'groceries' }.item.size()",
    ),
    (
        "find_all",
        "shopping.category.item.findAll { item -> item.price.toFloat() > 10 }.name",
    ),
    ("deep", "**.findAll { it.name() == 'price' && it.toInteger() >= 5 }"),
    (
        "collect_entries",
        "shopping.category.item.collectEntries { k -> k.name : k.price }",
    ),
];

fn generate_document(categories: usize) -> String {
    let mut xml = String::from("<shopping>");
    for c in 0..categories {
        let kind = if c % 2 == 0 { "groceries" } else { "supplies" };
        xml.push_str(&format!("<category type=\"{kind}\">"));
        for i in 0..10 {
            xml.push_str(&format!(
                "<item><name>Item {c}-{i}</name><price>{}</price></item>",
                (c * 10 + i) % 40
            ));
        }
        xml.push_str("</category>");
    }
    xml.push_str("</shopping>");
    xml
}

fn benchmark_tokenizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");
    for (name, path) in PATHS {
        group.bench_with_input(BenchmarkId::from_parameter(name), path, |b, path| {
            b.iter(|| {
                let mut tokenizer = Tokenizer::new(black_box(path));
                black_box(tokenizer.tokenize_all())
            })
        });
    }
    group.finish();
}

fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    for (name, path) in PATHS {
        group.bench_with_input(BenchmarkId::from_parameter(name), path, |b, path| {
            b.iter(|| black_box(parse(black_box(path))))
        });
    }
    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for size in [10, 100] {
        let Ok(document) = XmlPath::new(&generate_document(size)) else {
            continue;
        };
        for (name, path) in PATHS {
            group.bench_with_input(
                BenchmarkId::new(*name, size),
                path,
                |b, path| b.iter(|| black_box(document.get_value(black_box(path)))),
            );
        }
    }
    group.finish();
}

fn benchmark_document_parsing(c: &mut Criterion) {
    let xml = generate_document(100);
    c.bench_function("document_parsing", |b| {
        b.iter(|| black_box(XmlPath::new(black_box(&xml))))
    });
}

criterion_group!(
    benches,
    benchmark_tokenizer,
    benchmark_parser,
    benchmark_query,
    benchmark_document_parsing
);
criterion_main!(benches);
