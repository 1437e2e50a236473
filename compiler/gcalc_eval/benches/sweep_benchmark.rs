use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gcalc_ast::AstNode;
use gcalc_eval::{AngleMode, GraphBounds, Sweep, DEFAULT_GRAPH_WIDTH, DEFAULT_SAMPLES_PER_PIXEL};
use gcalc_lexer::{normalize, tokenize};
use gcalc_parser::parse;

const EXPRESSIONS: &[(&str, &str)] = &[
    ("polynomial", "X^3-2×X^2+X-7"),
    ("trig", "sin(X)×cos(2×X)+tan(X÷4)"),
    ("mixed", "√(X×X+1)×ln(X^2+1)÷log(X^2+10)"),
];

fn compile(source: &str) -> AstNode {
    let tokens = normalize(&tokenize(source).expect("benchmark input lexes"));
    parse(&tokens).expect("benchmark input parses")
}

fn bench_sweep(c: &mut Criterion) {
    let sweep = Sweep::for_width(
        &GraphBounds::default(),
        DEFAULT_GRAPH_WIDTH,
        DEFAULT_SAMPLES_PER_PIXEL,
    );
    let mut group = c.benchmark_group("sweep");
    group.throughput(Throughput::Elements(sweep.len() as u64));

    for (name, source) in EXPRESSIONS {
        let tree = compile(source);
        group.bench_function(*name, |b| {
            b.iter(|| sweep.run(black_box(&tree), AngleMode::Radians))
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    // Lex, normalize, parse and evaluate once, as the "=" key does
    let source = "2×(3+4)^2-√(81)÷3+sin(π÷6)";
    c.bench_function("evaluate_from_text", |b| {
        b.iter(|| gcalc_eval::evaluate(&compile(black_box(source)), AngleMode::Degrees))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(std::time::Duration::from_secs(5));
    targets = bench_sweep, bench_pipeline
);

criterion_main!(benches);
