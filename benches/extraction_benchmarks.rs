use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scene_tagger::{
    lookup, match_all, NoSynonyms, SceneExtractor, SimpleNormalizer, StandardExtractor,
    SynonymExpander, Thesaurus, TokenNormalizer,
};

const PROMPTS: &[(&str, &str)] = &[
    ("short", "misty forest at dusk"),
    ("reference", "The ancient temple stood silent at dawn in thick fog"),
    (
        "long",
        "A crowded city street at night, rain falling on broken lanterns while an eerie \
         glow spills from the abandoned shrine and the dense fog hides the midnight sky",
    ),
];

fn benchmark_normalize(c: &mut Criterion) {
    let normalizer = SimpleNormalizer::new();
    let mut group = c.benchmark_group("normalize");
    for (name, prompt) in PROMPTS {
        group.bench_with_input(BenchmarkId::from_parameter(name), prompt, |b, p| {
            b.iter(|| normalizer.normalize(black_box(p)).unwrap())
        });
    }
    group.finish();
}

fn benchmark_expand(c: &mut Criterion) {
    let normalizer = SimpleNormalizer::new();
    let thesaurus = Thesaurus::builtin().unwrap();
    let expander = SynonymExpander::new(&thesaurus);
    let mut group = c.benchmark_group("expand");
    for (name, prompt) in PROMPTS {
        let tokens = normalizer.normalize(prompt).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &tokens, |b, t| {
            b.iter(|| expander.expand(black_box(t)).unwrap())
        });
    }
    group.finish();
}

fn benchmark_match(c: &mut Criterion) {
    let ontology = lookup();
    let extractor = StandardExtractor::standard().unwrap();
    let mut group = c.benchmark_group("match_all");
    for (name, prompt) in PROMPTS {
        let tokens = extractor.expanded_tokens(prompt).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &tokens, |b, t| {
            b.iter(|| match_all(black_box(t), &ontology))
        });
    }
    group.finish();
}

fn benchmark_extract(c: &mut Criterion) {
    let cached = StandardExtractor::standard().unwrap();
    let literal = SceneExtractor::new(SimpleNormalizer::new(), NoSynonyms);
    let mut group = c.benchmark_group("extract");
    for (name, prompt) in PROMPTS {
        group.bench_with_input(BenchmarkId::new("cached_thesaurus", name), prompt, |b, p| {
            b.iter(|| cached.extract(black_box(p)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("no_synonyms", name), prompt, |b, p| {
            b.iter(|| literal.extract(black_box(p)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_expand,
    benchmark_match,
    benchmark_extract
);
criterion_main!(benches);
