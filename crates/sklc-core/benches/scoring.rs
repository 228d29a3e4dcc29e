use criterion::{black_box, criterion_group, criterion_main, Criterion};

use serde_json::json;
use sklc_core::engine::compute_results;
use sklc_core::heuristics::{
    ScoringMethod, PAST_ROUTINE_V1, POLITE_REWRITE_V1, PRON_SENTENCE_V1, SELF_INTRO_V1,
};
use sklc_core::parser::{parse_definition_str, DocumentFormat};
use sklc_core::Responses;

const SELF_INTRO: &str = "안녕하세요. 저는 마리아예요. 저는 학생이에요. \
                          저는 음악을 좋아해요. 주말에 영화를 봐요.";
const PAST_ROUTINE: &str = "어제 아침에 일어났어요. 학교에 가서 공부했어요. \
                            점심에 친구하고 밥을 먹었어요.";
const POLITE: &str = "교수님, 죄송합니다. 제가 아파서 수업에 못 갔습니다. \
                      과제 제출 기한을 연장해 주실 수 있을까요?";

fn bench_text_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_heuristics");

    let self_intro = ScoringMethod::from_config(
        Some(SELF_INTRO_V1),
        json!({"lexicons": {"basic_verbs": ["이에요", "예요", "좋아해요", "봐요"],
                            "topic_or_hobby": ["음악", "영화", "운동"]}}),
    )
    .unwrap();
    let past_routine = ScoringMethod::from_config(
        Some(PAST_ROUTINE_V1),
        json!({"lexicons": {"content_words": ["아침", "학교", "점심", "친구"]}}),
    )
    .unwrap();
    let polite = ScoringMethod::from_config(
        Some(POLITE_REWRITE_V1),
        json!({"lexicons": {"request_keywords": ["과제", "기한", "연장"]}}),
    )
    .unwrap();

    group.bench_function("self_intro", |b| {
        b.iter(|| self_intro.score(black_box(Some(SELF_INTRO))))
    });

    group.bench_function("past_routine", |b| {
        b.iter(|| past_routine.score(black_box(Some(PAST_ROUTINE))))
    });

    group.bench_function("polite_rewrite", |b| {
        b.iter(|| polite.score(black_box(Some(POLITE))))
    });

    group.finish();
}

fn bench_audio_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("audio_heuristics");

    let sentence = ScoringMethod::from_config(
        Some(PRON_SENTENCE_V1),
        json!({"target_sentences": ["저는 한국어를 공부해요.", "오늘 날씨가 좋아요."]}),
    )
    .unwrap();

    group.bench_function("pron_sentence", |b| {
        b.iter(|| sentence.score(black_box(Some("저는 한국어를 공부해요 오늘 날씨가"))))
    });

    group.finish();
}

fn bench_compute_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_results");

    for n in [10usize, 100, 1000] {
        let definition =
            parse_definition_str(&generate_definition_json(n), DocumentFormat::Json).unwrap();
        let responses: Responses = (0..n)
            .map(|i| (format!("q{i}"), if i % 3 == 0 { "b" } else { "a" }.to_string()))
            .collect();

        group.bench_function(format!("{n}_items"), |b| {
            b.iter(|| compute_results(black_box(&definition), black_box(&responses)))
        });
    }

    group.finish();
}

fn generate_definition_json(n: usize) -> String {
    let domains = ["grammar", "vocabulary", "pragmatics", "pronunciation"];
    let items: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "id": format!("q{i}"),
                "item_type": "mcq_single",
                "domains": {domains[i % domains.len()]: 1.0, domains[(i + 1) % domains.len()]: 0.5},
                "scoring": {
                    "response_type": "single_choice",
                    "rules": [
                        {"condition": {"selected_option_id": "a"}, "score": 1.0},
                        {"condition": {"selected_option_id_in": ["b", "c"]}, "score": 0.4}
                    ]
                }
            })
        })
        .collect();

    json!({
        "title": "Benchmark",
        "domains": domains,
        "items": items,
        "aggregation": {
            "banding": {"bands": [
                {"band": 0, "min_score": 0.0, "max_score": 0.2},
                {"band": 1, "min_score": 0.2, "max_score": 0.4},
                {"band": 2, "min_score": 0.4, "max_score": 0.6},
                {"band": 3, "min_score": 0.6, "max_score": 0.8},
                {"band": 4, "min_score": 0.8, "max_score": 1.0}
            ]},
            "global_stage": {"min_stage": 0, "max_stage": 5}
        }
    })
    .to_string()
}

criterion_group!(
    benches,
    bench_text_heuristics,
    bench_audio_heuristics,
    bench_compute_results
);
criterion_main!(benches);
