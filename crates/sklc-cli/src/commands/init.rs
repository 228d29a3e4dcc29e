//! The `sklc init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create sklc.toml
    if std::path::Path::new("sklc.toml").exists() {
        println!("sklc.toml already exists, skipping.");
    } else {
        std::fs::write("sklc.toml", SAMPLE_CONFIG)?;
        println!("Created sklc.toml");
    }

    // Create example assessment
    std::fs::create_dir_all("assessments")?;
    let example_path = std::path::Path::new("assessments/example.json");
    if example_path.exists() {
        println!("assessments/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DEFINITION)?;
        println!("Created assessments/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit assessments/example.json with your items and bands");
    println!("  2. Run: sklc validate --definition assessments/example.json");
    println!("  3. Run: sklc score --responses responses.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# sklc configuration

default_definition = "assessments/example.json"
default_language = "en"
output_dir = "./sklc-results"
"#;

const EXAMPLE_DEFINITION: &str = r#"{
  "title": "Example Korean Speaking Diagnostic",
  "domains": ["background", "grammar", "vocabulary", "pragmatics", "pronunciation"],
  "items": [
    {
      "id": "bg1",
      "item_type": "mcq_single",
      "domains": {"background": 1.0},
      "scoring": {
        "response_type": "single_choice",
        "rules": [{"condition": {"selected_option_id_any": true}, "score": 1.0}]
      }
    },
    {
      "id": "g1",
      "item_type": "mcq_single",
      "domains": {"grammar": 1.0},
      "scoring": {
        "response_type": "single_choice",
        "rules": [
          {"condition": {"selected_option_id": "2"}, "score": 1.0},
          {"condition": {"selected_option_id_in": ["1", "3"]}, "score": 0.3}
        ]
      }
    },
    {
      "id": "g2",
      "item_type": "mcq_single",
      "domains": {"grammar": 1.0, "vocabulary": 0.5},
      "scoring": {
        "response_type": "single_choice",
        "rules": [{"condition": {"selected_option_id": "4"}, "score": 1.0}]
      }
    },
    {
      "id": "v1",
      "item_type": "mcq_single",
      "domains": {"vocabulary": 1.0},
      "scoring": {
        "response_type": "single_choice",
        "rules": [
          {"condition": {"selected_option_id": "1"}, "score": 1.0},
          {"condition": {"selected_option_id": "2"}, "score": 0.5}
        ]
      }
    },
    {
      "id": "t1",
      "item_type": "text_short",
      "domains": {"grammar": 0.5, "vocabulary": 1.0},
      "scoring": {
        "response_type": "text",
        "method": "heuristic_self_intro_v1",
        "params": {
          "min_sentences": 2,
          "weights": {"sentences": 0.3, "basic_verbs": 0.3, "topic_or_hobby": 0.2},
          "lexicons": {
            "basic_verbs": ["이에요", "예요", "좋아해요", "살아요", "공부해요"],
            "topic_or_hobby": ["음악", "영화", "운동", "요리", "여행"]
          }
        }
      }
    },
    {
      "id": "t2",
      "item_type": "text_short",
      "domains": {"grammar": 1.0},
      "scoring": {
        "response_type": "text",
        "method": "heuristic_past_routine_v1",
        "params": {
          "lexicons": {
            "content_words": ["아침", "학교", "점심", "친구", "저녁"],
            "min_content_word_count": 3
          }
        }
      }
    },
    {
      "id": "t3",
      "item_type": "text_short",
      "domains": {"pragmatics": 1.0},
      "scoring": {
        "response_type": "text",
        "method": "heuristic_professor_polite_rewrite_v1",
        "params": {
          "lexicons": {"request_keywords": ["과제", "기한", "연장", "제출"]}
        }
      }
    },
    {
      "id": "p1",
      "item_type": "mcq_single",
      "domains": {"pragmatics": 1.0},
      "scoring": {
        "response_type": "single_choice",
        "rules": [
          {"condition": {"selected_option_id": "3"}, "score": 1.0},
          {"condition": {"selected_option_id": "1"}, "score": 0.5}
        ]
      }
    },
    {
      "id": "a1",
      "item_type": "audio_read",
      "domains": {"pronunciation": 1.0},
      "scoring": {
        "response_type": "audio",
        "method": "asr_pron_wordlist_v1",
        "params": {"target_words": ["학교", "친구", "도서관", "선생님"]}
      }
    },
    {
      "id": "a2",
      "item_type": "audio_read",
      "domains": {"pronunciation": 1.0},
      "scoring": {
        "response_type": "audio",
        "method": "asr_pron_sentence_v1",
        "params": {"target_sentences": ["저는 한국어를 공부해요."]}
      }
    }
  ],
  "aggregation": {
    "banding": {
      "bands": [
        {"band": 0, "min_score": 0.0, "max_score": 0.2},
        {"band": 1, "min_score": 0.2, "max_score": 0.4},
        {"band": 2, "min_score": 0.4, "max_score": 0.6},
        {"band": 3, "min_score": 0.6, "max_score": 0.75},
        {"band": 4, "min_score": 0.75, "max_score": 0.9},
        {"band": 5, "min_score": 0.9, "max_score": 1.0}
      ]
    },
    "global_stage": {
      "included_domains": ["grammar", "vocabulary", "pragmatics", "pronunciation"],
      "min_stage": 0,
      "max_stage": 5,
      "rounding": "half_up"
    }
  }
}
"#;
