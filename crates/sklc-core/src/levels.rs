//! SKLC level descriptors.
//!
//! A static, read-only table mapping stages 0..=5 to a level name and a
//! description in each supported language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language for level descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ko => write!(f, "ko"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ko" | "korean" => Ok(Language::Ko),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// A level name and its description in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelDescription {
    pub level: &'static str,
    pub description: &'static str,
}

struct LevelEntry {
    level: &'static str,
    en: &'static str,
    ko: &'static str,
}

/// Highest stage with its own descriptor.
pub const MAX_DESCRIBED_STAGE: u8 = 5;

static LEVELS: [LevelEntry; MAX_DESCRIBED_STAGE as usize + 1] = [
    LevelEntry {
        level: "Pre-SKLC",
        en: "Very limited Korean ability. Can recognize some words but cannot form sentences.",
        ko: "아주 제한적인 한국어 능력. 일부 단어는 알지만 문장을 만들 수 없음.",
    },
    LevelEntry {
        level: "SKLC Level 1",
        en: "Can handle very basic greetings and self-introduction. Understands simple phrases.",
        ko: "아주 기본적인 인사와 자기소개 가능. 간단한 표현 이해.",
    },
    LevelEntry {
        level: "SKLC Level 2",
        en: "Can have simple everyday conversations. Uses basic grammar and common vocabulary.",
        ko: "간단한 일상 대화 가능. 기본 문법과 일반적인 어휘 사용.",
    },
    LevelEntry {
        level: "SKLC Level 3",
        en: "Can discuss familiar topics with some detail. Understands and uses various sentence patterns.",
        ko: "익숙한 주제에 대해 어느 정도 자세히 말할 수 있음. 다양한 문장 패턴 이해 및 사용.",
    },
    LevelEntry {
        level: "SKLC Level 4",
        en: "Can communicate effectively in most situations. Good control of grammar and appropriate speech levels.",
        ko: "대부분의 상황에서 효과적으로 의사소통 가능. 문법과 적절한 말투를 잘 조절함.",
    },
    LevelEntry {
        level: "SKLC Level 5",
        en: "Near-native fluency. Can handle complex topics and formal/informal contexts with ease.",
        ko: "거의 원어민 수준의 유창함. 복잡한 주제와 공식/비공식 상황을 쉽게 다룸.",
    },
];

/// Describe `stage` in `language`. Stages without an entry fall back to
/// stage 0.
pub fn describe(stage: u8, language: Language) -> LevelDescription {
    let entry = LEVELS.get(usize::from(stage)).unwrap_or(&LEVELS[0]);
    let description = match language {
        Language::En => entry.en,
        Language::Ko => entry.ko,
    };
    LevelDescription {
        level: entry.level,
        description,
    }
}

/// Describe `stage` for a language code such as `"ko"`. Unknown codes fall
/// back to English.
pub fn describe_for_code(stage: u8, language_code: &str) -> LevelDescription {
    describe(stage, language_code.parse().unwrap_or_default())
}
