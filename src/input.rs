//! 입력 경계: 텍스트 필드를 계산 계층이 쓰는 값으로 바꾼다.

use serde::{Deserialize, Serialize};

/// 텍스트를 유한한 숫자로 해석한다.
/// 비어 있거나 숫자가 아니거나 NaN/무한대이면 None (0이 아님).
pub fn parse_field(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = normalize_decimal_comma(trimmed)?;
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 소수점 쉼표(1,82)만 허용한다. 천 단위 구분으로 읽힐 수 있는 입력
/// (1,000 처럼 쉼표 뒤 정확히 세 자리, 쉼표 여러 개, 점과 혼용)은 None.
fn normalize_decimal_comma(text: &str) -> Option<String> {
    let Some((whole, frac)) = text.split_once(',') else {
        return Some(text.to_string());
    };
    let ambiguous = frac.contains(',')
        || text.contains('.')
        || frac.len() == 3
        || frac.is_empty()
        || !frac.chars().all(|c| c.is_ascii_digit());
    if ambiguous {
        None
    } else {
        Some(format!("{whole}.{frac}"))
    }
}

/// 이미 숫자로 들어온 값에도 같은 규칙을 적용한다.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// 환자 성별. 현재 공식에는 쓰이지 않지만 폼 상태로 보존한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Sex {
    /// m/male/남, f/female/여 를 인식하고 나머지는 Unspecified.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "m" | "male" | "남" | "남성" => Sex::Male,
            "f" | "female" | "여" | "여성" => Sex::Female,
            _ => Sex::Unspecified,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unspecified => "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_and_garbage() {
        assert_eq!(parse_field(""), None);
        assert_eq!(parse_field("   "), None);
        assert_eq!(parse_field("abc"), None);
        assert_eq!(parse_field("NaN"), None);
        assert_eq!(parse_field("inf"), None);
        assert_eq!(parse_field("1e400"), None);
    }

    #[test]
    fn accepts_numbers_with_whitespace_and_comma() {
        assert_eq!(parse_field(" 170 "), Some(170.0));
        assert_eq!(parse_field("-3.5"), Some(-3.5));
        assert_eq!(parse_field("1,5"), Some(1.5));
        assert_eq!(parse_field("0,25"), Some(0.25));
        assert_eq!(parse_field("0"), Some(0.0));
    }

    #[test]
    fn thousands_separator_is_rejected() {
        assert_eq!(parse_field("1,000"), None);
        assert_eq!(parse_field("12,345"), None);
        assert_eq!(parse_field("1,000,000"), None);
        assert_eq!(parse_field("1.000,5"), None);
        assert_eq!(parse_field("1,"), None);
        assert_eq!(parse_field("1,5e3"), None);
    }

    #[test]
    fn sex_parsing() {
        assert_eq!(Sex::parse("M"), Sex::Male);
        assert_eq!(Sex::parse("female"), Sex::Female);
        assert_eq!(Sex::parse("x"), Sex::Unspecified);
    }
}
