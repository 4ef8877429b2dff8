//! 결과 표시용 포맷. 필드별 고정 소수 자릿수, 값이 없으면 대시.

use crate::drip::DripMode;

/// 값이 없을 때 표시하는 자리표시자.
pub const PLACEHOLDER: &str = "—";

/// 표시 필드 종류. 자릿수 표를 한곳에 모은다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Bsa,
    Map,
    Mpap,
    Cao2,
    Cvo2,
    Vo2,
    CardiacOutput,
    CardiacIndex,
    StrokeVolume,
    Svr,
    PvrDyn,
    PvrWood,
    Dose,
    Rate,
    Concentration,
}

impl Field {
    pub fn decimals(self) -> usize {
        match self {
            Field::Vo2 | Field::StrokeVolume | Field::Svr | Field::PvrDyn => 0,
            Field::Map | Field::Mpap => 1,
            Field::Bsa
            | Field::Cao2
            | Field::Cvo2
            | Field::CardiacOutput
            | Field::CardiacIndex
            | Field::PvrWood
            | Field::Rate => 2,
            Field::Dose | Field::Concentration => 3,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::Bsa => "m²",
            Field::Map | Field::Mpap => "mmHg",
            Field::Cao2 | Field::Cvo2 => "mL/dL",
            Field::Vo2 => "mL/min",
            Field::CardiacOutput => "L/min",
            Field::CardiacIndex => "L/min/m²",
            Field::StrokeVolume => "mL/beat",
            Field::Svr | Field::PvrDyn => "dyn·s·cm⁻⁵",
            Field::PvrWood => "WU",
            Field::Dose => "mcg/kg/min",
            Field::Rate => "mL/hr",
            Field::Concentration => "mg/mL",
        }
    }
}

/// 값을 자릿수에 맞춰 문자열로 만든다.
pub fn format_value(value: Option<f64>, field: Field) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", field.decimals(), v),
        _ => PLACEHOLDER.to_string(),
    }
}

/// 단위를 붙인 표시 문자열. 값이 없으면 단위 없이 대시만.
pub fn format_with_unit(value: Option<f64>, field: Field) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{} {}", format_value(Some(v), field), field.unit()),
        _ => PLACEHOLDER.to_string(),
    }
}

/// 점적 결과가 어떤 필드로 표시되는지 결정한다.
pub fn drip_field(mode: DripMode) -> Field {
    match mode {
        DripMode::DoseFromRate => Field::Dose,
        DripMode::RateFromDose => Field::Rate,
    }
}

/// 입력 폼에 현재 값을 보여줄 때 쓰는 짧은 표기.
pub fn format_input(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => PLACEHOLDER.to_string(),
    }
}
