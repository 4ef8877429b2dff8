//! 정맥 점적 용량 ↔ 속도 변환.

use serde::{Deserialize, Serialize};

use crate::input::finite;

/// 변환 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DripMode {
    /// 주입 속도 [mL/hr] → 용량 [mcg/kg/min]
    DoseFromRate,
    /// 목표 용량 [mcg/kg/min] → 주입 속도 [mL/hr]
    #[default]
    RateFromDose,
}

/// 점적 계산 입력.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DripInputs {
    pub mode: DripMode,
    /// 체중 [kg]
    pub weight_kg: Option<f64>,
    /// 백 내 약물량 [mg]
    pub drug_mg: Option<f64>,
    /// 희석액 용량 [mL]
    pub volume_ml: Option<f64>,
    /// 주입 속도 [mL/hr]
    pub rate_ml_hr: Option<f64>,
    /// 목표 용량 [mcg/kg/min]
    pub dose_mcg_kg_min: Option<f64>,
}

impl DripInputs {
    /// 비유한 값을 None으로 정리한 사본을 반환한다.
    pub fn sanitized(&self) -> Self {
        Self {
            mode: self.mode,
            weight_kg: finite(self.weight_kg),
            drug_mg: finite(self.drug_mg),
            volume_ml: finite(self.volume_ml),
            rate_ml_hr: finite(self.rate_ml_hr),
            dose_mcg_kg_min: finite(self.dose_mcg_kg_min),
        }
    }
}

/// 계산 결과. 모드에 따라 value는 용량 또는 속도다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DripResult {
    pub mode: DripMode,
    pub value: Option<f64>,
}

/// 농도 [mg/mL]. 용량이 0 이하이거나 결과가 0 이하이면 None.
pub fn concentration(drug_mg: Option<f64>, volume_ml: Option<f64>) -> Option<f64> {
    let volume = finite(volume_ml).filter(|v| *v > 0.0)?;
    let conc = finite(drug_mg)? / volume;
    finite(Some(conc)).filter(|c| *c > 0.0)
}

/// 농도와 체중이 모두 양수일 때만 통과시킨다.
fn guard(concentration: f64, weight_kg: f64) -> Option<(f64, f64)> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(concentration) && valid(weight_kg) {
        Some((concentration, weight_kg))
    } else {
        None
    }
}

/// mL/hr × mg/mL × 1000 / (60 × kg) = mcg/kg/min
pub fn dose_from_rate(rate_ml_hr: f64, concentration_mg_ml: f64, weight_kg: f64) -> Option<f64> {
    let (conc, weight) = guard(concentration_mg_ml, weight_kg)?;
    finite(Some(rate_ml_hr * conc * 1000.0 / (60.0 * weight)))
}

/// mcg/kg/min × 60 × kg / (mg/mL × 1000) = mL/hr
pub fn rate_from_dose(dose_mcg_kg_min: f64, concentration_mg_ml: f64, weight_kg: f64) -> Option<f64> {
    let (conc, weight) = guard(concentration_mg_ml, weight_kg)?;
    finite(Some(dose_mcg_kg_min * 60.0 * weight / (conc * 1000.0)))
}

fn compute_value(inputs: &DripInputs) -> Option<f64> {
    let conc = concentration(inputs.drug_mg, inputs.volume_ml)?;
    let weight = finite(inputs.weight_kg)?;
    match inputs.mode {
        DripMode::DoseFromRate => dose_from_rate(finite(inputs.rate_ml_hr)?, conc, weight),
        DripMode::RateFromDose => rate_from_dose(finite(inputs.dose_mcg_kg_min)?, conc, weight),
    }
}

/// 폼 입력 전체로 선택된 방향의 값을 계산한다.
pub fn compute(inputs: &DripInputs) -> DripResult {
    DripResult {
        mode: inputs.mode,
        value: compute_value(inputs),
    }
}
