//! Fick 추정 혈역학 프로파일.
//! 입력이 빠지면 해당 파생값만 None이 되고, 나머지는 그대로 계산된다.

use serde::{Deserialize, Serialize};

use crate::input::{finite, Sex};

/// 헤모글로빈 1 g 당 결합 산소량 [mL O₂/g]
pub const HUFNER_CONSTANT: f64 = 1.34;
/// 추정 산소소비량 계수 [mL/min/m²]
pub const VO2_PER_BSA: f64 = 125.0;
/// mmHg·min/L → dyn·s·cm⁻⁵
pub const WOOD_TO_DYN: f64 = 80.0;

/// 혈역학 계산 입력. 모든 수치 필드는 None 또는 유한값이다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemoInputs {
    /// 신장 [cm]
    pub height_cm: Option<f64>,
    /// 체중 [kg]
    pub weight_kg: Option<f64>,
    pub sex: Sex,
    /// 헤모글로빈 [g/dL]
    pub hemoglobin_g_dl: Option<f64>,
    /// 심박수 [bpm]
    pub heart_rate_bpm: Option<f64>,
    /// 수축기 혈압 [mmHg]
    pub sbp_mmhg: Option<f64>,
    /// 이완기 혈압 [mmHg]
    pub dbp_mmhg: Option<f64>,
    /// 중심정맥압 [mmHg]
    pub cvp_mmhg: Option<f64>,
    /// 폐동맥 수축기압 [mmHg]
    pub pasp_mmhg: Option<f64>,
    /// 폐동맥 이완기압 [mmHg]
    pub padp_mmhg: Option<f64>,
    /// 폐모세혈관 쐐기압 [mmHg]
    pub pcwp_mmhg: Option<f64>,
    /// 동맥혈 산소포화도 [%]
    pub sao2_pct: Option<f64>,
    /// 혼합정맥혈 산소포화도 [%]
    pub svo2_pct: Option<f64>,
    /// 실측 산소소비량 [mL/min]. 있으면 125×BSA 추정 대신 사용한다.
    pub measured_vo2_ml_min: Option<f64>,
}

impl HemoInputs {
    /// 비유한 값을 None으로 정리한 사본을 반환한다.
    pub fn sanitized(&self) -> Self {
        Self {
            height_cm: finite(self.height_cm),
            weight_kg: finite(self.weight_kg),
            sex: self.sex,
            hemoglobin_g_dl: finite(self.hemoglobin_g_dl),
            heart_rate_bpm: finite(self.heart_rate_bpm),
            sbp_mmhg: finite(self.sbp_mmhg),
            dbp_mmhg: finite(self.dbp_mmhg),
            cvp_mmhg: finite(self.cvp_mmhg),
            pasp_mmhg: finite(self.pasp_mmhg),
            padp_mmhg: finite(self.padp_mmhg),
            pcwp_mmhg: finite(self.pcwp_mmhg),
            sao2_pct: finite(self.sao2_pct),
            svo2_pct: finite(self.svo2_pct),
            measured_vo2_ml_min: finite(self.measured_vo2_ml_min),
        }
    }
}

/// 혈역학 계산 결과. 각 필드는 독립적으로 None일 수 있다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HemoResults {
    /// 체표면적 [m²]
    pub bsa_m2: Option<f64>,
    /// 평균 동맥압 [mmHg]
    pub map_mmhg: Option<f64>,
    /// 평균 폐동맥압 [mmHg]
    pub mpap_mmhg: Option<f64>,
    /// 동맥혈 산소함량 [mL/dL]
    pub cao2_ml_dl: Option<f64>,
    /// 정맥혈 산소함량 [mL/dL]
    pub cvo2_ml_dl: Option<f64>,
    /// 산소소비량 [mL/min] (추정 또는 실측)
    pub vo2_ml_min: Option<f64>,
    /// 심박출량 [L/min]
    pub cardiac_output_l_min: Option<f64>,
    /// 심장지수 [L/min/m²]
    pub cardiac_index_l_min_m2: Option<f64>,
    /// 일회박출량 [mL/beat]
    pub stroke_volume_ml: Option<f64>,
    /// 전신혈관저항 [dyn·s·cm⁻⁵]
    pub svr_dyn: Option<f64>,
    /// 폐혈관저항 [dyn·s·cm⁻⁵]
    pub pvr_dyn: Option<f64>,
    /// 폐혈관저항 [Wood Units]
    pub pvr_wood: Option<f64>,
}

/// 0이 아닌 분모만 통과시킨다.
fn nonzero(v: Option<f64>) -> Option<f64> {
    v.filter(|d| *d != 0.0)
}

/// 유한한 양수만 통과시킨다.
fn positive(v: Option<f64>) -> Option<f64> {
    finite(v).filter(|x| *x > 0.0)
}

/// Mosteller 체표면적.
pub fn body_surface_area(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let product = height_cm? * weight_kg? / 3600.0;
    // 음수 곱은 sqrt에서 NaN이 된다
    finite(Some(product.sqrt()))
}

pub fn mean_arterial_pressure(sbp: Option<f64>, dbp: Option<f64>) -> Option<f64> {
    let (sbp, dbp) = (sbp?, dbp?);
    finite(Some(dbp + (sbp - dbp) / 3.0))
}

pub fn mean_pulmonary_pressure(pasp: Option<f64>, padp: Option<f64>) -> Option<f64> {
    finite(Some((pasp? + 2.0 * padp?) / 3.0))
}

/// 산소함량 = 1.34 × Hb × 포화도. 용존산소는 무시한다.
pub fn oxygen_content(hemoglobin_g_dl: Option<f64>, saturation_pct: Option<f64>) -> Option<f64> {
    finite(Some(HUFNER_CONSTANT * hemoglobin_g_dl? * (saturation_pct? / 100.0)))
}

/// 실측값이 있으면 그대로, 없으면 125 × BSA. 0 이하는 None.
pub fn oxygen_consumption(bsa_m2: Option<f64>, measured_ml_min: Option<f64>) -> Option<f64> {
    if let Some(measured) = positive(measured_ml_min) {
        return Some(measured);
    }
    positive(Some(VO2_PER_BSA * bsa_m2?))
}

/// Fick 심박출량. 동정맥 산소함량차나 결과가 0 이하이면 None.
pub fn fick_cardiac_output(
    vo2_ml_min: Option<f64>,
    cao2_ml_dl: Option<f64>,
    cvo2_ml_dl: Option<f64>,
) -> Option<f64> {
    let av_gap = cao2_ml_dl? - cvo2_ml_dl?;
    if av_gap <= 0.0 {
        return None;
    }
    // mL/dL → mL/L 환산을 위해 ×10
    positive(Some(vo2_ml_min? / (av_gap * 10.0)))
}

pub fn cardiac_index(cardiac_output: Option<f64>, bsa_m2: Option<f64>) -> Option<f64> {
    finite(Some(cardiac_output? / nonzero(bsa_m2)?))
}

pub fn stroke_volume(cardiac_output: Option<f64>, heart_rate_bpm: Option<f64>) -> Option<f64> {
    finite(Some(cardiac_output? * 1000.0 / nonzero(heart_rate_bpm)?))
}

/// 압력차 / 심박출량 [Wood Units]. 계산 공통부.
fn resistance_wood(
    upstream_mmhg: Option<f64>,
    downstream_mmhg: Option<f64>,
    cardiac_output: Option<f64>,
) -> Option<f64> {
    let gradient = upstream_mmhg? - downstream_mmhg?;
    finite(Some(gradient / nonzero(cardiac_output)?))
}

pub fn systemic_vascular_resistance(
    map_mmhg: Option<f64>,
    cvp_mmhg: Option<f64>,
    cardiac_output: Option<f64>,
) -> Option<f64> {
    resistance_wood(map_mmhg, cvp_mmhg, cardiac_output)
        .and_then(|wu| finite(Some(wu * WOOD_TO_DYN)))
}

pub fn pulmonary_vascular_resistance_wood(
    mpap_mmhg: Option<f64>,
    pcwp_mmhg: Option<f64>,
    cardiac_output: Option<f64>,
) -> Option<f64> {
    resistance_wood(mpap_mmhg, pcwp_mmhg, cardiac_output)
}

pub fn pulmonary_vascular_resistance_dyn(
    mpap_mmhg: Option<f64>,
    pcwp_mmhg: Option<f64>,
    cardiac_output: Option<f64>,
) -> Option<f64> {
    pulmonary_vascular_resistance_wood(mpap_mmhg, pcwp_mmhg, cardiac_output)
        .and_then(|wu| finite(Some(wu * WOOD_TO_DYN)))
}

/// 입력 스냅샷 전체를 위에서 아래로 한 번에 평가한다.
pub fn evaluate_hemodynamics(inputs: &HemoInputs) -> HemoResults {
    let i = inputs.sanitized();

    let bsa = body_surface_area(i.height_cm, i.weight_kg);
    let map = mean_arterial_pressure(i.sbp_mmhg, i.dbp_mmhg);
    let mpap = mean_pulmonary_pressure(i.pasp_mmhg, i.padp_mmhg);
    let cao2 = oxygen_content(i.hemoglobin_g_dl, i.sao2_pct);
    let cvo2 = oxygen_content(i.hemoglobin_g_dl, i.svo2_pct);
    let vo2 = oxygen_consumption(bsa, i.measured_vo2_ml_min);
    let co = fick_cardiac_output(vo2, cao2, cvo2);

    HemoResults {
        bsa_m2: bsa,
        map_mmhg: map,
        mpap_mmhg: mpap,
        cao2_ml_dl: cao2,
        cvo2_ml_dl: cvo2,
        vo2_ml_min: vo2,
        cardiac_output_l_min: co,
        cardiac_index_l_min_m2: cardiac_index(co, bsa),
        stroke_volume_ml: stroke_volume(co, i.heart_rate_bpm),
        svr_dyn: systemic_vascular_resistance(map, i.cvp_mmhg, co),
        pvr_dyn: pulmonary_vascular_resistance_dyn(mpap, i.pcwp_mmhg, co),
        pvr_wood: pulmonary_vascular_resistance_wood(mpap, i.pcwp_mmhg, co),
    }
}
