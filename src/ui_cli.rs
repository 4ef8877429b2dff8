use std::fmt::Write as _;
use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::drip::{self, DripInputs, DripMode};
use crate::format::{self, Field};
use crate::hemodynamics::{self, HemoInputs};
use crate::i18n::{keys, Language, Translator};
use crate::input::{parse_field, Sex};
use crate::store::FormState;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Hemodynamics,
    Drip,
    Clear,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_HEMODYNAMICS));
    println!("{}", tr.t(keys::MAIN_MENU_DRIP));
    println!("{}", tr.t(keys::MAIN_MENU_CLEAR));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Hemodynamics),
            "2" => return Ok(MenuChoice::Drip),
            "3" => return Ok(MenuChoice::Clear),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 혈역학 입력 폼의 수치 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HemoField {
    Height,
    Weight,
    Hemoglobin,
    HeartRate,
    Sbp,
    Dbp,
    Cvp,
    Pasp,
    Padp,
    Pcwp,
    Sao2,
    Svo2,
    MeasuredVo2,
}

const HEMO_FIELDS: [HemoField; 13] = [
    HemoField::Height,
    HemoField::Weight,
    HemoField::Hemoglobin,
    HemoField::HeartRate,
    HemoField::Sbp,
    HemoField::Dbp,
    HemoField::Cvp,
    HemoField::Pasp,
    HemoField::Padp,
    HemoField::Pcwp,
    HemoField::Sao2,
    HemoField::Svo2,
    HemoField::MeasuredVo2,
];

impl HemoField {
    fn label_key(self) -> &'static str {
        match self {
            HemoField::Height => keys::FIELD_HEIGHT,
            HemoField::Weight => keys::FIELD_WEIGHT,
            HemoField::Hemoglobin => keys::FIELD_HEMOGLOBIN,
            HemoField::HeartRate => keys::FIELD_HEART_RATE,
            HemoField::Sbp => keys::FIELD_SBP,
            HemoField::Dbp => keys::FIELD_DBP,
            HemoField::Cvp => keys::FIELD_CVP,
            HemoField::Pasp => keys::FIELD_PASP,
            HemoField::Padp => keys::FIELD_PADP,
            HemoField::Pcwp => keys::FIELD_PCWP,
            HemoField::Sao2 => keys::FIELD_SAO2,
            HemoField::Svo2 => keys::FIELD_SVO2,
            HemoField::MeasuredVo2 => keys::FIELD_MEASURED_VO2,
        }
    }

    fn slot(self, form: &mut HemoInputs) -> &mut Option<f64> {
        match self {
            HemoField::Height => &mut form.height_cm,
            HemoField::Weight => &mut form.weight_kg,
            HemoField::Hemoglobin => &mut form.hemoglobin_g_dl,
            HemoField::HeartRate => &mut form.heart_rate_bpm,
            HemoField::Sbp => &mut form.sbp_mmhg,
            HemoField::Dbp => &mut form.dbp_mmhg,
            HemoField::Cvp => &mut form.cvp_mmhg,
            HemoField::Pasp => &mut form.pasp_mmhg,
            HemoField::Padp => &mut form.padp_mmhg,
            HemoField::Pcwp => &mut form.pcwp_mmhg,
            HemoField::Sao2 => &mut form.sao2_pct,
            HemoField::Svo2 => &mut form.svo2_pct,
            HemoField::MeasuredVo2 => &mut form.measured_vo2_ml_min,
        }
    }

    fn get(self, form: &HemoInputs) -> Option<f64> {
        let mut copy = *form;
        *self.slot(&mut copy)
    }
}

/// 점적 입력 폼의 수치 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DripField {
    Weight,
    DrugMg,
    VolumeMl,
    Rate,
    Dose,
}

impl DripField {
    /// 현재 모드에서 편집할 항목. 계산 대상 값은 입력받지 않는다.
    fn for_mode(mode: DripMode) -> [DripField; 4] {
        match mode {
            DripMode::DoseFromRate => {
                [DripField::Weight, DripField::DrugMg, DripField::VolumeMl, DripField::Rate]
            }
            DripMode::RateFromDose => {
                [DripField::Weight, DripField::DrugMg, DripField::VolumeMl, DripField::Dose]
            }
        }
    }

    fn label_key(self) -> &'static str {
        match self {
            DripField::Weight => keys::FIELD_WEIGHT,
            DripField::DrugMg => keys::FIELD_DRUG_MG,
            DripField::VolumeMl => keys::FIELD_VOLUME_ML,
            DripField::Rate => keys::FIELD_RATE,
            DripField::Dose => keys::FIELD_DOSE,
        }
    }

    fn slot(self, form: &mut DripInputs) -> &mut Option<f64> {
        match self {
            DripField::Weight => &mut form.weight_kg,
            DripField::DrugMg => &mut form.drug_mg,
            DripField::VolumeMl => &mut form.volume_ml,
            DripField::Rate => &mut form.rate_ml_hr,
            DripField::Dose => &mut form.dose_mcg_kg_min,
        }
    }

    fn get(self, form: &DripInputs) -> Option<f64> {
        let mut copy = *form;
        *self.slot(&mut copy)
    }
}

fn mode_label(tr: &Translator, mode: DripMode) -> &str {
    match mode {
        DripMode::DoseFromRate => tr.t(keys::DRIP_MODE_DOSE_FROM_RATE),
        DripMode::RateFromDose => tr.t(keys::DRIP_MODE_RATE_FROM_DOSE),
    }
}

fn push_row(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "  {label:<24} {value}");
}

/// 혈역학 결과 표를 문자열로 만든다.
pub fn hemo_report(tr: &Translator, inputs: &HemoInputs) -> String {
    let r = hemodynamics::evaluate_hemodynamics(inputs);
    log::debug!("hemodynamics evaluated: {r:?}");
    let rows = [
        (keys::RESULT_BSA, r.bsa_m2, Field::Bsa),
        (keys::RESULT_MAP, r.map_mmhg, Field::Map),
        (keys::RESULT_MPAP, r.mpap_mmhg, Field::Mpap),
        (keys::RESULT_CAO2, r.cao2_ml_dl, Field::Cao2),
        (keys::RESULT_CVO2, r.cvo2_ml_dl, Field::Cvo2),
        (keys::RESULT_VO2, r.vo2_ml_min, Field::Vo2),
        (keys::RESULT_CO, r.cardiac_output_l_min, Field::CardiacOutput),
        (keys::RESULT_CI, r.cardiac_index_l_min_m2, Field::CardiacIndex),
        (keys::RESULT_SV, r.stroke_volume_ml, Field::StrokeVolume),
        (keys::RESULT_SVR, r.svr_dyn, Field::Svr),
        (keys::RESULT_PVR_DYN, r.pvr_dyn, Field::PvrDyn),
        (keys::RESULT_PVR_WOOD, r.pvr_wood, Field::PvrWood),
    ];
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::RESULTS_HEADING));
    for (key, value, field) in rows {
        push_row(&mut out, tr.t(key), format::format_with_unit(value, field));
    }
    out
}

/// 점적 결과(농도 + 선택된 방향의 값)를 문자열로 만든다.
pub fn drip_report(tr: &Translator, inputs: &DripInputs) -> String {
    let result = drip::compute(inputs);
    log::debug!("drip computed: {result:?}");
    let conc = drip::concentration(inputs.drug_mg, inputs.volume_ml);
    let result_key = match result.mode {
        DripMode::DoseFromRate => keys::RESULT_DOSE,
        DripMode::RateFromDose => keys::RESULT_RATE,
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::RESULTS_HEADING));
    push_row(&mut out, tr.t(keys::DRIP_MODE_LABEL), mode_label(tr, result.mode).to_string());
    push_row(
        &mut out,
        tr.t(keys::RESULT_CONCENTRATION),
        format::format_with_unit(conc, Field::Concentration),
    );
    push_row(
        &mut out,
        tr.t(result_key),
        format::format_with_unit(result.value, format::drip_field(result.mode)),
    );
    out
}

/// 혈역학 화면: 입력 목록과 결과를 보여주고 항목 편집을 반복한다.
pub fn handle_hemodynamics(tr: &Translator, state: &mut FormState) -> Result<(), AppError> {
    loop {
        println!("{}", tr.t(keys::HEMO_HEADING));
        println!("{}", tr.t(keys::HEMO_NOTE_VO2));
        println!("{}", tr.t(keys::INPUTS_HEADING));
        for (idx, field) in HEMO_FIELDS.iter().enumerate() {
            println!(
                "  {:>2}) {:<24} {}",
                idx + 1,
                tr.t(field.label_key()),
                format::format_input(field.get(&state.hemo))
            );
        }
        println!("  {:>2}) {:<24} {}", HEMO_FIELDS.len() + 1, tr.t(keys::FIELD_SEX), state.hemo.sex.as_code());
        print!("{}", hemo_report(tr, &state.hemo));

        let sel = read_line(tr.t(keys::PROMPT_FIELD_SELECT))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(());
        }
        match sel.parse::<usize>() {
            Ok(n) if (1..=HEMO_FIELDS.len()).contains(&n) => {
                let field = HEMO_FIELDS[n - 1];
                let current = field.get(&state.hemo);
                if let Some(value) = read_optional(tr, tr.t(field.label_key()), current)? {
                    state.edit_hemo(|form| *field.slot(form) = value)?;
                }
            }
            Ok(n) if n == HEMO_FIELDS.len() + 1 => {
                let raw = read_line(&format!("{}: ", tr.t(keys::FIELD_SEX)))?;
                if !raw.trim().is_empty() {
                    let sex = Sex::parse(&raw);
                    state.edit_hemo(|form| form.sex = sex)?;
                }
            }
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 점적 화면. 0번 항목은 변환 방향 전환이다.
pub fn handle_drip(tr: &Translator, state: &mut FormState) -> Result<(), AppError> {
    loop {
        let fields = DripField::for_mode(state.drip.mode);
        println!("{}", tr.t(keys::DRIP_HEADING));
        println!("{}", tr.t(keys::INPUTS_HEADING));
        println!("  {:>2}) {:<24} {}", 0, tr.t(keys::DRIP_MODE_LABEL), mode_label(tr, state.drip.mode));
        for (idx, field) in fields.iter().enumerate() {
            println!(
                "  {:>2}) {:<24} {}",
                idx + 1,
                tr.t(field.label_key()),
                format::format_input(field.get(&state.drip))
            );
        }
        print!("{}", drip_report(tr, &state.drip));

        let sel = read_line(tr.t(keys::PROMPT_FIELD_SELECT))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(());
        }
        match sel.parse::<usize>() {
            Ok(0) => {
                let next = match state.drip.mode {
                    DripMode::DoseFromRate => DripMode::RateFromDose,
                    DripMode::RateFromDose => DripMode::DoseFromRate,
                };
                state.edit_drip(|form| form.mode = next)?;
            }
            Ok(n) if (1..=fields.len()).contains(&n) => {
                let field = fields[n - 1];
                let current = field.get(&state.drip);
                if let Some(value) = read_optional(tr, tr.t(field.label_key()), current)? {
                    state.edit_drip(|form| *field.slot(form) = value)?;
                }
            }
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 확인 후 두 폼을 모두 비운다.
pub fn handle_clear(tr: &Translator, state: &mut FormState) -> Result<(), AppError> {
    let answer = read_line(tr.t(keys::CLEAR_CONFIRM))?;
    if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "예") {
        state.clear()?;
        println!("{}", tr.t(keys::CLEAR_DONE));
    } else {
        println!("{}", tr.t(keys::CLEAR_CANCELLED));
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 변경되었으면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let language = match sel.trim() {
        "" => return Ok(false),
        "1" => "auto",
        "2" => "ko",
        "3" => "en",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = language.to_string();
    Ok(true)
}

/// 편집 입력 해석 결과. None=변경 없음, Some(None)=지움, Some(Some(v))=새 값.
fn interpret_edit(raw: &str) -> Option<Option<f64>> {
    match raw.trim() {
        "" => None,
        "-" => Some(None),
        text => Some(parse_field(text)),
    }
}

fn read_optional(
    tr: &Translator,
    label: &str,
    current: Option<f64>,
) -> Result<Option<Option<f64>>, AppError> {
    let prompt = format!(
        "{label} [{}] ({}): ",
        format::format_input(current),
        tr.t(keys::HINT_KEEP_CLEAR)
    );
    let raw = read_line(&prompt)?;
    Ok(interpret_edit(&raw))
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}
