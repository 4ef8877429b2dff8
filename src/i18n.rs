use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_HEMODYNAMICS: &str = "main_menu.hemodynamics";
    pub const MAIN_MENU_DRIP: &str = "main_menu.drip";
    pub const MAIN_MENU_CLEAR: &str = "main_menu.clear";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PROMPT_FIELD_SELECT: &str = "prompt.field_select";
    pub const HINT_KEEP_CLEAR: &str = "prompt.hint_keep_clear";
    pub const INPUTS_HEADING: &str = "form.inputs_heading";
    pub const RESULTS_HEADING: &str = "form.results_heading";

    pub const HEMO_HEADING: &str = "hemo.heading";
    pub const HEMO_NOTE_VO2: &str = "hemo.note_vo2";
    pub const FIELD_HEIGHT: &str = "field.height";
    pub const FIELD_WEIGHT: &str = "field.weight";
    pub const FIELD_SEX: &str = "field.sex";
    pub const FIELD_HEMOGLOBIN: &str = "field.hemoglobin";
    pub const FIELD_HEART_RATE: &str = "field.heart_rate";
    pub const FIELD_SBP: &str = "field.sbp";
    pub const FIELD_DBP: &str = "field.dbp";
    pub const FIELD_CVP: &str = "field.cvp";
    pub const FIELD_PASP: &str = "field.pasp";
    pub const FIELD_PADP: &str = "field.padp";
    pub const FIELD_PCWP: &str = "field.pcwp";
    pub const FIELD_SAO2: &str = "field.sao2";
    pub const FIELD_SVO2: &str = "field.svo2";
    pub const FIELD_MEASURED_VO2: &str = "field.measured_vo2";

    pub const RESULT_BSA: &str = "result.bsa";
    pub const RESULT_MAP: &str = "result.map";
    pub const RESULT_MPAP: &str = "result.mpap";
    pub const RESULT_CAO2: &str = "result.cao2";
    pub const RESULT_CVO2: &str = "result.cvo2";
    pub const RESULT_VO2: &str = "result.vo2";
    pub const RESULT_CO: &str = "result.co";
    pub const RESULT_CI: &str = "result.ci";
    pub const RESULT_SV: &str = "result.sv";
    pub const RESULT_SVR: &str = "result.svr";
    pub const RESULT_PVR_DYN: &str = "result.pvr_dyn";
    pub const RESULT_PVR_WOOD: &str = "result.pvr_wood";

    pub const DRIP_HEADING: &str = "drip.heading";
    pub const DRIP_MODE_LABEL: &str = "drip.mode_label";
    pub const DRIP_MODE_DOSE_FROM_RATE: &str = "drip.mode_dose_from_rate";
    pub const DRIP_MODE_RATE_FROM_DOSE: &str = "drip.mode_rate_from_dose";
    pub const FIELD_DRUG_MG: &str = "field.drug_mg";
    pub const FIELD_VOLUME_ML: &str = "field.volume_ml";
    pub const FIELD_RATE: &str = "field.rate";
    pub const FIELD_DOSE: &str = "field.dose";
    pub const RESULT_CONCENTRATION: &str = "result.concentration";
    pub const RESULT_DOSE: &str = "result.dose";
    pub const RESULT_RATE: &str = "result.rate";

    pub const CLEAR_CONFIRM: &str = "clear.confirm";
    pub const CLEAR_DONE: &str = "clear.done";
    pub const CLEAR_CANCELLED: &str = "clear.cancelled";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    /// "ko", "en-US", "ko_KR.UTF-8" 처럼 앞의 언어 부분만 본다.
    /// auto/빈 문자열/지원하지 않는 언어는 None.
    pub fn parse(code: &str) -> Option<Self> {
        let lang = code.trim().split(['.', '_', '-']).next()?.to_lowercase();
        match lang.as_str() {
            "ko" => Some(Language::Ko),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    fn pack_file(self) -> &'static str {
        match self {
            Language::Ko => "ko.toml",
            Language::En => "en.toml",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 내장 문자열만 쓰는 번역기.
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            overrides: None,
        }
    }

    /// `<pack_dir>/<lang>.toml` 언어팩이 있으면 내장 문자열 위에 덮어쓴다.
    pub fn with_pack(lang: Language, pack_dir: &Path) -> Self {
        let path = pack_dir.join(lang.pack_file());
        let overrides = fs::read_to_string(&path)
            .ok()
            .and_then(|src| parse_toml_to_map(&src));
        if overrides.is_some() {
            log::info!("using locale pack {}", path.display());
        }
        Self { lang, overrides }
    }

    /// 번역을 가져온다. 언어팩 → 내장 번역 → 영어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)).unwrap_or(key),
            Language::En => en(key).unwrap_or(key),
        }
    }
}

/// CLI 플래그 → 설정 → 시스템 로케일 → en 순으로 언어를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> Language {
    Language::parse(cli_arg)
        .or_else(|| config_lang.and_then(Language::parse))
        .or_else(detect_system_language)
        .unwrap_or(Language::En)
}

fn detect_system_language() -> Option<Language> {
    get_locale()
        .as_deref()
        .and_then(Language::parse)
        .or_else(|| std::env::var("LANG").ok().as_deref().and_then(Language::parse))
}

/// 형식: key = "value" 또는 [section] 테이블 (section.key 로 펼친다).
fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.clone());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    let value: toml::Value = toml::from_str(src).ok()?;
    let mut map = HashMap::new();
    walk("", &value, &mut map);
    (!map.is_empty()).then_some(map)
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Bedside Calculator ===",
        MAIN_MENU_HEMODYNAMICS => "1) 혈역학 (Fick 추정)",
        MAIN_MENU_DRIP => "2) 점적 용량/속도 변환",
        MAIN_MENU_CLEAR => "3) 입력 초기화",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PROMPT_FIELD_SELECT => "수정할 항목 번호 (엔터=뒤로): ",
        HINT_KEEP_CLEAR => "엔터=유지, '-'=지우기",
        INPUTS_HEADING => "[입력]",
        RESULTS_HEADING => "[결과]",
        HEMO_HEADING => "\n-- 혈역학 --",
        HEMO_NOTE_VO2 => "VO₂는 실측값이 없으면 125 × BSA로 추정합니다.",
        FIELD_HEIGHT => "신장 [cm]",
        FIELD_WEIGHT => "체중 [kg]",
        FIELD_SEX => "성별 (M/F)",
        FIELD_HEMOGLOBIN => "헤모글로빈 [g/dL]",
        FIELD_HEART_RATE => "심박수 [bpm]",
        FIELD_SBP => "수축기 혈압 [mmHg]",
        FIELD_DBP => "이완기 혈압 [mmHg]",
        FIELD_CVP => "CVP [mmHg]",
        FIELD_PASP => "폐동맥 수축기압 [mmHg]",
        FIELD_PADP => "폐동맥 이완기압 [mmHg]",
        FIELD_PCWP => "PCWP [mmHg]",
        FIELD_SAO2 => "SaO₂ [%]",
        FIELD_SVO2 => "SvO₂ [%]",
        FIELD_MEASURED_VO2 => "실측 VO₂ [mL/min]",
        RESULT_BSA => "체표면적",
        RESULT_MAP => "평균 동맥압",
        RESULT_MPAP => "평균 폐동맥압",
        RESULT_CAO2 => "CaO₂",
        RESULT_CVO2 => "CvO₂",
        RESULT_VO2 => "VO₂",
        RESULT_CO => "심박출량",
        RESULT_CI => "심장지수",
        RESULT_SV => "일회박출량",
        RESULT_SVR => "SVR",
        RESULT_PVR_DYN => "PVR",
        RESULT_PVR_WOOD => "PVR (Wood)",
        DRIP_HEADING => "\n-- 점적 변환 --",
        DRIP_MODE_LABEL => "모드",
        DRIP_MODE_DOSE_FROM_RATE => "속도 → 용량",
        DRIP_MODE_RATE_FROM_DOSE => "용량 → 속도",
        FIELD_DRUG_MG => "약물량 [mg]",
        FIELD_VOLUME_ML => "희석 용량 [mL]",
        FIELD_RATE => "주입 속도 [mL/hr]",
        FIELD_DOSE => "목표 용량 [mcg/kg/min]",
        RESULT_CONCENTRATION => "농도",
        RESULT_DOSE => "용량",
        RESULT_RATE => "주입 속도",
        CLEAR_CONFIRM => "모든 입력을 지울까요? (y/N): ",
        CLEAR_DONE => "입력을 초기화했습니다.",
        CLEAR_CANCELLED => "취소했습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 자동  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어 설정을 저장했습니다. 다음 실행부터 적용됩니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Bedside Calculator ===",
        MAIN_MENU_HEMODYNAMICS => "1) Hemodynamics (Fick estimate)",
        MAIN_MENU_DRIP => "2) Drip dose/rate converter",
        MAIN_MENU_CLEAR => "3) Clear inputs",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        PROMPT_FIELD_SELECT => "Field number to edit (Enter=back): ",
        HINT_KEEP_CLEAR => "Enter=keep, '-'=clear",
        INPUTS_HEADING => "[Inputs]",
        RESULTS_HEADING => "[Results]",
        HEMO_HEADING => "\n-- Hemodynamics --",
        HEMO_NOTE_VO2 => "VO₂ is estimated as 125 × BSA unless a measured value is entered.",
        FIELD_HEIGHT => "Height [cm]",
        FIELD_WEIGHT => "Weight [kg]",
        FIELD_SEX => "Sex (M/F)",
        FIELD_HEMOGLOBIN => "Hemoglobin [g/dL]",
        FIELD_HEART_RATE => "Heart rate [bpm]",
        FIELD_SBP => "Systolic BP [mmHg]",
        FIELD_DBP => "Diastolic BP [mmHg]",
        FIELD_CVP => "CVP [mmHg]",
        FIELD_PASP => "PA systolic [mmHg]",
        FIELD_PADP => "PA diastolic [mmHg]",
        FIELD_PCWP => "PCWP [mmHg]",
        FIELD_SAO2 => "SaO₂ [%]",
        FIELD_SVO2 => "SvO₂ [%]",
        FIELD_MEASURED_VO2 => "Measured VO₂ [mL/min]",
        RESULT_BSA => "BSA",
        RESULT_MAP => "MAP",
        RESULT_MPAP => "Mean PAP",
        RESULT_CAO2 => "CaO₂",
        RESULT_CVO2 => "CvO₂",
        RESULT_VO2 => "VO₂",
        RESULT_CO => "Cardiac output",
        RESULT_CI => "Cardiac index",
        RESULT_SV => "Stroke volume",
        RESULT_SVR => "SVR",
        RESULT_PVR_DYN => "PVR",
        RESULT_PVR_WOOD => "PVR (Wood)",
        DRIP_HEADING => "\n-- Drip Conversion --",
        DRIP_MODE_LABEL => "Mode",
        DRIP_MODE_DOSE_FROM_RATE => "rate → dose",
        DRIP_MODE_RATE_FROM_DOSE => "dose → rate",
        FIELD_DRUG_MG => "Drug in bag [mg]",
        FIELD_VOLUME_ML => "Diluent volume [mL]",
        FIELD_RATE => "Rate [mL/hr]",
        FIELD_DOSE => "Target dose [mcg/kg/min]",
        RESULT_CONCENTRATION => "Concentration",
        RESULT_DOSE => "Dose",
        RESULT_RATE => "Rate",
        CLEAR_CONFIRM => "Clear all inputs? (y/N): ",
        CLEAR_DONE => "Inputs cleared.",
        CLEAR_CANCELLED => "Cancelled.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Auto  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_SAVED => "Language saved. It applies from the next start.",
        _ => return None,
    })
}
