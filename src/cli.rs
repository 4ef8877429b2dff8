//! 명령행 인자 정의.
//! 수치 인자는 원문 문자열로 받아 입력 폼과 같은 규칙(`parse_field`)으로 해석한다.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::drip::{DripInputs, DripMode};
use crate::hemodynamics::HemoInputs;
use crate::input::{parse_field, Sex};

#[derive(Debug, Parser)]
#[command(name = "bedside_calc", version, about = "Fick hemodynamics and IV drip calculator")]
pub struct Cli {
    /// UI 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    pub lang: String,
    /// 입력 폼 저장 디렉터리 (기본: config.toml 의 store_dir)
    #[arg(long)]
    pub store_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 저장된 혈역학 폼에 값을 반영하고 결과를 출력한다
    Hemo(HemoArgs),
    /// 저장된 점적 폼에 값을 반영하고 결과를 출력한다
    Drip(DripArgs),
    /// 두 폼을 모두 비운다
    Clear,
}

#[derive(Debug, Default, Args)]
pub struct HemoArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub weight: Option<String>,
    #[arg(long)]
    pub sex: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub hb: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub hr: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub sbp: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub dbp: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub cvp: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub pasp: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub padp: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub pcwp: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub sao2: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub svo2: Option<String>,
    /// 실측 VO₂ [mL/min]
    #[arg(long, allow_hyphen_values = true)]
    pub vo2: Option<String>,
}

/// 주어진 인자만 덮어쓴다. 해석할 수 없는 값은 필드를 비운다.
fn merge(target: &mut Option<f64>, raw: &Option<String>) {
    if let Some(raw) = raw {
        *target = parse_field(raw);
    }
}

impl HemoArgs {
    pub fn apply(&self, form: &mut HemoInputs) {
        merge(&mut form.height_cm, &self.height);
        merge(&mut form.weight_kg, &self.weight);
        merge(&mut form.hemoglobin_g_dl, &self.hb);
        merge(&mut form.heart_rate_bpm, &self.hr);
        merge(&mut form.sbp_mmhg, &self.sbp);
        merge(&mut form.dbp_mmhg, &self.dbp);
        merge(&mut form.cvp_mmhg, &self.cvp);
        merge(&mut form.pasp_mmhg, &self.pasp);
        merge(&mut form.padp_mmhg, &self.padp);
        merge(&mut form.pcwp_mmhg, &self.pcwp);
        merge(&mut form.sao2_pct, &self.sao2);
        merge(&mut form.svo2_pct, &self.svo2);
        merge(&mut form.measured_vo2_ml_min, &self.vo2);
        if let Some(sex) = &self.sex {
            form.sex = Sex::parse(sex);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// 속도 → 용량
    Dose,
    /// 용량 → 속도
    Rate,
}

impl From<ModeArg> for DripMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Dose => DripMode::DoseFromRate,
            ModeArg::Rate => DripMode::RateFromDose,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct DripArgs {
    /// 계산할 값 (dose 또는 rate). 생략하면 저장된 모드를 쓴다
    #[arg(value_enum)]
    pub mode: Option<ModeArg>,
    #[arg(long, allow_hyphen_values = true)]
    pub weight: Option<String>,
    /// 백 내 약물량 [mg]
    #[arg(long, allow_hyphen_values = true)]
    pub mg: Option<String>,
    /// 희석 용량 [mL]
    #[arg(long, allow_hyphen_values = true)]
    pub volume: Option<String>,
    /// 주입 속도 [mL/hr]
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<String>,
    /// 목표 용량 [mcg/kg/min]
    #[arg(long, allow_hyphen_values = true)]
    pub dose: Option<String>,
}

impl DripArgs {
    pub fn apply(&self, form: &mut DripInputs) {
        if let Some(mode) = self.mode {
            form.mode = mode.into();
        }
        merge(&mut form.weight_kg, &self.weight);
        merge(&mut form.drug_mg, &self.mg);
        merge(&mut form.volume_ml, &self.volume);
        merge(&mut form.rate_ml_hr, &self.rate);
        merge(&mut form.dose_mcg_kg_min, &self.dose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_and_bad_text_are_accepted_as_raw() {
        let cli = Cli::try_parse_from([
            "bedside_calc", "hemo", "--cvp", "-2", "--height", "abc", "--weight", "70",
        ])
        .expect("parse");
        let Some(Command::Hemo(args)) = cli.command else {
            panic!("expected hemo command");
        };
        let mut form = HemoInputs {
            height_cm: Some(180.0),
            ..HemoInputs::default()
        };
        args.apply(&mut form);
        assert_eq!(form.cvp_mmhg, Some(-2.0));
        assert_eq!(form.height_cm, None);
        assert_eq!(form.weight_kg, Some(70.0));
    }

    #[test]
    fn drip_mode_positional() {
        let cli = Cli::try_parse_from(["bedside_calc", "drip", "dose", "--rate", "10"]).expect("parse");
        let Some(Command::Drip(args)) = cli.command else {
            panic!("expected drip command");
        };
        let mut form = DripInputs::default();
        args.apply(&mut form);
        assert_eq!(form.mode, DripMode::DoseFromRate);
        assert_eq!(form.rate_ml_hr, Some(10.0));
    }

    #[test]
    fn grouped_thousands_clear_the_field() {
        let cli = Cli::try_parse_from(["bedside_calc", "drip", "--mg", "1,000", "--volume", "2,5"]).expect("parse");
        let Some(Command::Drip(args)) = cli.command else {
            panic!("expected drip command");
        };
        let mut form = DripInputs {
            drug_mg: Some(400.0),
            ..DripInputs::default()
        };
        args.apply(&mut form);
        assert_eq!(form.drug_mg, None);
        assert_eq!(form.volume_ml, Some(2.5));
    }
}
