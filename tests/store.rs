//! 입력 폼 저장소 테스트. 테스트마다 임시 디렉터리를 따로 쓴다.
use std::fs;
use std::path::PathBuf;

use bedside_calc::drip::{DripInputs, DripMode};
use bedside_calc::hemodynamics::HemoInputs;
use bedside_calc::input::Sex;
use bedside_calc::store::{FormState, FormStore, DRIP_KEY, HEMO_KEY};

fn temp_store(name: &str) -> FormStore {
    let dir: PathBuf = std::env::temp_dir().join(format!(
        "bedside_calc_{name}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    FormStore::new(dir)
}

fn sample_hemo() -> HemoInputs {
    HemoInputs {
        height_cm: Some(170.0),
        weight_kg: Some(70.5),
        sex: Sex::Female,
        cvp_mmhg: Some(-2.0),
        sao2_pct: Some(98.0),
        ..HemoInputs::default()
    }
}

#[test]
fn missing_slots_load_as_empty() {
    let store = temp_store("missing");
    assert_eq!(store.load_hemo(), HemoInputs::default());
    assert_eq!(store.load_drip(), DripInputs::default());
}

#[test]
fn hemo_round_trip() {
    let store = temp_store("hemo_rt");
    let inputs = sample_hemo();
    store.save_hemo(&inputs).expect("save");
    assert_eq!(store.load_hemo(), inputs);
    let _ = fs::remove_dir_all(store.dir());
}

#[test]
fn drip_round_trip() {
    let store = temp_store("drip_rt");
    let inputs = DripInputs {
        mode: DripMode::DoseFromRate,
        weight_kg: Some(82.0),
        drug_mg: Some(4.0),
        volume_ml: Some(250.0),
        rate_ml_hr: Some(12.3),
        dose_mcg_kg_min: None,
    };
    store.save_drip(&inputs).expect("save");
    assert_eq!(store.load_drip(), inputs);
    let _ = fs::remove_dir_all(store.dir());
}

#[test]
fn corrupted_slot_falls_back_to_default() {
    let store = temp_store("corrupt");
    fs::create_dir_all(store.dir()).expect("mkdir");
    fs::write(store.dir().join(format!("{HEMO_KEY}.toml")), "height_cm = [oops").expect("write");
    fs::write(store.dir().join(format!("{DRIP_KEY}.toml")), "weight_kg = \"heavy\"\n").expect("write");
    assert_eq!(store.load_hemo(), HemoInputs::default());
    assert_eq!(store.load_drip(), DripInputs::default());
    let _ = fs::remove_dir_all(store.dir());
}

#[test]
fn non_finite_stored_values_become_absent() {
    let store = temp_store("nan");
    fs::create_dir_all(store.dir()).expect("mkdir");
    fs::write(
        store.dir().join(format!("{HEMO_KEY}.toml")),
        "height_cm = nan\nweight_kg = 70.0\n",
    )
    .expect("write");
    fs::write(
        store.dir().join(format!("{DRIP_KEY}.toml")),
        "mode = \"DoseFromRate\"\nweight_kg = nan\nrate_ml_hr = inf\ndrug_mg = 4.0\n",
    )
    .expect("write");

    let loaded = store.load_hemo();
    assert_eq!(loaded.height_cm, None);
    assert_eq!(loaded.weight_kg, Some(70.0));

    let drip = store.load_drip();
    assert_eq!(drip.mode, DripMode::DoseFromRate);
    assert_eq!(drip.weight_kg, None);
    assert_eq!(drip.rate_ml_hr, None);
    assert_eq!(drip.drug_mg, Some(4.0));
    let _ = fs::remove_dir_all(store.dir());
}

#[test]
fn form_state_saves_on_edit_and_clears_both_slots() {
    let store = temp_store("state");
    let mut state = FormState::load(store.clone());
    state.edit_hemo(|f| f.weight_kg = Some(70.0)).expect("edit hemo");
    state.edit_drip(|f| f.dose_mcg_kg_min = Some(0.3)).expect("edit drip");

    let reloaded = FormState::load(store.clone());
    assert_eq!(reloaded.hemo.weight_kg, Some(70.0));
    assert_eq!(reloaded.drip.dose_mcg_kg_min, Some(0.3));

    state.clear().expect("clear");
    assert_eq!(state.hemo, HemoInputs::default());
    assert_eq!(state.drip, DripInputs::default());
    assert!(!store.dir().join(format!("{HEMO_KEY}.toml")).exists());
    assert!(!store.dir().join(format!("{DRIP_KEY}.toml")).exists());
    // 이미 비어 있어도 실패하지 않는다
    state.clear().expect("clear twice");
    let _ = fs::remove_dir_all(store.dir());
}
