//! 계산 계층(혈역학, 점적 변환)을 라이브러리로 분리하여 CLI 외의 화면에서도 재사용한다.
//! 엔진은 순수 함수이며 입출력은 store/config/ui_cli 가 담당한다.

pub mod app;
pub mod cli;
pub mod config;
pub mod drip;
pub mod format;
pub mod hemodynamics;
pub mod i18n;
pub mod input;
pub mod store;
pub mod ui_cli;

pub use drip::{dose_from_rate, rate_from_dose, DripInputs, DripMode, DripResult};
pub use hemodynamics::{evaluate_hemodynamics, HemoInputs, HemoResults};
