use crate::cli::{Cli, Command};
use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::store::{FormState, FormStore, StoreError};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 터미널 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 입력 폼 저장 오류
    Store(StoreError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Store(e) => write!(f, "저장 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        AppError::Store(value)
    }
}

/// 인자와 설정으로 번역기/폼 상태를 준비한 뒤 명령을 실행한다.
pub fn start(cli: Cli, config: &mut Config) -> Result<(), AppError> {
    let lang = i18n::resolve_language(&cli.lang, Some(config.language.as_str()));
    let tr = Translator::with_pack(lang, &config.locale_dir);
    let store_dir = cli.store_dir.clone().unwrap_or_else(|| config.store_dir.clone());
    log::debug!("language={lang:?} store_dir={}", store_dir.display());
    let mut state = FormState::load(FormStore::new(store_dir));

    match cli.command {
        None => run(config, &tr, &mut state),
        Some(Command::Hemo(args)) => {
            state.edit_hemo(|form| args.apply(form))?;
            print!("{}", ui_cli::hemo_report(&tr, &state.hemo));
            Ok(())
        }
        Some(Command::Drip(args)) => {
            state.edit_drip(|form| args.apply(form))?;
            print!("{}", ui_cli::drip_report(&tr, &state.drip));
            Ok(())
        }
        Some(Command::Clear) => {
            state.clear()?;
            println!("{}", tr.t(i18n::keys::CLEAR_DONE));
            Ok(())
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator, state: &mut FormState) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Hemodynamics => ui_cli::handle_hemodynamics(tr, state)?,
            MenuChoice::Drip => ui_cli::handle_drip(tr, state)?,
            MenuChoice::Clear => ui_cli::handle_clear(tr, state)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    config.save()?;
                    println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
