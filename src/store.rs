//! 마지막 입력 폼을 보관하는 로컬 키-값 저장소.
//! 도구마다 고정 키 하나(슬롯 하나)를 쓰며 슬롯은 `<dir>/<key>.toml` 파일이다.
//! 읽기는 실패하지 않는다: 없거나 깨진 슬롯은 빈 기본 폼으로 대체한다.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::drip::DripInputs;
use crate::hemodynamics::HemoInputs;

/// 혈역학 폼 슬롯 키.
pub const HEMO_KEY: &str = "fick-hemo-inputs";
/// 점적 폼 슬롯 키.
pub const DRIP_KEY: &str = "drip-inputs";

/// 저장/삭제 시 발생 가능한 오류.
#[derive(Debug)]
pub enum StoreError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "폼 저장소 입출력 오류: {e}"),
            StoreError::Serialize(e) => write!(f, "폼 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        StoreError::Io(value)
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(value: toml::ser::Error) -> Self {
        StoreError::Serialize(value)
    }
}

/// 디렉터리 기반 폼 저장소.
#[derive(Debug, Clone)]
pub struct FormStore {
    dir: PathBuf,
}

impl FormStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.toml"))
    }

    /// 슬롯을 읽는다. 없거나 깨졌으면 기본값.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.slot_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("slot '{key}' not found, starting empty");
                return T::default();
            }
            Err(e) => {
                log::warn!("failed to read slot '{key}' ({}): {e}, using defaults", path.display());
                return T::default();
            }
        };
        match toml::from_str::<T>(&content) {
            Ok(v) => {
                log::info!("loaded slot '{key}' from {}", path.display());
                v
            }
            Err(e) => {
                log::warn!("discarding malformed slot '{key}': {e}");
                T::default()
            }
        }
    }

    /// 슬롯을 덮어쓴다.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let content = toml::to_string_pretty(value)?;
        fs::write(self.slot_path(key), content)?;
        log::debug!("saved slot '{key}'");
        Ok(())
    }

    /// 슬롯을 삭제한다. 이미 없으면 성공으로 본다.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load_hemo(&self) -> HemoInputs {
        // 손으로 고친 파일에 비유한 값이 들어와도 불변식을 지킨다
        self.load::<HemoInputs>(HEMO_KEY).sanitized()
    }

    pub fn save_hemo(&self, inputs: &HemoInputs) -> Result<(), StoreError> {
        self.save(HEMO_KEY, inputs)
    }

    pub fn load_drip(&self) -> DripInputs {
        self.load::<DripInputs>(DRIP_KEY).sanitized()
    }

    pub fn save_drip(&self, inputs: &DripInputs) -> Result<(), StoreError> {
        self.save(DRIP_KEY, inputs)
    }

    /// 두 슬롯을 모두 삭제한다.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.remove(HEMO_KEY)?;
        self.remove(DRIP_KEY)?;
        log::info!("cleared stored forms in {}", self.dir.display());
        Ok(())
    }
}

/// 화면이 들고 있는 현재 폼 상태. 시작 시 한 번 읽고 변경마다 저장한다.
#[derive(Debug, Clone)]
pub struct FormState {
    pub hemo: HemoInputs,
    pub drip: DripInputs,
    store: FormStore,
}

impl FormState {
    pub fn load(store: FormStore) -> Self {
        Self {
            hemo: store.load_hemo(),
            drip: store.load_drip(),
            store,
        }
    }

    /// 혈역학 폼을 수정하고 즉시 저장한다.
    pub fn edit_hemo(&mut self, f: impl FnOnce(&mut HemoInputs)) -> Result<(), StoreError> {
        f(&mut self.hemo);
        self.store.save_hemo(&self.hemo)
    }

    /// 점적 폼을 수정하고 즉시 저장한다.
    pub fn edit_drip(&mut self, f: impl FnOnce(&mut DripInputs)) -> Result<(), StoreError> {
        f(&mut self.drip);
        self.store.save_drip(&self.drip)
    }

    /// 메모리 상태를 비우고 저장된 슬롯도 지운다.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.hemo = HemoInputs::default();
        self.drip = DripInputs::default();
        self.store.clear()
    }
}
