use clap::Parser;
use bedside_calc::{app, cli::Cli, config, i18n};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        let tr = i18n::Translator::new(i18n::resolve_language("auto", None));
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = config::load_or_default()?;
    app::start(cli, &mut cfg)?;
    Ok(())
}
