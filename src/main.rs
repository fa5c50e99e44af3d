use clap::Parser;
use shift_roster::core::export;
use shift_roster::utils::error::{ErrorSeverity, RosterError};
use shift_roster::utils::{logger, validation::Validate};
use shift_roster::{CliConfig, OutputFormat, RosterFile, SeedRoster, ShiftStore, WeeklySummary};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_format);

    tracing::info!("Starting shift-roster");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let file = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading roster from: {}", path);
            let file = RosterFile::from_file(path)
                .and_then(|file| file.validate().map(|_| file))
                .unwrap_or_else(|e| fail(&e));
            Some(file)
        }
        None => None,
    };

    let store = match &file {
        Some(file) => ShiftStore::from_source(file),
        None => ShiftStore::from_source(&SeedRoster),
    };
    let mut store = store.unwrap_or_else(|e| fail(&e));

    for relocation in &config.relocations {
        if let Err(e) = store.apply(relocation) {
            fail(&e);
        }
    }

    let format = match config.format {
        Some(format) => format,
        None => file
            .as_ref()
            .map(RosterFile::output_format)
            .transpose()
            .unwrap_or_else(|e| fail(&e))
            .flatten()
            .unwrap_or(OutputFormat::Json),
    };
    let show_summary = config.summary || file.as_ref().is_some_and(RosterFile::summary_enabled);

    let snapshot = store.snapshot();
    let rendered = export::render(&snapshot, format).unwrap_or_else(|e| fail(&e));
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }

    if show_summary {
        println!();
        print!("{}", WeeklySummary::from_roster(&snapshot));
    }

    tracing::info!("✅ Applied {} relocation(s)", config.relocations.len());
    Ok(())
}

fn fail(e: &RosterError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ shift-roster failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
