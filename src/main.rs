use arduino_curriculum::config::{content_library, load_modules};
use arduino_curriculum::core::ConfigProvider;
use arduino_curriculum::utils::error::ErrorSeverity;
use arduino_curriculum::utils::{logger, validation::Validate};
use arduino_curriculum::{CliConfig, CurriculumError, CurriculumGenerator, GeneratorConfig, LocalStorage};
use clap::Parser;

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting curriculum generator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            GeneratorConfig::from_file(path).and_then(|mut config| {
                cli.apply_overrides(&mut config);
                run(&config)
            })
        }
        None => run(&cli),
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,   // 配置值錯誤
            ErrorSeverity::High => 1,     // 資料或結構錯誤
            ErrorSeverity::Critical => 3, // 檔案系統錯誤
        };
        std::process::exit(exit_code);
    }
}

fn run<C: ConfigProvider + Validate>(config: &C) -> Result<(), CurriculumError> {
    config.validate()?;

    let modules = load_modules(config)?;
    tracing::info!("Loaded {} modules", modules.len());

    let storage = LocalStorage::new(config.output_root());
    let generator = CurriculumGenerator::new(
        storage,
        content_library(config),
        config.regeneration_policy(),
    )
    .with_dry_run(config.dry_run());

    let summary = generator.run(&modules)?;
    tracing::info!(
        "✅ Done: {} written, {} skipped, {} total",
        summary.created_or_updated(),
        summary.skipped,
        summary.total
    );

    Ok(())
}
