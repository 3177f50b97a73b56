use crate::core::content::ContentLibrary;
use crate::core::policy::{module_file, RegenerationPolicy, LESSON_FILE, OVERVIEW_FILE};
use crate::core::render::{render_lesson, render_overview};
use crate::core::writer::FileWriter;
use crate::domain::model::{GenerationOutcome, ModuleRecord, RunSummary};
use crate::domain::ports::Storage;
use crate::utils::error::{CurriculumError, Result};
use std::io::Write;

const RULE: &str = "============================================================";

/// 逐一處理模組：解析內容、產生文件、依重新產生規則決定寫入或略過
pub struct CurriculumGenerator<S: Storage> {
    storage: S,
    library: ContentLibrary,
    policy: RegenerationPolicy,
    dry_run: bool,
}

impl<S: Storage> CurriculumGenerator<S> {
    pub fn new(storage: S, library: ContentLibrary, policy: RegenerationPolicy) -> Self {
        Self {
            storage,
            library,
            policy,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn run(&self, modules: &[ModuleRecord]) -> Result<RunSummary> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_progress(modules, &mut out)
    }

    pub fn run_with_progress<W: Write>(
        &self,
        modules: &[ModuleRecord],
        out: &mut W,
    ) -> Result<RunSummary> {
        tracing::info!(
            "Generating {} modules (skip cutoff: {}, authored content: {:?})",
            modules.len(),
            self.policy.skip_cutoff,
            self.library.authored_ids()
        );

        progress(out, RULE)?;
        progress(out, "GENERATING ALL ARDUINO CURRICULUM MODULES")?;
        progress(out, RULE)?;

        let mut summary = RunSummary::default();

        for module in modules {
            let outcome = self
                .process_module(module)
                .map_err(|e| e.for_module(module.id, &module.title))?;

            let line = match outcome {
                GenerationOutcome::Skipped => {
                    format!("[SKIP] Module {}: {} (already complete)", module.id, module.title)
                }
                GenerationOutcome::Created | GenerationOutcome::Overwritten if self.dry_run => {
                    format!("[DRY-RUN] Module {}: {} would be written", module.id, module.title)
                }
                GenerationOutcome::Created | GenerationOutcome::Overwritten => {
                    format!("[OK] Module {}: {}", module.id, module.title)
                }
            };
            progress(out, &line)?;
            summary.record(outcome);
        }

        progress(out, RULE)?;
        progress(out, "COMPLETE!")?;
        progress(out, &format!("Created/Updated: {} modules", summary.created_or_updated()))?;
        progress(out, &format!("Skipped (already complete): {} modules", summary.skipped))?;
        progress(out, &format!("Total modules: {}", summary.total))?;
        progress(out, RULE)?;

        tracing::info!(
            "Run finished: {} created, {} overwritten, {} skipped",
            summary.created,
            summary.overwritten,
            summary.skipped
        );
        Ok(summary)
    }

    fn process_module(&self, module: &ModuleRecord) -> Result<GenerationOutcome> {
        let folder = module.slug.as_str();

        if self.policy.should_skip(&self.storage, folder, module.id)? {
            tracing::debug!("Skipping module {} ({})", module.id, folder);
            return Ok(GenerationOutcome::Skipped);
        }

        let fragment = self.library.resolve(module.id, &module.title);
        let overview = render_overview(module);
        let lesson = render_lesson(module, &fragment);

        if self.dry_run {
            tracing::debug!(
                "Dry run: module {} would write {} + {} bytes",
                module.id,
                overview.len(),
                lesson.len()
            );
            let existed = self.storage.exists(&module_file(folder, OVERVIEW_FILE))
                || self.storage.exists(&module_file(folder, LESSON_FILE));
            return Ok(if existed {
                GenerationOutcome::Overwritten
            } else {
                GenerationOutcome::Created
            });
        }

        FileWriter::new(&self.storage).write(folder, &overview, &lesson)
    }
}

fn progress<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{}", line).map_err(|e| CurriculumError::io("<progress>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::MockStorage;

    fn module(id: u32, title: &str, slug: &str) -> ModuleRecord {
        ModuleRecord::new(id, title, slug)
    }

    fn run(generator: &CurriculumGenerator<MockStorage>, modules: &[ModuleRecord]) -> (RunSummary, String) {
        let mut out = Vec::new();
        let summary = generator.run_with_progress(modules, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_generates_every_module_in_order() {
        let generator = CurriculumGenerator::new(
            MockStorage::default(),
            ContentLibrary::builtin(),
            RegenerationPolicy::default(),
        );
        let modules = vec![
            module(5, "Reading Button Inputs", "reading-button-inputs"),
            module(4, "Understanding Digital Outputs", "understanding-digital-outputs"),
        ];

        let (summary, output) = run(&generator, &modules);

        assert_eq!(summary.created, 2);
        assert_eq!(summary.total, 2);
        let first = output.find("[OK] Module 5: Reading Button Inputs").unwrap();
        let second = output.find("[OK] Module 4: Understanding Digital Outputs").unwrap();
        assert!(first < second);
        assert!(output.contains("Created/Updated: 2 modules"));
        assert!(output.contains("Skipped (already complete): 0 modules"));
        assert!(output.contains("Total modules: 2"));

        let lesson = generator
            .storage()
            .get_file("understanding-digital-outputs/lesson.md")
            .unwrap();
        assert!(lesson.contains("// Control 4 LEDs in a chaser pattern"));
    }

    #[test]
    fn test_skips_complete_hand_authored_module() {
        let lesson = format!("# Blinking an LED\n{}", "Real content. ".repeat(80));
        let storage = MockStorage::default()
            .with_file("blinking-an-led/overview.md", "# Blinking an LED\n")
            .with_file("blinking-an-led/lesson.md", &lesson);
        let generator =
            CurriculumGenerator::new(storage, ContentLibrary::empty(), RegenerationPolicy::default());

        let (summary, output) = run(&generator, &[module(2, "Blinking an LED", "blinking-an-led")]);

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.created_or_updated(), 0);
        assert!(output.contains("[SKIP] Module 2: Blinking an LED (already complete)"));
        assert_eq!(
            generator.storage().get_file("blinking-an-led/lesson.md"),
            Some(lesson)
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let generator = CurriculumGenerator::new(
            MockStorage::default(),
            ContentLibrary::builtin(),
            RegenerationPolicy::default(),
        )
        .with_dry_run(true);

        let (summary, output) = run(&generator, &[module(7, "Serial Monitor Basics", "serial-monitor-basics")]);

        assert_eq!(summary.created, 1);
        assert!(output.contains("[DRY-RUN] Module 7: Serial Monitor Basics would be written"));
        assert!(generator.storage().files.borrow().is_empty());
    }

    #[test]
    fn test_write_failure_names_module_and_stops() {
        let storage = MockStorage {
            fail_writes_to: Some("first/lesson.md".to_string()),
            ..MockStorage::default()
        };
        let generator =
            CurriculumGenerator::new(storage, ContentLibrary::empty(), RegenerationPolicy::default());
        let modules = vec![module(8, "First", "first"), module(9, "Second", "second")];

        let mut out = Vec::new();
        let err = generator.run_with_progress(&modules, &mut out).unwrap_err();

        match err {
            CurriculumError::ModuleError { id, title, .. } => {
                assert_eq!(id, 8);
                assert_eq!(title, "First");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(generator.storage().get_file("first/overview.md").is_some());
        assert!(generator.storage().get_file("second/overview.md").is_none());
    }
}
