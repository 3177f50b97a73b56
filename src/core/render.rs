//! Overview and lesson Markdown assembly

use crate::domain::model::{ContentFragment, ModuleRecord};
use std::fmt::Write;

const UNSPECIFIED: &str = "TBD";

const WIRING_DIAGRAM: &str = "\
Arduino Uno          Breadboard
┌─────────────┐
│             │      [Components]
│    [PIN]────┼──────[Component]
│             │            │
│   [GND]─────┼────────────┘
│             │
└─────────────┘";

/// The ten lesson sections, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonSection {
    Introduction,
    ComponentsNeeded,
    Theory,
    Wiring,
    Code,
    CodeExplanation,
    UploadAndTest,
    Troubleshooting,
    Challenges,
    KeyTakeaways,
}

impl LessonSection {
    pub const ALL: [LessonSection; 10] = [
        LessonSection::Introduction,
        LessonSection::ComponentsNeeded,
        LessonSection::Theory,
        LessonSection::Wiring,
        LessonSection::Code,
        LessonSection::CodeExplanation,
        LessonSection::UploadAndTest,
        LessonSection::Troubleshooting,
        LessonSection::Challenges,
        LessonSection::KeyTakeaways,
    ];

    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            LessonSection::Introduction => "Introduction",
            LessonSection::ComponentsNeeded => "Components Needed",
            LessonSection::Theory => "How It Works (Theory)",
            LessonSection::Wiring => "Wiring Instructions",
            LessonSection::Code => "Arduino Code",
            LessonSection::CodeExplanation => "Code Explanation",
            LessonSection::UploadAndTest => "Upload and Test",
            LessonSection::Troubleshooting => "Troubleshooting",
            LessonSection::Challenges => "Challenge Exercises",
            LessonSection::KeyTakeaways => "Key Takeaways",
        }
    }

    /// Anchor line, e.g. `## 5. Arduino Code`
    pub fn heading(self) -> String {
        format!("## {}. {}", self.number(), self.name())
    }
}

/// 自由文字中以 `#` 開頭的行加上跳脫，避免多出章節標題
fn escape_headings(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let indent = line.len() - line.trim_start_matches(' ').len();
            if indent <= 3 && line[indent..].starts_with('#') {
                format!("{}\\{}", &line[..indent], &line[indent..])
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 圍欄長度必須超過程式碼中最長的連續反引號
fn code_fence(code: &str) -> String {
    let longest_run = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest_run + 1).max(3))
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn default_outcomes(title: &str) -> Vec<String> {
    let lowered = title.to_lowercase();
    vec![
        format!("Understand the fundamentals of {}", lowered),
        "Wire and configure components correctly".to_string(),
        "Write clean, functional Arduino code".to_string(),
        "Debug common issues effectively".to_string(),
        "Apply knowledge to custom projects".to_string(),
    ]
}

fn default_overview(title: &str) -> String {
    format!(
        "This module teaches you about {}. You'll gain hands-on experience with essential Arduino concepts and build practical skills that apply to real-world projects. \
         Through step-by-step guidance, you'll understand both the theory and implementation of this important topic.",
        title.to_lowercase()
    )
}

pub fn render_overview(record: &ModuleRecord) -> String {
    let level = record
        .level
        .as_ref()
        .map(|l| l.to_string())
        .unwrap_or_else(|| UNSPECIFIED.to_string());
    let duration = record.duration.as_deref().unwrap_or(UNSPECIFIED);
    let overview = record
        .overview
        .clone()
        .unwrap_or_else(|| default_overview(&record.title));
    let prerequisites = record
        .prerequisites
        .clone()
        .unwrap_or_else(|| vec!["Previous modules".to_string()]);
    let outcomes = record
        .outcomes
        .clone()
        .unwrap_or_else(|| default_outcomes(&record.title));

    format!(
        "# {title}\n\
         \n\
         ## Level\n\
         {level}\n\
         \n\
         ## Time Estimate\n\
         {duration}\n\
         \n\
         ## Overview\n\
         {overview}\n\
         \n\
         ## Prerequisites\n\
         {prerequisites}\n\
         \n\
         ## Learning Outcomes\n\
         {outcomes}\n",
        title = escape_headings(&record.title),
        overview = escape_headings(&overview),
        prerequisites = bullets(&prerequisites),
        outcomes = bullets(&outcomes),
    )
}

pub fn render_lesson(record: &ModuleRecord, fragment: &ContentFragment) -> String {
    LessonBuilder::new(record, fragment).build()
}

/// Writes the fixed lesson skeleton into a single buffer
struct LessonBuilder<'a> {
    record: &'a ModuleRecord,
    fragment: &'a ContentFragment,
    buffer: String,
}

impl<'a> LessonBuilder<'a> {
    fn new(record: &'a ModuleRecord, fragment: &'a ContentFragment) -> Self {
        Self {
            record,
            fragment,
            buffer: String::with_capacity(4096),
        }
    }

    fn build(mut self) -> String {
        // 寫入 String 不會失敗
        let _ = self.write_all();
        self.buffer
    }

    fn write_all(&mut self) -> std::fmt::Result {
        writeln!(self.buffer, "# {}", escape_headings(&self.record.title))?;
        for section in LessonSection::ALL {
            writeln!(self.buffer)?;
            writeln!(self.buffer, "{}", section.heading())?;
            self.write_section(section)?;
        }
        Ok(())
    }

    fn write_section(&mut self, section: LessonSection) -> std::fmt::Result {
        let title = escape_headings(&self.record.title);
        let lowered = title.to_lowercase();

        match section {
            LessonSection::Introduction => {
                let intro = self
                    .record
                    .overview
                    .as_deref()
                    .unwrap_or("Introduction to this Arduino concept.");
                writeln!(self.buffer, "{}", escape_headings(intro))
            }
            LessonSection::ComponentsNeeded => {
                writeln!(self.buffer, "{}", escape_headings(&bullets(&self.fragment.components)))
            }
            LessonSection::Theory => {
                writeln!(self.buffer, "{}", escape_headings(&self.fragment.theory))
            }
            LessonSection::Wiring => {
                writeln!(self.buffer)?;
                writeln!(self.buffer, "### Step-by-Step:")?;
                writeln!(self.buffer, "1. Connect Arduino to breadboard power rails")?;
                writeln!(self.buffer, "2. Place components on breadboard")?;
                writeln!(self.buffer, "3. Wire connections according to diagram")?;
                writeln!(self.buffer, "4. Double-check all connections")?;
                writeln!(self.buffer)?;
                writeln!(self.buffer, "### ASCII Wiring Diagram:")?;
                writeln!(self.buffer, "```")?;
                writeln!(self.buffer, "{}", WIRING_DIAGRAM)?;
                writeln!(self.buffer, "```")
            }
            LessonSection::Code => {
                let fence = code_fence(&self.fragment.code);
                writeln!(self.buffer)?;
                writeln!(self.buffer, "{}cpp", fence)?;
                writeln!(self.buffer, "{}", self.fragment.code)?;
                writeln!(self.buffer, "{}", fence)
            }
            LessonSection::CodeExplanation => {
                writeln!(self.buffer)?;
                writeln!(
                    self.buffer,
                    "The code demonstrates {} using standard Arduino functions:",
                    lowered
                )?;
                writeln!(self.buffer, "- `pinMode()` configures pins")?;
                writeln!(self.buffer, "- `digitalWrite()` / `digitalRead()` for digital control")?;
                writeln!(self.buffer, "- `analogWrite()` / `analogRead()` for analog values")?;
                writeln!(self.buffer, "- `Serial.println()` for debugging output")
            }
            LessonSection::UploadAndTest => {
                writeln!(self.buffer)?;
                writeln!(self.buffer, "1. Connect your Arduino via USB")?;
                writeln!(self.buffer, "2. Select correct Board and Port in Arduino IDE")?;
                writeln!(self.buffer, "3. Upload the code (Ctrl+U or click Upload button)")?;
                writeln!(
                    self.buffer,
                    "4. Observe the behavior and check Serial Monitor (9600 baud)"
                )
            }
            LessonSection::Troubleshooting => {
                let pairs = [
                    (
                        "Code uploads but nothing happens",
                        "Check wiring connections, verify component orientation",
                    ),
                    ("Serial Monitor shows no output", "Ensure baud rate is set to 9600"),
                    ("Unexpected behavior", "Add Serial.println() statements to debug"),
                ];
                for (problem, solution) in pairs {
                    writeln!(self.buffer)?;
                    writeln!(self.buffer, "**Problem**: {}", problem)?;
                    writeln!(self.buffer, "**Solution**: {}", solution)?;
                }
                Ok(())
            }
            LessonSection::Challenges => {
                writeln!(self.buffer)?;
                writeln!(self.buffer, "**Easy**: Modify delay values to change timing")?;
                writeln!(
                    self.buffer,
                    "**Medium**: Add additional components or change pin assignments"
                )?;
                writeln!(
                    self.buffer,
                    "**Hard**: Combine this module with previous concepts for a new project"
                )
            }
            LessonSection::KeyTakeaways => {
                writeln!(self.buffer)?;
                writeln!(self.buffer, "- {} is essential for [application area]", title)?;
                writeln!(self.buffer, "- Proper wiring and component orientation are critical")?;
                writeln!(
                    self.buffer,
                    "- Test incrementally and use Serial Monitor for debugging"
                )?;
                writeln!(
                    self.buffer,
                    "- This technique can be expanded to more complex projects"
                )?;
                writeln!(self.buffer)?;
                writeln!(
                    self.buffer,
                    "Congratulations! You've mastered {}. Continue to the next module to build on these skills.",
                    lowered
                )
            }
        }
    }
}

/// Body of the `## 5. Arduino Code` fence, if the document has one
pub fn extract_code_block(lesson: &str) -> Option<String> {
    let anchor = format!("\n{}\n\n", LessonSection::Code.heading());
    let after_anchor = &lesson[lesson.find(&anchor)? + anchor.len()..];

    let fence_len = after_anchor.len() - after_anchor.trim_start_matches('`').len();
    if fence_len < 3 {
        return None;
    }
    let body_start = after_anchor.find('\n')? + 1;
    let body = &after_anchor[body_start..];

    // 程式碼中不會出現與圍欄等長的反引號，第一個圍欄行就是結尾
    let closing = format!("\n{}\n", "`".repeat(fence_len));
    let end = body.find(&closing)?;
    Some(body[..end].to_string())
}
