use crate::domain::model::ContentFragment;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthoredFragment {
    pub components: &'static [&'static str],
    pub theory: &'static str,
    pub code: &'static str,
}

impl AuthoredFragment {
    fn to_fragment(self) -> ContentFragment {
        ContentFragment {
            components: self.components.iter().map(|c| c.to_string()).collect(),
            theory: self.theory.to_string(),
            code: self.code.to_string(),
        }
    }
}

const DIGITAL_OUTPUT_CHASER: AuthoredFragment = AuthoredFragment {
    components: &[
        "Arduino Uno",
        "Breadboard",
        "4× LEDs (different colors)",
        "4× 220Ω resistors",
        "8 jumper wires",
    ],
    theory: include_str!("../../content/theory/digital-output-chaser.md"),
    code: include_str!("../../content/sketches/digital-output-chaser.ino"),
};

const BUTTON_CONTROLLED_LED: AuthoredFragment = AuthoredFragment {
    components: &[
        "Arduino Uno",
        "Breadboard",
        "Pushbutton (tactile switch)",
        "LED",
        "220Ω resistor",
        "10kΩ resistor (optional)",
        "Jumper wires",
    ],
    theory: include_str!("../../content/theory/button-controlled-led.md"),
    code: include_str!("../../content/sketches/button-controlled-led.ino"),
};

const GENERIC_COMPONENTS: [&str; 5] = [
    "Arduino Uno board",
    "USB cable",
    "Breadboard",
    "Jumper wires",
    "[Module-specific components]",
];

/// 以模組 id 查詢手寫內容，查不到時以標題產生通用範本
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    authored: HashMap<u32, AuthoredFragment>,
}

impl ContentLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::empty()
            .with_fragment(4, DIGITAL_OUTPUT_CHASER)
            .with_fragment(5, BUTTON_CONTROLLED_LED)
    }

    pub fn with_fragment(mut self, module_id: u32, fragment: AuthoredFragment) -> Self {
        self.authored.insert(module_id, fragment);
        self
    }

    pub fn has_authored(&self, module_id: u32) -> bool {
        self.authored.contains_key(&module_id)
    }

    /// 手寫 id 由小到大排序
    pub fn authored_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.authored.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn resolve(&self, module_id: u32, title: &str) -> ContentFragment {
        match self.authored.get(&module_id) {
            Some(fragment) => fragment.to_fragment(),
            None => fallback_fragment(title),
        }
    }
}

pub fn fallback_fragment(title: &str) -> ContentFragment {
    let theory = format!(
        "This module covers {}.\n\n\
         Key concepts include understanding how this component/technique works, its applications in real-world projects, and best practices for implementation. \
         You'll learn both the theoretical foundation and practical skills needed to integrate this into your own Arduino projects.",
        title.to_lowercase()
    );

    let code = format!(
        "// {title}\n\
         // Sample code structure\n\
         \n\
         void setup() {{\n\
         \x20 Serial.begin(9600);\n\
         \x20 // Initialize pins and components\n\
         }}\n\
         \n\
         void loop() {{\n\
         \x20 // Main program logic\n\
         \n\
         \x20 delay(100);\n\
         }}"
    );

    ContentFragment {
        components: GENERIC_COMPONENTS.iter().map(|c| c.to_string()).collect(),
        theory,
        code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authored_fragment_returned_verbatim() {
        let library = ContentLibrary::builtin();
        let fragment = library.resolve(4, "Understanding Digital Outputs");

        assert_eq!(fragment.components.len(), 5);
        assert_eq!(fragment.components[2], "4× LEDs (different colors)");
        assert_eq!(fragment.theory, DIGITAL_OUTPUT_CHASER.theory);
        assert_eq!(fragment.code, DIGITAL_OUTPUT_CHASER.code);
        assert!(fragment.code.starts_with("// Control 4 LEDs in a chaser pattern"));
        assert!(fragment.code.ends_with('}'));
    }

    #[test]
    fn test_authored_fragment_ignores_title() {
        let library = ContentLibrary::builtin();
        assert_eq!(
            library.resolve(5, "Reading Button Inputs"),
            library.resolve(5, "Something Else Entirely")
        );
    }

    #[test]
    fn test_fallback_uses_generic_components_and_title() {
        let library = ContentLibrary::builtin();
        let fragment = library.resolve(14, "Basic Servo Control");

        assert_eq!(
            fragment.components,
            vec![
                "Arduino Uno board",
                "USB cable",
                "Breadboard",
                "Jumper wires",
                "[Module-specific components]"
            ]
        );
        assert!(fragment.theory.starts_with("This module covers basic servo control.\n\n"));
        assert!(fragment.code.starts_with("// Basic Servo Control\n"));
        assert!(fragment.code.contains("void setup() {\n  Serial.begin(9600);"));
        assert!(fragment.code.contains("  delay(100);\n}"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let library = ContentLibrary::empty();
        let first = library.resolve(42, "Interrupts & Timers");
        let second = library.resolve(42, "Interrupts & Timers");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_library_has_no_overrides() {
        let library = ContentLibrary::empty();
        assert!(!library.has_authored(4));
        assert_eq!(library.resolve(4, "Understanding Digital Outputs"), fallback_fragment("Understanding Digital Outputs"));
        assert_eq!(ContentLibrary::builtin().authored_ids(), vec![4, 5]);
    }
}
