//! Prompt composition.
//!
//! Templates are data, not control flow: one Markdown file per category,
//! compiled into the binary and individually overridable from a prompts
//! directory. Composition is a pure placeholder substitution, so the exact
//! text sent to the completion provider is deterministic given its inputs.

use std::collections::HashMap;
use tracing::warn;

/// Compiled-in default templates.
const DEFAULT_DIRECT: &str = include_str!("prompts/direct.md");
const DEFAULT_AUGMENT: &str = include_str!("prompts/augment.md");
const DEFAULT_REVIEW_START: &str = include_str!("prompts/review_start.md");
const DEFAULT_REVIEW_CORRECT: &str = include_str!("prompts/review_correct.md");

/// Attribution footer appended to every outbound answer.
pub const ATTRIBUTION_FOOTER: &str =
    "Esta respuesta es elaborada en base al material provisto por el Profesor.";
/// Footer variant for answers that were allowed to draw on external sources.
pub const ATTRIBUTION_FOOTER_AUGMENTED: &str =
    "Esta respuesta es elaborada en base al material provisto por el Profesor y ampliada con fuentes confiables.";

const SOURCE_INSTRUCTION_MATERIAL: &str = "Sos un ayudante académico para un alumno de sexto año de escuela técnica. Basate exclusivamente en el material provisto por el profesor.";
const SOURCE_INSTRUCTION_EXTERNAL: &str = "Sos un ayudante académico para un alumno de sexto año de escuela técnica. El tema no aparece en el material provisto por el profesor: recurrí a fuentes de confianza como universidades, Wikipedia o entidades educativas públicas o privadas.";

/// Footer matching the augmentation mode of the answer.
pub fn attribution_footer(augmented: bool) -> &'static str {
    if augmented {
        ATTRIBUTION_FOOTER_AUGMENTED
    } else {
        ATTRIBUTION_FOOTER
    }
}

/// System-role instruction telling the model which sources it may use,
/// derived from the provenance flag of the current review turn.
pub fn source_instruction(from_training_material: bool) -> &'static str {
    if from_training_material {
        SOURCE_INSTRUCTION_MATERIAL
    } else {
        SOURCE_INSTRUCTION_EXTERNAL
    }
}

/// The four prompt categories the service composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Direct,
    Augment,
    ReviewStart,
    ReviewCorrect,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::Direct,
        PromptKind::Augment,
        PromptKind::ReviewStart,
        PromptKind::ReviewCorrect,
    ];

    /// File stem used for template overrides.
    pub fn key(self) -> &'static str {
        match self {
            PromptKind::Direct => "direct",
            PromptKind::Augment => "augment",
            PromptKind::ReviewStart => "review_start",
            PromptKind::ReviewCorrect => "review_correct",
        }
    }

    fn default_template(self) -> &'static str {
        match self {
            PromptKind::Direct => DEFAULT_DIRECT,
            PromptKind::Augment => DEFAULT_AUGMENT,
            PromptKind::ReviewStart => DEFAULT_REVIEW_START,
            PromptKind::ReviewCorrect => DEFAULT_REVIEW_CORRECT,
        }
    }
}

/// The template set used to build every prompt the service sends.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    templates: HashMap<PromptKind, String>,
}

impl PromptLibrary {
    /// Library loaded with the compiled-in defaults.
    pub fn builtin() -> Self {
        let templates = PromptKind::ALL
            .into_iter()
            .map(|kind| (kind, kind.default_template().to_string()))
            .collect();
        Self { templates }
    }

    /// Replaces individual templates by file stem. Unknown keys are ignored
    /// with a warning so a typo in an override directory is visible.
    pub fn apply_overrides(&mut self, overrides: HashMap<String, String>) {
        for (key, content) in overrides {
            match PromptKind::ALL.into_iter().find(|kind| kind.key() == key) {
                Some(kind) => {
                    self.templates.insert(kind, content);
                }
                None => warn!(template = %key, "Ignoring unknown prompt override"),
            }
        }
    }

    fn template(&self, kind: PromptKind) -> &str {
        // Every kind is inserted at construction.
        &self.templates[&kind]
    }

    /// Prompt for a direct student question.
    pub fn direct_question(&self, corpus: &str, question: &str) -> String {
        self.template(PromptKind::Direct)
            .replace("{question}", question)
            .replace("{corpus}", corpus)
    }

    /// Prompt for a direct question with external-source augmentation.
    pub fn augmented_question(&self, corpus: &str, question: &str) -> String {
        self.template(PromptKind::Augment)
            .replace("{question}", question)
            .replace("{corpus}", corpus)
    }

    /// Prompt asking the model to pose one review question on a topic.
    pub fn review_question(&self, corpus: &str, topic: &str) -> String {
        self.template(PromptKind::ReviewStart)
            .replace("{topic}", topic)
            .replace("{corpus}", corpus)
    }

    /// Prompt asking the model to grade the student's answer to the
    /// previously posed review question.
    pub fn review_correction(&self, topic: &str, last_question: &str, answer: &str) -> String {
        self.template(PromptKind::ReviewCorrect)
            .replace("{topic}", topic)
            .replace("{last_question}", last_question)
            .replace("{answer}", answer)
    }
}
