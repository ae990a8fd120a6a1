//! Instruction template
//!
//! Turns a concept plus option bag into the instruction text sent to
//! provider-direct adapters. The aggregator builds its own instruction and only
//! receives the raw concept and options.

use crate::types::GenerationOptions;

/// System instruction shared by every provider-direct adapter.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert cinematographer and prompt engineer \
for text-to-video models. Given a concept and production preferences, write one detailed \
video generation prompt. Respond with a single JSON object only, no markdown fences, using \
the keys: \"title\", \"prompt\", \"style\", \"camera\" (with \"style\" and \"movement\"), \
\"pacing\", \"effects\", \"scenes\" (an array of objects with \"description\" and \
\"duration_seconds\"), \"negative_prompt\".";

/// Instruction pair for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: String,
    pub user: String,
}

impl PromptTemplate {
    pub fn build(concept: &str, options: &GenerationOptions) -> Self {
        Self {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: render_user_message(concept, options),
        }
    }
}

fn render_user_message(concept: &str, options: &GenerationOptions) -> String {
    let mut lines = vec![format!("Concept: {}", concept.trim())];

    if !options.style.is_auto() {
        lines.push(format!("Visual style: {}", options.style));
    }
    push_directive(
        &mut lines,
        "Camera style",
        options.camera_style.as_str(),
        options.camera_style.is_auto(),
        options.camera_style.is_off(),
        "no particular camera rig",
    );
    push_directive(
        &mut lines,
        "Camera movement",
        options.camera_direction.as_str(),
        options.camera_direction.is_auto(),
        options.camera_direction.is_off(),
        "a locked-off camera with no movement",
    );
    push_directive(
        &mut lines,
        "Pacing",
        options.pacing.as_str(),
        options.pacing.is_auto(),
        options.pacing.is_off(),
        "no deliberate pacing treatment",
    );
    push_directive(
        &mut lines,
        "Special effects",
        options.special_effects.as_str(),
        options.special_effects.is_auto(),
        options.special_effects.is_off(),
        "no special effects",
    );

    match options.prompt_length.target_words() {
        Some(words) => lines.push(format!(
            "Length: the \"prompt\" field should be approximately {words} words"
        )),
        None => lines.push(format!(
            "Length: {} (the \"prompt\" field may be as long as needed)",
            options.prompt_length
        )),
    }

    let elements = options.custom_element_list();
    if !elements.is_empty() {
        lines.push(format!("Must include: {}", elements.join(", ")));
    }

    lines.join("\n")
}

fn push_directive(
    lines: &mut Vec<String>,
    label: &str,
    value: &str,
    is_auto: bool,
    is_off: bool,
    off_text: &str,
) {
    if is_auto {
        return;
    }
    if is_off {
        lines.push(format!("{label}: {off_text}"));
    } else {
        lines.push(format!("{label}: {value}"));
    }
}
