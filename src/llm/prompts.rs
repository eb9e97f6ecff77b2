//! Prompt frame for the healthcare assistant

/// Role instruction prepended to every generation request
pub const ROLE_INSTRUCTION: &str = "YOU ARE A HEALTHCARE CHATBOT, SO REPLY ACCORDINGLY";

/// Fixed example exchanges establishing the assistant's identity answers
pub const IDENTITY_EXAMPLES: &[(&str, &str)] = &[
    (
        "who are you",
        "I am MediAssist, an AI healthcare assistant here to answer your general health questions.",
    ),
    (
        "who made you",
        "I was created by the MediAssist team to help people with everyday health information.",
    ),
];

/// Build the ordered prompt parts for a single user input
///
/// The frame is: role instruction, the identity examples as
/// `input:`/`output:` pairs, the live input, and an empty `output:` cue
/// signalling the model to continue from there.
pub fn build_prompt_parts(input: &str) -> Vec<String> {
    let mut parts = Vec::with_capacity(IDENTITY_EXAMPLES.len() * 2 + 3);

    parts.push(ROLE_INSTRUCTION.to_string());

    for (question, answer) in IDENTITY_EXAMPLES {
        parts.push(format!("input: {}", question));
        parts.push(format!("output: {}", answer));
    }

    parts.push(format!("input: {}", input));
    parts.push("output: ".to_string());

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_frame_order() {
        let parts = build_prompt_parts("what is a fever");

        assert_eq!(parts[0], ROLE_INSTRUCTION);
        assert_eq!(parts[parts.len() - 2], "input: what is a fever");
        assert_eq!(parts[parts.len() - 1], "output: ");
    }

    #[test]
    fn test_prompt_includes_identity_examples() {
        let parts = build_prompt_parts("hello");

        assert!(parts.iter().any(|p| p == "input: who are you"));
        assert!(parts.iter().any(|p| p.starts_with("output: I am MediAssist")));
    }

    #[test]
    fn test_prompt_part_count() {
        let parts = build_prompt_parts("x");
        // Instruction + (input, output) per example + live input + cue
        assert_eq!(parts.len(), IDENTITY_EXAMPLES.len() * 2 + 3);
    }
}
