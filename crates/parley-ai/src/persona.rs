//! System prompt generation from a named assistant persona.

/// Describes the assistant for the system turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub personality: String,
    pub expertise: String,
    /// Rendered verbatim, normally `YYYY-MM-DD`.
    pub current_date: String,
}

const GUIDELINES: &[&str] = &[
    "Provide accurate and concise information",
    "If you don't know something, admit it instead of making up information",
    "Format responses in a clear and readable way",
    "Use examples to illustrate complex concepts",
    "Respond in a conversational tone",
];

impl Persona {
    pub fn new(
        name: impl Into<String>,
        personality: impl Into<String>,
        expertise: impl Into<String>,
        current_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            personality: personality.into(),
            expertise: expertise.into(),
            current_date: current_date.into(),
        }
    }

    /// Render the full system prompt.
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!(
            "You are {}, a {} AI assistant with expertise in {}.\n\nGuidelines:\n",
            self.name, self.personality, self.expertise
        );
        for line in GUIDELINES {
            prompt.push_str("- ");
            prompt.push_str(line);
            prompt.push('\n');
        }
        prompt.push_str("\nCurrent date: ");
        prompt.push_str(&self.current_date);
        prompt
    }
}
