//! Sampling parameters merged into every completion request.

/// Optional sampling knobs. `None` leaves the provider default in place:
///
/// | field               | OpenAI default | Anthropic default |
/// |---------------------|----------------|-------------------|
/// | `temperature`       | 1.0            | 1.0               |
/// | `top_p`             | 1.0            | unset             |
/// | `max_tokens`        | model limit    | 1000 (client)     |
/// | `frequency_penalty` | 0.0            | not supported     |
/// | `presence_penalty`  | 0.0            | not supported     |
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplingParams {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
}

impl SamplingParams {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    /// True when any penalty is set.
    pub fn has_penalties(&self) -> bool {
        self.frequency_penalty.is_some() || self.presence_penalty.is_some()
    }
}
