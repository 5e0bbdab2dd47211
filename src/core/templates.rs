use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when producing an outreach message
///
/// Both variants indicate a packaging or configuration defect rather than
/// runtime data noise, so they surface to the caller instead of being
/// absorbed into a half-filled message.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unknown message scenario: {0}")]
    UnknownScenario(String),

    #[error("context is missing placeholder '{placeholder}' for {scenario:?} template")]
    MissingPlaceholder {
        scenario: Scenario,
        placeholder: String,
    },
}

/// Outreach scenarios with a fixed template set each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    FollowUp,
    AppointmentReminder,
    PropertyUpdate,
}

impl Scenario {
    pub fn parse(name: &str) -> Result<Self, TemplateError> {
        match name {
            "follow_up" => Ok(Self::FollowUp),
            "appointment_reminder" => Ok(Self::AppointmentReminder),
            "property_update" => Ok(Self::PropertyUpdate),
            other => Err(TemplateError::UnknownScenario(other.to_string())),
        }
    }

    /// Templates are semantically interchangeable within a scenario
    fn templates(self) -> &'static [&'static str] {
        match self {
            Self::FollowUp => &[
                "Hi {name}, I noticed you were interested in {property_type} properties. \
                 I have some new listings that might match your criteria. Would you like to see them?",
                "Hello {name}, I wanted to follow up on your interest in {property_type} properties. \
                 I have some great options available now. Would you like to schedule a viewing?",
                "Hi {name}, I hope you're still looking for {property_type} properties. \
                 I have some new listings that could be perfect for you. Would you like to learn more?",
            ],
            Self::AppointmentReminder => &[
                "Hi {name}, this is a reminder about your property viewing tomorrow at {time}. \
                 The address is {address}. Looking forward to meeting you!",
                "Hello {name}, just confirming your appointment tomorrow at {time} to view \
                 the property at {address}. See you then!",
            ],
            Self::PropertyUpdate => &[
                "Hi {name}, I wanted to let you know that {property_title} is still available. \
                 Would you like to schedule a viewing?",
                "Hello {name}, {property_title} is still on the market. \
                 Would you like to see it in person?",
            ],
        }
    }
}

/// Selects and fills message templates for outreach scenarios
///
/// Template selection is uniformly random; tests construct the generator
/// with a fixed seed to make the choice deterministic.
pub struct MessageGenerator {
    rng: Mutex<StdRng>,
}

impl MessageGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic template selection for tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Pick one of the scenario's templates and substitute every
    /// placeholder from `context`
    pub fn generate(
        &self,
        scenario: Scenario,
        context: &HashMap<String, String>,
    ) -> Result<String, TemplateError> {
        let templates = scenario.templates();
        let choice = self
            .rng
            .lock()
            .expect("rng lock poisoned")
            .gen_range(0..templates.len());

        fill_template(scenario, templates[choice], context)
    }

    /// Parse-then-generate for callers holding a scenario name
    pub fn generate_named(
        &self,
        scenario: &str,
        context: &HashMap<String, String>,
    ) -> Result<String, TemplateError> {
        self.generate(Scenario::parse(scenario)?, context)
    }
}

impl Default for MessageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Substitute `{placeholder}` occurrences from the context
fn fill_template(
    scenario: Scenario,
    template: &str,
    context: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                let value = context.get(key).ok_or_else(|| TemplateError::MissingPlaceholder {
                    scenario,
                    placeholder: key.to_string(),
                })?;
                output.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }
    output.push_str(rest);

    Ok(output)
}
