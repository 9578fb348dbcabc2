//! The function deployed by the pipeline: greets the caller by name.

use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct GreetingEvent {
    #[serde(default)]
    pub name: Option<String>,
}

pub fn greeting(event: &GreetingEvent) -> String {
    match event.name.as_deref() {
        Some(name) if !name.is_empty() => format!("Hello, {name}!"),
        _ => "Hello, World!".to_string(),
    }
}
