//! Result rendering

use anyhow::Result;

use collab_agents::WorkflowResult;

/// Render results as per-agent cards: name, thoughts, response.
pub fn render_cards(results: &[WorkflowResult]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(&format!("=== {} ===\n", result.agent));
        out.push_str(&format!("Thoughts: {}\n", result.output.thoughts));
        out.push_str(&format!("Response: {}\n\n", result.output.response));
    }
    out
}

/// Render results as a JSON array.
pub fn render_json(results: &[WorkflowResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[cfg(test)]
mod tests {
    use collab_agents::{RecordOrigin, StructuredRecord};

    use super::*;

    fn sample() -> Vec<WorkflowResult> {
        vec![WorkflowResult {
            agent: "Researcher".to_string(),
            output: StructuredRecord {
                thoughts: "thinking".to_string(),
                response: "answer".to_string(),
                origin: RecordOrigin::Parsed,
            },
        }]
    }

    #[test]
    fn test_render_cards() {
        let text = render_cards(&sample());
        assert!(text.contains("=== Researcher ==="));
        assert!(text.contains("Thoughts: thinking"));
        assert!(text.contains("Response: answer"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample()).unwrap();
        assert!(json.contains("\"agent\": \"Researcher\""));
        assert!(json.contains("\"origin\": \"parsed\""));
    }
}
