//! Content Generation Gateway: turns a generation request into a prompt,
//! makes one call to the text-generation service, and parses the reply into
//! a typed result.
//!
//! No retries and no session state: every call is independent. Any upstream
//! failure, including output that does not match the expected shape, is
//! reported as `GenerationFailed`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{
    COMPLETE_PROMPT_TEMPLATE, EXPERIENCE_PROMPT_TEMPLATE, GENERATION_SYSTEM, IMPROVE_PROMPT_TEMPLATE,
    IMPROVE_SYSTEM, SKILLS_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, CompletionRequest, LlmError, TextGenerator};

const GENERATE_MAX_TOKENS: u32 = 1500;
const GENERATE_TEMPERATURE: f32 = 0.7;
const IMPROVE_MAX_TOKENS: u32 = 800;
const IMPROVE_TEMPERATURE: f32 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Request models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Summary,
    Experience,
    Skills,
    Complete,
}

impl GenerationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::Summary => "summary",
            GenerationKind::Experience => "experience",
            GenerationKind::Skills => "skills",
            GenerationKind::Complete => "complete",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(GenerationKind::Summary),
            "experience" => Ok(GenerationKind::Experience),
            "skills" => Ok(GenerationKind::Skills),
            "complete" => Ok(GenerationKind::Complete),
            other => Err(AppError::UnknownType(other.to_string())),
        }
    }
}

/// Optional hints that shape the prompt. `experience` is the experience level,
/// not an experience entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    pub job_title: Option<String>,
    pub industry: Option<String>,
    pub experience: Option<String>,
    pub current_content: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Result models
// ────────────────────────────────────────────────────────────────────────────

/// Category label → skills, in the order the service produced them.
pub type SkillMap = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedExperience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedEducation {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBundle {
    pub summary: String,
    pub experience: Vec<GeneratedExperience>,
    pub education: Vec<GeneratedEducation>,
    pub skills: SkillMap,
    pub projects: Vec<GeneratedProject>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedContent {
    FreeText(String),
    SkillMap(SkillMap),
    CompleteBundle(CompleteBundle),
}

impl GeneratedContent {
    /// Renders the content the way clients receive it: free text verbatim,
    /// structured results as compact JSON text.
    pub fn into_text(self) -> Result<String, AppError> {
        let text = match self {
            GeneratedContent::FreeText(text) => text,
            GeneratedContent::SkillMap(skills) => serde_json::to_string(&skills)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize skills: {e}")))?,
            GeneratedContent::CompleteBundle(bundle) => serde_json::to_string(&bundle)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize bundle: {e}")))?,
        };
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ContentGateway {
    generator: Arc<dyn TextGenerator>,
}

impl ContentGateway {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate(
        &self,
        kind: GenerationKind,
        context: &GenerationContext,
    ) -> Result<GeneratedContent, AppError> {
        info!("Generating {kind} content");
        let prompt = build_prompt(kind, context);

        let text = self
            .generator
            .complete(CompletionRequest {
                system: GENERATION_SYSTEM,
                prompt: &prompt,
                max_tokens: GENERATE_MAX_TOKENS,
                temperature: GENERATE_TEMPERATURE,
            })
            .await
            .map_err(upstream_error)?;

        parse_output(kind, &text)
    }

    pub async fn improve(&self, content: &str, context: Option<&str>) -> Result<String, AppError> {
        let context_line = context
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!("Context: {c}"))
            .unwrap_or_default();
        let prompt = fill(
            IMPROVE_PROMPT_TEMPLATE,
            &[("content", content), ("context_line", context_line.as_str())],
        );

        let text = self
            .generator
            .complete(CompletionRequest {
                system: IMPROVE_SYSTEM,
                prompt: &prompt,
                max_tokens: IMPROVE_MAX_TOKENS,
                temperature: IMPROVE_TEMPERATURE,
            })
            .await
            .map_err(upstream_error)?;

        free_text(&text)
    }
}

fn upstream_error(error: LlmError) -> AppError {
    match error {
        LlmError::MissingApiKey => AppError::Config(error.to_string()),
        other => AppError::GenerationFailed(other.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building
// ────────────────────────────────────────────────────────────────────────────

fn hint<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn labeled_line(label: &str, value: &Option<String>) -> String {
    match hint(value, "") {
        "" => String::new(),
        v => format!("{label}: {v}"),
    }
}

fn build_prompt(kind: GenerationKind, context: &GenerationContext) -> String {
    let experience_line = labeled_line("Experience level", &context.experience);
    match kind {
        GenerationKind::Summary => {
            let current_content_line =
                labeled_line("Current summary to improve", &context.current_content);
            fill(
                SUMMARY_PROMPT_TEMPLATE,
                &[
                    ("job_title", hint(&context.job_title, "professional")),
                    ("industry", hint(&context.industry, "relevant")),
                    ("experience_line", experience_line.as_str()),
                    ("current_content_line", current_content_line.as_str()),
                ],
            )
        }
        GenerationKind::Experience => fill(
            EXPERIENCE_PROMPT_TEMPLATE,
            &[
                ("current_content", hint(&context.current_content, "")),
                ("job_title", hint(&context.job_title, "")),
                ("industry", hint(&context.industry, "")),
            ],
        ),
        GenerationKind::Skills => fill(
            SKILLS_PROMPT_TEMPLATE,
            &[
                ("job_title", hint(&context.job_title, "professional")),
                ("industry", hint(&context.industry, "the industry")),
                ("experience_line", experience_line.as_str()),
                ("json_only", JSON_ONLY_INSTRUCTION),
            ],
        ),
        GenerationKind::Complete => fill(
            COMPLETE_PROMPT_TEMPLATE,
            &[
                ("job_title", hint(&context.job_title, "professional")),
                ("industry", hint(&context.industry, "General")),
                ("experience", hint(&context.experience, "Mid-level")),
                ("json_only", JSON_ONLY_INSTRUCTION),
            ],
        ),
    }
}

/// Single-pass `{name}` substitution. Substituted values are never rescanned,
/// so user text containing braces is inserted verbatim. Unknown placeholders
/// are left as-is.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Output parsing
// ────────────────────────────────────────────────────────────────────────────

fn parse_output(kind: GenerationKind, text: &str) -> Result<GeneratedContent, AppError> {
    match kind {
        GenerationKind::Summary | GenerationKind::Experience => {
            free_text(text).map(GeneratedContent::FreeText)
        }
        GenerationKind::Skills => {
            let skills: SkillMap = parse_json(kind, text)?;
            if skills.is_empty() {
                return Err(AppError::GenerationFailed(
                    "skills response contained no categories".to_string(),
                ));
            }
            Ok(GeneratedContent::SkillMap(skills))
        }
        GenerationKind::Complete => {
            let bundle: CompleteBundle = parse_json(kind, text)?;
            if bundle.summary.trim().is_empty() {
                return Err(AppError::GenerationFailed(
                    "complete response contained an empty summary".to_string(),
                ));
            }
            Ok(GeneratedContent::CompleteBundle(bundle))
        }
    }
}

fn free_text(text: &str) -> Result<String, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::GenerationFailed(
            LlmError::EmptyContent.to_string(),
        ));
    }
    Ok(text.to_string())
}

fn parse_json<T: DeserializeOwned>(kind: GenerationKind, text: &str) -> Result<T, AppError> {
    serde_json::from_str(strip_json_fences(text)).map_err(|e| {
        warn!("Malformed {kind} response from generation service: {e}");
        AppError::GenerationFailed(format!("malformed {kind} response: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::{StubGenerator, StubReply};

    fn gateway(stub: StubGenerator) -> (ContentGateway, Arc<StubGenerator>) {
        let stub = Arc::new(stub);
        (ContentGateway::new(stub.clone()), stub)
    }

    fn backend_context() -> GenerationContext {
        GenerationContext {
            job_title: Some("Backend Engineer".to_string()),
            industry: Some("Fintech".to_string()),
            experience: Some("Senior".to_string()),
            current_content: None,
        }
    }

    #[test]
    fn test_kind_parses_closed_set() {
        assert_eq!("summary".parse::<GenerationKind>().unwrap(), GenerationKind::Summary);
        assert_eq!("complete".parse::<GenerationKind>().unwrap(), GenerationKind::Complete);
    }

    #[test]
    fn test_kind_outside_closed_set_is_unknown_type() {
        let err = "cover_letter".parse::<GenerationKind>().unwrap_err();
        assert!(matches!(err, AppError::UnknownType(kind) if kind == "cover_letter"));
        assert!("Summary".parse::<GenerationKind>().is_err());
    }

    #[test]
    fn test_fill_substitutes_once_and_keeps_unknown_braces() {
        let out = fill(
            "Role: {role} {\"k\": 1} {missing}",
            &[("role", "{missing} engineer")],
        );
        assert_eq!(out, "Role: {missing} engineer {\"k\": 1} {missing}");
    }

    #[test]
    fn test_summary_prompt_uses_defaults_when_hints_absent() {
        let prompt = build_prompt(GenerationKind::Summary, &GenerationContext::default());
        assert!(prompt.contains("for a professional in the relevant industry"));
        assert!(!prompt.contains("Experience level"));
        assert!(!prompt.contains("{"));
    }

    #[test]
    fn test_complete_prompt_defaults_to_mid_level() {
        let prompt = build_prompt(GenerationKind::Complete, &GenerationContext::default());
        assert!(prompt.contains("Industry: General"));
        assert!(prompt.contains("Experience Level: Mid-level"));
        assert!(prompt.contains("valid JSON only"));
    }

    #[tokio::test]
    async fn test_summary_returns_free_text() {
        let (gateway, stub) = gateway(StubGenerator::replying(
            "  Results-driven backend engineer with 8 years in payments.  ",
        ));
        let content = gateway
            .generate(GenerationKind::Summary, &backend_context())
            .await
            .unwrap();

        assert_eq!(
            content,
            GeneratedContent::FreeText(
                "Results-driven backend engineer with 8 years in payments.".to_string()
            )
        );
        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Backend Engineer"));
        assert!(prompts[0].contains("Experience level: Senior"));
    }

    #[tokio::test]
    async fn test_skills_parses_fenced_json_preserving_order() {
        let (gateway, _) = gateway(StubGenerator::replying(
            "```json\n{\"Technical Skills\": [\"Rust\", \"SQL\"], \"Soft Skills\": [\"Mentoring\"]}\n```",
        ));
        let content = gateway
            .generate(GenerationKind::Skills, &backend_context())
            .await
            .unwrap();

        let GeneratedContent::SkillMap(skills) = content else {
            panic!("expected a skill map");
        };
        let categories: Vec<&str> = skills.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["Technical Skills", "Soft Skills"]);
        assert_eq!(skills["Technical Skills"], vec!["Rust", "SQL"]);
    }

    #[tokio::test]
    async fn test_skills_with_wrong_shape_is_generation_failed() {
        let (gateway, _) = gateway(StubGenerator::replying(
            "{\"Technical Skills\": \"Rust, SQL\"}",
        ));
        let result = gateway
            .generate(GenerationKind::Skills, &backend_context())
            .await;
        assert!(matches!(result, Err(AppError::GenerationFailed(_))));
    }

    #[tokio::test]
    async fn test_complete_parses_bundle() {
        let reply = serde_json::json!({
            "summary": "Backend engineer focused on reliability.",
            "experience": [{
                "company": "Ledgerly",
                "position": "Senior Engineer",
                "startDate": "2020-02",
                "location": "Remote",
                "description": "• Cut settlement latency by 35%"
            }],
            "education": [{
                "institution": "State University",
                "degree": "BSc",
                "field": "Computer Science",
                "startDate": "2012-09",
                "endDate": "2016-06"
            }],
            "skills": { "Technical Skills": ["Rust", "Kafka"] },
            "projects": [{
                "name": "ledger-sim",
                "description": "Double-entry simulator",
                "technologies": ["Rust"]
            }]
        });
        let (gateway, _) = gateway(StubGenerator::replying(&reply.to_string()));
        let content = gateway
            .generate(GenerationKind::Complete, &backend_context())
            .await
            .unwrap();

        let GeneratedContent::CompleteBundle(bundle) = content.clone() else {
            panic!("expected a complete bundle");
        };
        assert_eq!(bundle.experience[0].company, "Ledgerly");
        assert_eq!(bundle.experience[0].end_date, None);
        assert_eq!(bundle.education[0].end_date.as_deref(), Some("2016-06"));
        assert_eq!(bundle.projects.len(), 1);

        let text = content.into_text().unwrap();
        let round: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(round["experience"][0]["startDate"], "2020-02");
    }

    #[tokio::test]
    async fn test_complete_missing_section_is_generation_failed() {
        let (gateway, _) = gateway(StubGenerator::replying(
            "{\"summary\": \"Only a summary\"}",
        ));
        let result = gateway
            .generate(GenerationKind::Complete, &backend_context())
            .await;
        assert!(matches!(result, Err(AppError::GenerationFailed(_))));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_generation_failed_with_reason() {
        let (gateway, _) = gateway(StubGenerator::new(StubReply::Api(
            529,
            "Overloaded".to_string(),
        )));
        let err = gateway
            .generate(GenerationKind::Summary, &backend_context())
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::GenerationFailed(reason) if reason.contains("Overloaded")));
    }

    #[tokio::test]
    async fn test_timeout_is_generation_failed() {
        let (gateway, _) = gateway(StubGenerator::new(StubReply::Timeout));
        let result = gateway.improve("Led migrations", None).await;
        assert!(matches!(result, Err(AppError::GenerationFailed(_))));
    }

    #[tokio::test]
    async fn test_missing_credential_is_config_error() {
        let (gateway, _) = gateway(StubGenerator::new(StubReply::MissingKey));
        let result = gateway
            .generate(GenerationKind::Summary, &backend_context())
            .await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_improve_includes_context_and_returns_revision() {
        let (gateway, stub) = gateway(StubGenerator::replying(
            "Led migration of 40 services to Kubernetes, cutting deploy time by 60%.",
        ));
        let revised = gateway
            .improve("Worked on k8s migration", Some("Platform team"))
            .await
            .unwrap();

        assert!(revised.starts_with("Led migration"));
        let prompt = &stub.prompts()[0];
        assert!(prompt.contains("Worked on k8s migration"));
        assert!(prompt.contains("Context: Platform team"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_generation_failed() {
        let (gateway, _) = gateway(StubGenerator::replying("   "));
        let result = gateway.improve("Did things", None).await;
        assert!(matches!(result, Err(AppError::GenerationFailed(_))));
    }
}
