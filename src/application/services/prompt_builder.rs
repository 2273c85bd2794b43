use serde_json::json;

use crate::application::ports::ToolDefinition;

pub const PAGE_PLACEHOLDER: &str = "{page}";
pub const FORMAT_INSTRUCTIONS_PLACEHOLDER: &str = "{format_instructions}";
pub const NO_PROJECTS_SENTINEL: &str = "No crane projects found";
pub const PAGE_ANALYSIS_TOOL: &str = "save_page_analysis";

pub const DEFAULT_SYSTEM_CONTEXT: &str = "You are an analyst screening trade-press pages for \
crane-related projects. Answer only in the format you are asked for.";

const SELECTION_CRITERIA: &str = "\
- Articles about purchasing new cranes, port expansions that require new cranes, or \
modernization of cranes are crane-related projects.
- Articles discussing significant expansions of ports should be included, also if no \
mention of crane purchases is made.
- Modernization and upgrade projects are about the mechanical components of cranes or \
digitization within cranes. Articles about, for instance, tires, wireless networks or \
fuel types should not be included.
- When in doubt, include the article.";

pub const DEFAULT_CLASSIFICATION_TEMPLATE: &str = "\
Given a page from a document containing various articles, analyze the content and \
identify sections that are related to crane projects. The page may contain multiple \
articles or parts of articles.

{criteria}

Answer with exactly these three labeled lines:
Summary: <what the page discusses; if it holds several articles, summarize each>
Include or Exclude: <Include if any section discusses a crane-related project, otherwise Exclude>
Reason: <brief explanation, required when the page is excluded>

page content:
```
{page}
```";

pub const DEFAULT_STRUCTURED_CLASSIFICATION_TEMPLATE: &str = "\
Given a page from a document containing various articles, analyze the content and \
identify sections that are related to crane projects. The page may contain multiple \
articles or parts of articles.

{criteria}

After analyzing the page you have to call the function 'save_page_analysis'; all \
parameters are required.

{format_instructions}

page content:
```
{page}
```";

pub const DEFAULT_EXTRACTION_TEMPLATE: &str = "\
From the page below, list every crane project that is mentioned. Write one project per \
line in the form:
<number> <type> cranes in <location>
for example: 4 RTG cranes in Long Beach
Do not add numbering, bullets or any other text. If the page mentions no crane projects, \
reply with exactly: No crane projects found

page content:
```
{page}
```";

/// Prompt text sent to the model. Every template is replaceable through configuration;
/// the built-in defaults carry the crane-project selection criteria.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system_context: String,
    pub classification: String,
    pub structured_classification: String,
    pub extraction: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system_context: DEFAULT_SYSTEM_CONTEXT.to_string(),
            classification: DEFAULT_CLASSIFICATION_TEMPLATE
                .replace("{criteria}", SELECTION_CRITERIA),
            structured_classification: DEFAULT_STRUCTURED_CLASSIFICATION_TEMPLATE
                .replace("{criteria}", SELECTION_CRITERIA),
            extraction: DEFAULT_EXTRACTION_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn classification_prompt(&self, text: &str) -> String {
        render(&self.classification, text)
    }

    pub fn structured_classification_prompt(&self, text: &str) -> String {
        // Substitute instructions first; page text must not be scanned for placeholders.
        let instructions = format_instructions();
        render(
            &self
                .structured_classification
                .replace(FORMAT_INSTRUCTIONS_PLACEHOLDER, &instructions),
            text,
        )
    }

    pub fn extraction_prompt(&self, text: &str) -> String {
        render(&self.extraction, text)
    }

    /// Names of templates that cannot receive the page text.
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        [
            ("classification", &self.classification),
            ("structured_classification", &self.structured_classification),
            ("extraction", &self.extraction),
        ]
        .into_iter()
        .filter(|(_, template)| !template.contains(PAGE_PLACEHOLDER))
        .map(|(name, _)| name)
        .collect()
    }
}

fn render(template: &str, text: &str) -> String {
    template.replace(PAGE_PLACEHOLDER, text)
}

fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "Summary of the page"
            },
            "include_or_exclude": {
                "type": "string",
                "enum": ["Include", "Exclude"],
                "description": "Include or Exclude"
            },
            "reason": {
                "type": "string",
                "description": "Reason for the decision"
            }
        },
        "required": ["summary", "include_or_exclude", "reason"]
    })
}

/// Machine-readable description of the expected arguments, embedded in the structured
/// prompt so models without native tool support can still follow it.
pub fn format_instructions() -> String {
    let schema = serde_json::to_string_pretty(&analysis_schema()).unwrap_or_default();
    format!(
        "The arguments must be a JSON object that conforms to this JSON schema:\n```\n{schema}\n```"
    )
}

pub fn page_analysis_tool() -> ToolDefinition {
    ToolDefinition {
        name: PAGE_ANALYSIS_TOOL.to_string(),
        description: "Save the page analysis as a row of the CSV report.".to_string(),
        parameters: analysis_schema(),
    }
}
