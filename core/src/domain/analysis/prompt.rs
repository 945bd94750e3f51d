use crate::domain::analysis::value_objects::ExtractedText;

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are a food safety analyst who reviews packaged-food ingredient lists against FSSAI guidance. You always answer with a single JSON object and nothing else.";

pub const OCR_SYSTEM_PROMPT: &str = "You are a meticulous OCR engine. Transcribe every piece of text visible on the food package exactly as printed, preserving line breaks. Do not summarise, translate, or add commentary.";

pub const OCR_USER_PROMPT: &str =
    "Extract all text from this food package image, especially the ingredient list.";

const ANALYSIS_PROMPT_TEMPLATE: &str = r#"The following text was extracted by OCR from the label of a packaged food product. It may be noisy or incomplete.

--- BEGIN LABEL TEXT ---
{extracted_text}
--- END LABEL TEXT ---

Identify the ingredients, decide whether the product is healthy, and suggest healthier alternative products available in India.

Respond with exactly one JSON object of this shape:
{
  "is_healthy": "Healthy" | "Moderate" | "Unhealthy",
  "unhealthy_ingredients": { "<ingredient>": "<relevant FSSAI regulation or limit, or an empty string>" },
  "health_impacts": { "<ingredient>": "<health impact and the timeframe over which it appears>" },
  "alternatives": [
    { "name": "<product>", "brand": "<brand>", "category": "<category>", "purchase_link": "<url>" }
  ]
}

Rules:
- Use the ingredient names as they appear on the label.
- Every ingredient in "unhealthy_ingredients" must also appear in "health_impacts".
- Use empty objects or an empty array when nothing applies.
- Do not wrap the JSON in markdown code fences and do not add any text before or after it."#;

/// Interpolates OCR output into the analysis instruction template.
pub fn build_analysis_prompt(text: &ExtractedText) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{extracted_text}", text.as_str().trim())
}
