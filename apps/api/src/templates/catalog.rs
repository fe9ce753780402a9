//! Built-in template catalog. Populated once at startup; never mutated.

use crate::errors::AppError;
use crate::models::template::Template;

/// (id, name, description, category, is_premium)
const BUILTIN_TEMPLATES: &[(&str, &str, &str, &str, bool)] = &[
    (
        "modern-minimal",
        "Modern Minimal",
        "Clean and modern design with plenty of white space",
        "Modern",
        false,
    ),
    (
        "professional-classic",
        "Professional Classic",
        "Traditional professional layout perfect for corporate roles",
        "Professional",
        false,
    ),
    (
        "creative-design",
        "Creative Design",
        "Eye-catching design for creative professionals",
        "Creative",
        true,
    ),
    (
        "tech-focused",
        "Tech Focused",
        "Optimized layout for software developers and engineers",
        "Tech",
        false,
    ),
    (
        "executive-premium",
        "Executive Premium",
        "Premium design for senior executives and leaders",
        "Executive",
        true,
    ),
    (
        "academic-research",
        "Academic Research",
        "Perfect for researchers and academic positions",
        "Academic",
        false,
    ),
];

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|&(id, name, description, category, is_premium)| Template {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                preview: format!("/templates/{id}.svg"),
                is_premium,
            })
            .collect();
        Self { templates }
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Result<&Template, AppError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))
    }
}
