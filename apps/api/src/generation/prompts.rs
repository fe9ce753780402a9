// All LLM prompt constants for the Generation module.
// Placeholders in `{braces}` are filled by `gateway::build_prompt`.

/// System prompt for every `generate` call.
pub const GENERATION_SYSTEM: &str = "You are a professional resume writer and career coach. \
    Generate high-quality, ATS-friendly resume content that highlights achievements \
    and uses strong action verbs. Always be professional and specific.";

/// System prompt for `improve`.
pub const IMPROVE_SYSTEM: &str = "You are a professional resume editor. \
    Improve the given content by making it more impactful, professional, and ATS-friendly. \
    Use strong action verbs and focus on achievements. \
    Respond with the improved content only.";

pub const SUMMARY_PROMPT_TEMPLATE: &str = "\
Write a professional resume summary for a {job_title} in the {industry} industry.
{experience_line}
{current_content_line}

Write a compelling 2-3 sentence summary that highlights key strengths and career objectives. \
Be specific and impactful.";

pub const EXPERIENCE_PROMPT_TEMPLATE: &str = "\
Improve this work experience description for a resume:
{current_content}

Job Title: {job_title}
Industry: {industry}

Rewrite this to be more impactful using action verbs, quantifiable achievements, and relevant \
keywords. Format as bullet points. Focus on results and impact.";

pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Generate a comprehensive skills list for a {job_title} position in {industry}.
{experience_line}

Organize skills into categories (Technical Skills, Soft Skills, Tools & Technologies, etc.).
Return a JSON object with categories as keys and arrays of skills as values.

Example format:
{
  "Technical Skills": ["Skill 1", "Skill 2"],
  "Soft Skills": ["Leadership", "Communication"],
  "Tools & Technologies": ["Tool 1", "Tool 2"]
}

{json_only}"#;

pub const COMPLETE_PROMPT_TEMPLATE: &str = r#"Create complete professional resume content for a {job_title} position.
Industry: {industry}
Experience Level: {experience}

Generate realistic but professional content including:
1. Professional summary (2-3 sentences)
2. 2-3 work experiences with bullet points showing achievements
3. Education background
4. Skills organized by category
5. 1-2 relevant projects

Make it industry-specific and achievement-focused. Use action verbs and quantifiable results where possible.
Return JSON with the following structure:
{
  "summary": "Professional summary text",
  "experience": [
    {
      "company": "Company Name",
      "position": "Job Title",
      "startDate": "YYYY-MM",
      "endDate": "YYYY-MM",
      "location": "City, State",
      "description": "• Achievement 1\n• Achievement 2\n• Achievement 3"
    }
  ],
  "education": [
    {
      "institution": "University Name",
      "degree": "Bachelor's/Master's",
      "field": "Field of Study",
      "startDate": "YYYY-MM",
      "endDate": "YYYY-MM"
    }
  ],
  "skills": {
    "Technical Skills": ["Skill 1", "Skill 2"],
    "Soft Skills": ["Skill 1", "Skill 2"]
  },
  "projects": [
    {
      "name": "Project Name",
      "description": "Project description with impact",
      "technologies": ["Tech 1", "Tech 2"]
    }
  ]
}

{json_only}"#;

pub const IMPROVE_PROMPT_TEMPLATE: &str = "\
Improve this resume content: {content}
{context_line}";
