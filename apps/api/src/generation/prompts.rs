// Prompt template for STAR bullet generation.

use crate::models::request::RequestContext;

/// Bullet generation prompt. Slots: {category}, {role}, {resume},
/// {job_description}, {years_of_experience}.
pub const BULLET_PROMPT_TEMPLATE: &str = "You are a Career Coach specialized in helping individuals tailor their resumes to specific job roles and categories. Consider the following details:

1. Category: '{category}'
2. Role: '{role}'
3. User's Current Resume: '{resume}'
4. Job Description: '{job_description}'
5. User's Years of Experience: {years_of_experience} years

Using this information, generate exactly 3 highly relevant, STAR-formatted bullet points that:
- Clearly quantify the user's achievements.
- Align closely with the job description.
- Highlight the user's key skills and experience that make them a strong fit for the role.

Ensure each bullet point is impactful and tailored to the role '{role}' in the '{category}' category.";

/// Renders the bullet prompt for a validated request.
pub fn build_prompt(ctx: &RequestContext) -> String {
    render_template(BULLET_PROMPT_TEMPLATE, |slot| match slot {
        "category" => Some(ctx.category.as_str()),
        "role" => Some(ctx.role.as_str()),
        "resume" => Some(ctx.resume.as_str()),
        "job_description" => Some(ctx.job_description.as_str()),
        "years_of_experience" => Some(ctx.years_of_experience.as_str()),
        _ => None,
    })
}

/// Single-pass `{slot}` substitution. Substituted text is never rescanned, so
/// braces inside user input stay literal. Unknown slots are left as written.
fn render_template<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let slot = &after[..close];
                match lookup(slot) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(slot);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RequestContext {
        RequestContext {
            category: "Data Science".to_string(),
            role: "ML Engineer".to_string(),
            job_description: "Ship recommendation models to production".to_string(),
            resume: "Built churn models at a telecom".to_string(),
            years_of_experience: "4".to_string(),
        }
    }

    #[test]
    fn test_all_slots_are_filled() {
        let prompt = build_prompt(&context());
        assert!(prompt.contains("1. Category: 'Data Science'"));
        assert!(prompt.contains("2. Role: 'ML Engineer'"));
        assert!(prompt.contains("3. User's Current Resume: 'Built churn models at a telecom'"));
        assert!(prompt.contains("4. Job Description: 'Ship recommendation models to production'"));
        assert!(prompt.contains("5. User's Years of Experience: 4 years"));
        assert!(prompt.ends_with("tailored to the role 'ML Engineer' in the 'Data Science' category."));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_prompt_asks_for_three_star_bullets() {
        let prompt = build_prompt(&context());
        assert!(prompt.starts_with("You are a Career Coach"));
        assert!(prompt.contains("generate exactly 3 highly relevant, STAR-formatted bullet points"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&context()), build_prompt(&context()));
    }

    #[test]
    fn test_slot_names_in_user_input_are_not_expanded() {
        let mut ctx = context();
        ctx.resume = "Templating with {role} and {category} placeholders".to_string();
        let prompt = build_prompt(&ctx);
        assert!(prompt.contains("'Templating with {role} and {category} placeholders'"));
    }

    #[test]
    fn test_render_template_keeps_unknown_and_unclosed_braces() {
        let rendered = render_template("a {x} {known} {open", |slot| {
            (slot == "known").then_some("yes")
        });
        assert_eq!(rendered, "a {x} yes {open");
    }
}
