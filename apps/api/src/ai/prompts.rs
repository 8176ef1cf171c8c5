// Task prompts for the AI service. Placeholders are `{position}` and the
// `{c1_*}` / `{c2_*}` candidate fields; replace them before sending.

use crate::models::candidate::CandidateProfile;

pub const JOB_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Створіть детальний опис вакансії українською мовою для позиції "{position}".

Включіть наступні розділи:
- Про компанію (загальний опис)
- Основні обов'язки (5-7 пунктів)
- Обов'язкові вимоги (освіта, досвід, навички)
- Буде плюсом (додаткові переваги)
- Що ми пропонуємо (умови роботи, бенефіти)

Зробіть опис привабливим та професійним."#;

pub const COMPARISON_PROMPT_TEMPLATE: &str = r#"Проаналізуйте двох кандидатів на позицію "{position}" та надайте детальне порівняння:

**КАНДИДАТ 1: {c1_name}**
Резюме: {c1_resume}

Інтерв'ю: {c1_interview}

**КАНДИДАТ 2: {c2_name}**
Резюме: {c2_resume}

Інтерв'ю: {c2_interview}

Надайте структурований аналіз включаючи:

1. **Короткий огляд кожного кандидата** (досвід, ключові навички, сильні сторони)

2. **Детальне порівняння за критеріями:**
   - Релевантний досвід роботи
   - Технічні навички
   - М'які навички (комунікація, лідерство, адаптивність)
   - Мотивація та культурна відповідність
   - Потенціал для зростання

3. **SWOT-аналіз для кожного кандидата**

4. **Фінальна рекомендація** з обґрунтуванням вибору

5. **Ризики та мітигації** для обраного кандидата

Будьте об'єктивними та професійними у своєму аналізі."#;

pub fn job_description_prompt(position: &str) -> String {
    JOB_DESCRIPTION_PROMPT_TEMPLATE.replace("{position}", position)
}

/// Every placeholder is filled in one pass over the template, so text inside
/// a resume is never scanned for placeholders.
pub fn comparison_prompt(
    position: &str,
    first: &CandidateProfile,
    second: &CandidateProfile,
) -> String {
    fill_once(
        COMPARISON_PROMPT_TEMPLATE,
        &[
            ("{position}", position),
            ("{c1_name}", first.name.as_str()),
            ("{c1_resume}", first.resume.as_str()),
            ("{c1_interview}", first.interview.as_str()),
            ("{c2_name}", second.name.as_str()),
            ("{c2_resume}", second.resume.as_str()),
            ("{c2_interview}", second.interview.as_str()),
        ],
    )
}

/// Replaces each placeholder at most once, scanning only template text.
fn fill_once(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = pairs
            .iter()
            .filter_map(|(ph, value)| rest.find(ph).map(|at| (at, *ph, *value)))
            .min_by_key(|(at, _, _)| *at);
        match next {
            Some((at, ph, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + ph.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
