//! Canned responses returned when no completion key is configured.

use async_trait::async_trait;

use crate::ai::AiService;
use crate::llm_client::LlmError;
use crate::models::candidate::CandidateProfile;

const DEMO_BANNER: &str = "**ДЕМО-РЕЖИМ** (Введіть OpenAI API ключ для реального AI аналізу)";

const JOB_DESCRIPTION_TEMPLATE: &str = r#"**Про компанію**
Ми - динамічна та інноваційна компанія, що спеціалізується на розробці передових IT-рішень. Наша команда складається з талановитих професіоналів, які прагнуть створювати продукти світового класу.

**Обов'язки**
• Виконання ключових функцій відповідно до специфіки позиції {position}
• Співпраця з міжфункціональними командами для досягнення бізнес-цілей
• Аналіз та оптимізація робочих процесів
• Підготовка звітів та презентацій для керівництва
• Участь у стратегічному плануванні та реалізації проектів

**Вимоги**
• Освіта: вища освіта за відповідним фахом
• Досвід роботи: від 3 років на аналогічній позиції
• Відмінне знання української та англійської мов
• Навички роботи з MS Office та професійним ПЗ
• Аналітичне мислення та увага до деталей

**Буде плюсом**
• Досвід роботи в міжнародних компаніях
• Сертифікати з відповідних галузей знань
• Знання додаткових іноземних мов
• Досвід управління командою

**Що ми пропонуємо**
• Конкурентну заробітну плату
• Гнучкий графік роботи та можливість віддаленої роботи
• Медичне страхування та соціальний пакет
• Можливості професійного розвитку та навчання
• Дружню та підтримуючу робочу атмосферу"#;

const CANDIDATE_COMPARISON: &str = r#"**Аналіз кандидатів**

**Кандидат 1 - Короткий огляд:**
• Досвід: Достатній релевантний досвід
• Комунікація: Хороші навички презентації
• М'які навички: Лідерські якості, командна робота
• Технічні навички: Профільні компетенції

**Кандидат 2 - Короткий огляд:**
• Досвід: Молодший спеціаліст з потенціалом
• Комунікація: Розвивається в публічних виступах
• М'які навички: Креативність, навчання орієнтованість
• Технічні навички: Сучасні технічні знання

**Рекомендація:**
Для отримання детального AI-аналізу кандидатів з реальними даними, будь ласка, введіть ваш OpenAI API ключ у налаштуваннях."#;

pub fn job_description(position: &str) -> String {
    format!(
        "{DEMO_BANNER}\n\n{}",
        JOB_DESCRIPTION_TEMPLATE.replace("{position}", position)
    )
}

pub fn candidate_comparison() -> String {
    format!("{DEMO_BANNER}\n\n{CANDIDATE_COMPARISON}")
}

/// Strategy used when no key is present. Never touches the network.
pub struct CannedAi;

#[async_trait]
impl AiService for CannedAi {
    fn backend(&self) -> &'static str {
        "canned"
    }

    async fn generate_job_description(&self, position: &str) -> Result<String, LlmError> {
        Ok(job_description(position))
    }

    async fn compare_candidates(
        &self,
        _position: &str,
        _first: &CandidateProfile,
        _second: &CandidateProfile,
    ) -> Result<String, LlmError> {
        Ok(candidate_comparison())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_job_description_mentions_position() {
        let text = CannedAi.generate_job_description("Бариста").await.unwrap();
        assert!(text.starts_with(DEMO_BANNER));
        assert!(text.contains("специфіки позиції Бариста"));
    }

    #[tokio::test]
    async fn test_canned_comparison_is_fixed_for_any_input() {
        let a = CandidateProfile {
            name: "A".to_string(),
            resume: "r".to_string(),
            interview: "i".to_string(),
        };
        let b = CandidateProfile {
            name: "B".to_string(),
            ..a.clone()
        };
        let first = CannedAi.compare_candidates("QA", &a, &b).await.unwrap();
        let second = CannedAi.compare_candidates("Dev", &b, &a).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, candidate_comparison());
    }
}
