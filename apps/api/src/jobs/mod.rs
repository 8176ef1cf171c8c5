// Job-description editor screen: list, select, generate, save.
// AI calls go through `ai::AiService`; persistence through `store::HrStore`.

pub mod editor;
pub mod handlers;
