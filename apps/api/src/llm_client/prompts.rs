// Shared prompt constants.
// The AI service builds its task prompts in `ai::prompts`; this file holds
// the cross-cutting system message.

/// System message sent with every completion call.
pub const HR_EXPERT_SYSTEM: &str = "Ви - експерт з підбору персоналу. \
    Ваша відповідь має бути на українській мові, структурованою та професійною.";
