/// A landing-page shortcut that opens the chat with a ready-made question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub prompt: &'static str,
}

pub const PREDEFINED_PROMPTS: [Prompt; 3] = [
    Prompt {
        title: "Best career options after Class 10",
        prompt: "What are the best career options available for me after completing Class 10?",
    },
    Prompt {
        title: "How to choose a stream",
        prompt: "How should I choose between Science, Commerce, and Arts streams after Class 10?",
    },
    Prompt {
        title: "Vocational courses after Class 10",
        prompt: "What vocational courses can I pursue after Class 10?",
    },
];
